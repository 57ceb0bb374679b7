use super::IUserRepo;
use agenda_domain::{User, ID};
use sqlx::{types::Uuid, FromRow, PgPool};

pub struct PostgresUserRepo {
    pool: PgPool,
}

impl PostgresUserRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct UserRaw {
    user_uid: Uuid,
    email: Option<String>,
    full_name: Option<String>,
}

impl From<UserRaw> for User {
    fn from(raw: UserRaw) -> Self {
        Self {
            id: raw.user_uid.into(),
            email: raw.email,
            full_name: raw.full_name,
        }
    }
}

#[async_trait::async_trait]
impl IUserRepo for PostgresUserRepo {
    async fn insert(&self, user: &User) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO users(user_uid, email, full_name)
            VALUES($1, $2, $3)
            "#,
        )
        .bind(user.id.inner_ref())
        .bind(&user.email)
        .bind(&user.full_name)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find(&self, user_id: &ID) -> Option<User> {
        sqlx::query_as::<_, UserRaw>(
            r#"
            SELECT * FROM users AS u
            WHERE u.user_uid = $1
            "#,
        )
        .bind(user_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .ok()
        .flatten()
        .map(|u| u.into())
    }

    async fn find_many(&self, user_ids: &[ID]) -> anyhow::Result<Vec<User>> {
        let user_ids = user_ids
            .iter()
            .map(|id| *id.inner_ref())
            .collect::<Vec<_>>();

        let users = sqlx::query_as::<_, UserRaw>(
            r#"
            SELECT * FROM users AS u
            WHERE u.user_uid = ANY($1)
            "#,
        )
        .bind(&user_ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(users.into_iter().map(|u| u.into()).collect())
    }
}
