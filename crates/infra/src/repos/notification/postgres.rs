use super::INotificationRepo;
use crate::repos::shared::timestamps::to_datetime;
use agenda_domain::{Notification, NotificationKind, ID};
use chrono::{DateTime, Utc};
use sqlx::{types::Uuid, FromRow, PgPool};

pub struct PostgresNotificationRepo {
    pool: PgPool,
}

impl PostgresNotificationRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct NotificationRaw {
    notification_uid: Uuid,
    user_uid: Uuid,
    title: String,
    message: String,
    #[sqlx(rename = "type")]
    kind: String,
    related_uid: Option<Uuid>,
    is_read: bool,
    created_at: DateTime<Utc>,
}

impl From<NotificationRaw> for Notification {
    fn from(raw: NotificationRaw) -> Self {
        Self {
            id: raw.notification_uid.into(),
            user_id: raw.user_uid.into(),
            title: raw.title,
            message: raw.message,
            kind: NotificationKind::parse(&raw.kind),
            related_id: raw.related_uid.map(|id| id.into()),
            is_read: raw.is_read,
            created: raw.created_at.timestamp_millis(),
        }
    }
}

#[derive(Debug, FromRow)]
struct CountRaw {
    count: i64,
}

#[async_trait::async_trait]
impl INotificationRepo for PostgresNotificationRepo {
    async fn insert(&self, notification: &Notification) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO notifications
            (notification_uid, user_uid, title, message, type, related_uid, is_read, created_at)
            VALUES($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(notification.id.inner_ref())
        .bind(notification.user_id.inner_ref())
        .bind(&notification.title)
        .bind(&notification.message)
        .bind(notification.kind.to_string())
        .bind(notification.related_id.as_ref().map(|id| id.inner_ref()))
        .bind(notification.is_read)
        .bind(to_datetime(notification.created)?)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find(&self, notification_id: &ID) -> Option<Notification> {
        sqlx::query_as::<_, NotificationRaw>(
            r#"
            SELECT * FROM notifications AS n
            WHERE n.notification_uid = $1
            "#,
        )
        .bind(notification_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .ok()
        .flatten()
        .map(|n| n.into())
    }

    async fn find_by_user(&self, user_id: &ID, limit: usize) -> anyhow::Result<Vec<Notification>> {
        let notifications = sqlx::query_as::<_, NotificationRaw>(
            r#"
            SELECT * FROM notifications AS n
            WHERE n.user_uid = $1
            ORDER BY n.created_at DESC
            LIMIT $2
            "#,
        )
        .bind(user_id.inner_ref())
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await?;

        Ok(notifications.into_iter().map(|n| n.into()).collect())
    }

    async fn count_unread(&self, user_id: &ID) -> anyhow::Result<i64> {
        let res = sqlx::query_as::<_, CountRaw>(
            r#"
            SELECT COUNT(*) AS count FROM notifications AS n
            WHERE n.user_uid = $1 AND n.is_read = false
            "#,
        )
        .bind(user_id.inner_ref())
        .fetch_one(&self.pool)
        .await?;

        Ok(res.count)
    }

    async fn mark_read(
        &self,
        user_id: &ID,
        notification_id: &ID,
    ) -> anyhow::Result<Option<Notification>> {
        let notification = sqlx::query_as::<_, NotificationRaw>(
            r#"
            UPDATE notifications
            SET is_read = true
            WHERE notification_uid = $1 AND user_uid = $2
            RETURNING *
            "#,
        )
        .bind(notification_id.inner_ref())
        .bind(user_id.inner_ref())
        .fetch_optional(&self.pool)
        .await?;

        Ok(notification.map(|n| n.into()))
    }

    async fn mark_all_read(&self, user_id: &ID) -> anyhow::Result<u64> {
        let res = sqlx::query(
            r#"
            UPDATE notifications
            SET is_read = true
            WHERE user_uid = $1 AND is_read = false
            "#,
        )
        .bind(user_id.inner_ref())
        .execute(&self.pool)
        .await?;

        Ok(res.rows_affected())
    }
}
