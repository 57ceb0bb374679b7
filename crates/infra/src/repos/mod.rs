mod appointment;
mod notification;
mod reminder;
mod shared;
mod user;

pub use appointment::IAppointmentRepo;
use appointment::{InMemoryAppointmentRepo, PostgresAppointmentRepo};
pub use notification::INotificationRepo;
use notification::{InMemoryNotificationRepo, PostgresNotificationRepo};
pub use reminder::IReminderRepo;
use reminder::{InMemoryReminderRepo, PostgresReminderRepo};
use sqlx::{migrate::MigrateError, postgres::PgPoolOptions, PgPool};
use std::sync::Arc;
use tracing::info;
pub use user::IUserRepo;
use user::{InMemoryUserRepo, PostgresUserRepo};

#[derive(Clone)]
pub struct Repos {
    pub reminders: Arc<dyn IReminderRepo>,
    pub notifications: Arc<dyn INotificationRepo>,
    pub appointments: Arc<dyn IAppointmentRepo>,
    pub users: Arc<dyn IUserRepo>,
}

impl Repos {
    pub async fn create_postgres(connection_string: &str) -> anyhow::Result<Self> {
        info!("DB CHECKING CONNECTION ...");
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(connection_string)
            .await?;
        info!("DB CHECKING CONNECTION ... [done]");

        migrate(&pool).await?;

        Ok(Self {
            reminders: Arc::new(PostgresReminderRepo::new(pool.clone())),
            notifications: Arc::new(PostgresNotificationRepo::new(pool.clone())),
            appointments: Arc::new(PostgresAppointmentRepo::new(pool.clone())),
            users: Arc::new(PostgresUserRepo::new(pool)),
        })
    }

    pub fn create_inmemory() -> Self {
        Self {
            reminders: Arc::new(InMemoryReminderRepo::new()),
            notifications: Arc::new(InMemoryNotificationRepo::new()),
            appointments: Arc::new(InMemoryAppointmentRepo::new()),
            users: Arc::new(InMemoryUserRepo::new()),
        }
    }
}

pub(crate) async fn migrate(pool: &PgPool) -> Result<(), MigrateError> {
    info!("DB RUNNING MIGRATIONS ...");
    sqlx::migrate!().run(pool).await?;
    info!("DB RUNNING MIGRATIONS ... [done]");
    Ok(())
}

/// Postgres backed repos for tests, `None` unless `DATABASE_URL` is set
#[cfg(test)]
pub(crate) async fn postgres_test_repos() -> Option<Repos> {
    let connection_string = std::env::var("DATABASE_URL").ok()?;
    let repos = Repos::create_postgres(&connection_string)
        .await
        .expect("To connect to postgres");
    Some(repos)
}
