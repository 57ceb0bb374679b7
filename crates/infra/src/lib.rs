mod config;
mod repos;
mod system;

pub use config::Config;
pub use repos::{IAppointmentRepo, INotificationRepo, IReminderRepo, IUserRepo, Repos};
use sqlx::{migrate::MigrateError, postgres::PgPoolOptions};
use std::sync::Arc;
pub use system::ISys;
use system::RealSys;
use tracing::warn;

#[derive(Clone)]
pub struct AgendaContext {
    pub repos: Repos,
    pub config: Config,
    pub sys: Arc<dyn ISys>,
}

impl AgendaContext {
    /// Connects to the storage given by the `Config`
    pub async fn create(config: Config) -> anyhow::Result<Self> {
        let repos = match &config.database_url {
            Some(connection_string) => Repos::create_postgres(connection_string).await?,
            None => {
                warn!("DATABASE_URL is not set. Falling back to in-memory storage, nothing will be persisted.");
                Repos::create_inmemory()
            }
        };

        Ok(Self {
            repos,
            config,
            sys: Arc::new(RealSys {}),
        })
    }

    pub fn create_inmemory(config: Config) -> Self {
        Self {
            repos: Repos::create_inmemory(),
            config,
            sys: Arc::new(RealSys {}),
        }
    }
}

/// Will setup the infrastructure context given the environment
pub async fn setup_context() -> anyhow::Result<AgendaContext> {
    AgendaContext::create(Config::new()).await
}

/// Applies the pending migrations without starting anything else
pub async fn run_migration(connection_string: &str) -> Result<(), MigrateError> {
    let pool = PgPoolOptions::new()
        .max_connections(1)
        .connect(connection_string)
        .await?;

    repos::migrate(&pool).await
}
