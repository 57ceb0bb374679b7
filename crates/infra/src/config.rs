use tracing::warn;

#[derive(Debug, Clone)]
pub struct Config {
    /// Port for the application to run on
    pub port: usize,
    /// Postgres connection string. The in-memory repositories are used
    /// when this is not set.
    pub database_url: Option<String>,
    /// How often the in-process job runs the reminder dispatcher.
    /// Zero disables the job and leaves dispatching to an external trigger.
    pub send_reminders_interval_secs: u64,
    /// Millis after which a claimed but unsent `Reminder` may be claimed
    /// again. A dispatcher that crashed mid run leaves such claims behind.
    pub reminder_claim_timeout: i64,
    /// Maximum number of `Notification`s returned to the dashboard
    pub notifications_query_limit: usize,
}

impl Config {
    pub fn new() -> Self {
        let port = parse_env_or("PORT", 5000);
        let send_reminders_interval_secs = parse_env_or("SEND_REMINDERS_INTERVAL_SECS", 60);
        let database_url = std::env::var("DATABASE_URL").ok();

        Self {
            port,
            database_url,
            send_reminders_interval_secs,
            reminder_claim_timeout: 1000 * 60 * 5, // 5 minutes
            notifications_query_limit: 20,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_env_or<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + std::fmt::Display,
{
    match std::env::var(key) {
        Ok(value) => match value.parse::<T>() {
            Ok(parsed) => parsed,
            Err(_) => {
                warn!(
                    "The given {}: {} is not valid, falling back to the default: {}.",
                    key, value, default
                );
                default
            }
        },
        Err(_) => default,
    }
}
