mod inmemory;
mod postgres;

use agenda_domain::{Reminder, ID};
pub use inmemory::InMemoryReminderRepo;
pub use postgres::PostgresReminderRepo;

#[async_trait::async_trait]
pub trait IReminderRepo: Send + Sync {
    async fn insert(&self, reminder: &Reminder) -> anyhow::Result<()>;
    async fn find(&self, reminder_id: &ID) -> Option<Reminder>;
    /// Unsent `Reminder`s scheduled at or before `now`, oldest first
    async fn find_due(&self, now: i64) -> anyhow::Result<Vec<Reminder>>;
    /// Atomically takes ownership of an unsent `Reminder`. Returns `false` when
    /// it is already sent or claimed at or after `stale_before`.
    async fn claim(&self, reminder_id: &ID, now: i64, stale_before: i64) -> anyhow::Result<bool>;
    /// Gives up a claim so that the next run picks the `Reminder` up again
    async fn release(&self, reminder_id: &ID) -> anyhow::Result<()>;
    async fn mark_sent(&self, reminder_id: &ID) -> anyhow::Result<()>;
}
