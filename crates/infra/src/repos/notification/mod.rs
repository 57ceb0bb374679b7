mod inmemory;
mod postgres;

use agenda_domain::{Notification, ID};
pub use inmemory::InMemoryNotificationRepo;
pub use postgres::PostgresNotificationRepo;

#[async_trait::async_trait]
pub trait INotificationRepo: Send + Sync {
    async fn insert(&self, notification: &Notification) -> anyhow::Result<()>;
    async fn find(&self, notification_id: &ID) -> Option<Notification>;
    /// The latest `Notification`s of the `User`, newest first
    async fn find_by_user(&self, user_id: &ID, limit: usize) -> anyhow::Result<Vec<Notification>>;
    async fn count_unread(&self, user_id: &ID) -> anyhow::Result<i64>;
    /// Returns the updated `Notification`, or `None` if it does not exist or
    /// belongs to someone else
    async fn mark_read(&self, user_id: &ID, notification_id: &ID)
        -> anyhow::Result<Option<Notification>>;
    /// Returns the number of `Notification`s that were unread
    async fn mark_all_read(&self, user_id: &ID) -> anyhow::Result<u64>;
}
