use agenda_domain::{Notification, ID};
use agenda_infra::{INotificationRepo, ISys};

pub struct StaticTimeSys(pub i64);
impl ISys for StaticTimeSys {
    fn get_timestamp_millis(&self) -> i64 {
        self.0
    }
}

/// Notification storage that is down
pub struct FailingNotificationRepo;

#[async_trait::async_trait]
impl INotificationRepo for FailingNotificationRepo {
    async fn insert(&self, _notification: &Notification) -> anyhow::Result<()> {
        Err(anyhow::anyhow!("Notification insert rejected"))
    }
    async fn find(&self, _notification_id: &ID) -> Option<Notification> {
        None
    }
    async fn find_by_user(&self, _user_id: &ID, _limit: usize) -> anyhow::Result<Vec<Notification>> {
        Err(anyhow::anyhow!("Notification storage unavailable"))
    }
    async fn count_unread(&self, _user_id: &ID) -> anyhow::Result<i64> {
        Err(anyhow::anyhow!("Notification storage unavailable"))
    }
    async fn mark_read(
        &self,
        _user_id: &ID,
        _notification_id: &ID,
    ) -> anyhow::Result<Option<Notification>> {
        Err(anyhow::anyhow!("Notification storage unavailable"))
    }
    async fn mark_all_read(&self, _user_id: &ID) -> anyhow::Result<u64> {
        Err(anyhow::anyhow!("Notification storage unavailable"))
    }
}
