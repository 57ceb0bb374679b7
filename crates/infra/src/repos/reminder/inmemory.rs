use super::IReminderRepo;
use crate::repos::shared::inmemory_repo::*;
use agenda_domain::{Reminder, ID};
use std::sync::Mutex;

pub struct InMemoryReminderRepo {
    reminders: Mutex<Vec<Reminder>>,
}

impl InMemoryReminderRepo {
    pub fn new() -> Self {
        Self {
            reminders: Mutex::new(vec![]),
        }
    }
}

#[async_trait::async_trait]
impl IReminderRepo for InMemoryReminderRepo {
    async fn insert(&self, reminder: &Reminder) -> anyhow::Result<()> {
        insert(reminder, &self.reminders);
        Ok(())
    }

    async fn find(&self, reminder_id: &ID) -> Option<Reminder> {
        find(reminder_id, &self.reminders)
    }

    async fn find_due(&self, now: i64) -> anyhow::Result<Vec<Reminder>> {
        let mut reminders = find_by(&self.reminders, |r| r.is_due(now));
        reminders.sort_by(|r1, r2| {
            r1.scheduled_for
                .cmp(&r2.scheduled_for)
                .then_with(|| r1.id.inner_ref().cmp(r2.id.inner_ref()))
        });
        Ok(reminders)
    }

    async fn claim(&self, reminder_id: &ID, now: i64, stale_before: i64) -> anyhow::Result<bool> {
        let claimed = update_many(
            &self.reminders,
            |r| r.id == *reminder_id && r.is_claimable(stale_before),
            |r| r.claimed_at = Some(now),
        );
        Ok(claimed > 0)
    }

    async fn release(&self, reminder_id: &ID) -> anyhow::Result<()> {
        update_many(
            &self.reminders,
            |r| r.id == *reminder_id && !r.sent,
            |r| r.claimed_at = None,
        );
        Ok(())
    }

    async fn mark_sent(&self, reminder_id: &ID) -> anyhow::Result<()> {
        let updated = update_many(
            &self.reminders,
            |r| r.id == *reminder_id,
            |r| r.sent = true,
        );
        if updated == 0 {
            anyhow::bail!("Reminder: {} was not found", reminder_id);
        }
        Ok(())
    }
}
