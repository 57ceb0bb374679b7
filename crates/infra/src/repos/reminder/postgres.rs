use super::IReminderRepo;
use crate::repos::shared::timestamps::to_datetime;
use agenda_domain::{Reminder, ID};
use chrono::{DateTime, Utc};
use sqlx::{types::Uuid, FromRow, PgPool};

pub struct PostgresReminderRepo {
    pool: PgPool,
}

impl PostgresReminderRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ReminderRaw {
    reminder_uid: Uuid,
    appointment_uid: Uuid,
    user_uid: Uuid,
    reminder_type: String,
    scheduled_for: DateTime<Utc>,
    sent: bool,
    claimed_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

impl From<ReminderRaw> for Reminder {
    fn from(raw: ReminderRaw) -> Self {
        Self {
            id: raw.reminder_uid.into(),
            appointment_id: raw.appointment_uid.into(),
            user_id: raw.user_uid.into(),
            reminder_type: raw.reminder_type,
            scheduled_for: raw.scheduled_for.timestamp_millis(),
            sent: raw.sent,
            claimed_at: raw.claimed_at.map(|ts| ts.timestamp_millis()),
            created: raw.created_at.timestamp_millis(),
        }
    }
}

#[async_trait::async_trait]
impl IReminderRepo for PostgresReminderRepo {
    async fn insert(&self, reminder: &Reminder) -> anyhow::Result<()> {
        let claimed_at = match reminder.claimed_at {
            Some(ts) => Some(to_datetime(ts)?),
            None => None,
        };
        sqlx::query(
            r#"
            INSERT INTO appointment_reminders
            (reminder_uid, appointment_uid, user_uid, reminder_type, scheduled_for, sent, claimed_at, created_at)
            VALUES($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(reminder.id.inner_ref())
        .bind(reminder.appointment_id.inner_ref())
        .bind(reminder.user_id.inner_ref())
        .bind(&reminder.reminder_type)
        .bind(to_datetime(reminder.scheduled_for)?)
        .bind(reminder.sent)
        .bind(claimed_at)
        .bind(to_datetime(reminder.created)?)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find(&self, reminder_id: &ID) -> Option<Reminder> {
        sqlx::query_as::<_, ReminderRaw>(
            r#"
            SELECT * FROM appointment_reminders AS r
            WHERE r.reminder_uid = $1
            "#,
        )
        .bind(reminder_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .ok()
        .flatten()
        .map(|r| r.into())
    }

    async fn find_due(&self, now: i64) -> anyhow::Result<Vec<Reminder>> {
        let reminders = sqlx::query_as::<_, ReminderRaw>(
            r#"
            SELECT * FROM appointment_reminders AS r
            WHERE r.sent = false AND r.scheduled_for <= $1
            ORDER BY r.scheduled_for, r.reminder_uid
            "#,
        )
        .bind(to_datetime(now)?)
        .fetch_all(&self.pool)
        .await?;

        Ok(reminders.into_iter().map(|r| r.into()).collect())
    }

    async fn claim(&self, reminder_id: &ID, now: i64, stale_before: i64) -> anyhow::Result<bool> {
        let res = sqlx::query(
            r#"
            UPDATE appointment_reminders
            SET claimed_at = $2
            WHERE reminder_uid = $1 AND
            sent = false AND
            (claimed_at IS NULL OR claimed_at < $3)
            "#,
        )
        .bind(reminder_id.inner_ref())
        .bind(to_datetime(now)?)
        .bind(to_datetime(stale_before)?)
        .execute(&self.pool)
        .await?;

        Ok(res.rows_affected() == 1)
    }

    async fn release(&self, reminder_id: &ID) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE appointment_reminders
            SET claimed_at = NULL
            WHERE reminder_uid = $1 AND sent = false
            "#,
        )
        .bind(reminder_id.inner_ref())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn mark_sent(&self, reminder_id: &ID) -> anyhow::Result<()> {
        let res = sqlx::query(
            r#"
            UPDATE appointment_reminders
            SET sent = true
            WHERE reminder_uid = $1
            "#,
        )
        .bind(reminder_id.inner_ref())
        .execute(&self.pool)
        .await?;

        if res.rows_affected() == 0 {
            anyhow::bail!("Reminder: {} was not found", reminder_id);
        }
        Ok(())
    }
}
