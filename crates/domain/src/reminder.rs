use crate::shared::entity::{Entity, ID};
use std::fmt::Display;

/// A `Reminder` represents a specific time before an `Appointment` at which
/// the owning `User` should get a `Notification`.
#[derive(Debug, Clone, PartialEq)]
pub struct Reminder {
    pub id: ID,
    /// The `Appointment` this `Reminder` is associated with
    pub appointment_id: ID,
    /// The `User` that should receive the `Notification`
    pub user_id: ID,
    /// Raw reminder type as stored, e.g. "24h" or "1h".
    /// Use `Reminder::kind` to interpret it.
    pub reminder_type: String,
    /// The timestamp in millis from which the `Reminder` is due
    pub scheduled_for: i64,
    pub sent: bool,
    /// Set while a dispatcher is processing this `Reminder`. A claim older
    /// than the configured claim timeout is considered abandoned.
    pub claimed_at: Option<i64>,
    pub created: i64,
}

impl Reminder {
    pub fn new(
        appointment_id: ID,
        user_id: ID,
        kind: ReminderKind,
        scheduled_for: i64,
        created: i64,
    ) -> Self {
        Self {
            id: Default::default(),
            appointment_id,
            user_id,
            reminder_type: kind.to_string(),
            scheduled_for,
            sent: false,
            claimed_at: None,
            created,
        }
    }

    pub fn kind(&self) -> ReminderKind {
        ReminderKind::parse(&self.reminder_type)
    }

    pub fn is_due(&self, now: i64) -> bool {
        !self.sent && self.scheduled_for <= now
    }

    /// Whether a dispatcher may take ownership of this `Reminder`.
    /// Claims made before `stale_before` are treated as abandoned.
    pub fn is_claimable(&self, stale_before: i64) -> bool {
        if self.sent {
            return false;
        }
        match self.claimed_at {
            Some(claimed_at) => claimed_at < stale_before,
            None => true,
        }
    }
}

impl Entity for Reminder {
    fn id(&self) -> &ID {
        &self.id
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReminderKind {
    /// "24h", sent the day before the `Appointment`
    DayBefore,
    /// "1h", sent an hour before the `Appointment`
    HourBefore,
    Unknown(String),
}

impl ReminderKind {
    pub fn parse(reminder_type: &str) -> Self {
        match reminder_type {
            "24h" => Self::DayBefore,
            "1h" => Self::HourBefore,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// How far away the `Appointment` is, as phrased in the `Notification`.
    /// Anything that is not a day-before reminder reads as the 1 hour case.
    pub fn lead_time_phrase(&self) -> &'static str {
        match self {
            Self::DayBefore => "tomorrow",
            Self::HourBefore | Self::Unknown(_) => "in 1 hour",
        }
    }
}

impl Display for ReminderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DayBefore => write!(f, "24h"),
            Self::HourBefore => write!(f, "1h"),
            Self::Unknown(other) => write!(f, "{}", other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reminder(scheduled_for: i64) -> Reminder {
        Reminder::new(
            Default::default(),
            Default::default(),
            ReminderKind::DayBefore,
            scheduled_for,
            0,
        )
    }

    #[test]
    fn parses_reminder_kinds() {
        assert_eq!(ReminderKind::parse("24h"), ReminderKind::DayBefore);
        assert_eq!(ReminderKind::parse("1h"), ReminderKind::HourBefore);
        assert_eq!(
            ReminderKind::parse("30m"),
            ReminderKind::Unknown("30m".into())
        );
        assert_eq!(ReminderKind::parse("30m").to_string(), "30m");
    }

    #[test]
    fn unknown_kinds_read_as_one_hour() {
        assert_eq!(ReminderKind::DayBefore.lead_time_phrase(), "tomorrow");
        assert_eq!(ReminderKind::HourBefore.lead_time_phrase(), "in 1 hour");
        assert_eq!(
            ReminderKind::Unknown("2d".into()).lead_time_phrase(),
            "in 1 hour"
        );
    }

    #[test]
    fn due_only_when_unsent_and_scheduled() {
        let mut r = reminder(100);
        assert!(r.is_due(100));
        assert!(r.is_due(101));
        assert!(!r.is_due(99));
        r.sent = true;
        assert!(!r.is_due(101));
    }

    #[test]
    fn claims_expire() {
        let mut r = reminder(100);
        assert!(r.is_claimable(0));
        r.claimed_at = Some(50);
        assert!(!r.is_claimable(50));
        assert!(r.is_claimable(51));
        r.sent = true;
        assert!(!r.is_claimable(51));
    }
}
