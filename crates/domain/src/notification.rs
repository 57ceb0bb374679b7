use crate::{
    appointment::Appointment,
    reminder::Reminder,
    shared::entity::{Entity, ID},
};
use std::fmt::Display;

pub const REMINDER_NOTIFICATION_TITLE: &str = "Appointment Reminder";

/// A user facing message shown in the dashboard notification list.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: ID,
    pub user_id: ID,
    pub title: String,
    pub message: String,
    pub kind: NotificationKind,
    /// The entity the `Notification` is about, e.g. the `Appointment`
    pub related_id: Option<ID>,
    pub is_read: bool,
    pub created: i64,
}

impl Notification {
    /// The `Notification` produced when a due `Reminder` is dispatched
    pub fn for_reminder(reminder: &Reminder, appointment: &Appointment, created: i64) -> Self {
        let message = format!(
            "You have an appointment {} for {}.",
            reminder.kind().lead_time_phrase(),
            appointment.service_name
        );
        Self {
            id: Default::default(),
            user_id: reminder.user_id.clone(),
            title: REMINDER_NOTIFICATION_TITLE.to_string(),
            message,
            kind: NotificationKind::Reminder,
            related_id: Some(appointment.id.clone()),
            is_read: false,
            created,
        }
    }
}

impl Entity for Notification {
    fn id(&self) -> &ID {
        &self.id
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationKind {
    Reminder,
    /// Types written by other parts of the dashboard
    Other(String),
}

impl NotificationKind {
    pub fn parse(kind: &str) -> Self {
        match kind {
            "reminder" => Self::Reminder,
            other => Self::Other(other.to_string()),
        }
    }
}

impl Display for NotificationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Reminder => write!(f, "reminder"),
            Self::Other(other) => write!(f, "{}", other),
        }
    }
}
