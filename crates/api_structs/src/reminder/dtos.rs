use agenda_domain::ID;
use serde::{Deserialize, Serialize};

/// Outcome of dispatching a single `Reminder`
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct ReminderResultDTO {
    pub id: ID,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notification_id: Option<ID>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
