use agenda_domain::{Notification, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NotificationDTO {
    pub id: ID,
    pub user_id: ID,
    pub title: String,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub related_id: Option<ID>,
    pub is_read: bool,
    pub created: i64,
}

impl NotificationDTO {
    pub fn new(notification: Notification) -> Self {
        Self {
            id: notification.id,
            user_id: notification.user_id,
            title: notification.title,
            message: notification.message,
            kind: notification.kind.to_string(),
            related_id: notification.related_id,
            is_read: notification.is_read,
            created: notification.created,
        }
    }
}
