use crate::dtos::NotificationDTO;
use agenda_domain::{Notification, ID};
use serde::{Deserialize, Serialize};

pub mod get_notifications {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub user_id: ID,
    }

    #[derive(Deserialize, Serialize)]
    pub struct APIResponse {
        pub notifications: Vec<NotificationDTO>,
        pub unread_count: i64,
    }

    impl APIResponse {
        pub fn new(notifications: Vec<Notification>, unread_count: i64) -> Self {
            Self {
                notifications: notifications.into_iter().map(NotificationDTO::new).collect(),
                unread_count,
            }
        }
    }
}

pub mod mark_notification_read {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub user_id: ID,
        pub notification_id: ID,
    }

    #[derive(Deserialize, Serialize)]
    pub struct APIResponse {
        pub notification: NotificationDTO,
    }

    impl APIResponse {
        pub fn new(notification: Notification) -> Self {
            Self {
                notification: NotificationDTO::new(notification),
            }
        }
    }
}

pub mod mark_all_notifications_read {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub user_id: ID,
    }

    #[derive(Deserialize, Serialize)]
    pub struct APIResponse {
        pub updated: u64,
    }
}
