mod base;
mod notification;
mod reminder;
mod status;

pub(crate) use base::BaseClient;
pub use base::{APIError, APIResponse};
pub use agenda_api_structs::dtos::*;
pub use agenda_domain::ID;
use notification::NotificationClient;
pub use notification::MarkNotificationReadInput;
use reminder::ReminderClient;
use status::StatusClient;
use std::sync::Arc;

/// Agenda Server SDK
///
/// The SDK contains methods for interacting with the Agenda server API.
#[derive(Clone)]
pub struct AgendaSDK {
    pub notification: NotificationClient,
    pub reminder: ReminderClient,
    pub status: StatusClient,
}

impl AgendaSDK {
    pub fn new(address: String) -> Self {
        let base = Arc::new(BaseClient::new(address));
        let notification = NotificationClient::new(base.clone());
        let reminder = ReminderClient::new(base.clone());
        let status = StatusClient::new(base);

        Self {
            notification,
            reminder,
            status,
        }
    }
}
