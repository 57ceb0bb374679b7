use crate::shared::entity::{Entity, ID};

/// The business owner that appointments, reminders and notifications
/// belong to. Read only from the point of view of this service.
///
/// Dispatching a `Reminder` only requires the `User` to exist. The contact
/// fields mirror the stored record and are not sent anywhere.
#[derive(Debug, Clone)]
pub struct User {
    pub id: ID,
    pub email: Option<String>,
    pub full_name: Option<String>,
}

impl User {
    pub fn new(email: Option<String>) -> Self {
        Self {
            id: Default::default(),
            email,
            full_name: None,
        }
    }
}

impl Entity for User {
    fn id(&self) -> &ID {
        &self.id
    }
}
