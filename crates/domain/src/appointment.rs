use crate::shared::entity::{Entity, ID};

/// A booked `Appointment` for a `User`. Appointments are created by the
/// dashboard and are only read here.
#[derive(Debug, Clone)]
pub struct Appointment {
    pub id: ID,
    pub user_id: ID,
    /// Name of the booked service, e.g. "Haircut"
    pub service_name: String,
    /// Start of the appointment in millis. Reminders carry their own
    /// `scheduled_for`, so dispatching does not read this.
    pub starts_at: i64,
}

impl Appointment {
    pub fn new(user_id: ID, service_name: impl Into<String>, starts_at: i64) -> Self {
        Self {
            id: Default::default(),
            user_id,
            service_name: service_name.into(),
            starts_at,
        }
    }
}

impl Entity for Appointment {
    fn id(&self) -> &ID {
        &self.id
    }
}
