use super::IAppointmentRepo;
use crate::repos::shared::inmemory_repo::*;
use agenda_domain::{Appointment, ID};
use std::sync::Mutex;

pub struct InMemoryAppointmentRepo {
    appointments: Mutex<Vec<Appointment>>,
}

impl InMemoryAppointmentRepo {
    pub fn new() -> Self {
        Self {
            appointments: Mutex::new(vec![]),
        }
    }
}

#[async_trait::async_trait]
impl IAppointmentRepo for InMemoryAppointmentRepo {
    async fn insert(&self, appointment: &Appointment) -> anyhow::Result<()> {
        insert(appointment, &self.appointments);
        Ok(())
    }

    async fn find(&self, appointment_id: &ID) -> Option<Appointment> {
        find(appointment_id, &self.appointments)
    }

    async fn find_many(&self, appointment_ids: &[ID]) -> anyhow::Result<Vec<Appointment>> {
        Ok(find_many(appointment_ids, &self.appointments))
    }
}
