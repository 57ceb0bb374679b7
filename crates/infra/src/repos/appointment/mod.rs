mod inmemory;
mod postgres;

use agenda_domain::{Appointment, ID};
pub use inmemory::InMemoryAppointmentRepo;
pub use postgres::PostgresAppointmentRepo;

#[async_trait::async_trait]
pub trait IAppointmentRepo: Send + Sync {
    async fn insert(&self, appointment: &Appointment) -> anyhow::Result<()>;
    async fn find(&self, appointment_id: &ID) -> Option<Appointment>;
    async fn find_many(&self, appointment_ids: &[ID]) -> anyhow::Result<Vec<Appointment>>;
}
