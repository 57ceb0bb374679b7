use super::IAppointmentRepo;
use crate::repos::shared::timestamps::to_datetime;
use agenda_domain::{Appointment, ID};
use chrono::{DateTime, Utc};
use sqlx::{types::Uuid, FromRow, PgPool};

pub struct PostgresAppointmentRepo {
    pool: PgPool,
}

impl PostgresAppointmentRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct AppointmentRaw {
    appointment_uid: Uuid,
    user_uid: Uuid,
    service_name: String,
    starts_at: DateTime<Utc>,
}

impl From<AppointmentRaw> for Appointment {
    fn from(raw: AppointmentRaw) -> Self {
        Self {
            id: raw.appointment_uid.into(),
            user_id: raw.user_uid.into(),
            service_name: raw.service_name,
            starts_at: raw.starts_at.timestamp_millis(),
        }
    }
}

#[async_trait::async_trait]
impl IAppointmentRepo for PostgresAppointmentRepo {
    async fn insert(&self, appointment: &Appointment) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO appointments(appointment_uid, user_uid, service_name, starts_at)
            VALUES($1, $2, $3, $4)
            "#,
        )
        .bind(appointment.id.inner_ref())
        .bind(appointment.user_id.inner_ref())
        .bind(&appointment.service_name)
        .bind(to_datetime(appointment.starts_at)?)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find(&self, appointment_id: &ID) -> Option<Appointment> {
        sqlx::query_as::<_, AppointmentRaw>(
            r#"
            SELECT * FROM appointments AS a
            WHERE a.appointment_uid = $1
            "#,
        )
        .bind(appointment_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .ok()
        .flatten()
        .map(|a| a.into())
    }

    async fn find_many(&self, appointment_ids: &[ID]) -> anyhow::Result<Vec<Appointment>> {
        let appointment_ids = appointment_ids
            .iter()
            .map(|id| *id.inner_ref())
            .collect::<Vec<_>>();

        let appointments = sqlx::query_as::<_, AppointmentRaw>(
            r#"
            SELECT * FROM appointments AS a
            WHERE a.appointment_uid = ANY($1)
            "#,
        )
        .bind(&appointment_ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(appointments.into_iter().map(|a| a.into()).collect())
    }
}
