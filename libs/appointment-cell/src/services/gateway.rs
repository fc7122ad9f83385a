use async_trait::async_trait;
use chrono::NaiveDate;

use crate::models::{Appointment, AppointmentError, AppointmentId, AppointmentStatus};

/// The remote appointment service as seen by the view.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AppointmentGateway: Send + Sync {
    async fn get_appointments(
        &self,
        date: Option<NaiveDate>,
        status: Option<String>,
    ) -> Result<Vec<Appointment>, AppointmentError>;

    async fn update_appointment_status(
        &self,
        id: AppointmentId,
        next_status: AppointmentStatus,
    ) -> Result<Appointment, AppointmentError>;
}
