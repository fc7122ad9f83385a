// libs/appointment-cell/src/services/store.rs
use async_trait::async_trait;
use chrono::{Duration, Local, NaiveDate, NaiveTime};
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::models::{
    Appointment, AppointmentError, AppointmentId, AppointmentQuery, AppointmentStatus,
};
use crate::services::gateway::AppointmentGateway;

/// In-memory backing store for the mock appointment service.
pub struct InMemoryAppointmentStore {
    appointments: RwLock<Vec<Appointment>>,
}

impl InMemoryAppointmentStore {
    pub fn new(appointments: Vec<Appointment>) -> Self {
        Self {
            appointments: RwLock::new(appointments),
        }
    }

    /// Store seeded with the demo schedule around the current local date.
    pub fn seeded() -> Self {
        Self::new(seed_appointments(Local::now().date_naive()))
    }

    pub async fn list(&self, query: &AppointmentQuery) -> Vec<Appointment> {
        let appointments = self.appointments.read().await;

        let date = non_empty(&query.date);
        let status = non_empty(&query.status).map(str::to_lowercase);
        let doctor = non_empty(&query.doctor_name).map(str::to_lowercase);
        let patient = non_empty(&query.patient_name).map(str::to_lowercase);

        let results: Vec<Appointment> = appointments
            .iter()
            .filter(|appt| date.map_or(true, |d| appt.date.format("%Y-%m-%d").to_string() == d))
            .filter(|appt| {
                status
                    .as_deref()
                    .map_or(true, |s| appt.status.as_str().to_lowercase() == s)
            })
            .filter(|appt| {
                doctor
                    .as_deref()
                    .map_or(true, |needle| appt.doctor_name.to_lowercase().contains(needle))
            })
            .filter(|appt| {
                patient
                    .as_deref()
                    .map_or(true, |needle| appt.name.to_lowercase().contains(needle))
            })
            .cloned()
            .collect();

        debug!("Listed {} of {} appointments", results.len(), appointments.len());
        results
    }

    pub async fn update_status(
        &self,
        id: AppointmentId,
        status: AppointmentStatus,
    ) -> Result<Appointment, AppointmentError> {
        let mut appointments = self.appointments.write().await;

        let appointment = appointments
            .iter_mut()
            .find(|appt| appt.id == id)
            .ok_or(AppointmentError::NotFound(id))?;

        info!("Appointment {} status {} -> {}", id, appointment.status, status);
        appointment.status = status;

        Ok(appointment.clone())
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

#[async_trait]
impl AppointmentGateway for InMemoryAppointmentStore {
    async fn get_appointments(
        &self,
        date: Option<NaiveDate>,
        status: Option<String>,
    ) -> Result<Vec<Appointment>, AppointmentError> {
        let query = AppointmentQuery {
            date: date.map(|d| d.format("%Y-%m-%d").to_string()),
            status,
            ..AppointmentQuery::default()
        };
        Ok(self.list(&query).await)
    }

    async fn update_appointment_status(
        &self,
        id: AppointmentId,
        next_status: AppointmentStatus,
    ) -> Result<Appointment, AppointmentError> {
        self.update_status(id, next_status).await
    }
}

// ==============================================================================
// SEED DATA
// ==============================================================================

/// (day offset, patient, time, duration, doctor, status, mode)
const SEED: [(i64, &str, (u32, u32), u32, &str, &str, &str); 10] = [
    (-5, "Alice Johnson", (9, 0), 30, "Dr. Smith", "Confirmed", "In-Person"),
    (-3, "Brian Lee", (10, 0), 45, "Dr. Patel", "Cancelled", "Online"),
    (0, "Carmen Diaz", (9, 30), 20, "Dr. Smith", "Upcoming", "In-Person"),
    (0, "Dmitri Ivanov", (11, 0), 30, "Dr. Gomez", "Scheduled", "Online"),
    (0, "Ella Chen", (16, 15), 60, "Dr. Patel", "Confirmed", "In-Person"),
    (1, "Farid Khan", (8, 0), 30, "Dr. Smith", "Upcoming", "Online"),
    (1, "Grace Park", (14, 0), 30, "Dr. Gomez", "Scheduled", "In-Person"),
    (2, "Hector Ruiz", (13, 0), 45, "Dr. Patel", "Upcoming", "Online"),
    (3, "Isabelle Moreau", (15, 30), 30, "Dr. Smith", "Confirmed", "In-Person"),
    (4, "Jamal Wright", (9, 15), 30, "Dr. Gomez", "Scheduled", "Online"),
];

pub fn seed_appointments(today: NaiveDate) -> Vec<Appointment> {
    SEED.iter()
        .zip(1..)
        .map(|(&(offset, name, (hour, minute), duration, doctor, status, mode), id)| Appointment {
            id,
            name: name.to_string(),
            doctor_name: doctor.to_string(),
            mode: mode.to_string(),
            date: today + Duration::days(offset),
            time: NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or(NaiveTime::MIN),
            duration,
            status: AppointmentStatus::from(status),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 12, 15).unwrap()
    }

    fn store() -> InMemoryAppointmentStore {
        InMemoryAppointmentStore::new(seed_appointments(today()))
    }

    #[test]
    fn test_seed_layout() {
        let seed = seed_appointments(today());
        assert_eq!(seed.len(), 10);
        assert_eq!(seed[0].id, 1);
        assert_eq!(seed[0].date, NaiveDate::from_ymd_opt(2025, 12, 10).unwrap());
        assert_eq!(seed.iter().filter(|a| a.date == today()).count(), 3);
        assert_eq!(seed[9].date, NaiveDate::from_ymd_opt(2025, 12, 19).unwrap());
    }

    #[tokio::test]
    async fn test_list_filters_by_date() {
        let query = AppointmentQuery {
            date: Some("2025-12-15".to_string()),
            ..AppointmentQuery::default()
        };

        let ids: Vec<u64> = store().list(&query).await.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![3, 4, 5]);
    }

    #[tokio::test]
    async fn test_list_filters_are_case_insensitive() {
        let store = store();

        let confirmed = store.list(&AppointmentQuery {
            status: Some("confirmed".to_string()),
            ..AppointmentQuery::default()
        }).await;
        assert_eq!(confirmed.iter().map(|a| a.id).collect::<Vec<_>>(), vec![1, 5, 9]);

        let by_doctor = store.list(&AppointmentQuery {
            doctor_name: Some("GOMEZ".to_string()),
            ..AppointmentQuery::default()
        }).await;
        assert_eq!(by_doctor.len(), 3);

        let by_patient = store.list(&AppointmentQuery {
            patient_name: Some("park".to_string()),
            ..AppointmentQuery::default()
        }).await;
        assert_eq!(by_patient.len(), 1);
        assert_eq!(by_patient[0].name, "Grace Park");
    }

    #[tokio::test]
    async fn test_blank_filters_are_ignored() {
        let query = AppointmentQuery {
            date: Some("".to_string()),
            status: Some("  ".to_string()),
            ..AppointmentQuery::default()
        };
        assert_eq!(store().list(&query).await.len(), 10);
    }

    #[tokio::test]
    async fn test_update_status() {
        let store = store();

        let updated = store.update_status(4, AppointmentStatus::Confirmed).await.unwrap();
        assert_eq!(updated.id, 4);
        assert_eq!(updated.status, AppointmentStatus::Confirmed);

        let all = store.list(&AppointmentQuery::default()).await;
        assert_eq!(all[3].status, AppointmentStatus::Confirmed);
    }

    #[tokio::test]
    async fn test_update_unknown_appointment() {
        let result = store().update_status(42, AppointmentStatus::Cancelled).await;
        assert_matches!(result, Err(AppointmentError::NotFound(42)));
    }
}
