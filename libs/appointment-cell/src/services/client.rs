use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Method;
use serde_json::json;
use tracing::debug;

use shared_config::AppConfig;
use shared_http::{ServiceClient, ServiceError};

use crate::models::{Appointment, AppointmentError, AppointmentId, AppointmentStatus};
use crate::services::gateway::AppointmentGateway;

/// Gateway to the appointment service over HTTP.
pub struct HttpAppointmentGateway {
    client: ServiceClient,
}

impl HttpAppointmentGateway {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: ServiceClient::new(config),
        }
    }
}

#[async_trait]
impl AppointmentGateway for HttpAppointmentGateway {
    async fn get_appointments(
        &self,
        date: Option<NaiveDate>,
        status: Option<String>,
    ) -> Result<Vec<Appointment>, AppointmentError> {
        let mut query_parts = Vec::new();

        if let Some(date) = date {
            query_parts.push(format!("date={}", date.format("%Y-%m-%d")));
        }
        if let Some(status) = status {
            query_parts.push(format!("status={}", urlencoding::encode(&status)));
        }

        let path = if query_parts.is_empty() {
            "/appointments".to_string()
        } else {
            format!("/appointments?{}", query_parts.join("&"))
        };

        let appointments: Vec<Appointment> = self.client.request(Method::GET, &path, None).await?;
        debug!("Fetched {} appointments", appointments.len());

        Ok(appointments)
    }

    async fn update_appointment_status(
        &self,
        id: AppointmentId,
        next_status: AppointmentStatus,
    ) -> Result<Appointment, AppointmentError> {
        let path = format!("/appointments/{}/status", id);
        let body = json!({ "status": next_status.as_str() });

        self.client
            .request(Method::PATCH, &path, Some(body))
            .await
            .map_err(|e| match e {
                ServiceError::NotFound(_) => AppointmentError::NotFound(id),
                other => AppointmentError::Service(other),
            })
    }
}
