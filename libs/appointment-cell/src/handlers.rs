// libs/appointment-cell/src/handlers.rs
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::NaiveDate;
use tracing::debug;

use shared_models::error::AppError;

use crate::models::{Appointment, AppointmentId, AppointmentQuery, AppointmentStatus, UpdateStatusRequest};
use crate::services::store::InMemoryAppointmentStore;

#[axum::debug_handler]
pub async fn list_appointments(
    State(store): State<Arc<InMemoryAppointmentStore>>,
    Query(query): Query<AppointmentQuery>,
) -> Result<Json<Vec<Appointment>>, AppError> {
    if let Some(date) = query.date.as_deref().filter(|d| !d.trim().is_empty()) {
        NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
            .map_err(|_| AppError::BadRequest(format!("Invalid date '{}', expected YYYY-MM-DD", date)))?;
    }

    debug!("Listing appointments with {:?}", query);
    let appointments = store.list(&query).await;

    Ok(Json(appointments))
}

#[axum::debug_handler]
pub async fn update_appointment_status(
    State(store): State<Arc<InMemoryAppointmentStore>>,
    Path(appointment_id): Path<AppointmentId>,
    Json(request): Json<UpdateStatusRequest>,
) -> Result<Json<Appointment>, AppError> {
    if request.status.trim().is_empty() {
        return Err(AppError::ValidationError("status must not be empty".to_string()));
    }

    let updated = store
        .update_status(appointment_id, AppointmentStatus::from(request.status))
        .await?;

    Ok(Json(updated))
}
