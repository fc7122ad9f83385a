// libs/appointment-cell/src/router.rs
use std::sync::Arc;

use axum::{
    Router,
    routing::{get, patch},
};

use crate::handlers;
use crate::services::store::InMemoryAppointmentStore;

pub fn appointment_routes(store: Arc<InMemoryAppointmentStore>) -> Router {
    Router::new()
        .route("/", get(handlers::list_appointments))
        .route("/{appointment_id}/status", patch(handlers::update_appointment_status))
        .with_state(store)
}
