use std::sync::Arc;

use axum::{
    Router,
    routing::get,
};

use appointment_cell::router::appointment_routes;
use appointment_cell::services::InMemoryAppointmentStore;

pub fn create_router(store: Arc<InMemoryAppointmentStore>) -> Router {
    Router::new()
        .route("/", get(|| async { "Appointment service is running!" }))
        .nest("/appointments", appointment_routes(store))
}
