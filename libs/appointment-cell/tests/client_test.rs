use std::sync::Arc;

use assert_matches::assert_matches;
use chrono::{Local, NaiveDate};
use serde_json::json;
use wiremock::{MockServer, Mock, ResponseTemplate};
use wiremock::matchers::{body_json, method, path, query_param};

use appointment_cell::models::{AppointmentError, AppointmentStatus, FetchOutcome};
use appointment_cell::render::render_view;
use appointment_cell::services::{AppointmentGateway, AppointmentView, HttpAppointmentGateway};
use shared_utils::test_utils::{MockServiceResponses, TestConfig};

#[tokio::test]
async fn test_get_appointments_with_date_filter() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/appointments"))
        .and(query_param("date", "2025-12-15"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockServiceResponses::appointment_response(3, "Carmen Diaz", "2025-12-15", "09:30", "Upcoming")
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let gateway = HttpAppointmentGateway::new(&TestConfig::with_service_url(&mock_server.uri()).to_app_config());
    let appointments = gateway
        .get_appointments(NaiveDate::from_ymd_opt(2025, 12, 15), None)
        .await
        .unwrap();

    assert_eq!(appointments.len(), 1);
    assert_eq!(appointments[0].name, "Carmen Diaz");
    assert_eq!(appointments[0].status, AppointmentStatus::Upcoming);
}

#[tokio::test]
async fn test_get_appointments_encodes_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/appointments"))
        .and(query_param("status", "No Show"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let gateway = HttpAppointmentGateway::new(&TestConfig::with_service_url(&mock_server.uri()).to_app_config());
    let appointments = gateway
        .get_appointments(None, Some("No Show".to_string()))
        .await
        .unwrap();

    assert!(appointments.is_empty());
}

#[tokio::test]
async fn test_update_status_sends_label() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/appointments/1/status"))
        .and(body_json(json!({"status": "Cancelled"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(
            MockServiceResponses::appointment_response(1, "Alice Johnson", "2025-12-10", "09:00", "Cancelled"),
        ))
        .expect(1)
        .mount(&mock_server)
        .await;

    let gateway = HttpAppointmentGateway::new(&TestConfig::with_service_url(&mock_server.uri()).to_app_config());
    let updated = gateway
        .update_appointment_status(1, AppointmentStatus::Cancelled)
        .await
        .unwrap();

    assert_eq!(updated.id, 1);
    assert_eq!(updated.status, AppointmentStatus::Cancelled);
}

#[tokio::test]
async fn test_update_status_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/appointments/77/status"))
        .respond_with(ResponseTemplate::new(404).set_body_json(
            MockServiceResponses::error_response("Appointment 77 not found"),
        ))
        .mount(&mock_server)
        .await;

    let gateway = HttpAppointmentGateway::new(&TestConfig::with_service_url(&mock_server.uri()).to_app_config());
    let result = gateway.update_appointment_status(77, AppointmentStatus::Confirmed).await;

    assert_matches!(result, Err(AppointmentError::NotFound(77)));
}

#[tokio::test]
async fn test_view_over_http_surfaces_server_failure() {
    let mock_server = MockServer::start().await;
    let today = Local::now().date_naive();

    Mock::given(method("GET"))
        .and(path("/appointments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(MockServiceResponses::appointment_list_response(today)))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/appointments"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&mock_server)
        .await;

    let gateway = Arc::new(HttpAppointmentGateway::new(
        &TestConfig::with_service_url(&mock_server.uri()).to_app_config(),
    ));
    let view = AppointmentView::with_system_clock(gateway);

    assert_eq!(view.mount().await.unwrap(), FetchOutcome::Applied { count: 3 });
    assert!(view.change_date_filter(Some(today)).await.is_err());

    let snapshot = view.snapshot();
    assert!(!snapshot.loading);
    assert_eq!(view.state().appointments.len(), 3);

    let rendered = render_view(&snapshot);
    assert!(rendered.contains("maintenance"));
    assert!(rendered.contains("Carmen Diaz"));
}
