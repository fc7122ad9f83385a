use chrono::{Duration, NaiveDate};
use serde_json::{json, Value};

use shared_config::AppConfig;

pub struct TestConfig {
    pub appointment_service_url: String,
    pub appointment_service_token: Option<String>,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            appointment_service_url: "http://localhost:3000".to_string(),
            appointment_service_token: None,
        }
    }
}

impl TestConfig {
    pub fn with_service_url(url: &str) -> Self {
        Self {
            appointment_service_url: url.to_string(),
            ..Self::default()
        }
    }

    pub fn to_app_config(&self) -> AppConfig {
        AppConfig {
            appointment_service_url: self.appointment_service_url.clone(),
            appointment_service_token: self.appointment_service_token.clone(),
            ..AppConfig::default()
        }
    }
}

pub struct MockServiceResponses;

impl MockServiceResponses {
    pub fn appointment_response(id: u64, name: &str, date: &str, time: &str, status: &str) -> Value {
        json!({
            "id": id,
            "name": name,
            "doctorName": "Dr. Smith",
            "mode": "In-Person",
            "date": date,
            "time": time,
            "duration": 30,
            "status": status
        })
    }

    /// One past, one today and one future appointment around `today`.
    pub fn appointment_list_response(today: NaiveDate) -> Value {
        let fmt = |date: NaiveDate| date.format("%Y-%m-%d").to_string();

        json!([
            Self::appointment_response(1, "Alice Johnson", &fmt(today - Duration::days(2)), "09:00", "Confirmed"),
            Self::appointment_response(2, "Carmen Diaz", &fmt(today), "09:30", "Scheduled"),
            Self::appointment_response(3, "Farid Khan", &fmt(today + Duration::days(1)), "08:00", "Upcoming"),
        ])
    }

    pub fn error_response(message: &str) -> Value {
        json!({
            "error": message
        })
    }
}
