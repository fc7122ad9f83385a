// libs/appointment-cell/src/models.rs
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use shared_http::ServiceError;
use shared_models::error::AppError;

pub type AppointmentId = u64;

// ==============================================================================
// CORE APPOINTMENT MODELS
// ==============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: AppointmentId,
    pub name: String,
    pub doctor_name: String,
    pub mode: String,
    pub date: NaiveDate,
    #[serde(with = "hour_minute")]
    pub time: NaiveTime,
    pub duration: u32,
    pub status: AppointmentStatus,
}

impl Appointment {
    /// Date and time combined into a single local moment.
    pub fn moment(&self) -> NaiveDateTime {
        self.date.and_time(self.time)
    }
}

/// `HH:MM` on the wire; `HH:MM:SS` is tolerated on input.
mod hour_minute {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%H:%M";

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&raw, FORMAT)
            .or_else(|_| NaiveTime::parse_from_str(&raw, "%H:%M:%S"))
            .map_err(serde::de::Error::custom)
    }
}

/// Status labels are open-ended; unknown labels are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AppointmentStatus {
    Pending,
    Scheduled,
    Upcoming,
    Confirmed,
    Cancelled,
    Other(String),
}

impl AppointmentStatus {
    pub fn as_str(&self) -> &str {
        match self {
            AppointmentStatus::Pending => "Pending",
            AppointmentStatus::Scheduled => "Scheduled",
            AppointmentStatus::Upcoming => "Upcoming",
            AppointmentStatus::Confirmed => "Confirmed",
            AppointmentStatus::Cancelled => "Cancelled",
            AppointmentStatus::Other(label) => label,
        }
    }
}

impl From<String> for AppointmentStatus {
    fn from(label: String) -> Self {
        match label.as_str() {
            "Pending" => AppointmentStatus::Pending,
            "Scheduled" => AppointmentStatus::Scheduled,
            "Upcoming" => AppointmentStatus::Upcoming,
            "Confirmed" => AppointmentStatus::Confirmed,
            "Cancelled" => AppointmentStatus::Cancelled,
            _ => AppointmentStatus::Other(label),
        }
    }
}

impl From<&str> for AppointmentStatus {
    fn from(label: &str) -> Self {
        AppointmentStatus::from(label.to_string())
    }
}

impl From<AppointmentStatus> for String {
    fn from(status: AppointmentStatus) -> Self {
        match status {
            AppointmentStatus::Other(label) => label,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ==============================================================================
// VIEW MODELS
// ==============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AppointmentTab {
    #[default]
    Upcoming,
    Today,
    Past,
}

impl AppointmentTab {
    pub const ALL: [AppointmentTab; 3] = [
        AppointmentTab::Upcoming,
        AppointmentTab::Today,
        AppointmentTab::Past,
    ];
}

impl fmt::Display for AppointmentTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppointmentTab::Upcoming => write!(f, "Upcoming"),
            AppointmentTab::Today => write!(f, "Today"),
            AppointmentTab::Past => write!(f, "Past"),
        }
    }
}

impl FromStr for AppointmentTab {
    type Err = AppointmentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "upcoming" => Ok(AppointmentTab::Upcoming),
            "today" => Ok(AppointmentTab::Today),
            "past" => Ok(AppointmentTab::Past),
            other => Err(AppointmentError::Validation(format!("unknown tab '{}'", other))),
        }
    }
}

/// The two status transitions a card offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusAction {
    Confirm,
    Cancel,
}

impl StatusAction {
    pub fn target_status(&self) -> AppointmentStatus {
        match self {
            StatusAction::Confirm => AppointmentStatus::Confirmed,
            StatusAction::Cancel => AppointmentStatus::Cancelled,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StatusAction::Confirm => "Confirm",
            StatusAction::Cancel => "Cancel",
        }
    }

    /// Disabled when the appointment already has the target status.
    pub fn is_enabled_for(&self, appointment: &Appointment) -> bool {
        appointment.status != self.target_status()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ActionControl {
    pub action: StatusAction,
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppointmentCard {
    pub appointment: Appointment,
    pub actions: Vec<ActionControl>,
}

impl AppointmentCard {
    pub fn new(appointment: Appointment) -> Self {
        let actions = [StatusAction::Confirm, StatusAction::Cancel]
            .into_iter()
            .map(|action| ActionControl {
                action,
                enabled: action.is_enabled_for(&appointment),
            })
            .collect();

        Self { appointment, actions }
    }

    pub fn is_enabled(&self, action: StatusAction) -> bool {
        self.actions
            .iter()
            .any(|control| control.action == action && control.enabled)
    }
}

/// Everything a renderer needs for one frame of the view.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewSnapshot {
    pub selected_date: Option<NaiveDate>,
    pub active_tab: AppointmentTab,
    pub loading: bool,
    pub error: Option<String>,
    pub cards: Vec<AppointmentCard>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FetchFilters {
    pub date: Option<NaiveDate>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    Applied { count: usize },
    /// A newer fetch was issued while this one was in flight.
    Discarded,
}

// ==============================================================================
// SERVICE REQUEST MODELS
// ==============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppointmentQuery {
    pub date: Option<String>,
    pub status: Option<String>,
    pub doctor_name: Option<String>,
    pub patient_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

// ==============================================================================
// ERROR MODELS
// ==============================================================================

#[derive(Error, Debug)]
pub enum AppointmentError {
    #[error("Appointment {0} not found")]
    NotFound(AppointmentId),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Appointment service error: {0}")]
    Service(#[from] ServiceError),
}

impl From<AppointmentError> for AppError {
    fn from(err: AppointmentError) -> Self {
        match err {
            AppointmentError::NotFound(id) => AppError::NotFound(format!("Appointment {} not found", id)),
            AppointmentError::Validation(msg) => AppError::ValidationError(msg),
            AppointmentError::Service(e) => AppError::ExternalService(e.to_string()),
        }
    }
}

#[derive(Error, Debug)]
pub enum ViewError {
    #[error("Failed to load appointments: {0}")]
    Fetch(#[source] AppointmentError),

    #[error("Failed to update appointment {id}: {source}")]
    StatusUpdate {
        id: AppointmentId,
        #[source]
        source: AppointmentError,
    },
}
