// libs/appointment-cell/src/services/classification.rs
//
// Today/Upcoming/Past overlap on purpose: an appointment dated today is in both
// Today and Upcoming, and never in Past, even after its time has elapsed.
use chrono::{NaiveDate, NaiveDateTime};

use crate::models::{Appointment, AppointmentTab};

pub fn is_today(appointment: &Appointment, now: NaiveDateTime) -> bool {
    appointment.date == now.date()
}

pub fn is_past(appointment: &Appointment, now: NaiveDateTime) -> bool {
    appointment.moment() < now
}

pub fn is_upcoming(appointment: &Appointment, now: NaiveDateTime) -> bool {
    !is_past(appointment, now) || is_today(appointment, now)
}

pub fn matches_tab(appointment: &Appointment, tab: AppointmentTab, now: NaiveDateTime) -> bool {
    match tab {
        AppointmentTab::Today => is_today(appointment, now),
        AppointmentTab::Past => is_past(appointment, now) && !is_today(appointment, now),
        AppointmentTab::Upcoming => is_upcoming(appointment, now),
    }
}

/// The subset of `appointments` shown for the given date filter and tab,
/// in the order the list was received.
pub fn displayed_appointments(
    appointments: &[Appointment],
    selected_date: Option<NaiveDate>,
    tab: AppointmentTab,
    now: NaiveDateTime,
) -> Vec<Appointment> {
    appointments
        .iter()
        .filter(|appt| selected_date.map_or(true, |date| appt.date == date))
        .filter(|appt| matches_tab(appt, tab, now))
        .cloned()
        .collect()
}
