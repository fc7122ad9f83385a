// libs/appointment-cell/src/render.rs
use std::fmt::Write;

use crate::models::{AppointmentCard, AppointmentTab, ViewSnapshot};

pub const TITLE: &str = "Appointment Management View";
pub const LOADING_MESSAGE: &str = "Loading appointments...";
pub const EMPTY_MESSAGE: &str = "No appointments match the current filters.";

/// Text rendering of one frame of the view.
pub fn render_view(snapshot: &ViewSnapshot) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{}", TITLE);
    let _ = match snapshot.selected_date {
        Some(date) => writeln!(out, "Date filter: {}", date.format("%Y-%m-%d")),
        None => writeln!(out, "Date filter: all dates"),
    };
    let _ = writeln!(out, "{}", render_tabs(snapshot.active_tab));

    if let Some(error) = &snapshot.error {
        let _ = writeln!(out, "! {}", error);
    }
    out.push('\n');

    if snapshot.loading {
        let _ = writeln!(out, "{}", LOADING_MESSAGE);
        return out;
    }

    if snapshot.cards.is_empty() {
        let _ = writeln!(out, "{}", EMPTY_MESSAGE);
        return out;
    }

    for card in &snapshot.cards {
        out.push_str(&render_card(card));
        out.push('\n');
    }

    out
}

fn render_tabs(active: AppointmentTab) -> String {
    AppointmentTab::ALL
        .iter()
        .map(|tab| {
            if *tab == active {
                format!("[{}]", tab)
            } else {
                format!(" {} ", tab)
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn render_card(card: &AppointmentCard) -> String {
    let appt = &card.appointment;
    let controls = card
        .actions
        .iter()
        .map(|control| {
            if control.enabled {
                format!("[{}]", control.action.label())
            } else {
                format!("[{} (disabled)]", control.action.label())
            }
        })
        .collect::<Vec<_>>()
        .join(" ");

    format!(
        "#{} {} ({})\n    {} \u{2022} {}\n    {} at {} ({} mins)\n    {}\n",
        appt.id,
        appt.name,
        appt.status,
        appt.doctor_name,
        appt.mode,
        appt.date.format("%Y-%m-%d"),
        appt.time.format("%H:%M"),
        appt.duration,
        controls,
    )
}
