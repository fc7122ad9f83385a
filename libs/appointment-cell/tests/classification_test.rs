use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

use appointment_cell::models::{Appointment, AppointmentStatus, AppointmentTab};
use appointment_cell::services::classification::{displayed_appointments, matches_tab};
use appointment_cell::services::store::seed_appointments;

fn appointment(id: u64, date: NaiveDate, time: &str) -> Appointment {
    Appointment {
        id,
        name: format!("Patient {}", id),
        doctor_name: "Dr. Smith".to_string(),
        mode: "Online".to_string(),
        date,
        time: NaiveTime::parse_from_str(time, "%H:%M").unwrap(),
        duration: 30,
        status: AppointmentStatus::Pending,
    }
}

fn ids(list: &[Appointment]) -> Vec<u64> {
    list.iter().map(|a| a.id).collect()
}

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_elapsed_day_before_is_past_only() {
    let list = vec![appointment(1, ymd(2024, 1, 1), "09:00")];
    let now = ymd(2024, 1, 2).and_hms_opt(8, 0, 0).unwrap();

    assert_eq!(ids(&displayed_appointments(&list, None, AppointmentTab::Past, now)), vec![1]);
    assert!(displayed_appointments(&list, None, AppointmentTab::Upcoming, now).is_empty());
    assert!(displayed_appointments(&list, None, AppointmentTab::Today, now).is_empty());
}

#[test]
fn test_elapsed_today_stays_in_today_and_upcoming() {
    let today = ymd(2024, 3, 10);
    let list = vec![appointment(2, today, "23:59")];
    let now = today.and_hms_opt(23, 59, 30).unwrap();

    assert_eq!(ids(&displayed_appointments(&list, None, AppointmentTab::Today, now)), vec![2]);
    assert!(displayed_appointments(&list, None, AppointmentTab::Past, now).is_empty());
    assert_eq!(ids(&displayed_appointments(&list, None, AppointmentTab::Upcoming, now)), vec![2]);
}

#[test]
fn test_every_today_appointment_is_in_today_and_upcoming() {
    let today = ymd(2025, 12, 15);
    let seed = seed_appointments(today);

    for hour in [0, 9, 12, 17, 23] {
        let now = today.and_hms_opt(hour, 30, 0).unwrap();
        for appt in seed.iter().filter(|a| a.date == today) {
            assert!(matches_tab(appt, AppointmentTab::Today, now), "{} at {}", appt.id, now);
            assert!(matches_tab(appt, AppointmentTab::Upcoming, now), "{} at {}", appt.id, now);
            assert!(!matches_tab(appt, AppointmentTab::Past, now), "{} at {}", appt.id, now);
        }
    }
}

#[test]
fn test_elapsed_other_days_are_past_only() {
    let today = ymd(2025, 12, 15);
    let now = today.and_hms_opt(10, 0, 0).unwrap();

    for appt in seed_appointments(today).iter().filter(|a| a.moment() < now && a.date != today) {
        assert!(matches_tab(appt, AppointmentTab::Past, now));
        assert!(!matches_tab(appt, AppointmentTab::Upcoming, now));
        assert!(!matches_tab(appt, AppointmentTab::Today, now));
    }
}

#[test]
fn test_seeded_schedule_by_tab() {
    let today = ymd(2025, 12, 15);
    let seed = seed_appointments(today);
    let now = today.and_hms_opt(12, 0, 0).unwrap();

    assert_eq!(ids(&displayed_appointments(&seed, None, AppointmentTab::Past, now)), vec![1, 2]);
    assert_eq!(ids(&displayed_appointments(&seed, None, AppointmentTab::Today, now)), vec![3, 4, 5]);
    assert_eq!(
        ids(&displayed_appointments(&seed, None, AppointmentTab::Upcoming, now)),
        vec![3, 4, 5, 6, 7, 8, 9, 10]
    );
}

#[test]
fn test_midnight_rollover_moves_yesterday_to_past() {
    let yesterday = ymd(2025, 12, 14);
    let list = vec![appointment(1, yesterday, "23:30")];

    let before_midnight: NaiveDateTime = yesterday.and_hms_opt(23, 45, 0).unwrap();
    assert!(matches_tab(&list[0], AppointmentTab::Upcoming, before_midnight));

    let after_midnight = before_midnight + Duration::minutes(30);
    assert!(matches_tab(&list[0], AppointmentTab::Past, after_midnight));
    assert!(!matches_tab(&list[0], AppointmentTab::Upcoming, after_midnight));
}
