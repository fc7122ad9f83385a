// libs/appointment-cell/src/services/view.rs
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{Duration, NaiveDate, NaiveDateTime, Timelike};
use tracing::{debug, error, info, warn};

use crate::models::{
    Appointment, AppointmentCard, AppointmentId, AppointmentStatus, AppointmentTab,
    FetchFilters, FetchOutcome, ViewError, ViewSnapshot,
};
use crate::services::classification::displayed_appointments;
use crate::services::clock::{Clock, SystemClock};
use crate::services::gateway::AppointmentGateway;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewState {
    pub appointments: Vec<Appointment>,
    pub selected_date: Option<NaiveDate>,
    pub active_tab: AppointmentTab,
    pub loading: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
struct MemoKey {
    revision: u64,
    selected_date: Option<NaiveDate>,
    tab: AppointmentTab,
    today: NaiveDate,
    /// `now` rounded up to a whole second. Moments carry no sub-second part,
    /// so `moment < now` agrees with `moment < now_ceil`.
    now_ceil: NaiveDateTime,
}

fn ceil_to_second(now: NaiveDateTime) -> NaiveDateTime {
    let nanos = now.nanosecond();
    if nanos == 0 {
        return now;
    }
    now - Duration::nanoseconds(i64::from(nanos)) + Duration::seconds(1)
}

#[derive(Default)]
struct Inner {
    state: ViewState,
    /// Bumped whenever `state.appointments` changes.
    revision: u64,
    latest_request: u64,
    memo: Option<(MemoKey, Vec<Appointment>)>,
    recomputations: u64,
}

/// State and operations behind the appointment management view.
///
/// All operations take `&self`; fetches may overlap, in which case only the
/// most recently issued one is applied.
pub struct AppointmentView {
    gateway: Arc<dyn AppointmentGateway>,
    clock: Arc<dyn Clock>,
    inner: Mutex<Inner>,
}

/// Clears `loading` when the fetch that set it finishes or is dropped.
struct LoadingGuard<'a> {
    view: &'a AppointmentView,
    token: u64,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        let mut inner = self.view.lock();
        if inner.latest_request == self.token {
            inner.state.loading = false;
        }
    }
}

impl AppointmentView {
    pub fn new(gateway: Arc<dyn AppointmentGateway>, clock: Arc<dyn Clock>) -> Self {
        Self {
            gateway,
            clock,
            inner: Mutex::new(Inner::default()),
        }
    }

    pub fn with_system_clock(gateway: Arc<dyn AppointmentGateway>) -> Self {
        Self::new(gateway, Arc::new(SystemClock))
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn state(&self) -> ViewState {
        self.lock().state.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.lock().state.loading
    }

    /// Initial load with no filters.
    pub async fn mount(&self) -> Result<FetchOutcome, ViewError> {
        self.fetch(FetchFilters::default()).await
    }

    pub async fn fetch(&self, filters: FetchFilters) -> Result<FetchOutcome, ViewError> {
        let token = {
            let mut inner = self.lock();
            inner.latest_request += 1;
            inner.state.loading = true;
            inner.latest_request
        };
        let _loading = LoadingGuard { view: self, token };

        debug!("Fetching appointments (request {}, filters {:?})", token, filters);
        let result = self.gateway.get_appointments(filters.date, filters.status).await;

        let mut inner = self.lock();
        if inner.latest_request != token {
            warn!(
                "Discarding stale appointment response (request {}, latest {})",
                token, inner.latest_request
            );
            return Ok(FetchOutcome::Discarded);
        }

        match result {
            Ok(appointments) => {
                let count = appointments.len();
                inner.state.appointments = appointments;
                inner.state.error = None;
                inner.revision += 1;
                debug!("Applied {} appointments from request {}", count, token);
                Ok(FetchOutcome::Applied { count })
            }
            Err(e) => {
                let err = ViewError::Fetch(e);
                error!("{}", err);
                inner.state.error = Some(err.to_string());
                Err(err)
            }
        }
    }

    pub async fn change_date_filter(&self, date: Option<NaiveDate>) -> Result<FetchOutcome, ViewError> {
        self.lock().state.selected_date = date;
        self.fetch(FetchFilters { date, status: None }).await
    }

    pub async fn clear_date_filter(&self) -> Result<FetchOutcome, ViewError> {
        self.change_date_filter(None).await
    }

    pub fn change_tab(&self, tab: AppointmentTab) {
        self.lock().state.active_tab = tab;
    }

    /// Applies the status returned by the service; nothing changes locally
    /// until the update call resolves.
    pub async fn change_status(
        &self,
        id: AppointmentId,
        next_status: AppointmentStatus,
    ) -> Result<Appointment, ViewError> {
        info!("Changing appointment {} status to {}", id, next_status);

        match self.gateway.update_appointment_status(id, next_status).await {
            Ok(updated) => {
                let mut inner = self.lock();
                let mut patched = 0;
                for appt in inner.state.appointments.iter_mut().filter(|a| a.id == updated.id) {
                    appt.status = updated.status.clone();
                    patched += 1;
                }
                if patched == 0 {
                    debug!("Appointment {} is not in the current list", updated.id);
                }
                inner.revision += 1;
                inner.state.error = None;
                Ok(updated)
            }
            Err(source) => {
                let err = ViewError::StatusUpdate { id, source };
                error!("{}", err);
                self.lock().state.error = Some(err.to_string());
                Err(err)
            }
        }
    }

    pub fn displayed(&self) -> Vec<Appointment> {
        let now = self.clock.now();
        let mut inner = self.lock();
        Self::displayed_locked(&mut inner, now)
    }

    pub fn snapshot(&self) -> ViewSnapshot {
        let now = self.clock.now();
        let mut inner = self.lock();
        let cards = Self::displayed_locked(&mut inner, now)
            .into_iter()
            .map(AppointmentCard::new)
            .collect();

        ViewSnapshot {
            selected_date: inner.state.selected_date,
            active_tab: inner.state.active_tab,
            loading: inner.state.loading,
            error: inner.state.error.clone(),
            cards,
        }
    }

    fn displayed_locked(inner: &mut Inner, now: NaiveDateTime) -> Vec<Appointment> {
        let key = MemoKey {
            revision: inner.revision,
            selected_date: inner.state.selected_date,
            tab: inner.state.active_tab,
            today: now.date(),
            now_ceil: ceil_to_second(now),
        };

        if let Some((cached_key, cached)) = &inner.memo {
            if *cached_key == key {
                return cached.clone();
            }
        }

        let displayed = displayed_appointments(&inner.state.appointments, key.selected_date, key.tab, now);
        inner.memo = Some((key, displayed.clone()));
        inner.recomputations += 1;
        displayed
    }
}
