pub mod classification;
pub mod client;
pub mod clock;
pub mod gateway;
pub mod store;
pub mod view;

pub use client::HttpAppointmentGateway;
pub use clock::{Clock, FixedClock, SystemClock};
pub use gateway::AppointmentGateway;
pub use store::InMemoryAppointmentStore;
pub use view::{AppointmentView, ViewState};
