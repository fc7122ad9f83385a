pub mod models;
pub mod handlers;
pub mod render;
pub mod router;
pub mod services;

pub use models::*;
pub use router::*;
