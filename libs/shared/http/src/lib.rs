pub mod client;

pub use client::{ServiceClient, ServiceError};
