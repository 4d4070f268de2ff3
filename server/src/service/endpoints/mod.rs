//! Endpoint handlers organized by entity kind

pub mod contacts;
pub mod permits;
pub mod residents;
pub mod service_requests;
pub mod tasks;
