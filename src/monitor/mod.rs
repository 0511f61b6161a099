mod checks;
mod service;

pub use service::{resource_checks, session_check};
