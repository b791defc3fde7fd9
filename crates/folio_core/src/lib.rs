//! Core domain library for Folio (config, records, dashboard state, export).

/// Configuration loading and defaults.
pub mod config;
/// Dashboard list-controller state machine.
pub mod controller;
/// Application error types (decode/validation).
pub mod error;
/// CSV export of contact submissions.
pub mod export;
/// Record models shared by the site server and the admin console.
pub mod models;

pub use config::Config;
pub use controller::DashState;
pub use error::AppError;
