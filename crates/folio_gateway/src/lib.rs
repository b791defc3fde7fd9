//! HTTP client for the hosted backend.
//!
//! The backend exposes a PostgREST-style table API plus a password-grant
//! token endpoint. Everything the rest of the workspace needs goes through
//! the [`Gateway`] trait so the site handlers and the dashboard worker can
//! be tested against a fake without touching the network.

pub mod client;
pub mod error;

pub use client::{Gateway, RestGateway, Session, SharedGateway};
pub use error::GatewayError;
