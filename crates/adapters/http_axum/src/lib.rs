//! # incidents-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve a JSON API for incidents (`/incidents`, `/incidents/{id}`)
//!   plus a welcome message at `/` and a liveness probe at `/health`
//! - Parse and validate request bodies before any service call
//! - Map HTTP requests into application service calls (driving adapter)
//! - Map application results and errors into JSON responses
//!
//! ## Dependency rule
//! Depends on `incidents-app` (for the port trait and service) and
//! `incidents-domain` (for domain types used in request/response mapping).
//! Never leaks axum types into the domain.

pub mod api;
pub mod error;
pub mod router;
pub mod state;

#[cfg(test)]
mod testing;
