//! # incidents-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define the driven port adapters must implement:
//!   - `IncidentRepository` — insert, lookup, scan, delete, seed
//! - Define the driving use-case struct:
//!   - `IncidentService` — create, list, get, delete, seed-if-empty
//! - Orchestrate domain objects without knowing *how* persistence or IO works
//!
//! ## Dependency rule
//! Depends on `incidents-domain` only.
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod ports;
pub mod services;
