//! # incidents-domain
//!
//! Pure domain model for the safety incident registry.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - Define **Incidents** (reported safety events) and their **Severity**
//! - Define **`NewIncident`**, the validated draft handed to storage on insert
//! - Contain all invariant enforcement (non-blank text, allowed severities)
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod incident;
