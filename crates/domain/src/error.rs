//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`IncidentsError`] via `From`.

/// Top-level error returned by services and repositories.
#[derive(Debug, thiserror::Error)]
pub enum IncidentsError {
    /// A domain invariant was violated.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The requested record does not exist.
    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    /// The persistence backend failed.
    #[error("storage error")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// A field failed its constraint.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Title must be a non-empty string")]
    InvalidTitle,

    #[error("Description must be a non-empty string")]
    InvalidDescription,

    #[error("Severity must be one of ['Low', 'Medium', 'High']")]
    InvalidSeverity,
}

/// Lookup by identifier resolved to nothing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} not found")]
pub struct NotFoundError {
    /// Kind of record that was looked up (e.g. `"Incident"`).
    pub entity: &'static str,
    /// The identifier that did not resolve.
    pub id: String,
}
