//! Incident — a single reported safety event.
//!
//! An [`Incident`] is what the store hands back: it always carries the
//! identifier assigned on insert. A [`NewIncident`] is the validated draft
//! that goes in; it has no identifier yet.
//!
//! Incidents are immutable once stored. The only lifecycle transition after
//! creation is deletion.

mod severity;

pub use severity::Severity;

use crate::error::{IncidentsError, ValidationError};
use crate::id::IncidentId;
use crate::time::{self, Timestamp};

/// A persisted safety incident.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Incident {
    pub id: IncidentId,
    pub title: String,
    pub description: String,
    pub severity: Severity,
    pub reported_at: Timestamp,
}

impl Incident {
    /// Attach a store-assigned identifier to a draft.
    #[must_use]
    pub fn from_draft(id: IncidentId, draft: NewIncident) -> Self {
        Self {
            id,
            title: draft.title,
            description: draft.description,
            severity: draft.severity,
            reported_at: draft.reported_at,
        }
    }
}

/// A validated incident that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewIncident {
    pub title: String,
    pub description: String,
    pub severity: Severity,
    pub reported_at: Timestamp,
}

impl NewIncident {
    /// Create a builder for constructing a [`NewIncident`].
    #[must_use]
    pub fn builder() -> NewIncidentBuilder {
        NewIncidentBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`IncidentsError::Validation`] when `title` or `description`
    /// is empty or whitespace-only.
    pub fn validate(&self) -> Result<(), IncidentsError> {
        check_text(&self.title, &self.description)?;
        Ok(())
    }
}

fn check_text(title: &str, description: &str) -> Result<(), ValidationError> {
    if title.trim().is_empty() {
        return Err(ValidationError::InvalidTitle);
    }
    if description.trim().is_empty() {
        return Err(ValidationError::InvalidDescription);
    }
    Ok(())
}

/// Step-by-step builder for [`NewIncident`].
///
/// Unset text fields count as empty and unset severity counts as invalid,
/// so a caller that could not read a field simply leaves it out.
#[derive(Debug, Default)]
pub struct NewIncidentBuilder {
    title: Option<String>,
    description: Option<String>,
    severity: Option<Severity>,
    reported_at: Option<Timestamp>,
}

impl NewIncidentBuilder {
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = Some(severity);
        self
    }

    /// Override the report time. Defaults to [`time::now`] at build.
    #[must_use]
    pub fn reported_at(mut self, reported_at: Timestamp) -> Self {
        self.reported_at = Some(reported_at);
        self
    }

    /// Consume the builder, validate, and return a [`NewIncident`].
    ///
    /// Checks run in order: title, description, severity. The first failure
    /// is returned.
    ///
    /// # Errors
    ///
    /// Returns [`IncidentsError::Validation`] if a text field is missing or
    /// blank, or if no severity was set.
    pub fn build(self) -> Result<NewIncident, IncidentsError> {
        let title = self.title.unwrap_or_default();
        let description = self.description.unwrap_or_default();
        check_text(&title, &description)?;
        let severity = self.severity.ok_or(ValidationError::InvalidSeverity)?;

        Ok(NewIncident {
            title,
            description,
            severity,
            reported_at: self.reported_at.unwrap_or_else(time::now),
        })
    }
}
