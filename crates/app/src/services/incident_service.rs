//! Incident service — use-cases for reporting and managing incidents.

use incidents_domain::error::{IncidentsError, NotFoundError};
use incidents_domain::id::IncidentId;
use incidents_domain::incident::{Incident, NewIncident};

use crate::ports::IncidentRepository;

/// Application service for incident operations.
pub struct IncidentService<R> {
    repo: R,
}

impl<R: IncidentRepository> IncidentService<R> {
    /// Create a new service backed by the given repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Store a new incident after validating domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`IncidentsError::Validation`] if invariants fail, or a
    /// storage error propagated from the repository.
    #[tracing::instrument(skip(self, draft), fields(severity = %draft.severity))]
    pub async fn create_incident(&self, draft: NewIncident) -> Result<Incident, IncidentsError> {
        draft.validate()?;
        let created = self.repo.create(draft).await?;
        tracing::info!(id = %created.id, "incident reported");
        Ok(created)
    }

    /// Look up an incident by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`IncidentsError::NotFound`] when no incident with `id` exists,
    /// or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn get_incident(&self, id: IncidentId) -> Result<Incident, IncidentsError> {
        self.repo
            .get_by_id(id)
            .await?
            .ok_or_else(|| not_found(id).into())
    }

    /// List all incidents.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_incidents(&self) -> Result<Vec<Incident>, IncidentsError> {
        self.repo.get_all().await
    }

    /// Delete an incident by id.
    ///
    /// # Errors
    ///
    /// Returns [`IncidentsError::NotFound`] when no incident with `id` exists,
    /// or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn delete_incident(&self, id: IncidentId) -> Result<(), IncidentsError> {
        if !self.repo.delete(id).await? {
            return Err(not_found(id).into());
        }
        tracing::info!(%id, "incident deleted");
        Ok(())
    }

    /// Insert the given samples when the store holds no incidents.
    ///
    /// Returns how many incidents were inserted; `0` means the store already
    /// had data and was left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`IncidentsError::Validation`] if any sample is invalid (nothing
    /// is inserted in that case), or a storage error from the repository.
    #[tracing::instrument(skip(self, samples), fields(samples = samples.len()))]
    pub async fn seed_if_empty(&self, samples: Vec<NewIncident>) -> Result<usize, IncidentsError> {
        for sample in &samples {
            sample.validate()?;
        }
        self.repo.seed(samples).await
    }

    /// Number of stored incidents.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn count_incidents(&self) -> Result<u64, IncidentsError> {
        self.repo.count().await
    }
}

fn not_found(id: IncidentId) -> NotFoundError {
    NotFoundError {
        entity: "Incident",
        id: id.to_string(),
    }
}
