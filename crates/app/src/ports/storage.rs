//! Storage port — repository trait for incident persistence.

use std::future::Future;

use incidents_domain::error::IncidentsError;
use incidents_domain::id::IncidentId;
use incidents_domain::incident::{Incident, NewIncident};

/// Repository for persisting and querying [`Incident`]s.
///
/// Every write commits on its own. Implementations must surface a failed
/// write as [`IncidentsError::Storage`].
pub trait IncidentRepository {
    /// Insert a draft and return it with its newly assigned identifier.
    fn create(
        &self,
        draft: NewIncident,
    ) -> impl Future<Output = Result<Incident, IncidentsError>> + Send;

    /// Get an incident by its identifier.
    fn get_by_id(
        &self,
        id: IncidentId,
    ) -> impl Future<Output = Result<Option<Incident>, IncidentsError>> + Send;

    /// Get all incidents in ascending identifier order.
    fn get_all(&self) -> impl Future<Output = Result<Vec<Incident>, IncidentsError>> + Send;

    /// Delete an incident by its identifier.
    ///
    /// Resolves to `false` when no row had that identifier.
    fn delete(&self, id: IncidentId)
    -> impl Future<Output = Result<bool, IncidentsError>> + Send;

    /// Number of stored incidents.
    fn count(&self) -> impl Future<Output = Result<u64, IncidentsError>> + Send;

    /// Insert all drafts atomically, but only when no incident is stored yet.
    ///
    /// Resolves to the number of inserted rows (`0` if the store was not empty).
    fn seed(
        &self,
        drafts: Vec<NewIncident>,
    ) -> impl Future<Output = Result<usize, IncidentsError>> + Send;
}
