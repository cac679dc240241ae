//! Shared application state for axum handlers.

use std::sync::Arc;

use incidents_app::ports::IncidentRepository;
use incidents_app::services::incident_service::IncidentService;

/// Application state shared across all axum handlers.
///
/// Generic over the repository type to avoid dynamic dispatch.
/// `Clone` is implemented manually so the repository itself does not
/// need to be `Clone` — only the `Arc` wrapper is cloned.
pub struct AppState<R> {
    /// Incident use-cases.
    pub incident_service: Arc<IncidentService<R>>,
}

impl<R> Clone for AppState<R> {
    fn clone(&self) -> Self {
        Self {
            incident_service: Arc::clone(&self.incident_service),
        }
    }
}

impl<R> AppState<R>
where
    R: IncidentRepository + Send + Sync + 'static,
{
    /// Create a new application state from a service instance.
    pub fn new(incident_service: IncidentService<R>) -> Self {
        Self::from_arc(Arc::new(incident_service))
    }

    /// Create a new application state from a pre-wrapped service.
    ///
    /// Use this when the service is also shared outside the HTTP layer.
    pub fn from_arc(incident_service: Arc<IncidentService<R>>) -> Self {
        Self { incident_service }
    }
}
