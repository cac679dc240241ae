//! Bootstrap data — sample incidents inserted into an empty store.

use incidents_app::ports::IncidentRepository;
use incidents_app::services::incident_service::IncidentService;
use incidents_domain::error::IncidentsError;
use incidents_domain::incident::{NewIncident, Severity};
use incidents_domain::time;

const SAMPLES: [(&str, &str, Severity); 3] = [
    (
        "Unexpected AI Behavior",
        "AI model generated inappropriate content during testing.",
        Severity::Medium,
    ),
    (
        "Data Leakage",
        "Sensitive user data was exposed due to misconfiguration.",
        Severity::High,
    ),
    (
        "Minor Processing Delay",
        "AI inference took longer than expected under heavy load.",
        Severity::Low,
    ),
];

/// Build the sample drafts, all stamped with the same report time.
///
/// # Errors
///
/// Returns [`IncidentsError::Validation`] if a sample breaks an invariant.
pub fn samples() -> Result<Vec<NewIncident>, IncidentsError> {
    let reported_at = time::now();
    SAMPLES
        .iter()
        .map(|(title, description, severity)| {
            NewIncident::builder()
                .title(*title)
                .description(*description)
                .severity(*severity)
                .reported_at(reported_at)
                .build()
        })
        .collect()
}

/// Insert the samples unless the store already holds incidents.
///
/// # Errors
///
/// Returns a storage error propagated from the repository.
pub async fn run<R>(service: &IncidentService<R>) -> Result<usize, IncidentsError>
where
    R: IncidentRepository,
{
    let inserted = service.seed_if_empty(samples()?).await?;
    if inserted == 0 {
        let existing = service.count_incidents().await?;
        tracing::info!(existing, "database already contains incidents");
    } else {
        tracing::info!(count = inserted, "database initialized with sample incidents");
    }
    Ok(inserted)
}
