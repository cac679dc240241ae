//! In-memory repository and request helpers shared by handler tests.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use incidents_app::ports::IncidentRepository;
use incidents_app::services::incident_service::IncidentService;
use incidents_domain::error::IncidentsError;
use incidents_domain::id::IncidentId;
use incidents_domain::incident::{Incident, NewIncident};

use crate::state::AppState;

#[derive(Default)]
struct Rows {
    last_id: i64,
    by_id: BTreeMap<IncidentId, Incident>,
}

impl Rows {
    fn insert(&mut self, draft: NewIncident) -> Incident {
        self.last_id += 1;
        let incident = Incident::from_draft(IncidentId::new(self.last_id), draft);
        self.by_id.insert(incident.id, incident.clone());
        incident
    }

    fn seed(&mut self, drafts: Vec<NewIncident>) -> usize {
        if !self.by_id.is_empty() {
            return 0;
        }
        let inserted = drafts.len();
        for draft in drafts {
            self.insert(draft);
        }
        inserted
    }
}

/// Repository handle; clones share the same rows.
#[derive(Clone, Default)]
pub struct InMemoryIncidentRepo {
    rows: Arc<Mutex<Rows>>,
}

impl InMemoryIncidentRepo {
    pub fn stored(&self) -> usize {
        self.rows.lock().unwrap().by_id.len()
    }
}

impl IncidentRepository for InMemoryIncidentRepo {
    async fn create(&self, draft: NewIncident) -> Result<Incident, IncidentsError> {
        Ok(self.rows.lock().unwrap().insert(draft))
    }

    async fn get_by_id(&self, id: IncidentId) -> Result<Option<Incident>, IncidentsError> {
        Ok(self.rows.lock().unwrap().by_id.get(&id).cloned())
    }

    async fn get_all(&self) -> Result<Vec<Incident>, IncidentsError> {
        Ok(self.rows.lock().unwrap().by_id.values().cloned().collect())
    }

    async fn delete(&self, id: IncidentId) -> Result<bool, IncidentsError> {
        Ok(self.rows.lock().unwrap().by_id.remove(&id).is_some())
    }

    async fn count(&self) -> Result<u64, IncidentsError> {
        Ok(self.stored() as u64)
    }

    async fn seed(&self, drafts: Vec<NewIncident>) -> Result<usize, IncidentsError> {
        Ok(self.rows.lock().unwrap().seed(drafts))
    }
}

/// Repository whose every call fails as if the database were unreachable.
#[derive(Clone, Copy, Default)]
pub struct FailingIncidentRepo;

fn unreachable_db() -> IncidentsError {
    IncidentsError::Storage(Box::new(std::io::Error::other("database is locked")))
}

impl IncidentRepository for FailingIncidentRepo {
    async fn create(&self, _draft: NewIncident) -> Result<Incident, IncidentsError> {
        Err(unreachable_db())
    }

    async fn get_by_id(&self, _id: IncidentId) -> Result<Option<Incident>, IncidentsError> {
        Err(unreachable_db())
    }

    async fn get_all(&self) -> Result<Vec<Incident>, IncidentsError> {
        Err(unreachable_db())
    }

    async fn delete(&self, _id: IncidentId) -> Result<bool, IncidentsError> {
        Err(unreachable_db())
    }

    async fn count(&self) -> Result<u64, IncidentsError> {
        Err(unreachable_db())
    }

    async fn seed(&self, _drafts: Vec<NewIncident>) -> Result<usize, IncidentsError> {
        Err(unreachable_db())
    }
}

/// Router wired to a store that rejects every operation.
pub fn failing_app() -> Router {
    crate::router::build(AppState::new(IncidentService::new(FailingIncidentRepo)))
}

/// Router wired to a fresh in-memory store, plus a handle on that store.
pub fn test_app() -> (Router, InMemoryIncidentRepo) {
    let repo = InMemoryIncidentRepo::default();
    let state = AppState::new(IncidentService::new(repo.clone()));
    (crate::router::build(state), repo)
}

pub fn json_request(method: &str, uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Send one request; non-JSON bodies come back as `Value::Null`.
pub async fn call(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}
