//! JSON REST handlers for incidents.

use std::str::FromStr;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::{Map, Value};

use incidents_app::ports::IncidentRepository;
use incidents_domain::error::{IncidentsError, NotFoundError};
use incidents_domain::id::IncidentId;
use incidents_domain::incident::{Incident, NewIncident, Severity};
use incidents_domain::time::Timestamp;

use super::MessageBody;
use crate::error::ApiError;
use crate::state::AppState;

/// Keys a create request must carry, in validation order.
pub const REQUIRED_FIELDS: [&str; 3] = ["title", "description", "severity"];

/// Wire representation of an [`Incident`].
#[derive(Debug, Serialize)]
pub struct IncidentBody {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub severity: Severity,
    pub reported_at: Timestamp,
}

impl From<Incident> for IncidentBody {
    fn from(incident: Incident) -> Self {
        Self {
            id: incident.id.as_i64(),
            title: incident.title,
            description: incident.description,
            severity: incident.severity,
            reported_at: incident.reported_at,
        }
    }
}

/// Typed view of a create request body.
///
/// Built only once the body is known to be an object holding every key in
/// [`REQUIRED_FIELDS`]. A field whose value has the wrong JSON type is kept
/// as `None` and reported by the domain builder in field order.
#[derive(Debug, Default)]
pub struct CreateIncidentRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub severity: Option<Severity>,
}

impl CreateIncidentRequest {
    /// Check the body shape and extract typed fields.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidRequest`] when the body is not a non-empty
    /// JSON object, and [`ApiError::MissingFields`] when a required key is
    /// absent.
    pub fn from_payload(payload: Result<Json<Value>, JsonRejection>) -> Result<Self, ApiError> {
        let Json(value) = payload.map_err(|rejection| {
            tracing::debug!(%rejection, "unreadable request body");
            ApiError::InvalidRequest
        })?;
        let Value::Object(fields) = value else {
            return Err(ApiError::InvalidRequest);
        };
        if fields.is_empty() {
            return Err(ApiError::InvalidRequest);
        }
        if !REQUIRED_FIELDS.iter().all(|key| fields.contains_key(*key)) {
            return Err(ApiError::MissingFields);
        }
        Ok(Self::from_fields(&fields))
    }

    fn from_fields(fields: &Map<String, Value>) -> Self {
        let text = |key: &str| fields.get(key).and_then(Value::as_str).map(str::to_owned);
        Self {
            title: text("title"),
            description: text("description"),
            severity: fields
                .get("severity")
                .and_then(Value::as_str)
                .and_then(|label| Severity::from_str(label).ok()),
        }
    }

    /// Turn the request into a validated draft stamped with the current time.
    ///
    /// # Errors
    ///
    /// Returns [`IncidentsError::Validation`] for the first field (title,
    /// description, severity) that fails its constraint.
    pub fn into_draft(self) -> Result<NewIncident, IncidentsError> {
        let mut builder = NewIncident::builder();
        if let Some(title) = self.title {
            builder = builder.title(title);
        }
        if let Some(description) = self.description {
            builder = builder.description(description);
        }
        if let Some(severity) = self.severity {
            builder = builder.severity(severity);
        }
        builder.build()
    }
}

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<Vec<IncidentBody>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the get endpoint.
pub enum GetResponse {
    Ok(Json<IncidentBody>),
}

impl IntoResponse for GetResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the create endpoint.
pub enum CreateResponse {
    Created(Json<IncidentBody>),
}

impl IntoResponse for CreateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
        }
    }
}

/// Possible responses from the delete endpoint.
pub enum DeleteResponse {
    Deleted,
}

impl IntoResponse for DeleteResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Deleted => Json(MessageBody {
                message: "Deleted successfully",
            })
            .into_response(),
        }
    }
}

/// A path segment that is not an integer cannot name an incident.
fn parse_id(raw: &str) -> Result<IncidentId, ApiError> {
    IncidentId::from_str(raw).map_err(|_| {
        ApiError::from(IncidentsError::from(NotFoundError {
            entity: "Incident",
            id: raw.to_string(),
        }))
    })
}

/// `GET /incidents`
pub async fn list<R>(State(state): State<AppState<R>>) -> Result<ListResponse, ApiError>
where
    R: IncidentRepository + Send + Sync + 'static,
{
    let incidents = state.incident_service.list_incidents().await?;
    Ok(ListResponse::Ok(Json(
        incidents.into_iter().map(IncidentBody::from).collect(),
    )))
}

/// `GET /incidents/{id}`
pub async fn get<R>(
    State(state): State<AppState<R>>,
    Path(id): Path<String>,
) -> Result<GetResponse, ApiError>
where
    R: IncidentRepository + Send + Sync + 'static,
{
    let incident_id = parse_id(&id)?;
    let incident = state.incident_service.get_incident(incident_id).await?;
    Ok(GetResponse::Ok(Json(incident.into())))
}

/// `POST /incidents`
pub async fn create<R>(
    State(state): State<AppState<R>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<CreateResponse, ApiError>
where
    R: IncidentRepository + Send + Sync + 'static,
{
    let draft = CreateIncidentRequest::from_payload(payload)?.into_draft()?;
    let created = state.incident_service.create_incident(draft).await?;
    Ok(CreateResponse::Created(Json(created.into())))
}

/// `DELETE /incidents/{id}`
pub async fn delete<R>(
    State(state): State<AppState<R>>,
    Path(id): Path<String>,
) -> Result<DeleteResponse, ApiError>
where
    R: IncidentRepository + Send + Sync + 'static,
{
    let incident_id = parse_id(&id)?;
    state.incident_service.delete_incident(incident_id).await?;
    Ok(DeleteResponse::Deleted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{call, failing_app, json_request, test_app};
    use axum::body::Body;
    use axum::http::Request;
    use serde_json::json;

    async fn post(body: &str) -> (StatusCode, Value) {
        let (app, _) = test_app();
        call(app, json_request("POST", "/incidents", body)).await
    }

    async fn error_of(body: &str) -> (StatusCode, String) {
        let (status, value) = post(body).await;
        (status, value["error"].as_str().unwrap_or_default().to_string())
    }

    #[tokio::test]
    async fn should_create_incident_when_body_valid() {
        let (status, body) =
            post(r#"{"title":"Test","description":"Desc","severity":"High"}"#).await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["id"], 1);
        assert_eq!(body["title"], "Test");
        assert_eq!(body["description"], "Desc");
        assert_eq!(body["severity"], "High");
        let reported_at = body["reported_at"].as_str().unwrap();
        assert!(chrono::DateTime::parse_from_rfc3339(reported_at).is_ok());
    }

    #[tokio::test]
    async fn should_ignore_unknown_fields() {
        let (status, body) = post(
            r#"{"title":"T","description":"D","severity":"Low","reporter":"ops","id":99}"#,
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["id"], 1);
        assert!(body.get("reporter").is_none());
    }

    #[tokio::test]
    async fn should_reject_malformed_json() {
        let (status, message) = error_of(r#"{"title": "#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(message, "Request body must be JSON");
    }

    #[tokio::test]
    async fn should_reject_empty_object() {
        let (status, message) = error_of("{}").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(message, "Request body must be JSON");
    }

    #[tokio::test]
    async fn should_reject_non_object_json() {
        let (status, message) = error_of(r#"["title","description","severity"]"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(message, "Request body must be JSON");
    }

    #[tokio::test]
    async fn should_reject_body_without_json_content_type() {
        let (app, store) = test_app();
        let request = Request::builder()
            .method("POST")
            .uri("/incidents")
            .body(Body::from(
                r#"{"title":"T","description":"D","severity":"Low"}"#,
            ))
            .unwrap();

        let (status, body) = call(app, request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Request body must be JSON");
        assert_eq!(store.stored(), 0);
    }

    #[tokio::test]
    async fn should_reject_missing_title_without_persisting() {
        let (app, store) = test_app();
        let (status, body) = call(
            app,
            json_request(
                "POST",
                "/incidents",
                r#"{"description":"D","severity":"Low"}"#,
            ),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body["error"],
            "Missing required fields: title, description, severity"
        );
        assert_eq!(store.stored(), 0);
    }

    #[tokio::test]
    async fn should_treat_null_field_as_present_but_invalid() {
        let (status, message) =
            error_of(r#"{"title":null,"description":"D","severity":"Low"}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(message, "Title must be a non-empty string");
    }

    #[tokio::test]
    async fn should_reject_non_string_title() {
        let (status, message) =
            error_of(r#"{"title":42,"description":"D","severity":"Low"}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(message, "Title must be a non-empty string");
    }

    #[tokio::test]
    async fn should_reject_whitespace_description() {
        let (status, message) =
            error_of(r#"{"title":"T","description":"   ","severity":"Low"}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(message, "Description must be a non-empty string");
    }

    #[tokio::test]
    async fn should_report_title_before_description() {
        let (_, message) = error_of(r#"{"title":"","description":7,"severity":"Nope"}"#).await;
        assert_eq!(message, "Title must be a non-empty string");
    }

    #[tokio::test]
    async fn should_reject_unknown_severity_without_persisting() {
        let (app, store) = test_app();
        let (status, body) = call(
            app,
            json_request(
                "POST",
                "/incidents",
                r#"{"title":"T","description":"D","severity":"Critical"}"#,
            ),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body["error"],
            "Severity must be one of ['Low', 'Medium', 'High']"
        );
        assert_eq!(store.stored(), 0);
    }

    #[tokio::test]
    async fn should_reject_lowercase_severity() {
        let (status, _) = error_of(r#"{"title":"T","description":"D","severity":"high"}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn should_return_not_found_for_non_numeric_id() {
        let (app, _) = test_app();
        let request = Request::builder()
            .uri("/incidents/abc")
            .body(Body::empty())
            .unwrap();

        let (status, body) = call(app, request).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"error": "Incident not found"}));
    }

    #[tokio::test]
    async fn should_return_not_found_when_deleting_missing_incident() {
        let (app, _) = test_app();
        let request = Request::builder()
            .method("DELETE")
            .uri("/incidents/12")
            .body(Body::empty())
            .unwrap();

        let (status, body) = call(app, request).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"error": "Incident not found"}));
    }

    #[tokio::test]
    async fn should_confirm_deletion() {
        let (app, store) = test_app();
        let (_, created) = call(
            app.clone(),
            json_request(
                "POST",
                "/incidents",
                r#"{"title":"T","description":"D","severity":"Medium"}"#,
            ),
        )
        .await;

        let request = Request::builder()
            .method("DELETE")
            .uri(format!("/incidents/{}", created["id"]))
            .body(Body::empty())
            .unwrap();
        let (status, body) = call(app, request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"message": "Deleted successfully"}));
        assert_eq!(store.stored(), 0);
    }

    #[test]
    fn should_map_incident_to_wire_shape() {
        let draft = NewIncident::builder()
            .title("Data Leakage")
            .description("Exposed")
            .severity(Severity::High)
            .build()
            .unwrap();
        let incident = Incident::from_draft(IncidentId::new(4), draft);
        let reported_at = incident.reported_at;

        let value = serde_json::to_value(IncidentBody::from(incident)).unwrap();
        assert_eq!(value["id"], 4);
        assert_eq!(value["severity"], "High");
        let wire_ts = value["reported_at"].as_str().unwrap();
        assert_eq!(
            chrono::DateTime::parse_from_rfc3339(wire_ts).unwrap(),
            reported_at
        );
    }

    #[tokio::test]
    async fn should_answer_500_when_store_fails_on_create() {
        let (status, body) = call(
            failing_app(),
            json_request(
                "POST",
                "/incidents",
                r#"{"title":"Test","description":"Desc","severity":"High"}"#,
            ),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"error": "internal server error"}));
        assert!(body.get("id").is_none());
    }

    #[tokio::test]
    async fn should_answer_500_when_store_fails_on_list() {
        let request = Request::builder()
            .uri("/incidents")
            .body(Body::empty())
            .unwrap();
        let (status, body) = call(failing_app(), request).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"error": "internal server error"}));
    }

    #[tokio::test]
    async fn should_answer_500_when_store_fails_on_lookup_or_delete() {
        for method in ["GET", "DELETE"] {
            let request = Request::builder()
                .method(method)
                .uri("/incidents/1")
                .body(Body::empty())
                .unwrap();
            let (status, body) = call(failing_app(), request).await;

            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{method}");
            assert_eq!(body, json!({"error": "internal server error"}));
        }
    }
}
