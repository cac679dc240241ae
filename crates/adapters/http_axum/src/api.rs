//! JSON API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod incidents;

use axum::Json;
use axum::Router;
use axum::routing::get;
use serde::Serialize;

use incidents_app::ports::IncidentRepository;

use crate::state::AppState;

/// Greeting returned by `GET /`.
pub const WELCOME_MESSAGE: &str = "Welcome to the HumanChain AI Safety Incident Reporting API!";

/// `{"message": ...}` body shared by informational responses.
#[derive(Debug, Serialize)]
pub struct MessageBody {
    pub message: &'static str,
}

/// Build the API routes.
pub fn routes<R>() -> Router<AppState<R>>
where
    R: IncidentRepository + Send + Sync + 'static,
{
    Router::new()
        .route("/", get(welcome))
        .route(
            "/incidents",
            get(incidents::list::<R>).post(incidents::create::<R>),
        )
        .route(
            "/incidents/{id}",
            get(incidents::get::<R>).delete(incidents::delete::<R>),
        )
}

/// `GET /`
pub async fn welcome() -> Json<MessageBody> {
    Json(MessageBody {
        message: WELCOME_MESSAGE,
    })
}
