//! Service HTTP : `GET /?commune=…&prefixe=…&section=…&parcelle=…`

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use scpc::{ErrorKind, Scpc, ScpcError, SearchParams};
use serde::Serialize;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

/// Construit le routeur du service
pub fn router(scpc: Arc<Scpc>, request_log: bool) -> Router {
    let app = Router::new()
        .route("/", get(extrait_plan_cadastral))
        .with_state(scpc)
        .layer(CorsLayer::new().allow_origin(AllowOrigin::mirror_request()));

    if request_log {
        app.layer(TraceLayer::new_for_http())
    } else {
        app
    }
}

async fn extrait_plan_cadastral(
    State(scpc): State<Arc<Scpc>>,
    Query(params): Query<SearchParams>,
) -> Result<Response, ApiError> {
    let pdf = scpc.fetch_extrait(&params).await?;
    Ok(([(header::CONTENT_TYPE, "application/pdf")], pdf).into_response())
}

/// Corps JSON des réponses d'erreur
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub message: String,
    pub code: &'static str,
}

/// Erreur SCPC traduite en réponse HTTP
#[derive(Debug)]
pub struct ApiError(pub ScpcError);

impl From<ScpcError> for ApiError {
    fn from(err: ScpcError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        let status =
            StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        match err.kind() {
            ErrorKind::Validation | ErrorKind::NotFound => {}
            ErrorKind::Protocol | ErrorKind::Upstream => {
                warn!(error = %err, code = err.code(), "Échec SCPC")
            }
            ErrorKind::Internal => error!(error = %err, "Erreur interne"),
        }

        let body = ErrorResponse {
            message: err.to_string(),
            code: err.code(),
        };
        (status, Json(body)).into_response()
    }
}
