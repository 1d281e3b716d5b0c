use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;

#[derive(Clone)]
pub struct HealthState {
    pub catalog_count: usize,
    pub pdf_available: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HealthCheck {
    pub status: &'static str,
    pub detail: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: HealthCheck,
    pub document_pipeline: HealthCheck,
}

pub fn router(state: HealthState) -> Router {
    Router::new().route("/health", get(health)).with_state(state)
}

pub async fn health(State(state): State<HealthState>) -> (StatusCode, Json<HealthResponse>) {
    let service = HealthCheck {
        status: "ok",
        detail: format!("{} catalog records loaded", state.catalog_count),
    };
    let document_pipeline = if state.pdf_available {
        HealthCheck { status: "ok", detail: "wkhtmltopdf available".to_owned() }
    } else {
        HealthCheck {
            status: "degraded",
            detail: "wkhtmltopdf missing; documents delivered as HTML".to_owned(),
        }
    };

    let status = if state.pdf_available { "ok" } else { "degraded" };
    (StatusCode::OK, Json(HealthResponse { status, service, document_pipeline }))
}
