//! Quotation preview, download, and submission endpoints.
//!
//! - `POST /quotation/preview`  — render the quotation inline (HTML)
//! - `POST /quotation/document` — download the quotation document
//! - `POST /quotation/submit`   — forward the finalized quotation to the
//!   external persistence collaborator

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{header, StatusCode},
    response::{Html, Response},
    routing::post,
    Json, Router,
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use tripquote_catalog::{CatalogSource, QuotationSubmission};
use tripquote_core::{
    aggregate, check_warnings, resolve_conversion, validate, ApplicationError, Conversion,
    CurrencyConversion, DomainError, InterfaceError, QuotationDraft, QuotationWarning,
};
use tripquote_document::{download_filename, DocumentGenerator};

#[derive(Clone)]
pub struct QuotationState {
    pub generator: Arc<DocumentGenerator>,
    pub catalog: Arc<dyn CatalogSource>,
    pub conversions: Arc<Vec<CurrencyConversion>>,
}

#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub success: bool,
    pub message: String,
    pub warnings: Vec<QuotationWarning>,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: String,
    pub correlation_id: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub validation_errors: Vec<String>,
}

type ApiFailure = (StatusCode, Json<ApiError>);

pub fn router(state: QuotationState) -> Router {
    Router::new()
        .route("/quotation/preview", post(preview_quotation))
        .route("/quotation/document", post(download_quotation))
        .route("/quotation/submit", post(submit_quotation))
        .with_state(state)
}

/// Maps an application failure onto an HTTP status and client-safe body.
/// Internal detail stays in the log line keyed by the correlation id.
fn api_failure(error: ApplicationError, validation_errors: Vec<String>) -> ApiFailure {
    let correlation_id = Uuid::new_v4().simple().to_string();
    warn!(correlation_id = %correlation_id, error = %error, "quotation request failed");

    let interface = error.into_interface(correlation_id.clone());
    let (status, message) = match &interface {
        InterfaceError::BadRequest { .. } => {
            (StatusCode::BAD_REQUEST, interface.user_message().to_owned())
        }
        InterfaceError::ServiceUnavailable { .. } => (StatusCode::BAD_GATEWAY, interface.to_string()),
        InterfaceError::Internal { .. } => {
            (StatusCode::INTERNAL_SERVER_ERROR, interface.user_message().to_owned())
        }
    };

    (status, Json(ApiError { error: message, correlation_id, validation_errors }))
}

fn validation_failure(errors: Vec<tripquote_core::ValidationError>) -> ApiFailure {
    let details: Vec<String> = errors.iter().map(ToString::to_string).collect();
    api_failure(DomainError::Validation(errors).into(), details)
}

fn display_conversion(state: &QuotationState, draft: &QuotationDraft) -> Conversion {
    resolve_conversion(draft.travel.country_id.as_ref(), &state.conversions)
}

pub async fn preview_quotation(
    State(state): State<QuotationState>,
    Json(draft): Json<QuotationDraft>,
) -> Result<Html<String>, ApiFailure> {
    if let Err(errors) = validate(&draft) {
        return Err(validation_failure(errors));
    }

    let costs = aggregate(&draft);
    let conversion = display_conversion(&state, &draft);
    let rendered = state
        .generator
        .renderer()
        .render(&draft, &costs, &conversion)
        .map_err(|e| api_failure(ApplicationError::Rendering(e.to_string()), Vec::new()))?;

    Ok(Html(rendered.html))
}

pub async fn download_quotation(
    State(state): State<QuotationState>,
    Json(draft): Json<QuotationDraft>,
) -> Result<Response, ApiFailure> {
    if let Err(errors) = validate(&draft) {
        return Err(validation_failure(errors));
    }

    let costs = aggregate(&draft);
    let conversion = display_conversion(&state, &draft);
    let artifact = state
        .generator
        .generate(&draft, &costs, &conversion)
        .await
        .map_err(|e| api_failure(ApplicationError::Rendering(e.to_string()), Vec::new()))?;

    let filename = download_filename(draft.quotation_no.as_deref());
    let content_type = artifact.content_type();

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type)
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{filename}\""),
        )
        .body(Body::from(artifact.into_bytes()))
        .map_err(|e| api_failure(ApplicationError::Rendering(e.to_string()), Vec::new()))
}

pub async fn submit_quotation(
    State(state): State<QuotationState>,
    Json(draft): Json<QuotationDraft>,
) -> Result<Json<SubmitResponse>, ApiFailure> {
    if let Err(errors) = validate(&draft) {
        return Err(validation_failure(errors));
    }

    // Mismatch warnings ride along in the response; they never block the
    // write.
    let warnings = check_warnings(&draft);
    let costs = aggregate(&draft);
    let submission = QuotationSubmission::from_draft(&draft, &costs, draft.status);

    if let Err(error) = state.catalog.submit_quotation(&submission).await {
        warn!(error = %error, "quotation submission failed");
        return Err(api_failure(
            ApplicationError::Submission(
                "quotation could not be submitted; the draft is unchanged".to_owned(),
            ),
            Vec::new(),
        ));
    }

    info!(status = ?draft.status, "quotation forwarded to persistence collaborator");
    Ok(Json(SubmitResponse {
        success: true,
        message: format!(
            "quotation submitted with status {:?} for {} traveller(s)",
            draft.status, draft.travel.group_size
        ),
        warnings,
    }))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::extract::State;
    use axum::Json;
    use rust_decimal::Decimal;

    use super::{preview_quotation, submit_quotation, QuotationState};
    use tripquote_catalog::{
        CatalogError, CatalogSnapshot, CatalogSource, QuotationSubmission,
    };
    use tripquote_core::config::BrandingConfig;
    use tripquote_core::{
        AccommodationLineItem, CatalogChoice, QuotationDraft, SessionContext,
    };
    use tripquote_document::DocumentGenerator;

    struct StubCatalog {
        fail_submission: bool,
    }

    #[async_trait]
    impl CatalogSource for StubCatalog {
        async fn fetch_all(&self) -> Result<CatalogSnapshot, CatalogError> {
            Ok(CatalogSnapshot::default())
        }

        async fn submit_quotation(
            &self,
            _submission: &QuotationSubmission,
        ) -> Result<(), CatalogError> {
            if self.fail_submission {
                Err(CatalogError::Unavailable("persistence collaborator is down".to_owned()))
            } else {
                Ok(())
            }
        }
    }

    fn state(fail_submission: bool) -> QuotationState {
        let generator = DocumentGenerator::new(BrandingConfig {
            agency_name: "Sunset Tours".to_owned(),
            contact_line: "hello@sunset.example".to_owned(),
            logo_url: None,
        })
        .expect("generator")
        .without_pdf_conversion();

        QuotationState {
            generator: Arc::new(generator),
            catalog: Arc::new(StubCatalog { fail_submission }),
            conversions: Arc::new(Vec::new()),
        }
    }

    fn complete_draft() -> QuotationDraft {
        let mut draft = QuotationDraft::new(&SessionContext::default());
        draft.client.name = "R. Sharma".to_owned();
        draft.travel.travel_date = chrono::NaiveDate::from_ymd_opt(2026, 12, 4);
        draft.travel.group_size = 2;
        draft.travel.declared_total_nights = 2;
        draft.location = "Phuket".to_owned();
        draft.accommodations.push(AccommodationLineItem {
            location: "Phuket".to_owned(),
            hotel_name: CatalogChoice::Custom("Sea View Resort".to_owned()),
            room_type: "Deluxe".to_owned(),
            nights: 2,
            price_per_night: Decimal::from(1500),
        });
        draft
    }

    #[tokio::test]
    async fn preview_renders_validated_draft_inline() {
        let html = preview_quotation(State(state(false)), Json(complete_draft()))
            .await
            .expect("preview succeeds");
        assert!(html.0.contains("Phuket"));
    }

    #[tokio::test]
    async fn preview_rejects_incomplete_draft_with_field_errors() {
        let draft = QuotationDraft::new(&SessionContext::default());
        let (status, body) = preview_quotation(State(state(false)), Json(draft))
            .await
            .expect_err("empty draft must be rejected");
        assert_eq!(status, axum::http::StatusCode::BAD_REQUEST);
        assert!(!body.0.validation_errors.is_empty());
    }

    #[tokio::test]
    async fn submission_failure_maps_to_bad_gateway() {
        let (status, body) = submit_quotation(State(state(true)), Json(complete_draft()))
            .await
            .expect_err("stub rejects submission");
        assert_eq!(status, axum::http::StatusCode::BAD_GATEWAY);
        assert!(body.0.error.contains("draft is unchanged"));
    }

    #[tokio::test]
    async fn successful_submission_echoes_warnings() {
        let mut draft = complete_draft();
        draft.travel.declared_total_nights = 5;

        let response = submit_quotation(State(state(false)), Json(draft))
            .await
            .expect("submission succeeds");
        assert!(response.0.success);
        assert_eq!(response.0.warnings.len(), 1);
    }
}
