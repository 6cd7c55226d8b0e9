use std::io::Cursor;
use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;

use super::classifier::IntentClassifier;
use super::domain::Offer;
use super::export::write_results_csv;
use super::parser::{parse_leads, LeadCsvError};
use super::service::LeadScoringService;
use super::session::SessionError;

/// Router builder exposing the lead scoring HTTP endpoints. Generic over
/// the classifier so tests can drive the full surface with a scripted one.
pub fn scoring_router<C>(service: Arc<LeadScoringService<C>>) -> Router
where
    C: IntentClassifier + 'static,
{
    Router::new()
        .route("/api/v1/offer", post(set_offer_handler::<C>))
        .route("/api/v1/leads/upload", post(upload_leads_handler::<C>))
        .route("/api/v1/score", post(run_scoring_handler::<C>))
        .route("/api/v1/results", get(results_handler::<C>))
        .route("/api/v1/results/csv", get(export_results_handler::<C>))
        .with_state(service)
}

pub(crate) async fn set_offer_handler<C>(
    State(service): State<Arc<LeadScoringService<C>>>,
    axum::Json(offer): axum::Json<Offer>,
) -> Response
where
    C: IntentClassifier + 'static,
{
    let name = offer.name.clone();
    match service.set_offer(offer).await {
        Ok(status) => {
            let payload = json!({
                "message": format!("offer '{name}' is active"),
                "status": status.label(),
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(err) => session_error_response(err),
    }
}

pub(crate) async fn upload_leads_handler<C>(
    State(service): State<Arc<LeadScoringService<C>>>,
    body: String,
) -> Response
where
    C: IntentClassifier + 'static,
{
    let profiles = match parse_leads(Cursor::new(body.into_bytes())) {
        Ok(profiles) => profiles,
        Err(err) => return csv_error_response(err),
    };

    match service.load_leads(profiles).await {
        Ok(count) => {
            let payload = json!({
                "message": format!("uploaded {count} leads"),
                "count": count,
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(err) => session_error_response(err),
    }
}

pub(crate) async fn run_scoring_handler<C>(
    State(service): State<Arc<LeadScoringService<C>>>,
) -> Response
where
    C: IntentClassifier + 'static,
{
    match service.run_scoring().await {
        Ok(summary) => (StatusCode::OK, axum::Json(summary)).into_response(),
        Err(err) => session_error_response(err),
    }
}

pub(crate) async fn results_handler<C>(
    State(service): State<Arc<LeadScoringService<C>>>,
) -> Response
where
    C: IntentClassifier + 'static,
{
    match service.results().await {
        Ok(views) => (StatusCode::OK, axum::Json(views)).into_response(),
        Err(err) => session_error_response(err),
    }
}

pub(crate) async fn export_results_handler<C>(
    State(service): State<Arc<LeadScoringService<C>>>,
) -> Response
where
    C: IntentClassifier + 'static,
{
    let views = match service.results().await {
        Ok(views) => views,
        Err(err) => return session_error_response(err),
    };

    match write_results_csv(&views) {
        Ok(csv) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, "text/csv"),
                (
                    header::CONTENT_DISPOSITION,
                    "attachment; filename=scored_leads.csv",
                ),
            ],
            csv,
        )
            .into_response(),
        Err(err) => {
            let payload = json!({ "error": err.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

fn session_error_response(err: SessionError) -> Response {
    let status = match err {
        SessionError::EmptyOfferName | SessionError::EmptyBatch => StatusCode::BAD_REQUEST,
        SessionError::OfferMissing | SessionError::LeadsMissing | SessionError::NotScored => {
            StatusCode::CONFLICT
        }
        SessionError::ClassifierUnconfigured => StatusCode::INTERNAL_SERVER_ERROR,
    };

    let payload = json!({ "error": err.to_string() });
    (status, axum::Json(payload)).into_response()
}

fn csv_error_response(err: LeadCsvError) -> Response {
    let payload = json!({ "error": err.to_string() });
    (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response()
}
