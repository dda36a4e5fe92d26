//! Public quote form endpoint.

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::{Method, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info};

use super::AppState;
use crate::intake::{QuoteRequest, SUBMIT_QUOTE_PATH};

pub const SUCCESS_MESSAGE: &str = "Quote request submitted successfully";
pub const FAILURE_MESSAGE: &str = "Failed to submit quote request";

/// POST /api/submit-quote
///
/// 200 `{message}` once validation passes, whatever happens to storage and
/// email. 400 `{error}` on validation failure. 500 `{error, details}` when
/// the body cannot be decoded.
async fn submit_quote(
    State(state): State<AppState>,
    body: Result<Json<QuoteRequest>, JsonRejection>,
) -> Response {
    let request = match body {
        Ok(Json(request)) => request,
        Err(rejection) => {
            error!(error = %rejection.body_text(), "Failed to decode quote request");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": FAILURE_MESSAGE,
                    "details": rejection.body_text(),
                })),
            )
                .into_response();
        }
    };

    match state.intake.process(&request).await {
        Ok(receipt) => {
            info!(submission_id = ?receipt.submission_id, "Quote submitted");
            (StatusCode::OK, Json(json!({ "message": SUCCESS_MESSAGE }))).into_response()
        }
        Err(e) => {
            info!(reason = %e, "Quote request rejected");
            (StatusCode::BAD_REQUEST, Json(json!({ "error": e.to_string() }))).into_response()
        }
    }
}

/// Browser-facing form routes, open to any origin.
pub fn quote_routes(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route(SUBMIT_QUOTE_PATH, post(submit_quote))
        .layer(cors)
        .with_state(state)
}
