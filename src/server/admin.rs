//! Admin endpoints over stored leads.
//!
//! Authentication is handled in front of this service.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info};
use uuid::Uuid;

use super::AppState;
use crate::error::DatabaseError;
use crate::store::{LeadStatus, LeadStore, StatusCounts};

const STORE_UNAVAILABLE: &str = "Lead store unavailable";
const NOT_FOUND: &str = "Submission not found";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct StatusUpdate {
    id: String,
    status: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ListQuery {
    status: Option<String>,
}

impl ListQuery {
    /// `None` lists every lead; `all` and an empty value mean the same.
    fn filter(&self) -> Result<Option<LeadStatus>, String> {
        match self.status.as_deref().map(str::trim) {
            None | Some("") | Some("all") => Ok(None),
            Some(status) => status.parse().map(Some),
        }
    }
}

fn list_error(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(json!({ "data": null, "error": message.into() }))).into_response()
}

fn update_error(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(json!({ "success": false, "error": message.into() })),
    )
        .into_response()
}

/// GET /api/admin/submissions: newest first, optionally narrowed by `?status=`.
///
/// `counts` covers every lead regardless of the filter.
async fn list_submissions(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Response {
    let Some(store) = state.store else {
        return list_error(StatusCode::INTERNAL_SERVER_ERROR, STORE_UNAVAILABLE);
    };
    let filter = match query.filter() {
        Ok(filter) => filter,
        Err(message) => return list_error(StatusCode::BAD_REQUEST, message),
    };

    match store.list_submissions().await {
        Ok(submissions) => {
            let counts = StatusCounts::tally(&submissions);
            let data: Vec<_> = submissions
                .into_iter()
                .filter(|record| filter.is_none_or(|status| record.status == status))
                .collect();
            Json(json!({ "data": data, "counts": counts, "error": null })).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to list submissions");
            list_error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}

/// GET /api/admin/submissions/counts
async fn submission_counts(State(state): State<AppState>) -> Response {
    let Some(store) = state.store else {
        return list_error(StatusCode::INTERNAL_SERVER_ERROR, STORE_UNAVAILABLE);
    };

    match store.list_submissions().await {
        Ok(submissions) => {
            let counts = StatusCounts::tally(&submissions);
            Json(json!({ "data": counts, "error": null })).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to count submissions");
            list_error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}

/// GET /api/admin/submissions/{id}
async fn get_submission(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let Some(store) = state.store else {
        return list_error(StatusCode::INTERNAL_SERVER_ERROR, STORE_UNAVAILABLE);
    };
    let Ok(id) = Uuid::parse_str(&id) else {
        return list_error(StatusCode::NOT_FOUND, NOT_FOUND);
    };

    match store.get_submission(id).await {
        Ok(Some(record)) => Json(json!({ "data": record, "error": null })).into_response(),
        Ok(None) => list_error(StatusCode::NOT_FOUND, NOT_FOUND),
        Err(e) => {
            error!(error = %e, submission_id = %id, "Failed to load submission");
            list_error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}

/// PUT /api/admin/submissions with `{id, status}`.
async fn update_status(
    State(state): State<AppState>,
    body: Result<Json<StatusUpdate>, JsonRejection>,
) -> Response {
    match body {
        Ok(Json(update)) => apply_status(state.store, &update.id, &update.status).await,
        Err(rejection) => update_error(StatusCode::BAD_REQUEST, rejection.body_text()),
    }
}

/// PUT /api/admin/submissions/{id} with `{status}`.
async fn update_status_by_path(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<StatusUpdate>, JsonRejection>,
) -> Response {
    match body {
        Ok(Json(update)) => apply_status(state.store, &id, &update.status).await,
        Err(rejection) => update_error(StatusCode::BAD_REQUEST, rejection.body_text()),
    }
}

async fn apply_status(store: Option<Arc<dyn LeadStore>>, id: &str, status: &str) -> Response {
    let Some(store) = store else {
        return update_error(StatusCode::INTERNAL_SERVER_ERROR, STORE_UNAVAILABLE);
    };
    let status: LeadStatus = match status.parse() {
        Ok(status) => status,
        Err(message) => return update_error(StatusCode::BAD_REQUEST, message),
    };
    let Ok(id) = Uuid::parse_str(id) else {
        return update_error(StatusCode::NOT_FOUND, NOT_FOUND);
    };

    match store.update_status(id, status).await {
        Ok(()) => {
            info!(submission_id = %id, status = %status, "Submission status updated");
            Json(json!({ "success": true })).into_response()
        }
        Err(DatabaseError::NotFound { .. }) => update_error(StatusCode::NOT_FOUND, NOT_FOUND),
        Err(e) => {
            error!(error = %e, submission_id = %id, "Failed to update submission status");
            update_error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}

/// Build the admin REST routes.
pub fn admin_routes(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/admin/submissions",
            get(list_submissions).put(update_status),
        )
        .route("/api/admin/submissions/counts", get(submission_counts))
        .route(
            "/api/admin/submissions/{id}",
            get(get_submission).put(update_status_by_path),
        )
        .with_state(state)
}
