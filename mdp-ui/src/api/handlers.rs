//! Evaluation collection endpoints
//!
//! POST runs the whole submission pipeline: manager normalization,
//! rotation sequencing, score computation, persistence, then the detached
//! email notification. Both business-rule checks run before any write, so
//! a rejection leaves the store untouched.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

use mdp_common::model::{Evaluation, Function, Responses};
use mdp_common::names::normalize_manager;
use mdp_common::questions::question_set;
use mdp_common::rotation::sequence_submission;
use mdp_common::scoring::score_responses;
use mdp_common::Error;

use crate::store::NewEvaluation;
use crate::AppState;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub module: String,
    pub version: String,
}

/// GET /health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        module: "mdp-ui".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Submission body; rotation, id, timestamp, and scores are server-assigned
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitRequest {
    pub mdp_name: String,
    pub function_name: Function,
    pub manager: String,
    pub responses: Responses,
    #[serde(default)]
    pub email_response: bool,
    #[serde(default)]
    pub respondent_email: Option<String>,
}

/// GET /api/evaluations
///
/// All persisted evaluations in insertion order.
pub async fn list_evaluations(
    State(state): State<AppState>,
) -> Result<Json<Vec<Evaluation>>, ApiError> {
    let evaluations = state.store.all().await?;
    Ok(Json(evaluations))
}

/// POST /api/evaluations
///
/// Validates, sequences, scores, and persists one submission. Responds 201
/// with the full created record.
pub async fn submit_evaluation(
    State(state): State<AppState>,
    Json(request): Json<SubmitRequest>,
) -> Result<(StatusCode, Json<Evaluation>), ApiError> {
    if request.mdp_name.trim().is_empty() {
        return Err(ApiError::BadRequest("mdpName must not be empty".to_string()));
    }

    let questions = question_set(request.function_name);
    let scores = score_responses(&request.responses, questions)?;

    // The read-validate-write sequence holds the write lock so concurrent
    // submissions for one participant cannot share a rotation number
    let guard = state.store.write_guard().await;
    let history = state.store.history(&request.mdp_name).await?;
    let rotation = sequence_submission(&request.mdp_name, request.function_name, &history)?;

    let created = state
        .store
        .append(NewEvaluation {
            mdp_name: request.mdp_name,
            function_name: request.function_name,
            manager: normalize_manager(&request.manager),
            rotation,
            responses: request.responses,
            scores,
            email_response: request.email_response,
            respondent_email: request.respondent_email,
        })
        .await?;
    drop(guard);

    info!(
        "Stored evaluation {} for {} ({}, rotation {})",
        created.id, created.mdp_name, created.function_name, created.rotation
    );

    state.notifier.dispatch(&created);

    Ok((StatusCode::CREATED, Json(created)))
}

/// DELETE /api/evaluations/:id
///
/// Idempotent: removing an absent id is a benign no-op.
pub async fn delete_evaluation(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let removed = state.store.remove(&id).await?;
    if removed {
        info!("Removed evaluation {}", id);
    } else {
        info!("Delete of unknown evaluation {} ignored", id);
    }
    Ok(Json(json!({ "success": true })))
}

/// API errors surfaced as `{"error": message}` JSON bodies
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Internal(String),
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        match err {
            Error::Validation(_) | Error::DuplicateRotation(_) | Error::DuplicateFunction(_) => {
                ApiError::BadRequest(err.to_string())
            }
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}
