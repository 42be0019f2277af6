//! HTTP surface.
//!
//! | Route                   | Answer                                                 |
//! |-------------------------|--------------------------------------------------------|
//! | `POST /api/plan`        | a [`ResultEnvelope`], status from its error kind       |
//! | `GET /api/plan/example` | the bundled example [`PlanResponse`](stepfree_types::PlanResponse) |
//! | `GET /api/health`       | `{"status": "ok"}`                                     |
//!
//! CORS and request tracing layers are added by the binary.
use std::time::Instant;

use axum::{
    Json, Router,
    body::Bytes,
    extract::{State, rejection::BytesRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::{Value, json};
use stepfree_core::{generic::GenericMessage, provider::ChatCompletionProvider};
use stepfree_types::{FieldViolation, example::example_plan};
use tokio_util::sync::CancellationToken;
use tracing::error;

use crate::{
    envelope::{Diagnostics, ResultEnvelope},
    error::PipelineError,
    pipeline::Planner,
};

pub fn router<B>(planner: Planner<B>) -> Router
where
    B: ChatCompletionProvider<Message = GenericMessage> + 'static,
{
    Router::new()
        .route("/api/plan", post(plan::<B>))
        .route("/api/plan/example", get(example))
        .route("/api/health", get(health))
        .with_state(planner)
}

/// POST /api/plan
///
/// Unreadable bodies (malformed JSON, over the body size limit) are answered
/// with an `InvalidRequest` envelope like any other bad request.
async fn plan<B>(
    State(planner): State<Planner<B>>,
    body: Result<Bytes, BytesRejection>,
) -> Response
where
    B: ChatCompletionProvider<Message = GenericMessage> + 'static,
{
    let started = Instant::now();

    // Dropped with this future, so a client that disconnects cancels the run.
    let cancel = CancellationToken::new();
    let _guard = cancel.clone().drop_guard();

    let request = body
        .map_err(|rejection| format!("request body could not be read: {}", rejection.body_text()))
        .and_then(|bytes| {
            serde_json::from_slice::<Value>(&bytes)
                .map_err(|err| format!("request body is not valid JSON: {err}"))
        });

    let envelope = match request {
        Ok(request) => planner.plan(&request, cancel).await,
        Err(message) => ResultEnvelope::Failure {
            error: PipelineError::InvalidRequest(vec![FieldViolation::new("", message)]),
            diagnostics: Diagnostics {
                model: None,
                latency_ms: u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
                repaired: false,
            },
        },
    };

    let status =
        StatusCode::from_u16(envelope.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(envelope)).into_response()
}

/// GET /api/plan/example
async fn example() -> Response {
    match example_plan() {
        Ok(plan) => Json(plan).into_response(),
        Err(err) => {
            error!(error = %err, "bundled example plan does not deserialize");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"ok": false, "error": "example plan unavailable"})),
            )
                .into_response()
        }
    }
}

/// GET /api/health
async fn health() -> Json<Value> {
    Json(json!({"status": "ok"}))
}
