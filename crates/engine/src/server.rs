use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use metrics_exporter_prometheus::PrometheusHandle;

use factcheck_common::api::check::{CheckRequest, CheckResponse, ErrorResponse};
use factcheck_common::FactCheckError;

use crate::pipeline::{FactChecker, EMPTY_STATEMENT_MESSAGE};

const INTERNAL_ERROR_MESSAGE: &str =
    "An error occurred during analysis. Please try a different statement or try again later.";

/// Shared application state accessible from axum handlers.
pub struct AppState {
    pub checker: Arc<FactChecker>,
    pub metrics_handle: PrometheusHandle,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler))
        .route("/check_fact", post(check_fact_handler))
        .with_state(state)
}

/// POST /check_fact — score a statement against retrieved sources.
pub async fn check_fact_handler(
    State(state): State<Arc<AppState>>,
    request: Result<Json<CheckRequest>, JsonRejection>,
) -> Result<Json<CheckResponse>, (StatusCode, Json<ErrorResponse>)> {
    // An unreadable body carries no statement to check.
    let Json(request) = request.map_err(|rejection| {
        tracing::warn!(error = %rejection, "Rejected unreadable request body");
        metrics::counter!("check.requests", "outcome" => "rejected").increment(1);
        error_response(StatusCode::BAD_REQUEST, EMPTY_STATEMENT_MESSAGE.to_string())
    })?;

    let checker = Arc::clone(&state.checker);

    // A panic inside the pipeline surfaces as a JoinError, not a dropped connection.
    let outcome = tokio::spawn(async move { checker.check(&request.statement).await })
        .await
        .unwrap_or_else(|e| Err(FactCheckError::Internal(e.to_string())));

    match outcome {
        Ok(response) => {
            metrics::counter!("check.requests", "outcome" => "ok").increment(1);
            Ok(Json(response))
        }
        Err(FactCheckError::Validation(message)) => {
            metrics::counter!("check.requests", "outcome" => "rejected").increment(1);
            Err(error_response(StatusCode::BAD_REQUEST, message))
        }
        Err(e) => {
            metrics::counter!("check.requests", "outcome" => "error").increment(1);
            tracing::error!(error = %e, "Fact check failed");
            Err(error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                INTERNAL_ERROR_MESSAGE.to_string(),
            ))
        }
    }
}

fn error_response(status: StatusCode, error: String) -> (StatusCode, Json<ErrorResponse>) {
    (status, Json(ErrorResponse { error }))
}

async fn health_handler() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(serde_json::json!({ "status": "healthy" })),
    )
}

/// Prometheus metrics endpoint.
async fn metrics_handler(State(state): State<Arc<AppState>>) -> String {
    state.metrics_handle.render()
}
