use crate::infra::{AppState, DirectiveContext};
use ad_applicability::directives::{AdDocument, AircraftConfiguration, EvaluationResult};
use ad_applicability::error::AppError;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub(crate) struct EvaluationRequest {
    pub(crate) aircraft: Vec<AircraftConfiguration>,
    /// Inline directives; when absent the configured library is evaluated.
    #[serde(default)]
    pub(crate) ads: Option<Vec<AdDocument>>,
}

#[derive(Debug, Serialize)]
pub(crate) struct EvaluationResponse {
    pub(crate) status: &'static str,
    pub(crate) evaluation_results: Vec<EvaluationResult>,
}

pub(crate) fn with_directive_routes(context: Arc<DirectiveContext>) -> Router {
    Router::new()
        .route("/api/v1/evaluations", post(evaluate_endpoint))
        .route(
            "/api/v1/directives",
            get(list_directives_endpoint).put(store_directive_endpoint),
        )
        .with_state(context)
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn evaluate_endpoint(
    State(context): State<Arc<DirectiveContext>>,
    Json(payload): Json<EvaluationRequest>,
) -> Result<Json<EvaluationResponse>, AppError> {
    let EvaluationRequest { aircraft, ads } = payload;

    let directives = match ads {
        Some(inline) => inline,
        None => context.store.list()?,
    };

    let evaluation_results = aircraft
        .iter()
        .map(|configuration| {
            context
                .evaluator
                .evaluate_against_all(configuration, &directives)
        })
        .collect();

    Ok(Json(EvaluationResponse {
        status: "success",
        evaluation_results,
    }))
}

pub(crate) async fn list_directives_endpoint(
    State(context): State<Arc<DirectiveContext>>,
) -> Result<Json<Vec<AdDocument>>, AppError> {
    Ok(Json(context.store.list()?))
}

pub(crate) async fn store_directive_endpoint(
    State(context): State<Arc<DirectiveContext>>,
    Json(document): Json<AdDocument>,
) -> Result<impl IntoResponse, AppError> {
    context.store.put(&document)?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "status": "stored", "ad_id": document.ad_id })),
    ))
}
