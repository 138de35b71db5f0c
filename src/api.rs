// src/api.rs
//! HTTP surface over the pure scoring entry points.
//!
//! - `GET  /health`
//! - `POST /queries`           ScoringRequest → generated query variants
//! - `POST /estimate`          { request, samples } → CompetitionEstimate (422 on sparse signal)
//! - `POST /launch-potential`  LaunchPotentialInput → LaunchPotentialResult

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;

use crate::category::CategoryCoefficients;
use crate::competition::{estimate_competition_with, CompetitionEstimate};
use crate::config::EngineConfig;
use crate::error::ScoringError;
use crate::launch::{LaunchPotentialInput, LaunchPotentialResult};
use crate::query::generate_queries;
use crate::request::ScoringRequest;
use crate::signals::SignalSample;

#[derive(Clone)]
pub struct AppState {
    config: Arc<EngineConfig>,
    coefficients: Arc<CategoryCoefficients>,
}

impl AppState {
    pub fn new(config: EngineConfig) -> Self {
        let coefficients = config.category_coefficients();
        Self {
            config: Arc::new(config),
            coefficients: Arc::new(coefficients),
        }
    }

    /// Config resolved from env/file, falling back to defaults on error.
    pub fn from_env() -> Self {
        match EngineConfig::load_default() {
            Ok(cfg) => Self::new(cfg),
            Err(e) => {
                tracing::warn!(error = %e, "scoring config unavailable, using defaults");
                Self::new(EngineConfig::default())
            }
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/queries", post(queries))
        .route("/estimate", post(estimate))
        .route("/launch-potential", post(launch_potential))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

#[derive(Serialize)]
struct QueriesResp {
    queries: Vec<String>,
}

async fn queries(Json(req): Json<ScoringRequest>) -> Json<QueriesResp> {
    Json(QueriesResp {
        queries: generate_queries(&req),
    })
}

#[derive(Deserialize)]
struct EstimateReq {
    request: ScoringRequest,
    #[serde(default)]
    samples: Vec<SignalSample>,
}

#[derive(Serialize)]
struct ErrorResp {
    error: String,
    message: &'static str,
}

impl IntoResponse for ScoringError {
    fn into_response(self) -> Response {
        let status = match self {
            ScoringError::InsufficientSignal { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        };
        let body = ErrorResp {
            error: self.to_string(),
            message: self.user_message(),
        };
        (status, Json(body)).into_response()
    }
}

async fn estimate(
    State(state): State<AppState>,
    Json(body): Json<EstimateReq>,
) -> Result<Json<CompetitionEstimate>, ScoringError> {
    let est = estimate_competition_with(
        &body.request,
        body.samples,
        &state.coefficients,
        state.config.max_volume,
    )?;
    Ok(Json(est))
}

async fn launch_potential(Json(input): Json<LaunchPotentialInput>) -> Json<LaunchPotentialResult> {
    Json(input.evaluate())
}
