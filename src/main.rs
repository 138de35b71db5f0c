//! Launch Potential Service — Binary Entrypoint
//! Boots the Axum HTTP server, wiring routes, shared state, and metrics.

use launch_potential_engine::{api, metrics::Metrics, telemetry};
use shuttle_axum::ShuttleAxum;
use tracing::{info, warn};

#[shuttle_runtime::main]
async fn axum() -> ShuttleAxum {
    // Load .env in local/dev; no-op in prod environments.
    // This enables SCORING_CONFIG_PATH / SCORING_MAX_VOLUME from .env.
    let _ = dotenvy::dotenv();

    telemetry::init_tracing();

    let state = api::AppState::from_env();
    let mut router = api::router(state);

    match Metrics::init() {
        Ok(m) => router = router.merge(m.router()),
        Err(e) => warn!(error = %e, "metrics recorder not installed"),
    }

    info!("launch potential service ready");
    Ok(router.into())
}
