// src/lib.rs
// Public library surface for integration tests (and reuse by the service binary).

pub mod category;
pub mod competition;
pub mod config;
pub mod error;
pub mod launch;
pub mod query;
pub mod request;
pub mod signals;

// Ambient: logging, metrics, HTTP shell
pub mod api;
pub mod metrics;
pub mod telemetry;

// ---- Re-exports for stable public API ----
pub use crate::api::router;
pub use crate::competition::{
    estimate_competition, CompetitionEstimate, CompetitionEstimator, LaunchDecision,
    SaturationLevel,
};
pub use crate::error::ScoringError;
pub use crate::launch::{
    calculate_launch_potential_score, Badge, Factors, LaunchPotentialResult, Level, Tier,
};
pub use crate::query::generate_queries;
pub use crate::request::ScoringRequest;
pub use crate::signals::{SignalSample, SignalSource};
