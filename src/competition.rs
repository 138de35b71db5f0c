//! # Competition Estimate
//! Pure pipeline `samples → median → category adjustment → 0–100 score`,
//! plus the async [`CompetitionEstimator`] that fetches the samples first.
//!
//! Policy thresholds are named constants so they can be tuned and tested
//! independently. Score bands are half-open: a value equal to a threshold
//! belongs to the next band up.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::category::CategoryCoefficients;
use crate::config::EngineConfig;
use crate::config::scoring::DEFAULT_MAX_VOLUME;
use crate::error::ScoringError;
use crate::metrics;
use crate::query::generate_queries;
use crate::request::ScoringRequest;
use crate::signals::{collect_samples, normalize_samples, NormalizedSignal, SignalSample, SignalSource};
use crate::telemetry::{anon_hash, dev_logging_enabled};

/// Saturation bands over the competition score.
pub const SATURATION_LOW_BELOW: f64 = 30.0;
pub const SATURATION_VIABLE_BELOW: f64 = 55.0;
pub const SATURATION_HIGH_BELOW: f64 = 75.0;

/// Launch decision bands over the competition score.
pub const DECISION_LAUNCH_BELOW: f64 = 40.0;
pub const DECISION_CAUTION_BELOW: f64 = 70.0;

pub const COMPETITION_SCORE_MAX: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SaturationLevel {
    Low,
    Viable,
    High,
    Saturated,
}

impl SaturationLevel {
    pub fn from_score(score: f64) -> Self {
        if score < SATURATION_LOW_BELOW {
            Self::Low
        } else if score < SATURATION_VIABLE_BELOW {
            Self::Viable
        } else if score < SATURATION_HIGH_BELOW {
            Self::High
        } else {
            Self::Saturated
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LaunchDecision {
    Launch,
    LaunchWithCaution,
    DoNotLaunch,
}

impl LaunchDecision {
    pub fn from_score(score: f64) -> Self {
        if score < DECISION_LAUNCH_BELOW {
            Self::Launch
        } else if score < DECISION_CAUTION_BELOW {
            Self::LaunchWithCaution
        } else {
            Self::DoNotLaunch
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompetitionEstimate {
    /// Distinct keywords of `samples`, in order: the queries actually fetched.
    pub queries: Vec<String>,
    pub samples: Vec<SignalSample>,
    pub valid_samples: Vec<SignalSample>,
    /// Median of the valid result counts.
    pub base_volume: f64,
    pub category_coefficient: f64,
    pub adjusted_volume: f64,
    /// Always within [0, 100], one decimal.
    pub competition_score: f64,
    pub saturation_level: SaturationLevel,
    pub decision: LaunchDecision,
}

/// `min(adjusted / max_volume, 1) × 100`, clamped to [0, 100] and rounded to one decimal.
pub fn competition_score(adjusted_volume: f64, max_volume: f64) -> f64 {
    let max_volume = if max_volume.is_finite() && max_volume > 0.0 {
        max_volume
    } else {
        DEFAULT_MAX_VOLUME
    };
    let ratio = if adjusted_volume.is_finite() {
        (adjusted_volume / max_volume).clamp(0.0, 1.0)
    } else if adjusted_volume > 0.0 {
        1.0
    } else {
        0.0
    };
    round1(ratio * COMPETITION_SCORE_MAX)
}

/// Estimate with the built-in coefficient table and default volume ceiling.
pub fn estimate_competition(
    request: &ScoringRequest,
    samples: Vec<SignalSample>,
) -> Result<CompetitionEstimate, ScoringError> {
    estimate_competition_with(
        request,
        samples,
        &CategoryCoefficients::default_seed(),
        DEFAULT_MAX_VOLUME,
    )
}

/// Pure estimate over already-fetched samples.
/// Fails with [`ScoringError::InsufficientSignal`] below two valid samples.
pub fn estimate_competition_with(
    request: &ScoringRequest,
    samples: Vec<SignalSample>,
    coefficients: &CategoryCoefficients,
    max_volume: f64,
) -> Result<CompetitionEstimate, ScoringError> {
    let NormalizedSignal { valid, base_volume } = match normalize_samples(&samples) {
        Ok(n) => n,
        Err(e) => {
            metrics::record_estimate(false);
            return Err(e);
        }
    };

    let (adjusted_volume, category_coefficient) = coefficients.adjust(base_volume, &request.category);
    let score = competition_score(adjusted_volume, max_volume);

    debug!(
        base_volume,
        category_coefficient,
        adjusted_volume,
        competition_score = score,
        "competition estimate"
    );
    if dev_logging_enabled() {
        info!(
            target: "scoring",
            id = %anon_hash(&request.product_title),
            category = %request.category,
            valid = valid.len(),
            competition_score = score,
            "competition estimated"
        );
    }
    metrics::record_estimate(true);

    Ok(CompetitionEstimate {
        queries: sampled_queries(&samples),
        samples,
        valid_samples: valid,
        base_volume,
        category_coefficient,
        adjusted_volume,
        competition_score: score,
        saturation_level: SaturationLevel::from_score(score),
        decision: LaunchDecision::from_score(score),
    })
}

/// Generates queries, fetches one sample per query from `source`, then estimates.
pub struct CompetitionEstimator<S: SignalSource> {
    source: S,
    coefficients: CategoryCoefficients,
    config: EngineConfig,
}

impl<S: SignalSource> CompetitionEstimator<S> {
    pub fn new(source: S, config: EngineConfig) -> Self {
        Self {
            source,
            coefficients: config.category_coefficients(),
            config,
        }
    }

    pub async fn estimate(
        &self,
        request: &ScoringRequest,
    ) -> Result<CompetitionEstimate, ScoringError> {
        let queries = generate_queries(request);
        let market = if request.market.trim().is_empty() {
            self.config.market.as_str()
        } else {
            request.market.as_str()
        };
        let samples =
            collect_samples(&self.source, &queries, market, self.config.fetch_timeout()).await;
        estimate_competition_with(request, samples, &self.coefficients, self.config.max_volume)
    }
}

/// Distinct sample keywords in first-seen order.
fn sampled_queries(samples: &[SignalSample]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(samples.len());
    for s in samples {
        if !out.contains(&s.keyword) {
            out.push(s.keyword.clone());
        }
    }
    out
}

pub(crate) fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}
