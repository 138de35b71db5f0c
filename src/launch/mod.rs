// src/launch/mod.rs
//! # Launch Potential
//! Pure mapping `(competition score, niche, title, type, description)` → 0–10
//! launch-potential score with tier, verdict, badge, and explanation.
//!
//! Order:
//! 1) Classify the three pillars (density, niche saturation, specificity)
//! 2) Matrix midpoint + fine adjustments, clamped to [0,10], one decimal
//! 3) Generic-jewelry override caps the score at 2.9
//! 4) Tier / verdict / badge and narrative text

pub mod matrix;
pub mod narrative;
pub mod pillars;
pub mod verdict;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::metrics;
use crate::telemetry::{anon_hash, dev_logging_enabled};

pub use pillars::{Factors, Level, SpecificityVocabulary};
pub use verdict::{Badge, Tier};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaunchPotentialResult {
    /// Within [0, 10], one decimal.
    pub score: f64,
    pub tier: Tier,
    pub verdict: String,
    pub explanation: String,
    pub score_justification: String,
    pub badge: Badge,
    pub factors: Factors,
    pub override_applied: bool,
}

/// Request body shape for the launch-potential entry point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaunchPotentialInput {
    pub competition_score: f64,
    pub niche: String,
    pub product_title: String,
    pub product_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_visual_description: Option<String>,
}

impl LaunchPotentialInput {
    pub fn evaluate(&self) -> LaunchPotentialResult {
        calculate_launch_potential_score(
            self.competition_score,
            &self.niche,
            &self.product_title,
            &self.product_type,
            self.product_visual_description.as_deref(),
        )
    }
}

/// Score with the built-in specificity vocabulary.
pub fn calculate_launch_potential_score(
    competition_score: f64,
    niche: &str,
    product_title: &str,
    product_type: &str,
    product_visual_description: Option<&str>,
) -> LaunchPotentialResult {
    calculate_launch_potential_score_with(
        SpecificityVocabulary::builtin(),
        competition_score,
        niche,
        product_title,
        product_type,
        product_visual_description,
    )
}

/// Score with a caller-supplied specificity vocabulary.
pub fn calculate_launch_potential_score_with(
    vocabulary: &SpecificityVocabulary,
    competition_score: f64,
    niche: &str,
    product_title: &str,
    product_type: &str,
    product_visual_description: Option<&str>,
) -> LaunchPotentialResult {
    // NaN counts as zero competition; everything else is clamped into range.
    let competition_score = if competition_score.is_nan() {
        0.0
    } else {
        competition_score.clamp(0.0, 100.0)
    };

    let hits = vocabulary.scan(product_title, product_type, product_visual_description);
    let factors = Factors {
        competition_density: pillars::classify_competition_density(competition_score),
        niche_saturation: pillars::classify_niche_saturation(niche),
        product_specificity: hits.level(),
    };

    let override_applied = pillars::is_jewelry(niche, product_type) && hits.high.is_empty();
    let score = matrix::apply_override(matrix::matrix_score(&factors), override_applied);

    let tier = Tier::from_score(score);
    let text = narrative::compose(score, tier, &factors, override_applied);

    debug!(
        competition_score,
        density = factors.competition_density.as_str(),
        saturation = factors.niche_saturation.as_str(),
        specificity = factors.product_specificity.as_str(),
        high_hits = hits.high.len(),
        medium_hits = hits.medium.len(),
        override_applied,
        score,
        "launch potential"
    );
    if dev_logging_enabled() {
        info!(
            target: "scoring",
            id = %anon_hash(product_title),
            %niche,
            score,
            tier = tier.as_str(),
            override_applied,
            "launch potential scored"
        );
    }
    metrics::record_launch_score(tier.as_str(), score, override_applied);

    LaunchPotentialResult {
        score,
        tier,
        verdict: tier.verdict().to_string(),
        explanation: text.explanation,
        score_justification: text.score_justification,
        badge: tier.badge(),
        factors,
        override_applied,
    }
}
