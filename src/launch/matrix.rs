//! 3×3×3 scoring matrix, fine adjustments, and the generic-jewelry override.
//!
//! Indexed `[niche_saturation][product_specificity][competition_density]`.
//! Ranges rise as saturation falls, as specificity rises, and as density falls,
//! so the base score (range midpoint) is monotone in every pillar.

use serde::Serialize;

use super::pillars::{Factors, Level};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreRange {
    pub min: f64,
    pub max: f64,
}

impl ScoreRange {
    const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn midpoint(&self) -> f64 {
        (self.min + self.max) / 2.0
    }
}

const fn r(min: f64, max: f64) -> ScoreRange {
    ScoreRange::new(min, max)
}

/// `[saturation][specificity][density]`, each axis ordered low, medium, high.
pub static SCORE_MATRIX: [[[ScoreRange; 3]; 3]; 3] = [
    // niche saturation: low
    [
        // specificity low:    density low, medium, high
        [r(5.0, 6.5), r(4.0, 5.5), r(3.0, 4.5)],
        // specificity medium
        [r(6.5, 8.0), r(5.5, 7.0), r(4.5, 6.0)],
        // specificity high
        [r(8.0, 9.5), r(7.0, 8.5), r(6.0, 7.5)],
    ],
    // niche saturation: medium
    [
        [r(3.5, 5.0), r(2.5, 4.0), r(1.5, 3.0)],
        [r(5.0, 6.5), r(4.0, 5.5), r(3.0, 4.5)],
        [r(6.5, 8.0), r(5.5, 7.0), r(4.5, 6.0)],
    ],
    // niche saturation: high
    [
        [r(2.0, 3.5), r(1.0, 2.5), r(0.0, 1.5)],
        [r(3.5, 5.0), r(2.5, 4.0), r(1.5, 3.0)],
        [r(5.0, 6.5), r(4.0, 5.5), r(3.0, 4.5)],
    ],
];

pub fn lookup(factors: &Factors) -> ScoreRange {
    SCORE_MATRIX[factors.niche_saturation.index()][factors.product_specificity.index()]
        [factors.competition_density.index()]
}

/// Applied to every score.
pub const BASELINE_BONUS: f64 = 0.2;
/// Low saturation, high specificity, low density.
pub const IDEAL_BONUS: f64 = 0.5;
/// Low density and low saturation, any specificity.
pub const OPEN_MARKET_BONUS: f64 = 0.3;
/// High saturation, low specificity, high density.
pub const WORST_CASE_PENALTY: f64 = 0.5;
/// High density and high saturation, any specificity.
pub const CROWDED_MARKET_PENALTY: f64 = 0.3;

pub const SCORE_MIN: f64 = 0.0;
pub const SCORE_MAX: f64 = 10.0;

/// Hard cap for generic jewelry.
pub const JEWELRY_OVERRIDE_CAP: f64 = 2.9;

/// Sum of the additive fine adjustments for `factors`.
pub fn fine_adjustment(factors: &Factors) -> f64 {
    let Factors {
        competition_density: d,
        niche_saturation: s,
        product_specificity: p,
    } = *factors;

    let mut adj = BASELINE_BONUS;
    if s == Level::Low && p == Level::High && d == Level::Low {
        adj += IDEAL_BONUS;
    }
    if d == Level::Low && s == Level::Low {
        adj += OPEN_MARKET_BONUS;
    }
    if s == Level::High && p == Level::Low && d == Level::High {
        adj -= WORST_CASE_PENALTY;
    }
    if d == Level::High && s == Level::High {
        adj -= CROWDED_MARKET_PENALTY;
    }
    adj
}

/// Matrix midpoint plus fine adjustments, clamped to [0, 10] and rounded to one decimal.
pub fn matrix_score(factors: &Factors) -> f64 {
    let raw = lookup(factors).midpoint() + fine_adjustment(factors);
    round1(raw.clamp(SCORE_MIN, SCORE_MAX))
}

/// `min(score, 2.9)` when the override applies, otherwise `score` unchanged.
pub fn apply_override(score: f64, override_applies: bool) -> f64 {
    if override_applies {
        score.min(JEWELRY_OVERRIDE_CAP)
    } else {
        score
    }
}

fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}
