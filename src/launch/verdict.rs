//! Tier, verdict, and badge for a final launch-potential score.
//!
//! Boundaries are inclusive on the lower tier: 3.0 is still saturated,
//! 7.0 is still competitive.

use serde::{Deserialize, Serialize};

pub const SATURATED_MAX: f64 = 3.0;
pub const COMPETITIVE_MAX: f64 = 7.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Saturated,
    Competitive,
    Favorable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Badge {
    Red,
    Yellow,
    Green,
}

impl Tier {
    pub fn from_score(score: f64) -> Self {
        if score <= SATURATED_MAX {
            Tier::Saturated
        } else if score <= COMPETITIVE_MAX {
            Tier::Competitive
        } else {
            Tier::Favorable
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Tier::Saturated => "saturated",
            Tier::Competitive => "competitive",
            Tier::Favorable => "favorable",
        }
    }

    pub fn verdict(self) -> &'static str {
        match self {
            Tier::Saturated => "not recommended",
            Tier::Competitive => "possible with strategy",
            Tier::Favorable => "good launch opportunity",
        }
    }

    pub fn badge(self) -> Badge {
        match self {
            Tier::Saturated => Badge::Red,
            Tier::Competitive => Badge::Yellow,
            Tier::Favorable => Badge::Green,
        }
    }
}
