//! Error taxonomy of the scoring engine.
//!
//! Only conditions that must reach the caller live here. Unknown categories and
//! niches are not errors: they resolve to documented defaults in their lookup tables.

use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ScoringError {
    /// Too few usable result counts survived retrieval to trust a median.
    #[error(
        "cannot estimate competition for this product: {valid} valid signal(s), at least {required} required"
    )]
    InsufficientSignal { valid: usize, required: usize },
}

impl ScoringError {
    /// Short, user-safe message for outer surfaces.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::InsufficientSignal { .. } => {
                "Cannot estimate competition for this product. Try a more common product type."
            }
        }
    }
}
