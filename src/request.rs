//! # Scoring Request
//! Immutable input of one scoring call, as supplied by the upstream
//! product-understanding step.

use serde::{Deserialize, Serialize};

pub const DEFAULT_MARKET: &str = "EN";

fn default_market() -> String {
    DEFAULT_MARKET.to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringRequest {
    pub product_title: String,
    pub product_type: String,
    /// Category / niche label (e.g. "jewelry", "home decor").
    #[serde(alias = "niche")]
    pub category: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
    /// Locale code forwarded to the signal source.
    #[serde(default = "default_market")]
    pub market: String,
}

impl ScoringRequest {
    pub fn new(
        product_title: impl Into<String>,
        product_type: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            product_title: product_title.into(),
            product_type: product_type.into(),
            category: category.into(),
            keywords: Vec::new(),
            market: default_market(),
        }
    }

    /// Builder: extra seller-supplied keywords used to pad query variants.
    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    /// Builder: override the market locale.
    pub fn with_market(mut self, market: impl Into<String>) -> Self {
        let m = market.into();
        if !m.trim().is_empty() {
            self.market = m.trim().to_string();
        }
        self
    }
}
