//! # Category Coefficients
//!
//! Maps a category / niche label to a multiplier applied to the median
//! result volume. Crowded, fashion-adjacent categories sit above 1.0 (raw
//! counts understate competition); categories dominated by fewer but larger
//! sellers sit below 1.0.
//!
//! - Built-in seed via [`CategoryCoefficients::default_seed`], overridable from config.
//! - Case-insensitive lookup with normalization of punctuation, dashes, etc.
//! - Fallback order: exact match → substring match (either direction) → default.
//! - The substring pass walks keys longest-first, then alphabetically, so the
//!   result never depends on map iteration order.

use serde::Deserialize;
use std::collections::BTreeMap;

pub const DEFAULT_COEFFICIENT: f64 = 1.00;

/// Coefficient table, loaded from config or defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct CategoryCoefficients {
    /// Coefficient used when no key matches.
    #[serde(default = "default_coefficient")]
    pub default_coefficient: f64,
    /// Coefficients keyed by normalized category name.
    #[serde(default)]
    pub coefficients: BTreeMap<String, f64>,
}

fn default_coefficient() -> f64 {
    DEFAULT_COEFFICIENT
}

impl Default for CategoryCoefficients {
    fn default() -> Self {
        Self::default_seed()
    }
}

impl CategoryCoefficients {
    /// Resolve the coefficient for `category`.
    pub fn coefficient_for(&self, category: &str) -> f64 {
        let c = normalize(category);
        if c.is_empty() {
            return self.default_coefficient;
        }

        // 1) Exact match.
        if let Some(&k) = self.coefficients.get(&c) {
            return k;
        }

        // 2) Substring match in either direction ("luxury jewelry" ↔ "jewelry").
        for (key, &k) in self.by_specificity() {
            if c.contains(key.as_str()) || key.contains(c.as_str()) {
                return k;
            }
        }

        // 3) Default.
        self.default_coefficient
    }

    /// `round(base_volume × coefficient)` for `category`.
    pub fn adjust(&self, base_volume: f64, category: &str) -> (f64, f64) {
        let k = self.coefficient_for(category);
        ((base_volume * k).round(), k)
    }

    /// Overlay `overrides` on top of this table. Non-positive values are ignored.
    pub fn merged_with(mut self, overrides: &BTreeMap<String, f64>) -> Self {
        for (key, &k) in overrides {
            let key = normalize(key);
            if key.is_empty() || !(k.is_finite() && k > 0.0) {
                continue;
            }
            self.coefficients.insert(key, k);
        }
        self
    }

    fn by_specificity(&self) -> Vec<(&String, &f64)> {
        let mut entries: Vec<_> = self.coefficients.iter().collect();
        entries.sort_by(|(a, _), (b, _)| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        entries
    }

    /// Built-in coefficients for common marketplace categories.
    pub fn default_seed() -> Self {
        let mut coefficients = BTreeMap::new();
        for (k, v) in [
            ("jewelry", 1.25),
            ("jewellery", 1.25),
            ("fashion", 1.20),
            ("clothing", 1.20),
            ("apparel", 1.20),
            ("accessories", 1.15),
            ("beauty", 1.15),
            ("cosmetics", 1.15),
            ("home decor", 1.10),
            ("wall art", 1.05),
            ("phone cases", 1.10),
            ("electronics", 1.05),
            ("pet supplies", 1.00),
            ("toys", 0.95),
            ("crafts", 0.95),
            ("sports", 0.95),
            ("books", 0.90),
            ("garden", 0.90),
            ("tools", 0.85),
            ("automotive", 0.85),
            ("furniture", 0.80),
            ("industrial", 0.75),
        ] {
            coefficients.insert(k.to_string(), v);
        }
        Self {
            default_coefficient: DEFAULT_COEFFICIENT,
            coefficients,
        }
    }
}

/// Lowercase, separators to spaces, collapse whitespace.
pub(crate) fn normalize(s: &str) -> String {
    let mut out = s.trim().to_lowercase();
    for ch in ['—', '–', '-', '_', '/', '\\', '&', ','] {
        out = out.replace(ch, " ");
    }
    out.split_whitespace().collect::<Vec<_>>().join(" ")
}
