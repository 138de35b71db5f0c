// src/config/scoring.rs
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

use crate::category::{CategoryCoefficients, DEFAULT_COEFFICIENT};
use crate::request::DEFAULT_MARKET;

pub const DEFAULT_SCORING_CONFIG_PATH: &str = "config/scoring.toml";
pub const ENV_SCORING_CONFIG_PATH: &str = "SCORING_CONFIG_PATH";
pub const ENV_SCORING_MAX_VOLUME: &str = "SCORING_MAX_VOLUME";

/// Volume beyond which extra results no longer change saturation perception.
pub const DEFAULT_MAX_VOLUME: f64 = 20_000.0;
pub const DEFAULT_FETCH_TIMEOUT_MS: u64 = 4_000;

fn default_max_volume() -> f64 {
    DEFAULT_MAX_VOLUME
}
fn default_fetch_timeout_ms() -> u64 {
    DEFAULT_FETCH_TIMEOUT_MS
}
fn default_market() -> String {
    DEFAULT_MARKET.to_string()
}
fn default_coefficient() -> f64 {
    DEFAULT_COEFFICIENT
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategorySection {
    #[serde(default = "default_coefficient")]
    pub default_coefficient: f64,
    /// Merged over the built-in table.
    #[serde(default)]
    pub coefficients: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default = "default_max_volume")]
    pub max_volume: f64,
    #[serde(default = "default_fetch_timeout_ms")]
    pub fetch_timeout_ms: u64,
    #[serde(default = "default_market")]
    pub market: String,
    #[serde(default)]
    pub category: Option<CategorySection>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_volume: DEFAULT_MAX_VOLUME,
            fetch_timeout_ms: DEFAULT_FETCH_TIMEOUT_MS,
            market: default_market(),
            category: None,
        }
    }
}

impl EngineConfig {
    /// Load from an explicit TOML file.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading scoring config from {}", path.display()))?;
        let cfg: EngineConfig = toml::from_str(&content)
            .with_context(|| format!("parsing scoring config {}", path.display()))?;
        info!(path = %path.display(), "scoring config loaded");
        Ok(cfg.sanitized())
    }

    /// Resolve config using env var + fallbacks:
    /// 1) $SCORING_CONFIG_PATH (must exist)
    /// 2) config/scoring.toml
    /// 3) built-in defaults
    ///
    /// `$SCORING_MAX_VOLUME` overrides the file value in every case.
    pub fn load_default() -> Result<Self> {
        let mut cfg = if let Ok(p) = std::env::var(ENV_SCORING_CONFIG_PATH) {
            let pb = PathBuf::from(p);
            if !pb.exists() {
                return Err(anyhow!("SCORING_CONFIG_PATH points to non-existent path"));
            }
            Self::load_from_file(&pb)?
        } else {
            let default_p = PathBuf::from(DEFAULT_SCORING_CONFIG_PATH);
            if default_p.exists() {
                Self::load_from_file(&default_p)?
            } else {
                Self::default()
            }
        };

        if let Some(v) = parse_max_volume_env(std::env::var(ENV_SCORING_MAX_VOLUME).ok()) {
            cfg.max_volume = v;
        }
        Ok(cfg)
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_millis(self.fetch_timeout_ms)
    }

    /// Built-in coefficient table with this config's overrides applied.
    pub fn category_coefficients(&self) -> CategoryCoefficients {
        let seed = CategoryCoefficients::default_seed();
        match &self.category {
            Some(section) => {
                let mut table = seed.merged_with(&section.coefficients);
                table.default_coefficient = section.default_coefficient;
                table
            }
            None => seed,
        }
    }

    fn sanitized(mut self) -> Self {
        if !(self.max_volume.is_finite() && self.max_volume > 0.0) {
            self.max_volume = DEFAULT_MAX_VOLUME;
        }
        if self.fetch_timeout_ms == 0 {
            self.fetch_timeout_ms = DEFAULT_FETCH_TIMEOUT_MS;
        }
        if self.market.trim().is_empty() {
            self.market = default_market();
        }
        if let Some(section) = self.category.as_mut() {
            let k = section.default_coefficient;
            if !(k.is_finite() && k > 0.0) {
                section.default_coefficient = DEFAULT_COEFFICIENT;
            }
        }
        self
    }
}

// parse optional positive float env
fn parse_max_volume_env(raw: Option<String>) -> Option<f64> {
    raw.and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite() && *v > 0.0)
}
