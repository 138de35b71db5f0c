//! # Signal Samples
//! Raw result-count observations (one per generated query) and their
//! normalization into a single robust volume estimate.
//!
//! - [`SignalSource`] is the external fetch collaborator (network-bound, unreliable).
//! - [`collect_samples`] turns its answers into [`SignalSample`]s without ever failing:
//!   errors, timeouts, `None`, and zero counts become `valid = false`.
//! - [`normalize_samples`] is the normalizer. It needs at least
//!   [`MIN_VALID_SAMPLES`] valid samples and treats the list as an unordered multiset.

use std::collections::HashMap;
use std::time::Duration;

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::ScoringError;
use crate::metrics;

/// Minimum number of valid samples required to trust the median.
pub const MIN_VALID_SAMPLES: usize = 2;

/// One (query, result count) observation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalSample {
    pub keyword: String,
    pub result_count: u64,
    pub timestamp: DateTime<Utc>,
    pub market: String,
    /// True iff the fetch succeeded and returned a positive count.
    pub valid: bool,
}

impl SignalSample {
    /// Build a sample from a fetch outcome; `None` or `0` yields an invalid sample.
    pub fn from_fetch(
        keyword: impl Into<String>,
        count: Option<u64>,
        market: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        let (result_count, valid) = match count {
            Some(n) if n > 0 => (n, true),
            Some(n) => (n, false),
            None => (0, false),
        };
        Self {
            keyword: keyword.into(),
            result_count,
            timestamp,
            market: market.into(),
            valid,
        }
    }

    /// Usable for the median: flagged valid and carrying a positive count.
    pub fn is_usable(&self) -> bool {
        self.valid && self.result_count > 0
    }
}

/// Marketplace search backend returning a result count per query.
#[async_trait::async_trait]
pub trait SignalSource: Send + Sync {
    /// `Ok(None)` means the backend answered but had no usable count.
    async fn fetch_result_count(&self, query: &str, market: &str) -> Result<Option<u64>>;
    fn name(&self) -> &'static str;
}

/// In-memory source keyed by query (case-insensitive). Used by tests and offline runs.
#[derive(Debug, Clone, Default)]
pub struct FixtureSignalSource {
    counts: HashMap<String, u64>,
}

impl FixtureSignalSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_count(mut self, query: &str, count: u64) -> Self {
        self.counts.insert(query.trim().to_lowercase(), count);
        self
    }
}

#[async_trait::async_trait]
impl SignalSource for FixtureSignalSource {
    async fn fetch_result_count(&self, query: &str, _market: &str) -> Result<Option<u64>> {
        Ok(self.counts.get(&query.trim().to_lowercase()).copied())
    }

    fn name(&self) -> &'static str {
        "fixture"
    }
}

/// Fetch one sample per query, in query order. Each fetch is bounded by `timeout`.
/// No retries: a failed fetch becomes an invalid sample.
pub async fn collect_samples<S: SignalSource + ?Sized>(
    source: &S,
    queries: &[String],
    market: &str,
    timeout: Duration,
) -> Vec<SignalSample> {
    let mut out = Vec::with_capacity(queries.len());
    for q in queries {
        let count = match tokio::time::timeout(timeout, source.fetch_result_count(q, market)).await
        {
            Ok(Ok(count)) => count,
            Ok(Err(e)) => {
                warn!(source = source.name(), query = %q, error = %e, "signal fetch failed");
                metrics::record_fetch_failure();
                None
            }
            Err(_) => {
                warn!(
                    source = source.name(),
                    query = %q,
                    timeout_ms = timeout.as_millis() as u64,
                    "signal fetch timed out"
                );
                metrics::record_fetch_failure();
                None
            }
        };
        out.push(SignalSample::from_fetch(q.as_str(), count, market, Utc::now()));
    }
    out
}

/// Split out the usable samples, failing fast when fewer than [`MIN_VALID_SAMPLES`] remain.
pub fn valid_samples(samples: &[SignalSample]) -> Result<Vec<SignalSample>, ScoringError> {
    let valid: Vec<SignalSample> = samples.iter().filter(|s| s.is_usable()).cloned().collect();
    if valid.len() < MIN_VALID_SAMPLES {
        return Err(ScoringError::InsufficientSignal {
            valid: valid.len(),
            required: MIN_VALID_SAMPLES,
        });
    }
    debug!(total = samples.len(), valid = valid.len(), "filtered signal samples");
    Ok(valid)
}

/// Usable samples and the median of their result counts.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedSignal {
    pub valid: Vec<SignalSample>,
    pub base_volume: f64,
}

/// Median of the usable result counts (even-sized sets average the two middle values).
pub fn normalize_samples(samples: &[SignalSample]) -> Result<NormalizedSignal, ScoringError> {
    let valid = valid_samples(samples)?;
    let base_volume = median(valid.iter().map(|s| s.result_count).collect());
    Ok(NormalizedSignal { valid, base_volume })
}

/// Textbook median of a non-empty list; input order does not matter.
fn median(mut values: Vec<u64>) -> f64 {
    values.sort_unstable();
    let n = values.len();
    match n {
        0 => 0.0,
        _ if n % 2 == 1 => values[n / 2] as f64,
        _ => (values[n / 2 - 1] as f64 + values[n / 2] as f64) / 2.0,
    }
}
