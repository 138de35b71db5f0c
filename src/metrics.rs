use axum::{routing::get, Router};
use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;

/// One-time metrics registration (so series show up on /metrics).
fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!(
            "competition_estimates_total",
            "Competition estimates produced."
        );
        describe_counter!(
            "competition_insufficient_signal_total",
            "Estimates rejected for having fewer than two valid samples."
        );
        describe_counter!(
            "signal_fetch_failures_total",
            "Signal source fetches that errored or timed out."
        );
        describe_counter!(
            "launch_potential_scores_total",
            "Launch-potential scores computed, by tier."
        );
        describe_counter!(
            "launch_override_applied_total",
            "Scores capped by the generic-jewelry override."
        );
        describe_histogram!("launch_potential_score", "Final launch-potential score (0-10).");
    });
}

pub fn record_fetch_failure() {
    ensure_metrics_described();
    counter!("signal_fetch_failures_total").increment(1);
}

pub fn record_estimate(ok: bool) {
    ensure_metrics_described();
    if ok {
        counter!("competition_estimates_total").increment(1);
    } else {
        counter!("competition_insufficient_signal_total").increment(1);
    }
}

pub fn record_launch_score(tier: &'static str, score: f64, override_applied: bool) {
    ensure_metrics_described();
    counter!("launch_potential_scores_total", "tier" => tier).increment(1);
    histogram!("launch_potential_score").record(score);
    if override_applied {
        counter!("launch_override_applied_total").increment(1);
    }
}

pub struct Metrics {
    pub handle: PrometheusHandle,
}

impl Metrics {
    /// Install the global Prometheus recorder. Call once, from the binary.
    pub fn init() -> anyhow::Result<Self> {
        let handle = PrometheusBuilder::new()
            .install_recorder()
            .map_err(|e| anyhow::anyhow!("prometheus: install recorder: {e}"))?;
        ensure_metrics_described();
        Ok(Self { handle })
    }

    /// Returns a router exposing `/metrics` with the Prometheus exposition format.
    pub fn router(&self) -> Router {
        let handle = self.handle.clone();
        Router::new().route(
            "/metrics",
            get(move || {
                let h = handle.clone();
                async move { h.render() }
            }),
        )
    }
}
