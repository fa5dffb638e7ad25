//! # Prometheus Metrics
//!
//! Operational metrics for the ledger node, scraped at the `/metrics`
//! endpoint on the configured metrics port. All metrics live in a dedicated
//! [`prometheus::Registry`] so they do not collide with any default global
//! registry consumers.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use prometheus::{
    Encoder, Histogram, HistogramOpts, IntCounter, IntCounterVec, IntGauge, Opts, Registry,
    TextEncoder,
};
use std::sync::Arc;

/// Holds all Prometheus metric handles for the node.
///
/// Clone-friendly (prometheus handles are internally reference-counted) so
/// it can be shared across request handlers.
#[derive(Clone)]
pub struct LedgerMetrics {
    /// Registry that owns all metrics below.
    registry: Registry,
    /// Successful ledger operations, labeled by operation kind.
    pub operations_total: IntCounterVec,
    /// Ledger operations that returned an error.
    pub failed_operations_total: IntCounter,
    /// Hook-bearing operations (notified sends, operator sends/burns, mints).
    pub notified_operations_total: IntCounter,
    /// Current total supply (saturated to the gauge's i64 range).
    pub total_supply: IntGauge,
    /// Number of accounts with a materialized balance entry.
    pub tracked_accounts: IntGauge,
    /// Histogram of ledger operation latency in seconds.
    pub operation_latency_seconds: Histogram,
}

impl LedgerMetrics {
    /// Creates and registers all metrics. Call once at startup.
    pub fn new() -> Self {
        let registry = Registry::new_custom(Some("nova_ledger".into()), None)
            .expect("failed to create prometheus registry");

        let operations_total = IntCounterVec::new(
            Opts::new("operations_total", "Successful ledger operations by kind"),
            &["kind"],
        )
        .expect("metric creation");
        registry
            .register(Box::new(operations_total.clone()))
            .expect("metric registration");

        let failed_operations_total = IntCounter::new(
            "failed_operations_total",
            "Ledger operations that returned an error",
        )
        .expect("metric creation");
        registry
            .register(Box::new(failed_operations_total.clone()))
            .expect("metric registration");

        let notified_operations_total = IntCounter::new(
            "notified_operations_total",
            "Operations that dispatched through the hook protocol",
        )
        .expect("metric creation");
        registry
            .register(Box::new(notified_operations_total.clone()))
            .expect("metric registration");

        let total_supply = IntGauge::new("total_supply", "Current total token supply")
            .expect("metric creation");
        registry
            .register(Box::new(total_supply.clone()))
            .expect("metric registration");

        let tracked_accounts = IntGauge::new(
            "tracked_accounts",
            "Accounts with a materialized balance entry",
        )
        .expect("metric creation");
        registry
            .register(Box::new(tracked_accounts.clone()))
            .expect("metric registration");

        let operation_latency_seconds = Histogram::with_opts(
            HistogramOpts::new(
                "operation_latency_seconds",
                "Ledger operation latency in seconds",
            )
            .buckets(vec![0.0001, 0.0005, 0.001, 0.005, 0.01, 0.05, 0.1, 0.5]),
        )
        .expect("metric creation");
        registry
            .register(Box::new(operation_latency_seconds.clone()))
            .expect("metric registration");

        Self {
            registry,
            operations_total,
            failed_operations_total,
            notified_operations_total,
            total_supply,
            tracked_accounts,
            operation_latency_seconds,
        }
    }

    /// Updates the supply gauge, saturating amounts beyond the i64 range.
    pub fn set_total_supply(&self, supply: u128) {
        self.total_supply
            .set(i64::try_from(supply).unwrap_or(i64::MAX));
    }

    /// Encodes all registered metrics into the Prometheus text exposition
    /// format.
    pub fn encode(&self) -> Result<String, prometheus::Error> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer)?;
        Ok(String::from_utf8(buffer).expect("prometheus output is valid utf-8"))
    }
}

impl Default for LedgerMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared metrics state passed to axum handlers.
pub type SharedMetrics = Arc<LedgerMetrics>;

/// Axum handler that renders `/metrics` in Prometheus text format.
pub async fn metrics_handler(
    axum::extract::State(metrics): axum::extract::State<SharedMetrics>,
) -> impl IntoResponse {
    match metrics.encode() {
        Ok(body) => (
            StatusCode::OK,
            [("content-type", "text/plain; version=0.0.4; charset=utf-8")],
            body,
        )
            .into_response(),
        Err(e) => {
            tracing::error!("failed to encode metrics: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "metrics encoding failed").into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn supply_gauge_saturates() {
        let metrics = LedgerMetrics::new();
        metrics.set_total_supply(u128::MAX);
        assert_eq!(metrics.total_supply.get(), i64::MAX);

        metrics.set_total_supply(42);
        assert_eq!(metrics.total_supply.get(), 42);
    }

    #[test]
    fn encode_includes_registered_metrics() {
        let metrics = LedgerMetrics::new();
        metrics.operations_total.with_label_values(&["transfer"]).inc();
        let body = metrics.encode().unwrap();
        assert!(body.contains("nova_ledger_operations_total"));
    }
}
