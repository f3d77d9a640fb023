// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Prometheus metrics for the hosted zone operator.
//!
//! All metrics carry the namespace prefix `hostzone`.
//!
//! # Metrics Categories
//!
//! - **Reconciliation Metrics** - Reconcile passes by outcome, and their duration
//! - **Error Metrics** - Failed passes by error reason
//! - **Provider Metrics** - DNS provider API calls by operation and outcome
//! - **Zone Lifecycle Metrics** - Hosted zones created and deleted, delegations linked and unlinked
//!
//! # Example
//!
//! ```rust,no_run
//! use hostzone::metrics::record_reconciliation;
//!
//! record_reconciliation("DNSZone", "zone_ensured", std::time::Duration::from_secs(1));
//! ```

use prometheus::{
    CounterVec, Encoder, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, Opts, Registry,
    TextEncoder,
};
use std::sync::LazyLock;
use std::time::Duration;

// ============================================================================
// Metric Name Constants
// ============================================================================

/// Namespace prefix for all operator metrics
const METRICS_NAMESPACE: &str = "hostzone";

// ============================================================================
// Global Metrics Registry
// ============================================================================

/// Global Prometheus metrics registry
///
/// All metrics are registered in this registry and exposed via `/metrics` endpoint.
pub static METRICS_REGISTRY: LazyLock<Registry> = LazyLock::new(Registry::new);

// ============================================================================
// Reconciliation Metrics
// ============================================================================

/// Total number of reconciliations by resource type and outcome
///
/// Labels:
/// - `resource_type`: Kind of resource (`DNSZone`)
/// - `outcome`: Transition taken (`absent`, `deleted`, `finalizer_added`,
///   `zone_ensured`, `steady`) or `error`
pub static RECONCILIATION_TOTAL: LazyLock<CounterVec> = LazyLock::new(|| {
    let opts = Opts::new(
        format!("{METRICS_NAMESPACE}_reconciliations_total"),
        "Total number of reconciliations by resource type and outcome",
    );
    let counter = CounterVec::new(opts, &["resource_type", "outcome"])
        .expect("reconciliation counter options are valid");
    METRICS_REGISTRY
        .register(Box::new(counter.clone()))
        .expect("reconciliation counter registers once");
    counter
});

/// Duration of reconciliations in seconds
///
/// Labels:
/// - `resource_type`: Kind of resource
pub static RECONCILIATION_DURATION_SECONDS: LazyLock<HistogramVec> = LazyLock::new(|| {
    let opts = HistogramOpts::new(
        format!("{METRICS_NAMESPACE}_reconciliation_duration_seconds"),
        "Duration of reconciliations in seconds by resource type",
    )
    .buckets(vec![0.01, 0.1, 0.5, 1.0, 2.0, 5.0, 10.0, 30.0, 60.0, 120.0]);
    let histogram = HistogramVec::new(opts, &["resource_type"])
        .expect("reconciliation histogram options are valid");
    METRICS_REGISTRY
        .register(Box::new(histogram.clone()))
        .expect("reconciliation histogram registers once");
    histogram
});

// ============================================================================
// Error Metrics
// ============================================================================

/// Total number of failed reconciliations by resource type and error reason
///
/// Labels:
/// - `resource_type`: Kind of resource
/// - `error_type`: Error reason (`ProviderUnavailable`, `InvalidDomain`, `Timeout`, ...)
pub static ERRORS_TOTAL: LazyLock<CounterVec> = LazyLock::new(|| {
    let opts = Opts::new(
        format!("{METRICS_NAMESPACE}_errors_total"),
        "Total number of errors by resource type and error reason",
    );
    let counter = CounterVec::new(opts, &["resource_type", "error_type"])
        .expect("error counter options are valid");
    METRICS_REGISTRY
        .register(Box::new(counter.clone()))
        .expect("error counter registers once");
    counter
});

// ============================================================================
// Provider Metrics
// ============================================================================

/// Total number of DNS provider API calls
///
/// Labels:
/// - `operation`: Provider API operation (e.g. `ListHostedZones`)
/// - `outcome`: `success` or `error`
pub static PROVIDER_CALLS_TOTAL: LazyLock<IntCounterVec> = LazyLock::new(|| {
    let opts = Opts::new(
        format!("{METRICS_NAMESPACE}_provider_calls_total"),
        "Total number of DNS provider API calls by operation and outcome",
    );
    let counter = IntCounterVec::new(opts, &["operation", "outcome"])
        .expect("provider counter options are valid");
    METRICS_REGISTRY
        .register(Box::new(counter.clone()))
        .expect("provider counter registers once");
    counter
});

// ============================================================================
// Zone Lifecycle Metrics
// ============================================================================

fn register_int_counter(name: &str, help: &str) -> IntCounter {
    let counter = IntCounter::with_opts(Opts::new(format!("{METRICS_NAMESPACE}_{name}"), help))
        .expect("lifecycle counter options are valid");
    METRICS_REGISTRY
        .register(Box::new(counter.clone()))
        .expect("lifecycle counter registers once");
    counter
}

/// Total number of hosted zones created
pub static HOSTED_ZONES_CREATED_TOTAL: LazyLock<IntCounter> = LazyLock::new(|| {
    register_int_counter(
        "hosted_zones_created_total",
        "Total number of hosted zones created",
    )
});

/// Total number of hosted zones deleted
pub static HOSTED_ZONES_DELETED_TOTAL: LazyLock<IntCounter> = LazyLock::new(|| {
    register_int_counter(
        "hosted_zones_deleted_total",
        "Total number of hosted zones deleted",
    )
});

/// Total number of NS delegations linked or unlinked
///
/// Labels:
/// - `action`: `linked` or `unlinked`
pub static DELEGATIONS_TOTAL: LazyLock<IntCounterVec> = LazyLock::new(|| {
    let opts = Opts::new(
        format!("{METRICS_NAMESPACE}_delegations_total"),
        "Total number of NS delegation changes by action",
    );
    let counter =
        IntCounterVec::new(opts, &["action"]).expect("delegation counter options are valid");
    METRICS_REGISTRY
        .register(Box::new(counter.clone()))
        .expect("delegation counter registers once");
    counter
});

// ============================================================================
// Helper Functions
// ============================================================================

/// Record a completed reconciliation
///
/// # Arguments
/// * `resource_type` - The kind of resource reconciled (e.g., `DNSZone`)
/// * `outcome` - The transition the pass took
/// * `duration` - Duration of the reconciliation
pub fn record_reconciliation(resource_type: &str, outcome: &str, duration: Duration) {
    RECONCILIATION_TOTAL
        .with_label_values(&[resource_type, outcome])
        .inc();
    RECONCILIATION_DURATION_SECONDS
        .with_label_values(&[resource_type])
        .observe(duration.as_secs_f64());
}

/// Record a failed reconciliation
///
/// # Arguments
/// * `resource_type` - The kind of resource reconciled
/// * `error_type` - Reason of the failure
/// * `duration` - Duration of the reconciliation before failure
pub fn record_reconciliation_error(resource_type: &str, error_type: &str, duration: Duration) {
    RECONCILIATION_TOTAL
        .with_label_values(&[resource_type, "error"])
        .inc();
    RECONCILIATION_DURATION_SECONDS
        .with_label_values(&[resource_type])
        .observe(duration.as_secs_f64());
    ERRORS_TOTAL
        .with_label_values(&[resource_type, error_type])
        .inc();
}

/// Record a DNS provider API call
pub fn record_provider_call(operation: &str, success: bool) {
    let outcome = if success { "success" } else { "error" };
    PROVIDER_CALLS_TOTAL
        .with_label_values(&[operation, outcome])
        .inc();
}

/// Record hosted zone creation
pub fn record_zone_created() {
    HOSTED_ZONES_CREATED_TOTAL.inc();
}

/// Record hosted zone deletion
pub fn record_zone_deleted() {
    HOSTED_ZONES_DELETED_TOTAL.inc();
}

/// Record an installed NS delegation
pub fn record_delegation_linked() {
    DELEGATIONS_TOTAL.with_label_values(&["linked"]).inc();
}

/// Record a removed NS delegation
pub fn record_delegation_unlinked() {
    DELEGATIONS_TOTAL.with_label_values(&["unlinked"]).inc();
}

/// Gather and encode all metrics in Prometheus text format
///
/// # Errors
/// Returns error if encoding fails
pub fn gather_metrics() -> Result<String, prometheus::Error> {
    let encoder = TextEncoder::new();
    let metric_families = METRICS_REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(format!("UTF-8 error: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_reconciliation() {
        let resource_type = "TestResource";
        let duration = Duration::from_millis(500);

        record_reconciliation(resource_type, "steady", duration);

        let counter = RECONCILIATION_TOTAL.with_label_values(&[resource_type, "steady"]);
        assert!(counter.get() > 0.0);

        let histogram = RECONCILIATION_DURATION_SECONDS.with_label_values(&[resource_type]);
        assert!(histogram.get_sample_count() > 0);
    }

    #[test]
    fn test_record_reconciliation_error() {
        let resource_type = "TestResourceError";

        record_reconciliation_error(resource_type, "InvalidDomain", Duration::from_millis(250));

        let counter = RECONCILIATION_TOTAL.with_label_values(&[resource_type, "error"]);
        assert!(counter.get() > 0.0);
        let errors = ERRORS_TOTAL.with_label_values(&[resource_type, "InvalidDomain"]);
        assert!(errors.get() > 0.0);
    }

    #[test]
    fn test_record_provider_call() {
        record_provider_call("TestOperation", true);
        record_provider_call("TestOperation", false);

        assert!(
            PROVIDER_CALLS_TOTAL
                .with_label_values(&["TestOperation", "success"])
                .get()
                > 0
        );
        assert!(
            PROVIDER_CALLS_TOTAL
                .with_label_values(&["TestOperation", "error"])
                .get()
                > 0
        );
    }

    #[test]
    fn test_gather_metrics() {
        record_reconciliation("GatherTest", "steady", Duration::from_millis(100));
        record_zone_created();
        record_delegation_linked();

        let result = gather_metrics();
        assert!(result.is_ok(), "Gathering metrics should succeed");

        let metrics_text = result.unwrap();
        assert!(metrics_text.contains("hostzone_reconciliations_total"));
        assert!(metrics_text.contains("hostzone_hosted_zones_created_total"));
        assert!(metrics_text.contains("hostzone_delegations_total"));
    }
}
