// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Global constants for the hostzone operator.
//!
//! This module contains all numeric and string constants used throughout the codebase.
//! Constants are organized by category for easy maintenance.

// ============================================================================
// API Constants
// ============================================================================

/// API group for the `DNSZone` CRD
pub const API_GROUP: &str = "dns.zone";

/// API version for the `DNSZone` CRD
pub const API_VERSION: &str = "v1alpha1";

/// Kind name for `DNSZone` resource
pub const KIND_DNS_ZONE: &str = "DNSZone";

/// Finalizer guarding provider-side cleanup of a `DNSZone`
pub const FINALIZER_DNS_ZONE: &str = "dns.zone/cleanup";

// ============================================================================
// DNS Provider Constants
// ============================================================================

/// TTL for NS delegation records written into a root zone (5 minutes)
pub const DELEGATION_RECORD_TTL_SECS: i64 = 300;

/// Prefix Route 53 puts in front of hosted zone ids
pub const HOSTED_ZONE_ID_PREFIX: &str = "/hostedzone/";

/// Default AWS region, matching where the operator has always provisioned zones
pub const DEFAULT_AWS_REGION: &str = "us-west-2";

// ============================================================================
// Status Constants
// ============================================================================

/// Condition type reported on `DNSZone` status
pub const CONDITION_TYPE_READY: &str = "Ready";

/// Reason recorded once the hosted zone is confirmed to exist
pub const REASON_HOSTED_ZONE_READY: &str = "HostedZoneReady";

// ============================================================================
// Controller Constants
// ============================================================================

/// Requeue duration for transient controller errors (30 seconds)
pub const ERROR_REQUEUE_DURATION_SECS: u64 = 30;

/// Requeue duration for errors that need a spec change (5 minutes)
pub const INVALID_SPEC_REQUEUE_DURATION_SECS: u64 = 300;

/// Requeue duration for zones in steady state (5 minutes)
pub const READY_REQUEUE_DURATION_SECS: u64 = 300;

/// Upper bound for a single reconciliation pass (2 minutes)
pub const DEFAULT_RECONCILE_TIMEOUT_SECS: u64 = 120;

// ============================================================================
// Runtime Constants
// ============================================================================

/// Number of worker threads for Tokio runtime
pub const TOKIO_WORKER_THREADS: usize = 4;

// ============================================================================
// Metrics Server Constants
// ============================================================================

/// Port for Prometheus metrics HTTP server
pub const METRICS_SERVER_PORT: u16 = 8080;

/// Path for Prometheus metrics endpoint
pub const METRICS_SERVER_PATH: &str = "/metrics";

/// Path for the liveness endpoint served next to metrics
pub const HEALTH_SERVER_PATH: &str = "/healthz";

/// Bind address for metrics HTTP server
pub const METRICS_SERVER_BIND_ADDRESS: &str = "0.0.0.0";
