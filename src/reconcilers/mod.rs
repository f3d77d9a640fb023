// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Kubernetes reconciliation for `DNSZone` resources.
//!
//! # Reconciliation Architecture
//!
//! The operator follows the standard Kubernetes controller pattern:
//!
//! 1. **Watch** - The controller watches `DNSZone` resources
//! 2. **Reconcile** - [`reconcile_dnszone`] compares the declared zone with the provider
//! 3. **Update** - Hosted zones and NS delegations are created or removed
//! 4. **Status** - The outcome is written back to the resource status
//!
//! # Modules
//!
//! - [`dnszone`] - The reconcile state machine
//! - [`finalizers`] - Finalizer helpers gating deletion
//! - [`status`] - Status and condition builders
//! - [`store`] - The resource store seam and its Kubernetes implementation
//! - [`memory_store`] - In-memory store for tests and local runs

pub mod dnszone;
pub mod finalizers;
pub mod memory_store;
pub mod status;
pub mod store;

pub use dnszone::{reconcile_dnszone, ReconcileOutcome};
pub use memory_store::InMemoryZoneStore;
pub use store::{KubeZoneStore, ZoneStore};

use crate::constants::{ERROR_REQUEUE_DURATION_SECS, INVALID_SPEC_REQUEUE_DURATION_SECS};
use crate::dns_errors::ZoneError;
use std::time::Duration;

/// Delay before retrying a pass that failed with `err`.
///
/// Transient failures retry quickly; errors that need a spec change or
/// operator attention back off longer.
#[must_use]
pub fn error_requeue_after(err: &ZoneError) -> Duration {
    if err.is_transient() {
        Duration::from_secs(ERROR_REQUEUE_DURATION_SECS)
    } else {
        Duration::from_secs(INVALID_SPEC_REQUEUE_DURATION_SECS)
    }
}
