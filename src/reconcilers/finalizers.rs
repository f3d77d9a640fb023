// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Finalizer management for `DNSZone` resources.
//!
//! The finalizer blocks deletion of a resource until the hosted zone behind
//! it has been removed from the provider.
//!
//! # Example
//!
//! ```rust,ignore
//! use hostzone::constants::FINALIZER_DNS_ZONE;
//! use hostzone::reconcilers::finalizers::{ensure_finalizer, remove_finalizer};
//!
//! if ensure_finalizer(store, &zone, FINALIZER_DNS_ZONE).await? {
//!     // Added; the next pass sees the updated resource
//!     return Ok(());
//! }
//! ```

use super::store::{resource_key, ZoneStore};
use crate::crd::DNSZone;
use crate::dns_errors::ZoneError;
use kube::Resource;
use tracing::info;

/// True if `resource` carries `finalizer`.
pub fn has_finalizer<T: Resource>(resource: &T, finalizer: &str) -> bool {
    resource
        .meta()
        .finalizers
        .as_ref()
        .is_some_and(|f| f.iter().any(|item| item == finalizer))
}

/// Finalizer list of `resource` with `finalizer` appended, if missing.
#[must_use]
pub fn with_finalizer<T: Resource>(resource: &T, finalizer: &str) -> Vec<String> {
    let mut finalizers = resource.meta().finalizers.clone().unwrap_or_default();
    if !finalizers.iter().any(|f| f == finalizer) {
        finalizers.push(finalizer.to_string());
    }
    finalizers
}

/// Finalizer list of `resource` with every `finalizer` entry removed.
#[must_use]
pub fn without_finalizer<T: Resource>(resource: &T, finalizer: &str) -> Vec<String> {
    let mut finalizers = resource.meta().finalizers.clone().unwrap_or_default();
    finalizers.retain(|f| f != finalizer);
    finalizers
}

/// Add `finalizer` to `zone` if not already present.
///
/// Returns `true` if the finalizer was added by this call.
///
/// # Errors
///
/// Returns the store error if the patch fails. A stale `zone` yields
/// [`ZoneError::PersistConflict`].
pub async fn ensure_finalizer(
    store: &dyn ZoneStore,
    zone: &DNSZone,
    finalizer: &str,
) -> Result<bool, ZoneError> {
    if has_finalizer(zone, finalizer) {
        return Ok(false);
    }

    let key = resource_key(zone);
    info!("Adding finalizer {} to {} {}", finalizer, key, DNSZone::kind(&()));

    store
        .set_finalizers(zone, with_finalizer(zone, finalizer))
        .await?;

    info!(
        "Successfully added finalizer {} to {} {}",
        finalizer,
        key,
        DNSZone::kind(&())
    );
    Ok(true)
}

/// Remove `finalizer` from `zone` if present.
///
/// Returns `true` if the finalizer was removed by this call.
///
/// # Errors
///
/// Returns the store error if the patch fails.
pub async fn remove_finalizer(
    store: &dyn ZoneStore,
    zone: &DNSZone,
    finalizer: &str,
) -> Result<bool, ZoneError> {
    if !has_finalizer(zone, finalizer) {
        return Ok(false);
    }

    let key = resource_key(zone);
    let remaining = without_finalizer(zone, finalizer);
    info!(
        "Removing finalizer {} from {} {} ({} remaining)",
        finalizer,
        key,
        DNSZone::kind(&()),
        remaining.len()
    );

    store.set_finalizers(zone, remaining).await?;

    info!(
        "Successfully removed finalizer {} from {} {}",
        finalizer,
        key,
        DNSZone::kind(&())
    );
    Ok(true)
}

#[cfg(test)]
#[path = "finalizers_tests.rs"]
mod finalizers_tests;
