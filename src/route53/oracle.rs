// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Hosted zone existence queries.
//!
//! Every query lists all hosted zones and matches on the canonical
//! (trailing-dot) name. Nothing is cached: two calls issue two listings.
//! Absence is reported as `false`/`None`; provider errors are propagated
//! unchanged and never read as absence.

use super::provider::ZoneProvider;
use super::types::{DelegationSet, HostedZoneSummary};
use crate::dns_errors::ZoneError;
use tracing::debug;

/// Append a trailing dot to `name` unless it already has one.
#[must_use]
pub fn canonicalize(name: &str) -> String {
    if name.ends_with('.') {
        name.to_string()
    } else {
        format!("{name}.")
    }
}

fn same_zone_name(zone_name: &str, canonical: &str) -> bool {
    canonicalize(zone_name).eq_ignore_ascii_case(canonical)
}

/// Find the hosted zone named `name`.
///
/// # Errors
///
/// Returns the provider error if the listing fails.
pub async fn find_zone(
    provider: &dyn ZoneProvider,
    name: &str,
) -> Result<Option<HostedZoneSummary>, ZoneError> {
    let canonical = canonicalize(name);
    let zones = provider.list_zones().await?;

    let found = zones
        .into_iter()
        .find(|zone| same_zone_name(&zone.name, &canonical));

    debug!(
        zone = %canonical,
        found = found.is_some(),
        "Looked up hosted zone"
    );

    Ok(found)
}

/// True if a hosted zone named `name` exists.
///
/// # Errors
///
/// Returns the provider error if the listing fails.
pub async fn zone_exists(provider: &dyn ZoneProvider, name: &str) -> Result<bool, ZoneError> {
    Ok(find_zone(provider, name).await?.is_some())
}

/// Provider id of the hosted zone named `name`.
///
/// # Errors
///
/// Returns the provider error if the listing fails.
pub async fn find_zone_id(
    provider: &dyn ZoneProvider,
    name: &str,
) -> Result<Option<String>, ZoneError> {
    Ok(find_zone(provider, name).await?.map(|zone| zone.id))
}

/// Delegation set of the hosted zone named `name`.
///
/// # Errors
///
/// Returns the provider error if either the listing or the zone lookup fails.
pub async fn find_delegation_set(
    provider: &dyn ZoneProvider,
    name: &str,
) -> Result<Option<DelegationSet>, ZoneError> {
    match find_zone_id(provider, name).await? {
        Some(id) => Ok(Some(provider.get_zone(&id).await?)),
        None => Ok(None),
    }
}

/// Name servers of the hosted zone named `name`, in provider order.
///
/// # Errors
///
/// Returns the provider error if either the listing or the zone lookup fails.
pub async fn list_nameservers(
    provider: &dyn ZoneProvider,
    name: &str,
) -> Result<Option<Vec<String>>, ZoneError> {
    Ok(find_delegation_set(provider, name)
        .await?
        .map(|set| set.name_servers))
}

#[cfg(test)]
#[path = "oracle_tests.rs"]
mod oracle_tests;
