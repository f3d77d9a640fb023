// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Idempotent hosted zone create and delete.

use super::delegation::link;
use super::domain::validate_delegation;
use super::oracle::{find_zone, find_zone_id};
use super::provider::ZoneProvider;
use super::types::EnsuredZone;
use crate::dns_errors::ZoneError;
use crate::metrics::{record_zone_created, record_zone_deleted};
use chrono::Utc;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{info, warn};

static CALLER_REFERENCE_SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// Build a fresh caller reference for a `CreateHostedZone` request.
///
/// Unique per call, so a retried pass never collides with an earlier attempt.
#[must_use]
pub fn caller_reference(name: &str) -> String {
    let now = Utc::now();
    let nanos = now
        .timestamp_nanos_opt()
        .unwrap_or_else(|| now.timestamp_micros().saturating_mul(1000));
    let sequence = CALLER_REFERENCE_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    format!("{}-{nanos}-{sequence}", name.trim_end_matches('.'))
}

/// Make sure a hosted zone named `name` exists and return its id and
/// delegation set.
///
/// An existing zone is returned as-is, whatever its privacy.
///
/// # Errors
///
/// Returns any provider error from the lookup or the create call.
pub async fn ensure_zone(
    provider: &dyn ZoneProvider,
    name: &str,
    is_private: bool,
) -> Result<EnsuredZone, ZoneError> {
    if let Some(existing) = find_zone(provider, name).await? {
        info!(zone = %name, zone_id = %existing.id, "Hosted zone already exists");
        let delegation_set = provider.get_zone(&existing.id).await?;
        return Ok(EnsuredZone {
            id: existing.id,
            delegation_set,
        });
    }

    let reference = caller_reference(name);
    let created = provider.create_zone(name, is_private, &reference).await?;
    record_zone_created();

    info!(
        zone = %name,
        zone_id = %created.id,
        private = is_private,
        name_servers = ?created.delegation_set.name_servers,
        "Created hosted zone"
    );
    Ok(created.into())
}

/// Make sure both `root` and `name` exist, then delegate `name` from `root`.
///
/// Steps run strictly in order: root zone, child zone, NS link.
///
/// # Errors
///
/// - [`ZoneError::InvalidDomain`] if `name` is not a subdomain of `root`, or
///   if the zone is private; nothing is sent to the provider in that case
/// - any error from the zone or link steps; earlier steps are not undone
pub async fn ensure_zone_with_root(
    provider: &dyn ZoneProvider,
    name: &str,
    root: &str,
    is_private: bool,
) -> Result<EnsuredZone, ZoneError> {
    validate_delegation(name, root, is_private)?;

    ensure_zone(provider, root, is_private).await?;
    let child = ensure_zone(provider, name, is_private).await?;
    link(provider, root, name, &child.delegation_set.name_servers).await?;

    Ok(child)
}

/// Delete the hosted zone named `name`. A missing zone is a no-op.
///
/// # Errors
///
/// Returns any provider error from the lookup or the delete call.
pub async fn delete_zone(provider: &dyn ZoneProvider, name: &str) -> Result<(), ZoneError> {
    let Some(zone_id) = find_zone_id(provider, name).await? else {
        warn!(zone = %name, "Hosted zone not found, nothing to delete");
        return Ok(());
    };

    match provider.delete_zone(&zone_id).await {
        Ok(()) => {
            record_zone_deleted();
            info!(zone = %name, zone_id = %zone_id, "Deleted hosted zone");
            Ok(())
        }
        Err(e) if e.is_not_found() => {
            warn!(zone = %name, zone_id = %zone_id, "Hosted zone disappeared before delete");
            Ok(())
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
#[path = "zone_ops_tests.rs"]
mod zone_ops_tests;
