// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! NS delegation between a root zone and a child zone.
//!
//! The delegation is an NS record set in the parent zone named after the
//! child, holding the child zone's name servers.

use super::oracle::find_zone_id;
use super::provider::ZoneProvider;
use super::types::{RecordSetChange, RecordType, ResourceRecordSet};
use crate::constants::DELEGATION_RECORD_TTL_SECS;
use crate::dns_errors::ZoneError;
use crate::metrics::{record_delegation_linked, record_delegation_unlinked};
use tracing::{debug, info, warn};

/// Install an NS record in `parent_name` delegating `child_record_name` to
/// `name_servers`.
///
/// Re-entrant: when the record already holds exactly `name_servers` nothing
/// is sent. A stale record with different values is replaced in the same
/// change batch.
///
/// # Errors
///
/// - [`ZoneError::NotFound`] if the parent zone does not exist
/// - [`ZoneError::ProviderRejected`] if `name_servers` is empty
/// - any provider error from the lookup or the change batch
pub async fn link(
    provider: &dyn ZoneProvider,
    parent_name: &str,
    child_record_name: &str,
    name_servers: &[String],
) -> Result<(), ZoneError> {
    let parent_id = find_zone_id(provider, parent_name)
        .await?
        .ok_or_else(|| ZoneError::zone_not_found(parent_name))?;

    if name_servers.is_empty() {
        return Err(ZoneError::ProviderRejected {
            operation: "ChangeResourceRecordSets".to_string(),
            reason: format!("no name servers to delegate {child_record_name} to"),
        });
    }

    let current = provider
        .list_record_sets(&parent_id, child_record_name, RecordType::Ns)
        .await?;

    let desired = ResourceRecordSet::ns(child_record_name, DELEGATION_RECORD_TTL_SECS, name_servers);

    let changes = match current {
        Some(existing) if existing.has_same_values(name_servers) => {
            debug!(
                parent = %parent_name,
                child = %child_record_name,
                "NS delegation already in place"
            );
            return Ok(());
        }
        Some(stale) => {
            warn!(
                parent = %parent_name,
                child = %child_record_name,
                stale = ?stale.values,
                "Replacing stale NS delegation"
            );
            vec![RecordSetChange::delete(stale), RecordSetChange::create(desired)]
        }
        None => vec![RecordSetChange::create(desired)],
    };

    provider.change_record_sets(&parent_id, changes).await?;
    record_delegation_linked();

    info!(
        parent = %parent_name,
        child = %child_record_name,
        name_servers = ?name_servers,
        "Linked NS delegation"
    );
    Ok(())
}

/// Remove the NS record for `child_record_name` from `parent_name`.
///
/// A missing parent zone or a missing record is logged and treated as
/// success.
///
/// # Errors
///
/// Returns any provider error from the lookups or the change batch.
pub async fn unlink(
    provider: &dyn ZoneProvider,
    parent_name: &str,
    child_record_name: &str,
) -> Result<(), ZoneError> {
    let Some(parent_id) = find_zone_id(provider, parent_name).await? else {
        warn!(
            parent = %parent_name,
            child = %child_record_name,
            "Parent zone not found, nothing to unlink"
        );
        return Ok(());
    };

    let Some(current) = provider
        .list_record_sets(&parent_id, child_record_name, RecordType::Ns)
        .await?
    else {
        warn!(
            parent = %parent_name,
            child = %child_record_name,
            "NS delegation not found, nothing to unlink"
        );
        return Ok(());
    };

    provider
        .change_record_sets(&parent_id, vec![RecordSetChange::delete(current)])
        .await?;
    record_delegation_unlinked();

    info!(
        parent = %parent_name,
        child = %child_record_name,
        "Unlinked NS delegation"
    );
    Ok(())
}

#[cfg(test)]
#[path = "delegation_tests.rs"]
mod delegation_tests;
