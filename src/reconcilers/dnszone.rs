// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! DNS zone reconciliation logic.
//!
//! One pass drives a single `DNSZone` one step toward its declared state.
//! The state is derived from the resource on every pass:
//!
//! | State             | Condition                                   | Action                                  |
//! |-------------------|---------------------------------------------|-----------------------------------------|
//! | Absent            | resource not found                          | nothing                                 |
//! | Pending deletion  | deletion timestamp set                      | unlink, delete zone, release finalizer  |
//! | Unprotected       | finalizer missing                           | add finalizer, stop                     |
//! | Active            | finalizer present, zone not yet created     | ensure zone (and delegation), set status|
//! | Active (steady)   | `hostedZoneCreated` is true                 | nothing                                 |
//!
//! A failed pass returns its error without touching status; the next pass
//! starts over from the same derived state.

use super::finalizers::{ensure_finalizer, has_finalizer, remove_finalizer};
use super::status::hosted_zone_ready_status;
use super::store::{resource_key, ZoneStore};
use crate::constants::{FINALIZER_DNS_ZONE, READY_REQUEUE_DURATION_SECS};
use crate::context::Context;
use crate::crd::DNSZone;
use crate::dns_errors::ZoneError;
use crate::route53::classify;
use std::fmt;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Transition taken by one reconcile pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// The resource is gone, or is being deleted and no longer carries our finalizer.
    Absent,
    /// The hosted zone was torn down and the finalizer released.
    Deleted,
    /// The finalizer was added; zone work happens on the next pass.
    FinalizerAdded,
    /// The hosted zone (and delegation) now exist and status was recorded.
    ZoneEnsured,
    /// Status already records the hosted zone; no provider calls were made.
    Steady,
}

impl ReconcileOutcome {
    /// Metric label for the outcome.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Absent => "absent",
            Self::Deleted => "deleted",
            Self::FinalizerAdded => "finalizer_added",
            Self::ZoneEnsured => "zone_ensured",
            Self::Steady => "steady",
        }
    }

    /// Delay before the resource should be looked at again, if ever.
    #[must_use]
    pub fn requeue_after(self) -> Option<Duration> {
        match self {
            Self::Absent | Self::Deleted => None,
            Self::FinalizerAdded => Some(Duration::from_secs(1)),
            Self::ZoneEnsured | Self::Steady => {
                Some(Duration::from_secs(READY_REQUEUE_DURATION_SECS))
            }
        }
    }
}

impl fmt::Display for ReconcileOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reconciles the `DNSZone` `namespace/name`.
///
/// The resource is re-read from the store, so the pass always acts on the
/// latest version.
///
/// # Errors
///
/// Returns the first provider or store error of the pass. Status is only
/// written after every provider step of the pass has succeeded.
pub async fn reconcile_dnszone(
    ctx: &Context,
    namespace: &str,
    name: &str,
) -> Result<ReconcileOutcome, ZoneError> {
    let Some(dnszone) = ctx.store.get(namespace, name).await? else {
        debug!(namespace = %namespace, name = %name, "DNSZone no longer exists");
        return Ok(ReconcileOutcome::Absent);
    };

    info!("Reconciling DNSZone: {}", resource_key(&dnszone));
    debug!(
        namespace = %namespace,
        name = %name,
        generation = ?dnszone.metadata.generation,
        domain = %dnszone.spec.domain_name,
        root_domain = ?dnszone.spec.root_domain(),
        "Starting DNSZone reconciliation"
    );

    if dnszone.metadata.deletion_timestamp.is_some() {
        return delete_dnszone(ctx, &dnszone).await;
    }

    if ensure_finalizer(ctx.store.as_ref(), &dnszone, FINALIZER_DNS_ZONE).await? {
        return Ok(ReconcileOutcome::FinalizerAdded);
    }

    if dnszone.hosted_zone_created() {
        debug!(
            resource = %resource_key(&dnszone),
            "Hosted zone already recorded, nothing to do"
        );
        return Ok(ReconcileOutcome::Steady);
    }

    create_hosted_zone(ctx, &dnszone).await
}

async fn create_hosted_zone(
    ctx: &Context,
    dnszone: &DNSZone,
) -> Result<ReconcileOutcome, ZoneError> {
    let domain = dnszone.spec.domain_name.as_str();
    let private = dnszone.spec.is_private_hosted_zone;

    let zone = match dnszone.spec.root_domain() {
        Some(root) => {
            info!(
                "Ensuring hosted zone {} delegated from {} (private: {})",
                domain, root, private
            );
            ctx.zones
                .ensure_zone_with_root(domain, root, private)
                .await?
        }
        None => {
            let class = classify(domain);
            if !class.is_root {
                info!(
                    "{} is a subdomain of {} but declares no root domain; no delegation will be linked",
                    domain, class.root
                );
            }
            ctx.zones.ensure_zone(domain, private).await?
        }
    };

    let status = hosted_zone_ready_status(dnszone, Some(zone.id), &zone.delegation_set);
    ctx.store.patch_status(dnszone, &status).await?;

    info!(
        "Hosted zone {} is ready for {}",
        domain,
        resource_key(dnszone)
    );
    Ok(ReconcileOutcome::ZoneEnsured)
}

async fn delete_dnszone(ctx: &Context, dnszone: &DNSZone) -> Result<ReconcileOutcome, ZoneError> {
    let key = resource_key(dnszone);

    if !has_finalizer(dnszone, FINALIZER_DNS_ZONE) {
        debug!(resource = %key, "Being deleted without our finalizer, nothing to do");
        return Ok(ReconcileOutcome::Absent);
    }

    info!("Deleting DNSZone {}", key);
    let domain = dnszone.spec.domain_name.as_str();

    if let Some(root) = dnszone.spec.root_domain() {
        if let Err(e) = ctx.zones.unlink(root, domain).await {
            warn!(
                "Failed to remove NS delegation of {} from {}: {}. Continuing with zone deletion",
                domain, root, e
            );
        }
    }

    ctx.zones.delete_zone(domain).await?;
    remove_finalizer(ctx.store.as_ref(), dnszone, FINALIZER_DNS_ZONE).await?;

    info!("Successfully deleted DNSZone {}", key);
    Ok(ReconcileOutcome::Deleted)
}

#[cfg(test)]
#[path = "dnszone_tests.rs"]
mod dnszone_tests;
