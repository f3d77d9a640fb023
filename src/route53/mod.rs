// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Hosted zone management against a DNS provider.
//!
//! This module holds every operation the reconciler performs on the
//! provider side:
//!
//! - Looking up hosted zones by name ([`oracle`])
//! - Classifying root domains and subdomains ([`domain`])
//! - Creating and deleting hosted zones idempotently ([`zone_ops`])
//! - Installing and removing NS delegations in a root zone ([`delegation`])
//!
//! # Architecture
//!
//! All operations go through the narrow [`ZoneProvider`] capability trait.
//! [`Route53Provider`] implements it on top of the AWS SDK and
//! [`InMemoryProvider`] implements it in process memory. Nothing is cached
//! between calls: every operation re-reads provider state.
//!
//! # Example
//!
//! ```rust
//! use hostzone::route53::{InMemoryProvider, ZoneManager};
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), hostzone::dns_errors::ZoneError> {
//! let manager = ZoneManager::new(Arc::new(InMemoryProvider::new()));
//!
//! let child = manager
//!     .ensure_zone_with_root("app.example.com", "example.com", false)
//!     .await?;
//! assert_eq!(child.delegation_set.name_servers.len(), 4);
//! # Ok(())
//! # }
//! ```

pub mod delegation;
pub mod domain;
pub mod memory;
pub mod oracle;
pub mod provider;
pub mod types;
pub mod zone_ops;

pub use domain::{classify, is_subdomain_of, DomainClass};
pub use memory::{InMemoryProvider, ProviderCall, ProviderOperation};
pub use provider::{trim_hosted_zone_id, PrivateZoneVpc, Route53Provider, ZoneProvider};
pub use types::{
    ChangeAction, CreatedZone, DelegationSet, EnsuredZone, HostedZoneSummary, RecordSetChange,
    RecordType, ResourceRecordSet,
};

use crate::dns_errors::ZoneError;
use std::fmt;
use std::sync::Arc;

/// Zone lifecycle operations bound to one provider.
///
/// Cheap to clone; clones share the provider.
#[derive(Clone)]
pub struct ZoneManager {
    provider: Arc<dyn ZoneProvider>,
}

impl fmt::Debug for ZoneManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ZoneManager").finish_non_exhaustive()
    }
}

impl ZoneManager {
    #[must_use]
    pub fn new(provider: Arc<dyn ZoneProvider>) -> Self {
        Self { provider }
    }

    /// The provider this manager talks to.
    #[must_use]
    pub fn provider(&self) -> &dyn ZoneProvider {
        self.provider.as_ref()
    }

    // ===== Existence queries =====

    /// True if a hosted zone named `name` exists.
    ///
    /// # Errors
    ///
    /// Returns the provider error if the listing fails.
    pub async fn zone_exists(&self, name: &str) -> Result<bool, ZoneError> {
        oracle::zone_exists(self.provider(), name).await
    }

    /// Provider id of the hosted zone named `name`.
    ///
    /// # Errors
    ///
    /// Returns the provider error if the listing fails.
    pub async fn find_zone_id(&self, name: &str) -> Result<Option<String>, ZoneError> {
        oracle::find_zone_id(self.provider(), name).await
    }

    /// Delegation set of the hosted zone named `name`.
    ///
    /// # Errors
    ///
    /// Returns the provider error if the listing or the zone lookup fails.
    pub async fn find_delegation_set(
        &self,
        name: &str,
    ) -> Result<Option<DelegationSet>, ZoneError> {
        oracle::find_delegation_set(self.provider(), name).await
    }

    /// Name servers of the hosted zone named `name`.
    ///
    /// # Errors
    ///
    /// Returns the provider error if the listing or the zone lookup fails.
    pub async fn list_nameservers(&self, name: &str) -> Result<Option<Vec<String>>, ZoneError> {
        oracle::list_nameservers(self.provider(), name).await
    }

    // ===== Zone lifecycle =====

    /// See [`zone_ops::ensure_zone`].
    ///
    /// # Errors
    ///
    /// Returns any provider error.
    pub async fn ensure_zone(
        &self,
        name: &str,
        is_private: bool,
    ) -> Result<EnsuredZone, ZoneError> {
        zone_ops::ensure_zone(self.provider(), name, is_private).await
    }

    /// See [`zone_ops::ensure_zone_with_root`].
    ///
    /// # Errors
    ///
    /// Returns [`ZoneError::InvalidDomain`] or any provider error.
    pub async fn ensure_zone_with_root(
        &self,
        name: &str,
        root: &str,
        is_private: bool,
    ) -> Result<EnsuredZone, ZoneError> {
        zone_ops::ensure_zone_with_root(self.provider(), name, root, is_private).await
    }

    /// See [`zone_ops::delete_zone`].
    ///
    /// # Errors
    ///
    /// Returns any provider error.
    pub async fn delete_zone(&self, name: &str) -> Result<(), ZoneError> {
        zone_ops::delete_zone(self.provider(), name).await
    }

    // ===== Delegation =====

    /// See [`delegation::link`].
    ///
    /// # Errors
    ///
    /// Returns [`ZoneError::NotFound`] if the parent zone is missing, or any
    /// provider error.
    pub async fn link(
        &self,
        parent_name: &str,
        child_record_name: &str,
        name_servers: &[String],
    ) -> Result<(), ZoneError> {
        delegation::link(self.provider(), parent_name, child_record_name, name_servers).await
    }

    /// See [`delegation::unlink`].
    ///
    /// # Errors
    ///
    /// Returns any provider error.
    pub async fn unlink(&self, parent_name: &str, child_record_name: &str) -> Result<(), ZoneError> {
        delegation::unlink(self.provider(), parent_name, child_record_name).await
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod mod_tests;
