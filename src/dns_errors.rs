// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Hosted zone operation error types.
//!
//! This module provides the single error type used by the zone lifecycle core:
//! - DNS provider failures (transient vs. rejected requests)
//! - Escalated absence of zones or record sets
//! - Root/child domain mismatches in a `DNSZone` spec
//! - Kubernetes store write conflicts and failures
//!
//! Absence is usually NOT an error: the existence oracle reports it as
//! `false`/`None`. [`ZoneError::NotFound`] is only produced where a missing
//! zone is a broken precondition (e.g. writing a delegation into a parent
//! zone that does not exist).

use thiserror::Error;

/// Errors that can occur while reconciling hosted zones.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ZoneError {
    /// The DNS provider could not be reached or asked us to back off.
    ///
    /// Covers connection failures, timeouts, throttling and 5xx responses.
    /// Never retried internally; the controller requeues the resource.
    #[error("DNS provider unavailable during {operation}: {reason}")]
    ProviderUnavailable {
        /// Provider operation that failed (e.g. `ListHostedZones`)
        operation: String,
        /// Underlying error message
        reason: String,
    },

    /// The DNS provider understood the request and refused it.
    ///
    /// Examples: deleting a hosted zone that still contains records, or a
    /// change batch whose DELETE values do not match the existing record set.
    #[error("DNS provider rejected {operation}: {reason}")]
    ProviderRejected {
        /// Provider operation that was rejected
        operation: String,
        /// Provider error code and message
        reason: String,
    },

    /// A zone or record set that must exist was not found.
    #[error("{kind} '{name}' not found")]
    NotFound {
        /// What was looked up (e.g. "hosted zone")
        kind: String,
        /// Name or id that was looked up
        name: String,
    },

    /// `domainName` is not a strict subdomain of `rootDomainName`.
    ///
    /// Fatal for the resource until its spec is corrected.
    #[error("Invalid domain '{domain}' for root domain '{root_domain}': {reason}")]
    InvalidDomain {
        /// The declared domain name
        domain: String,
        /// The declared root domain name
        root_domain: String,
        /// Explanation of the mismatch
        reason: String,
    },

    /// A status or finalizer write lost a race with a concurrent update (HTTP 409).
    #[error("Conflicting update to {resource}: {reason}")]
    PersistConflict {
        /// `namespace/name` of the resource
        resource: String,
        /// API server message
        reason: String,
    },

    /// Any other Kubernetes API failure while reading or writing a resource.
    #[error("Kubernetes API request for {resource} failed: {reason}")]
    StoreFailure {
        /// `namespace/name` of the resource
        resource: String,
        /// Underlying error message
        reason: String,
    },
}

impl ZoneError {
    /// Shorthand for a [`ZoneError::NotFound`] on a hosted zone.
    #[must_use]
    pub fn zone_not_found(name: &str) -> Self {
        Self::NotFound {
            kind: "hosted zone".to_string(),
            name: name.to_string(),
        }
    }

    /// Returns true if the operation may succeed when simply retried later.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            Self::ProviderUnavailable { .. }
            | Self::PersistConflict { .. }
            | Self::StoreFailure { .. } => true,

            Self::ProviderRejected { .. } | Self::NotFound { .. } | Self::InvalidDomain { .. } => {
                false
            }
        }
    }

    /// Returns true for [`ZoneError::NotFound`].
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns the `CamelCase` reason used for metrics labels and log fields.
    #[must_use]
    pub fn status_reason(&self) -> &'static str {
        match self {
            Self::ProviderUnavailable { .. } => "ProviderUnavailable",
            Self::ProviderRejected { .. } => "ProviderRejected",
            Self::NotFound { .. } => "NotFound",
            Self::InvalidDomain { .. } => "InvalidDomain",
            Self::PersistConflict { .. } => "PersistConflict",
            Self::StoreFailure { .. } => "StoreFailure",
        }
    }
}
