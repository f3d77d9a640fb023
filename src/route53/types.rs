// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Provider-side shapes the zone lifecycle core depends on.

use std::fmt;

/// A hosted zone as returned by the provider's zone listing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HostedZoneSummary {
    /// Provider id, without the `/hostedzone/` prefix
    pub id: String,
    /// Canonical zone name (with trailing dot)
    pub name: String,
}

/// The authoritative name servers the provider assigned to a hosted zone.
///
/// Assigned once at zone creation and immutable for the zone's lifetime.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DelegationSet {
    /// Provider id of the delegation set, if it has one
    pub id: Option<String>,
    /// Name servers in provider order
    pub name_servers: Vec<String>,
}

/// Result of a successful zone creation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CreatedZone {
    pub id: String,
    pub delegation_set: DelegationSet,
}

/// A hosted zone known to exist after an ensure step, whether it was
/// created or found.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnsuredZone {
    /// Provider id, without the `/hostedzone/` prefix
    pub id: String,
    pub delegation_set: DelegationSet,
}

impl From<CreatedZone> for EnsuredZone {
    fn from(created: CreatedZone) -> Self {
        Self {
            id: created.id,
            delegation_set: created.delegation_set,
        }
    }
}

/// Record types the operator manages.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RecordType {
    /// Name server delegation
    Ns,
}

impl RecordType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ns => "NS",
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A resource record set keyed by `(name, type)` within a zone.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResourceRecordSet {
    pub name: String,
    pub record_type: RecordType,
    pub ttl: Option<i64>,
    pub values: Vec<String>,
}

impl ResourceRecordSet {
    /// Build an NS record set delegating `name` to `name_servers`.
    #[must_use]
    pub fn ns(name: &str, ttl: i64, name_servers: &[String]) -> Self {
        Self {
            name: name.to_string(),
            record_type: RecordType::Ns,
            ttl: Some(ttl),
            values: name_servers.to_vec(),
        }
    }

    /// True if both sets hold the same values, ignoring order, case and trailing dots.
    #[must_use]
    pub fn has_same_values(&self, values: &[String]) -> bool {
        let normalize = |items: &[String]| {
            let mut normalized: Vec<String> = items
                .iter()
                .map(|v| v.trim_end_matches('.').to_ascii_lowercase())
                .collect();
            normalized.sort();
            normalized
        };
        normalize(&self.values) == normalize(values)
    }
}

/// Change action inside a record set change batch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChangeAction {
    Create,
    Delete,
}

impl ChangeAction {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Create => "CREATE",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for ChangeAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of an atomic change batch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordSetChange {
    pub action: ChangeAction,
    pub record_set: ResourceRecordSet,
}

impl RecordSetChange {
    #[must_use]
    pub fn create(record_set: ResourceRecordSet) -> Self {
        Self {
            action: ChangeAction::Create,
            record_set,
        }
    }

    #[must_use]
    pub fn delete(record_set: ResourceRecordSet) -> Self {
        Self {
            action: ChangeAction::Delete,
            record_set,
        }
    }
}
