// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! In-memory [`ZoneProvider`].
//!
//! Behaves like Route 53 for the calls the operator makes: zones get opaque
//! ids, public zones get a four-server delegation set while private zones get
//! none, change batches are applied atomically, `DELETE` must match the stored
//! set exactly, and a zone that still holds delegation records cannot be
//! deleted.
//!
//! Every call is journaled so tests can assert on call counts and ordering,
//! and a one-shot failure can be injected per operation.

use super::domain::is_subdomain_of;
use super::oracle::canonicalize;
use super::provider::ZoneProvider;
use super::types::{
    ChangeAction, CreatedZone, DelegationSet, HostedZoneSummary, RecordSetChange, RecordType,
    ResourceRecordSet,
};
use crate::dns_errors::ZoneError;
use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap, HashSet};
use tokio::sync::Mutex;
use tracing::debug;

const NAME_SERVER_SUFFIXES: [&str; 4] = ["com", "net", "org", "co.uk"];

/// The provider operations, used to select calls from the journal and to
/// target injected failures.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ProviderOperation {
    ListZones,
    CreateZone,
    DeleteZone,
    GetZone,
    ChangeRecordSets,
    ListRecordSets,
}

/// One journaled provider call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProviderCall {
    ListZones,
    CreateZone {
        name: String,
        private: bool,
        caller_reference: String,
    },
    DeleteZone {
        zone_id: String,
    },
    GetZone {
        zone_id: String,
    },
    ChangeRecordSets {
        zone_id: String,
        changes: Vec<RecordSetChange>,
    },
    ListRecordSets {
        zone_id: String,
        name: String,
        record_type: RecordType,
    },
}

impl ProviderCall {
    #[must_use]
    pub fn operation(&self) -> ProviderOperation {
        match self {
            Self::ListZones => ProviderOperation::ListZones,
            Self::CreateZone { .. } => ProviderOperation::CreateZone,
            Self::DeleteZone { .. } => ProviderOperation::DeleteZone,
            Self::GetZone { .. } => ProviderOperation::GetZone,
            Self::ChangeRecordSets { .. } => ProviderOperation::ChangeRecordSets,
            Self::ListRecordSets { .. } => ProviderOperation::ListRecordSets,
        }
    }
}

type RecordKey = (String, RecordType);

#[derive(Clone, Debug)]
struct StoredZone {
    id: String,
    name: String,
    private: bool,
    delegation_set: DelegationSet,
    record_sets: BTreeMap<RecordKey, ResourceRecordSet>,
}

#[derive(Debug, Default)]
struct State {
    zones: Vec<StoredZone>,
    next_serial: u64,
    caller_references: HashSet<String>,
    calls: Vec<ProviderCall>,
    failures: HashMap<ProviderOperation, ZoneError>,
}

impl State {
    fn record(&mut self, call: ProviderCall) -> Result<(), ZoneError> {
        let operation = call.operation();
        debug!(?operation, "In-memory provider call");
        self.calls.push(call);
        match self.failures.remove(&operation) {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn insert_zone(&mut self, name: &str, private: bool) -> CreatedZone {
        self.next_serial += 1;
        let serial = self.next_serial;
        let id = format!("Z{serial:04}MEMORY");

        // Private zones are resolved inside their VPC and get no delegation set
        let delegation_set = if private {
            DelegationSet::default()
        } else {
            DelegationSet {
                id: Some(format!("N{serial:04}MEMORY")),
                name_servers: NAME_SERVER_SUFFIXES
                    .iter()
                    .enumerate()
                    .map(|(i, suffix)| {
                        let n = serial * 4 + i as u64;
                        format!("ns-{n}.awsdns-{:02}.{suffix}", n % 64)
                    })
                    .collect(),
            }
        };

        self.zones.push(StoredZone {
            id: id.clone(),
            name: canonicalize(name),
            private,
            delegation_set: delegation_set.clone(),
            record_sets: BTreeMap::new(),
        });

        CreatedZone { id, delegation_set }
    }

    fn zone(&self, zone_id: &str) -> Result<&StoredZone, ZoneError> {
        self.zones
            .iter()
            .find(|zone| zone.id == zone_id)
            .ok_or_else(|| ZoneError::zone_not_found(zone_id))
    }

    fn zone_mut(&mut self, zone_id: &str) -> Result<&mut StoredZone, ZoneError> {
        self.zones
            .iter_mut()
            .find(|zone| zone.id == zone_id)
            .ok_or_else(|| ZoneError::zone_not_found(zone_id))
    }
}

fn record_key(name: &str, record_type: RecordType) -> RecordKey {
    (canonicalize(name).to_ascii_lowercase(), record_type)
}

fn rejected(operation: &str, reason: impl Into<String>) -> ZoneError {
    ZoneError::ProviderRejected {
        operation: operation.to_string(),
        reason: reason.into(),
    }
}

/// Apply `changes` to a copy of `record_sets`, returning the copy only if
/// every change is valid.
fn apply_changes(
    zone_name: &str,
    record_sets: &BTreeMap<RecordKey, ResourceRecordSet>,
    changes: &[RecordSetChange],
) -> Result<BTreeMap<RecordKey, ResourceRecordSet>, ZoneError> {
    const OPERATION: &str = "ChangeResourceRecordSets";

    if changes.is_empty() {
        return Err(rejected(OPERATION, "InvalidChangeBatch: no changes"));
    }

    let mut staged = record_sets.clone();
    for change in changes {
        let set = &change.record_set;
        if !is_subdomain_of(&set.name, zone_name) {
            return Err(rejected(
                OPERATION,
                format!("InvalidChangeBatch: {} is not in zone {zone_name}", set.name),
            ));
        }

        let key = record_key(&set.name, set.record_type);
        match change.action {
            ChangeAction::Create => {
                if set.values.is_empty() {
                    return Err(rejected(
                        OPERATION,
                        format!("InvalidChangeBatch: {} {} has no values", set.name, set.record_type),
                    ));
                }
                if staged.contains_key(&key) {
                    return Err(rejected(
                        OPERATION,
                        format!(
                            "InvalidChangeBatch: {} {} already exists",
                            set.name, set.record_type
                        ),
                    ));
                }
                let mut stored = set.clone();
                stored.name = canonicalize(&set.name);
                staged.insert(key, stored);
            }
            ChangeAction::Delete => {
                let matches = staged
                    .get(&key)
                    .is_some_and(|existing| existing.ttl == set.ttl && existing.has_same_values(&set.values));
                if !matches {
                    return Err(rejected(
                        OPERATION,
                        format!(
                            "InvalidChangeBatch: {} {} not found with the given values",
                            set.name, set.record_type
                        ),
                    ));
                }
                staged.remove(&key);
            }
        }
    }

    Ok(staged)
}

/// [`ZoneProvider`] that keeps every zone in process memory.
#[derive(Debug, Default)]
pub struct InMemoryProvider {
    state: Mutex<State>,
}

impl InMemoryProvider {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a zone directly, without journaling a call.
    pub async fn seed_zone(&self, name: &str, private: bool) -> CreatedZone {
        self.state.lock().await.insert_zone(name, private)
    }

    /// Make the next call of `operation` fail with `err`.
    pub async fn fail_next(&self, operation: ProviderOperation, err: ZoneError) {
        self.state.lock().await.failures.insert(operation, err);
    }

    /// Every call made so far, oldest first.
    pub async fn calls(&self) -> Vec<ProviderCall> {
        self.state.lock().await.calls.clone()
    }

    /// Number of calls made of `operation`.
    pub async fn call_count(&self, operation: ProviderOperation) -> usize {
        self.state
            .lock()
            .await
            .calls
            .iter()
            .filter(|call| call.operation() == operation)
            .count()
    }

    /// Mutating calls only, oldest first.
    pub async fn mutations(&self) -> Vec<ProviderCall> {
        self.state
            .lock()
            .await
            .calls
            .iter()
            .filter(|call| {
                matches!(
                    call.operation(),
                    ProviderOperation::CreateZone
                        | ProviderOperation::DeleteZone
                        | ProviderOperation::ChangeRecordSets
                )
            })
            .cloned()
            .collect()
    }

    pub async fn clear_calls(&self) {
        self.state.lock().await.calls.clear();
    }

    /// Canonical names of every zone, in creation order.
    pub async fn zone_names(&self) -> Vec<String> {
        self.state
            .lock()
            .await
            .zones
            .iter()
            .map(|zone| zone.name.clone())
            .collect()
    }

    /// True if the zone named `name` is private. `None` if no such zone.
    pub async fn is_private(&self, name: &str) -> Option<bool> {
        let canonical = canonicalize(name);
        self.state
            .lock()
            .await
            .zones
            .iter()
            .find(|zone| zone.name.eq_ignore_ascii_case(&canonical))
            .map(|zone| zone.private)
    }

    /// Read a record set from the zone named `zone_name`.
    pub async fn record_set(
        &self,
        zone_name: &str,
        name: &str,
        record_type: RecordType,
    ) -> Option<ResourceRecordSet> {
        let canonical = canonicalize(zone_name);
        self.state
            .lock()
            .await
            .zones
            .iter()
            .find(|zone| zone.name.eq_ignore_ascii_case(&canonical))
            .and_then(|zone| zone.record_sets.get(&record_key(name, record_type)).cloned())
    }
}

#[async_trait]
impl ZoneProvider for InMemoryProvider {
    async fn list_zones(&self) -> Result<Vec<HostedZoneSummary>, ZoneError> {
        let mut state = self.state.lock().await;
        state.record(ProviderCall::ListZones)?;

        Ok(state
            .zones
            .iter()
            .map(|zone| HostedZoneSummary {
                id: zone.id.clone(),
                name: zone.name.clone(),
            })
            .collect())
    }

    async fn create_zone(
        &self,
        name: &str,
        private: bool,
        caller_reference: &str,
    ) -> Result<CreatedZone, ZoneError> {
        let mut state = self.state.lock().await;
        state.record(ProviderCall::CreateZone {
            name: name.to_string(),
            private,
            caller_reference: caller_reference.to_string(),
        })?;

        if !state.caller_references.insert(caller_reference.to_string()) {
            return Err(rejected(
                "CreateHostedZone",
                format!("HostedZoneAlreadyExists: caller reference {caller_reference} was already used"),
            ));
        }

        Ok(state.insert_zone(name, private))
    }

    async fn delete_zone(&self, zone_id: &str) -> Result<(), ZoneError> {
        let mut state = self.state.lock().await;
        state.record(ProviderCall::DeleteZone {
            zone_id: zone_id.to_string(),
        })?;

        let zone = state.zone(zone_id)?;
        if !zone.record_sets.is_empty() {
            return Err(rejected(
                "DeleteHostedZone",
                format!("HostedZoneNotEmpty: {} still holds record sets", zone.name),
            ));
        }

        state.zones.retain(|zone| zone.id != zone_id);
        Ok(())
    }

    async fn get_zone(&self, zone_id: &str) -> Result<DelegationSet, ZoneError> {
        let mut state = self.state.lock().await;
        state.record(ProviderCall::GetZone {
            zone_id: zone_id.to_string(),
        })?;

        Ok(state.zone(zone_id)?.delegation_set.clone())
    }

    async fn change_record_sets(
        &self,
        zone_id: &str,
        changes: Vec<RecordSetChange>,
    ) -> Result<(), ZoneError> {
        let mut state = self.state.lock().await;
        state.record(ProviderCall::ChangeRecordSets {
            zone_id: zone_id.to_string(),
            changes: changes.clone(),
        })?;

        let zone = state.zone_mut(zone_id)?;
        zone.record_sets = apply_changes(&zone.name, &zone.record_sets, &changes)?;
        Ok(())
    }

    async fn list_record_sets(
        &self,
        zone_id: &str,
        name: &str,
        record_type: RecordType,
    ) -> Result<Option<ResourceRecordSet>, ZoneError> {
        let mut state = self.state.lock().await;
        state.record(ProviderCall::ListRecordSets {
            zone_id: zone_id.to_string(),
            name: name.to_string(),
            record_type,
        })?;

        Ok(state
            .zone(zone_id)?
            .record_sets
            .get(&record_key(name, record_type))
            .cloned())
    }
}

#[cfg(test)]
#[path = "memory_tests.rs"]
mod memory_tests;
