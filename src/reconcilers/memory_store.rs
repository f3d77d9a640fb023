// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! In-memory [`ZoneStore`].
//!
//! Mirrors the API server rules the reconciler relies on: finalizer writes
//! are conditional on `resourceVersion`, and a resource marked for deletion
//! disappears once its last finalizer is removed.

use super::store::{resource_key, ZoneStore};
use crate::crd::{DNSZone, DNSZoneStatus};
use crate::dns_errors::ZoneError;
use async_trait::async_trait;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::Time;
use k8s_openapi::jiff::Timestamp;
use kube::ResourceExt;
use std::collections::BTreeMap;
use tokio::sync::Mutex;

#[derive(Debug, Default)]
struct StoreState {
    objects: BTreeMap<(String, String), DNSZone>,
    next_version: u64,
    status_writes: usize,
    failed_write: Option<ZoneError>,
}

impl StoreState {
    fn bump(&mut self, zone: &mut DNSZone) {
        self.next_version += 1;
        zone.metadata.resource_version = Some(self.next_version.to_string());
    }

    fn take_failure(&mut self) -> Result<(), ZoneError> {
        match self.failed_write.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

fn object_key(zone: &DNSZone) -> (String, String) {
    (zone.namespace().unwrap_or_default(), zone.name_any())
}

/// [`ZoneStore`] that keeps resources in process memory.
#[derive(Debug, Default)]
pub struct InMemoryZoneStore {
    state: Mutex<StoreState>,
}

impl InMemoryZoneStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a resource. A missing namespace becomes `default`.
    pub async fn insert(&self, mut zone: DNSZone) {
        if zone.metadata.namespace.is_none() {
            zone.metadata.namespace = Some("default".to_string());
        }
        if zone.metadata.generation.is_none() {
            zone.metadata.generation = Some(1);
        }

        let mut state = self.state.lock().await;
        state.bump(&mut zone);
        state.objects.insert(object_key(&zone), zone);
    }

    /// Mark a resource for deletion. Without finalizers it is removed at once.
    pub async fn mark_deleted(&self, namespace: &str, name: &str) {
        let mut state = self.state.lock().await;
        let key = (namespace.to_string(), name.to_string());

        let Some(mut zone) = state.objects.remove(&key) else {
            return;
        };
        if zone.finalizers().is_empty() {
            return;
        }

        zone.metadata.deletion_timestamp = Some(Time(Timestamp::now()));
        state.bump(&mut zone);
        state.objects.insert(key, zone);
    }

    /// Make the next finalizer or status write fail with `err`.
    pub async fn fail_next_write(&self, err: ZoneError) {
        self.state.lock().await.failed_write = Some(err);
    }

    /// Number of successful status writes so far.
    pub async fn status_writes(&self) -> usize {
        self.state.lock().await.status_writes
    }

    /// True if the resource is still stored.
    pub async fn contains(&self, namespace: &str, name: &str) -> bool {
        self.state
            .lock()
            .await
            .objects
            .contains_key(&(namespace.to_string(), name.to_string()))
    }
}

#[async_trait]
impl ZoneStore for InMemoryZoneStore {
    async fn get(&self, namespace: &str, name: &str) -> Result<Option<DNSZone>, ZoneError> {
        Ok(self
            .state
            .lock()
            .await
            .objects
            .get(&(namespace.to_string(), name.to_string()))
            .cloned())
    }

    async fn set_finalizers(
        &self,
        zone: &DNSZone,
        finalizers: Vec<String>,
    ) -> Result<(), ZoneError> {
        let mut state = self.state.lock().await;
        state.take_failure()?;

        let key = object_key(zone);
        let Some(mut stored) = state.objects.remove(&key) else {
            return Err(ZoneError::StoreFailure {
                resource: resource_key(zone),
                reason: "resource not found".to_string(),
            });
        };

        if stored.metadata.resource_version != zone.metadata.resource_version {
            let reason = format!(
                "resourceVersion {:?} is stale, current is {:?}",
                zone.metadata.resource_version, stored.metadata.resource_version
            );
            state.objects.insert(key, stored);
            return Err(ZoneError::PersistConflict {
                resource: resource_key(zone),
                reason,
            });
        }

        let released = finalizers.is_empty() && stored.metadata.deletion_timestamp.is_some();
        stored.metadata.finalizers = Some(finalizers);
        if !released {
            state.bump(&mut stored);
            state.objects.insert(key, stored);
        }
        Ok(())
    }

    async fn patch_status(&self, zone: &DNSZone, status: &DNSZoneStatus) -> Result<(), ZoneError> {
        let mut state = self.state.lock().await;
        state.take_failure()?;

        let key = object_key(zone);
        let Some(mut stored) = state.objects.remove(&key) else {
            return Err(ZoneError::StoreFailure {
                resource: resource_key(zone),
                reason: "resource not found".to_string(),
            });
        };

        stored.status = Some(status.clone());
        state.bump(&mut stored);
        state.status_writes += 1;
        state.objects.insert(key, stored);
        Ok(())
    }
}
