// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Access to the declared `DNSZone` resources.
//!
//! The reconciler needs three things from the store: read one resource,
//! replace its finalizer list, and write its status. [`ZoneStore`] names
//! exactly those, and [`KubeZoneStore`] implements them on the Kubernetes API.

use crate::crd::{DNSZone, DNSZoneStatus};
use crate::dns_errors::ZoneError;
use async_trait::async_trait;
use kube::api::{Patch, PatchParams};
use kube::{Api, Client, ResourceExt};
use serde_json::json;
use tracing::debug;

/// Read and write access to `DNSZone` resources.
#[async_trait]
pub trait ZoneStore: Send + Sync {
    /// Fetch the resource, or `None` if it no longer exists.
    async fn get(&self, namespace: &str, name: &str) -> Result<Option<DNSZone>, ZoneError>;

    /// Replace the finalizer list of `zone`.
    ///
    /// Fails with [`ZoneError::PersistConflict`] if `zone` is out of date.
    async fn set_finalizers(&self, zone: &DNSZone, finalizers: Vec<String>)
        -> Result<(), ZoneError>;

    /// Write `status` to the status of `zone`.
    async fn patch_status(&self, zone: &DNSZone, status: &DNSZoneStatus) -> Result<(), ZoneError>;
}

/// Display key of a resource (`namespace/name`).
#[must_use]
pub fn resource_key(zone: &DNSZone) -> String {
    format!("{}/{}", zone.namespace().unwrap_or_default(), zone.name_any())
}

/// Map a Kubernetes API error onto the zone error taxonomy.
pub(crate) fn store_error(resource: &str, err: &kube::Error) -> ZoneError {
    match err {
        kube::Error::Api(api_err) if api_err.code == 409 => ZoneError::PersistConflict {
            resource: resource.to_string(),
            reason: api_err.message.clone(),
        },
        _ => ZoneError::StoreFailure {
            resource: resource.to_string(),
            reason: err.to_string(),
        },
    }
}

/// [`ZoneStore`] backed by the Kubernetes API server.
#[derive(Clone)]
pub struct KubeZoneStore {
    client: Client,
}

impl KubeZoneStore {
    #[must_use]
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    fn api(&self, namespace: &str) -> Api<DNSZone> {
        Api::namespaced(self.client.clone(), namespace)
    }
}

#[async_trait]
impl ZoneStore for KubeZoneStore {
    async fn get(&self, namespace: &str, name: &str) -> Result<Option<DNSZone>, ZoneError> {
        self.api(namespace)
            .get_opt(name)
            .await
            .map_err(|e| store_error(&format!("{namespace}/{name}"), &e))
    }

    async fn set_finalizers(
        &self,
        zone: &DNSZone,
        finalizers: Vec<String>,
    ) -> Result<(), ZoneError> {
        let key = resource_key(zone);
        let namespace = zone.namespace().unwrap_or_default();

        let mut metadata = json!({ "finalizers": &finalizers });
        // resourceVersion turns the merge patch into a conditional write
        if let Some(version) = zone.resource_version() {
            metadata["resourceVersion"] = json!(version);
        }
        let patch = json!({ "metadata": metadata });

        self.api(&namespace)
            .patch(&zone.name_any(), &PatchParams::default(), &Patch::Merge(&patch))
            .await
            .map_err(|e| store_error(&key, &e))?;

        debug!(resource = %key, finalizers = ?finalizers, "Patched finalizers");
        Ok(())
    }

    async fn patch_status(&self, zone: &DNSZone, status: &DNSZoneStatus) -> Result<(), ZoneError> {
        let key = resource_key(zone);
        let namespace = zone.namespace().unwrap_or_default();
        let patch = json!({ "status": status });

        self.api(&namespace)
            .patch_status(&zone.name_any(), &PatchParams::default(), &Patch::Merge(&patch))
            .await
            .map_err(|e| store_error(&key, &e))?;

        debug!(resource = %key, "Patched status");
        Ok(())
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod store_tests;
