// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

// Common test utilities for integration tests

#![allow(dead_code)]

use hostzone::context::Context;
use hostzone::crd::{DNSZone, DNSZoneSpec, DNSZoneStatus};
use hostzone::dns_errors::ZoneError;
use hostzone::reconcilers::{reconcile_dnszone, InMemoryZoneStore, ReconcileOutcome, ZoneStore};
use hostzone::route53::{InMemoryProvider, ZoneManager};
use kube::{
    api::{Api, DeleteParams, PostParams},
    client::Client,
};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;

/// In-memory provider and store wired into one controller context
pub struct Harness {
    pub provider: Arc<InMemoryProvider>,
    pub store: Arc<InMemoryZoneStore>,
    pub ctx: Context,
}

impl Harness {
    pub fn new() -> Self {
        let provider = Arc::new(InMemoryProvider::new());
        let store = Arc::new(InMemoryZoneStore::new());
        let ctx = Context::new(
            store.clone(),
            ZoneManager::new(provider.clone()),
            Duration::from_secs(30),
        );
        Self {
            provider,
            store,
            ctx,
        }
    }

    /// Store a `DNSZone` as if a user had applied it
    pub async fn declare(
        &self,
        namespace: &str,
        name: &str,
        domain: &str,
        root: Option<&str>,
        private: bool,
    ) {
        let mut zone = DNSZone::new(
            name,
            DNSZoneSpec {
                domain_name: domain.to_string(),
                root_domain_name: root.map(ToString::to_string),
                is_private_hosted_zone: private,
            },
        );
        zone.metadata.namespace = Some(namespace.to_string());
        self.store.insert(zone).await;
    }

    pub async fn reconcile(
        &self,
        namespace: &str,
        name: &str,
    ) -> Result<ReconcileOutcome, ZoneError> {
        reconcile_dnszone(&self.ctx, namespace, name).await
    }

    /// Run passes until the hosted zone is reported, as the controller would after requeues
    pub async fn converge(&self, namespace: &str, name: &str) {
        for _ in 0..3 {
            let outcome = self.reconcile(namespace, name).await.unwrap();
            if matches!(
                outcome,
                ReconcileOutcome::ZoneEnsured | ReconcileOutcome::Steady
            ) {
                return;
            }
        }
        panic!("{namespace}/{name} did not converge");
    }

    pub async fn status_opt(&self, namespace: &str, name: &str) -> Option<DNSZoneStatus> {
        self.store
            .get(namespace, name)
            .await
            .unwrap()
            .and_then(|zone| zone.status)
    }

    pub async fn status(&self, namespace: &str, name: &str) -> DNSZoneStatus {
        self.status_opt(namespace, name)
            .await
            .expect("resource should have a status")
    }
}

/// Get a Kubernetes client or skip the test if not in a cluster
pub async fn get_kube_client_or_skip() -> Option<Client> {
    match Client::try_default().await {
        Ok(client) => Some(client),
        Err(e) => {
            eprintln!("Skipping integration test: not running in Kubernetes cluster: {}", e);
            None
        }
    }
}

/// Create a test namespace
pub async fn create_test_namespace(
    client: &Client,
    name: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let namespaces: Api<k8s_openapi::api::core::v1::Namespace> = Api::all(client.clone());

    let ns = serde_json::from_value(json!({
        "apiVersion": "v1",
        "kind": "Namespace",
        "metadata": {
            "name": name,
            "labels": {
                "test": "integration",
                "managed-by": "hostzone-test"
            }
        }
    }))?;

    match namespaces.create(&PostParams::default(), &ns).await {
        Ok(_) => {
            println!("Created test namespace: {}", name);
            Ok(())
        }
        Err(kube::Error::Api(ae)) if ae.code == 409 => {
            println!("Test namespace already exists: {}", name);
            Ok(())
        }
        Err(e) => Err(Box::new(e)),
    }
}

/// Cleanup test namespace
pub async fn cleanup_test_namespace(
    client: &Client,
    name: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let namespaces: Api<k8s_openapi::api::core::v1::Namespace> = Api::all(client.clone());

    match namespaces.delete(name, &DeleteParams::default()).await {
        Ok(_) => {
            println!("Deleted test namespace: {}", name);
            Ok(())
        }
        Err(kube::Error::Api(ae)) if ae.code == 404 => {
            println!("Test namespace already deleted: {}", name);
            Ok(())
        }
        Err(e) => Err(Box::new(e)),
    }
}

/// Wait for a resource to be ready
pub async fn wait_for_ready(duration: Duration) {
    println!("Waiting {} seconds for resources to be ready...", duration.as_secs());
    sleep(duration).await;
}
