// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Custom Resource Definition for hosted zone management.
//!
//! A [`DNSZone`] declares a hosted zone that the operator creates in the DNS
//! provider. When `rootDomainName` is set, the operator also writes an NS
//! delegation record for the zone into the root domain's hosted zone.
//!
//! # Example
//!
//! ```rust,no_run
//! use hostzone::crd::DNSZoneSpec;
//!
//! let spec = DNSZoneSpec {
//!     domain_name: "app.example.com".to_string(),
//!     root_domain_name: Some("example.com".to_string()),
//!     is_private_hosted_zone: false,
//! };
//! ```

use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Condition represents an observation of a resource's current state.
#[derive(Clone, Debug, Serialize, Deserialize, Default, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    /// Type of condition. Only `Ready` is reported for `DNSZone`.
    pub r#type: String,

    /// Status of the condition: True, False, or Unknown.
    pub status: String,

    /// Brief CamelCase reason for the condition's last transition.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,

    /// Human-readable message indicating details about the transition.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Last time the condition transitioned from one status to another (RFC3339 format).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_transition_time: Option<String>,
}

/// `DNSZone` status
///
/// Only `hostedZoneCreated` drives reconciliation. The remaining fields are
/// informational and are written in the same patch that sets it.
#[derive(Clone, Debug, Serialize, Deserialize, Default, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DNSZoneStatus {
    /// True once the hosted zone has been confirmed to exist in the provider.
    #[serde(default)]
    pub hosted_zone_created: bool,

    /// Provider id of the hosted zone (without the `/hostedzone/` prefix).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hosted_zone_id: Option<String>,

    /// Name servers assigned to the hosted zone at creation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_servers: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observed_generation: Option<i64>,

    #[serde(default)]
    pub conditions: Vec<Condition>,
}

/// `DNSZone` declares a provider-hosted DNS zone.
///
/// # Example
///
/// ```yaml
/// apiVersion: dns.zone/v1alpha1
/// kind: DNSZone
/// metadata:
///   name: app-example-com
///   namespace: dns-system
/// spec:
///   domainName: app.example.com
///   rootDomainName: example.com
///   isPrivateHostedZone: false
/// ```
#[derive(CustomResource, Clone, Debug, Serialize, Deserialize, JsonSchema, PartialEq)]
#[kube(
    group = "dns.zone",
    version = "v1alpha1",
    kind = "DNSZone",
    namespaced,
    doc = "DNSZone declares a hosted zone in the DNS provider, optionally delegated from the hosted zone of its root domain via NS records."
)]
#[kube(status = "DNSZoneStatus")]
#[kube(printcolumn = r#"{"name":"Domain","type":"string","jsonPath":".spec.domainName"}"#)]
#[kube(printcolumn = r#"{"name":"Root","type":"string","jsonPath":".spec.rootDomainName"}"#)]
#[kube(printcolumn = r#"{"name":"Created","type":"boolean","jsonPath":".status.hostedZoneCreated"}"#)]
#[serde(rename_all = "camelCase")]
pub struct DNSZoneSpec {
    /// Fully-qualified domain name of the hosted zone, without a trailing dot.
    ///
    /// Examples: "example.com", "app.example.com"
    #[schemars(regex(
        pattern = r"^([a-zA-Z0-9]([a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?\.)+[a-zA-Z0-9]([a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?$"
    ))]
    pub domain_name: String,

    /// Root domain whose hosted zone delegates to this zone.
    ///
    /// When set, `domainName` must be a strict subdomain of it and the operator
    /// maintains an NS record for `domainName` inside the root domain's zone.
    /// When empty, a standalone zone is created.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root_domain_name: Option<String>,

    /// Create the hosted zone as a private zone.
    #[serde(default)]
    pub is_private_hosted_zone: bool,
}

impl DNSZoneSpec {
    /// The declared root domain, treating an empty string as unset.
    #[must_use]
    pub fn root_domain(&self) -> Option<&str> {
        self.root_domain_name
            .as_deref()
            .map(str::trim)
            .filter(|root| !root.is_empty())
    }
}

impl DNSZone {
    /// True once the hosted zone has been confirmed to exist.
    #[must_use]
    pub fn hosted_zone_created(&self) -> bool {
        self.status
            .as_ref()
            .is_some_and(|status| status.hosted_zone_created)
    }
}
