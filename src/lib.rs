// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

#![allow(unexpected_cfgs)]

//! # Hostzone - Route 53 Hosted Zone Operator for Kubernetes
//!
//! Hostzone is a Kubernetes operator written in Rust that keeps AWS Route 53
//! hosted zones in step with declared `DNSZone` resources.
//!
//! ## Overview
//!
//! For every `DNSZone` the operator:
//!
//! - Creates the hosted zone if it does not already exist
//! - Optionally creates the root zone and delegates the subdomain to it
//! - Reports the assigned name servers in the resource status
//! - Removes the delegation and the hosted zone when the resource is deleted
//!
//! ## Modules
//!
//! - [`crd`] - Custom Resource Definition for `DNSZone`
//! - [`route53`] - Existence oracle, domain classification, zone lifecycle and delegation
//! - [`reconcilers`] - Finalizer-gated reconciliation of `DNSZone` resources
//! - [`context`] - Shared context handed to the controller
//! - [`config`] - Command-line and environment configuration
//! - [`metrics`] - Prometheus metrics
//!
//! ## Example
//!
//! ```rust,no_run
//! use hostzone::crd::{DNSZone, DNSZoneSpec};
//!
//! let zone = DNSZone::new(
//!     "app",
//!     DNSZoneSpec {
//!         domain_name: "app.example.com".to_string(),
//!         root_domain_name: Some("example.com".to_string()),
//!         is_private_hosted_zone: false,
//!     },
//! );
//! ```

pub mod config;
pub mod constants;
pub mod context;
pub mod crd;
pub mod dns_errors;
pub mod metrics;
pub mod reconcilers;
pub mod route53;

#[cfg(test)]
mod dns_errors_tests;
