// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Operator configuration.
//!
//! Every option can be given as a command-line flag or through its
//! environment variable. AWS credentials are not configured here; they are
//! resolved by the default AWS credential chain.

use crate::constants::{
    DEFAULT_AWS_REGION, DEFAULT_RECONCILE_TIMEOUT_SECS, METRICS_SERVER_BIND_ADDRESS,
    METRICS_SERVER_PORT,
};
use crate::route53::PrivateZoneVpc;
use clap::{Parser, ValueEnum};
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

/// DNS provider backing the hosted zones.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ProviderKind {
    /// AWS Route 53
    Route53,
    /// Process memory; zones are lost on restart
    Memory,
}

/// Command-line and environment configuration of the operator.
#[derive(Clone, Debug, Parser)]
#[command(name = "hostzone")]
#[command(about = "Route 53 hosted zone operator for Kubernetes", long_about = None)]
pub struct OperatorConfig {
    /// AWS region of the Route 53 client
    #[arg(long, env = "AWS_REGION", default_value = DEFAULT_AWS_REGION)]
    pub aws_region: String,

    /// Override the Route 53 endpoint (e.g. a LocalStack URL)
    #[arg(long, env = "ROUTE53_ENDPOINT_URL")]
    pub route53_endpoint_url: Option<String>,

    /// VPC associated with private hosted zones at creation
    #[arg(long, env = "PRIVATE_ZONE_VPC_ID")]
    pub private_zone_vpc_id: Option<String>,

    /// Region of the private zone VPC (defaults to the AWS region)
    #[arg(long, env = "PRIVATE_ZONE_VPC_REGION")]
    pub private_zone_vpc_region: Option<String>,

    /// DNS provider backing the hosted zones
    #[arg(long, env = "DNS_PROVIDER", value_enum, default_value_t = ProviderKind::Route53)]
    pub provider: ProviderKind,

    /// Only watch `DNSZone` resources in this namespace
    #[arg(long, env = "WATCH_NAMESPACE")]
    pub watch_namespace: Option<String>,

    /// Address the metrics server binds to
    #[arg(long, env = "METRICS_BIND_ADDRESS", default_value = METRICS_SERVER_BIND_ADDRESS)]
    pub metrics_bind_address: IpAddr,

    /// Port the metrics server listens on
    #[arg(long, env = "METRICS_PORT", default_value_t = METRICS_SERVER_PORT)]
    pub metrics_port: u16,

    /// Upper bound on one reconcile pass, in seconds
    #[arg(long, env = "RECONCILE_TIMEOUT_SECS", default_value_t = DEFAULT_RECONCILE_TIMEOUT_SECS)]
    pub reconcile_timeout_secs: u64,
}

impl OperatorConfig {
    /// Socket address of the metrics server.
    #[must_use]
    pub fn metrics_addr(&self) -> SocketAddr {
        SocketAddr::new(self.metrics_bind_address, self.metrics_port)
    }

    #[must_use]
    pub fn reconcile_timeout(&self) -> Duration {
        Duration::from_secs(self.reconcile_timeout_secs)
    }

    /// VPC for private hosted zones, if one is configured.
    #[must_use]
    pub fn private_zone_vpc(&self) -> Option<PrivateZoneVpc> {
        self.private_zone_vpc_id.as_ref().map(|vpc_id| PrivateZoneVpc {
            vpc_id: vpc_id.clone(),
            vpc_region: self
                .private_zone_vpc_region
                .clone()
                .unwrap_or_else(|| self.aws_region.clone()),
        })
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
