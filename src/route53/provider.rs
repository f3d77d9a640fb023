// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! DNS provider capability and its AWS Route 53 implementation.
//!
//! The zone lifecycle core only ever talks to a [`ZoneProvider`]. The trait
//! has six request/response calls and keeps no state between them.
//! [`Route53Provider`] binds it to the AWS SDK; the in-memory
//! provider in [`super::memory`] binds it for tests and local development.

use super::types::{
    ChangeAction, CreatedZone, DelegationSet, HostedZoneSummary, RecordSetChange, RecordType,
    ResourceRecordSet,
};
use crate::constants::HOSTED_ZONE_ID_PREFIX;
use crate::dns_errors::ZoneError;
use crate::metrics::record_provider_call;
use async_trait::async_trait;
use aws_sdk_route53::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_route53::types::{
    Change, ChangeAction as AwsChangeAction, ChangeBatch, HostedZoneConfig, ResourceRecord,
    ResourceRecordSet as AwsResourceRecordSet, RrType, Vpc, VpcRegion,
};
use aws_sdk_route53::Client;
use tracing::debug;

/// The provider operations the zone lifecycle core depends on.
#[async_trait]
pub trait ZoneProvider: Send + Sync {
    /// List every hosted zone in the account.
    async fn list_zones(&self) -> Result<Vec<HostedZoneSummary>, ZoneError>;

    /// Create a hosted zone. `caller_reference` must be unique per request.
    async fn create_zone(
        &self,
        name: &str,
        private: bool,
        caller_reference: &str,
    ) -> Result<CreatedZone, ZoneError>;

    /// Delete a hosted zone by id.
    async fn delete_zone(&self, zone_id: &str) -> Result<(), ZoneError>;

    /// Fetch the delegation set of a hosted zone by id.
    async fn get_zone(&self, zone_id: &str) -> Result<DelegationSet, ZoneError>;

    /// Apply a change batch atomically.
    async fn change_record_sets(
        &self,
        zone_id: &str,
        changes: Vec<RecordSetChange>,
    ) -> Result<(), ZoneError>;

    /// Read the record set `(name, record_type)` from a hosted zone, if present.
    async fn list_record_sets(
        &self,
        zone_id: &str,
        name: &str,
        record_type: RecordType,
    ) -> Result<Option<ResourceRecordSet>, ZoneError>;
}

/// Strip the `/hostedzone/` prefix Route 53 puts on zone ids.
#[must_use]
pub fn trim_hosted_zone_id(id: &str) -> String {
    id.trim_start_matches(HOSTED_ZONE_ID_PREFIX).to_string()
}

/// VPC a private hosted zone is associated with at creation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PrivateZoneVpc {
    pub vpc_id: String,
    pub vpc_region: String,
}

/// [`ZoneProvider`] backed by AWS Route 53.
#[derive(Clone, Debug)]
pub struct Route53Provider {
    client: Client,
    private_zone_vpc: Option<PrivateZoneVpc>,
}

impl Route53Provider {
    /// Wrap an existing Route 53 client.
    #[must_use]
    pub fn new(client: Client, private_zone_vpc: Option<PrivateZoneVpc>) -> Self {
        Self {
            client,
            private_zone_vpc,
        }
    }

    /// Build a provider from shared AWS configuration.
    ///
    /// `endpoint_url` overrides the Route 53 endpoint (e.g. LocalStack).
    #[must_use]
    pub fn from_sdk_config(
        sdk_config: &aws_config::SdkConfig,
        endpoint_url: Option<&str>,
        private_zone_vpc: Option<PrivateZoneVpc>,
    ) -> Self {
        let mut builder = aws_sdk_route53::config::Builder::from(sdk_config);
        if let Some(endpoint) = endpoint_url {
            builder = builder.endpoint_url(endpoint);
        }
        Self::new(Client::from_conf(builder.build()), private_zone_vpc)
    }
}

/// Map an SDK error onto the zone error taxonomy.
///
/// Transport failures, timeouts and throttling are transient. A service error
/// naming a missing hosted zone becomes [`ZoneError::NotFound`]; every other
/// service error is a rejection.
fn classify_sdk_error<E, R>(operation: &str, subject: &str, err: &SdkError<E, R>) -> ZoneError
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
    R: std::fmt::Debug,
{
    let reason = DisplayErrorContext(err).to_string();
    let unavailable = || ZoneError::ProviderUnavailable {
        operation: operation.to_string(),
        reason: reason.clone(),
    };

    match err {
        SdkError::TimeoutError(_) | SdkError::DispatchFailure(_) | SdkError::ResponseError(_) => {
            unavailable()
        }
        SdkError::ServiceError(service) => match service.err().code() {
            Some("NoSuchHostedZone") => ZoneError::zone_not_found(subject),
            Some(
                "Throttling"
                | "ThrottlingException"
                | "PriorRequestNotComplete"
                | "ServiceUnavailable"
                | "InternalFailure",
            ) => unavailable(),
            _ => ZoneError::ProviderRejected {
                operation: operation.to_string(),
                reason,
            },
        },
        _ => ZoneError::ProviderRejected {
            operation: operation.to_string(),
            reason,
        },
    }
}

fn build_error(operation: &str, err: impl std::fmt::Display) -> ZoneError {
    ZoneError::ProviderRejected {
        operation: operation.to_string(),
        reason: format!("invalid request: {err}"),
    }
}

fn to_delegation_set(set: Option<&aws_sdk_route53::types::DelegationSet>) -> DelegationSet {
    set.map(|set| DelegationSet {
        id: set.id().map(trim_hosted_zone_id),
        name_servers: set.name_servers().to_vec(),
    })
    .unwrap_or_default()
}

fn to_aws_record_set(
    operation: &str,
    record_set: &ResourceRecordSet,
) -> Result<AwsResourceRecordSet, ZoneError> {
    let records = record_set
        .values
        .iter()
        .map(|value| {
            ResourceRecord::builder()
                .value(value)
                .build()
                .map_err(|e| build_error(operation, e))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let rr_type = match record_set.record_type {
        RecordType::Ns => RrType::Ns,
    };

    AwsResourceRecordSet::builder()
        .name(&record_set.name)
        .r#type(rr_type)
        .set_ttl(record_set.ttl)
        .set_resource_records(Some(records))
        .build()
        .map_err(|e| build_error(operation, e))
}

#[async_trait]
impl ZoneProvider for Route53Provider {
    async fn list_zones(&self) -> Result<Vec<HostedZoneSummary>, ZoneError> {
        const OPERATION: &str = "ListHostedZones";

        let mut zones = Vec::new();
        let mut marker: Option<String> = None;
        let mut page_count = 0;

        loop {
            page_count += 1;
            let output = self
                .client
                .list_hosted_zones()
                .set_marker(marker.take())
                .send()
                .await
                .map_err(|e| classify_sdk_error(OPERATION, "*", &e));
            record_provider_call(OPERATION, output.is_ok());
            let output = output?;

            zones.extend(output.hosted_zones().iter().map(|zone| HostedZoneSummary {
                id: trim_hosted_zone_id(zone.id()),
                name: zone.name().to_string(),
            }));

            debug!(
                page = page_count,
                total_zones = zones.len(),
                "Fetched hosted zone page from Route 53"
            );

            match output.next_marker() {
                Some(next) if output.is_truncated() => marker = Some(next.to_string()),
                _ => break,
            }
        }

        Ok(zones)
    }

    async fn create_zone(
        &self,
        name: &str,
        private: bool,
        caller_reference: &str,
    ) -> Result<CreatedZone, ZoneError> {
        const OPERATION: &str = "CreateHostedZone";

        let mut request = self
            .client
            .create_hosted_zone()
            .name(name)
            .caller_reference(caller_reference)
            .hosted_zone_config(HostedZoneConfig::builder().private_zone(private).build());

        if private {
            if let Some(vpc) = &self.private_zone_vpc {
                request = request.vpc(
                    Vpc::builder()
                        .vpc_id(&vpc.vpc_id)
                        .vpc_region(VpcRegion::from(vpc.vpc_region.as_str()))
                        .build(),
                );
            }
        }

        let output = request
            .send()
            .await
            .map_err(|e| classify_sdk_error(OPERATION, name, &e));
        record_provider_call(OPERATION, output.is_ok());
        let output = output?;

        let id = output
            .hosted_zone()
            .map(|zone| trim_hosted_zone_id(zone.id()))
            .ok_or_else(|| ZoneError::ProviderRejected {
                operation: OPERATION.to_string(),
                reason: format!("response for '{name}' carried no hosted zone"),
            })?;

        Ok(CreatedZone {
            id,
            delegation_set: to_delegation_set(output.delegation_set()),
        })
    }

    async fn delete_zone(&self, zone_id: &str) -> Result<(), ZoneError> {
        const OPERATION: &str = "DeleteHostedZone";

        let result = self
            .client
            .delete_hosted_zone()
            .id(zone_id)
            .send()
            .await
            .map_err(|e| classify_sdk_error(OPERATION, zone_id, &e));
        record_provider_call(OPERATION, result.is_ok());
        result.map(|_| ())
    }

    async fn get_zone(&self, zone_id: &str) -> Result<DelegationSet, ZoneError> {
        const OPERATION: &str = "GetHostedZone";

        let output = self
            .client
            .get_hosted_zone()
            .id(zone_id)
            .send()
            .await
            .map_err(|e| classify_sdk_error(OPERATION, zone_id, &e));
        record_provider_call(OPERATION, output.is_ok());

        // Private zones carry no delegation set
        Ok(to_delegation_set(output?.delegation_set()))
    }

    async fn change_record_sets(
        &self,
        zone_id: &str,
        changes: Vec<RecordSetChange>,
    ) -> Result<(), ZoneError> {
        const OPERATION: &str = "ChangeResourceRecordSets";

        let aws_changes = changes
            .iter()
            .map(|change| {
                let action = match change.action {
                    ChangeAction::Create => AwsChangeAction::Create,
                    ChangeAction::Delete => AwsChangeAction::Delete,
                };
                Change::builder()
                    .action(action)
                    .resource_record_set(to_aws_record_set(OPERATION, &change.record_set)?)
                    .build()
                    .map_err(|e| build_error(OPERATION, e))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let batch = ChangeBatch::builder()
            .set_changes(Some(aws_changes))
            .build()
            .map_err(|e| build_error(OPERATION, e))?;

        let result = self
            .client
            .change_resource_record_sets()
            .hosted_zone_id(zone_id)
            .change_batch(batch)
            .send()
            .await
            .map_err(|e| classify_sdk_error(OPERATION, zone_id, &e));
        record_provider_call(OPERATION, result.is_ok());
        result.map(|_| ())
    }

    async fn list_record_sets(
        &self,
        zone_id: &str,
        name: &str,
        record_type: RecordType,
    ) -> Result<Option<ResourceRecordSet>, ZoneError> {
        const OPERATION: &str = "ListResourceRecordSets";

        let rr_type = match record_type {
            RecordType::Ns => RrType::Ns,
        };

        let output = self
            .client
            .list_resource_record_sets()
            .hosted_zone_id(zone_id)
            .start_record_name(name)
            .start_record_type(rr_type.clone())
            .max_items(1)
            .send()
            .await
            .map_err(|e| classify_sdk_error(OPERATION, zone_id, &e));
        record_provider_call(OPERATION, output.is_ok());
        let output = output?;

        // Listing starts at (name, type) and may return the next set instead
        let wanted = super::oracle::canonicalize(name).to_ascii_lowercase();
        Ok(output
            .resource_record_sets()
            .iter()
            .find(|set| set.name().to_ascii_lowercase() == wanted && *set.r#type() == rr_type)
            .map(|set| ResourceRecordSet {
                name: set.name().to_string(),
                record_type,
                ttl: set.ttl(),
                values: set
                    .resource_records()
                    .iter()
                    .map(|record| record.value().to_string())
                    .collect(),
            }))
    }
}

#[cfg(test)]
#[path = "provider_tests.rs"]
mod provider_tests;
