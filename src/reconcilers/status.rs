// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Status condition helpers for `DNSZone` resources.
//!
//! Kubernetes conditions follow a standard format:
//! - `type`: The aspect of the resource being reported (e.g., "Ready")
//! - `status`: "True", "False", or "Unknown"
//! - `reason`: A programmatic identifier (CamelCase)
//! - `message`: A human-readable explanation
//! - `lastTransitionTime`: RFC3339 timestamp when the condition changed
//!
//! # Example
//!
//! ```rust
//! use hostzone::reconcilers::status::create_condition;
//!
//! let condition = create_condition(
//!     "Ready",
//!     "True",
//!     "HostedZoneReady",
//!     "Hosted zone example.com is ready"
//! );
//! assert_eq!(condition.r#type, "Ready");
//! ```

use crate::constants::{CONDITION_TYPE_READY, REASON_HOSTED_ZONE_READY};
use crate::crd::{Condition, DNSZone, DNSZoneStatus};
use crate::route53::DelegationSet;
use chrono::Utc;

/// Create a new Kubernetes condition with the current timestamp.
///
/// # Arguments
///
/// * `condition_type` - The type of condition (e.g., "Ready")
/// * `status` - The status: "True", "False", or "Unknown"
/// * `reason` - A programmatic identifier in `CamelCase`
/// * `message` - A human-readable explanation
#[must_use]
pub fn create_condition(
    condition_type: &str,
    status: &str,
    reason: &str,
    message: &str,
) -> Condition {
    Condition {
        r#type: condition_type.to_string(),
        status: status.to_string(),
        reason: Some(reason.to_string()),
        message: Some(message.to_string()),
        last_transition_time: Some(Utc::now().to_rfc3339()),
    }
}

/// Find a condition by type in a list of conditions.
#[must_use]
pub fn find_condition<'a>(
    conditions: &'a [Condition],
    condition_type: &str,
) -> Option<&'a Condition> {
    conditions.iter().find(|c| c.r#type == condition_type)
}

/// Get the last transition time of a condition, or the current time if none exists.
///
/// The existing timestamp is kept only while the condition status is unchanged.
#[must_use]
pub fn get_last_transition_time(
    existing_conditions: &[Condition],
    condition_type: &str,
    status: &str,
) -> String {
    find_condition(existing_conditions, condition_type)
        .filter(|c| c.status == status)
        .and_then(|c| c.last_transition_time.clone())
        .unwrap_or_else(|| Utc::now().to_rfc3339())
}

/// Status recorded once the hosted zone of `zone` is confirmed to exist.
///
/// Conditions of other types are carried over from the current status.
#[must_use]
pub fn hosted_zone_ready_status(
    zone: &DNSZone,
    hosted_zone_id: Option<String>,
    delegation_set: &DelegationSet,
) -> DNSZoneStatus {
    let existing = zone
        .status
        .as_ref()
        .map(|s| s.conditions.as_slice())
        .unwrap_or_default();

    let mut ready = create_condition(
        CONDITION_TYPE_READY,
        "True",
        REASON_HOSTED_ZONE_READY,
        &format!("Hosted zone {} is ready", zone.spec.domain_name),
    );
    ready.last_transition_time = Some(get_last_transition_time(
        existing,
        CONDITION_TYPE_READY,
        "True",
    ));

    let mut conditions: Vec<Condition> = existing
        .iter()
        .filter(|c| c.r#type != CONDITION_TYPE_READY)
        .cloned()
        .collect();
    conditions.push(ready);

    DNSZoneStatus {
        hosted_zone_created: true,
        hosted_zone_id,
        name_servers: Some(delegation_set.name_servers.clone()).filter(|ns| !ns.is_empty()),
        observed_generation: zone.metadata.generation,
        conditions,
    }
}

#[cfg(test)]
#[path = "status_tests.rs"]
mod status_tests;
