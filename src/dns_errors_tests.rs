// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Unit tests for hosted zone error types.

#[cfg(test)]
mod tests {
    use crate::dns_errors::*;

    #[test]
    fn test_provider_unavailable_error() {
        let error = ZoneError::ProviderUnavailable {
            operation: "ListHostedZones".to_string(),
            reason: "connection reset".to_string(),
        };

        assert_eq!(
            error.to_string(),
            "DNS provider unavailable during ListHostedZones: connection reset"
        );
        assert!(error.is_transient());
        assert_eq!(error.status_reason(), "ProviderUnavailable");
    }

    #[test]
    fn test_provider_rejected_error() {
        let error = ZoneError::ProviderRejected {
            operation: "DeleteHostedZone".to_string(),
            reason: "HostedZoneNotEmpty".to_string(),
        };

        assert_eq!(
            error.to_string(),
            "DNS provider rejected DeleteHostedZone: HostedZoneNotEmpty"
        );
        assert!(!error.is_transient());
    }

    #[test]
    fn test_zone_not_found_error() {
        let error = ZoneError::zone_not_found("example.com");

        assert_eq!(error.to_string(), "hosted zone 'example.com' not found");
        assert!(error.is_not_found());
        assert!(!error.is_transient());
        assert_eq!(error.status_reason(), "NotFound");
    }

    #[test]
    fn test_invalid_domain_error() {
        let error = ZoneError::InvalidDomain {
            domain: "app.example.org".to_string(),
            root_domain: "example.com".to_string(),
            reason: "not a subdomain".to_string(),
        };

        assert_eq!(
            error.to_string(),
            "Invalid domain 'app.example.org' for root domain 'example.com': not a subdomain"
        );
        assert!(!error.is_transient());
        assert_eq!(error.status_reason(), "InvalidDomain");
    }

    #[test]
    fn test_persist_conflict_is_transient() {
        let error = ZoneError::PersistConflict {
            resource: "default/app".to_string(),
            reason: "the object has been modified".to_string(),
        };

        assert!(error.is_transient());
        assert!(!error.is_not_found());
        assert_eq!(error.status_reason(), "PersistConflict");
    }

    #[test]
    fn test_store_failure_is_transient() {
        let error = ZoneError::StoreFailure {
            resource: "default/app".to_string(),
            reason: "service unavailable".to_string(),
        };

        assert!(error.is_transient());
        assert_eq!(
            error.to_string(),
            "Kubernetes API request for default/app failed: service unavailable"
        );
    }
}
