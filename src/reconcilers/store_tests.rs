// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Unit tests for `store.rs`

#[cfg(test)]
mod tests {
    use super::super::*;
    use crate::crd::DNSZoneSpec;

    fn api_error(code: u16, reason: &str) -> kube::Error {
        kube::Error::Api(
            kube::core::Status::failure(&format!("{reason} from the API server"), reason)
                .with_code(code)
                .boxed(),
        )
    }

    #[test]
    fn test_conflict_maps_to_persist_conflict() {
        let err = store_error("default/app", &api_error(409, "Conflict"));
        assert!(matches!(err, ZoneError::PersistConflict { ref resource, .. } if resource == "default/app"));
        assert!(err.is_transient());
    }

    #[test]
    fn test_other_api_errors_map_to_store_failure() {
        let err = store_error("default/app", &api_error(500, "InternalError"));
        assert!(matches!(err, ZoneError::StoreFailure { .. }));

        let err = store_error("default/app", &api_error(403, "Forbidden"));
        assert!(matches!(err, ZoneError::StoreFailure { .. }));
    }

    #[test]
    fn test_resource_key() {
        let mut zone = DNSZone::new(
            "app",
            DNSZoneSpec {
                domain_name: "app.example.com".to_string(),
                root_domain_name: None,
                is_private_hosted_zone: false,
            },
        );
        zone.metadata.namespace = Some("dns".to_string());
        assert_eq!(resource_key(&zone), "dns/app");
    }
}
