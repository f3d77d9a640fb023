// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Unit tests for `provider.rs`

#[cfg(test)]
mod tests {
    use super::super::*;
    use aws_sdk_route53::error::ErrorMetadata;
    use aws_sdk_route53::operation::get_hosted_zone::GetHostedZoneError;
    use aws_sdk_route53::operation::list_hosted_zones::ListHostedZonesError;

    fn service_error(code: &str) -> SdkError<ListHostedZonesError, ()> {
        SdkError::service_error(
            ListHostedZonesError::generic(ErrorMetadata::builder().code(code).build()),
            (),
        )
    }

    #[test]
    fn test_trim_hosted_zone_id() {
        assert_eq!(trim_hosted_zone_id("/hostedzone/Z123ABC"), "Z123ABC");
        assert_eq!(trim_hosted_zone_id("Z123ABC"), "Z123ABC");
    }

    #[test]
    fn test_throttling_is_unavailable() {
        let err = classify_sdk_error("ListHostedZones", "*", &service_error("Throttling"));
        assert!(matches!(err, ZoneError::ProviderUnavailable { .. }));
        assert!(err.is_transient());

        let err = classify_sdk_error(
            "ListHostedZones",
            "*",
            &service_error("PriorRequestNotComplete"),
        );
        assert!(err.is_transient());
    }

    #[test]
    fn test_unknown_service_error_is_rejection() {
        let err = classify_sdk_error("ListHostedZones", "*", &service_error("InvalidInput"));
        assert!(matches!(
            err,
            ZoneError::ProviderRejected { ref operation, .. } if operation == "ListHostedZones"
        ));
        assert!(!err.is_transient());
    }

    #[test]
    fn test_no_such_hosted_zone_is_not_found() {
        let err: SdkError<GetHostedZoneError, ()> = SdkError::service_error(
            GetHostedZoneError::generic(ErrorMetadata::builder().code("NoSuchHostedZone").build()),
            (),
        );
        let err = classify_sdk_error("GetHostedZone", "Z9", &err);
        assert!(err.is_not_found());
        assert_eq!(err, ZoneError::zone_not_found("Z9"));
    }

    #[test]
    fn test_timeout_is_unavailable() {
        let err: SdkError<ListHostedZonesError, ()> =
            SdkError::timeout_error(std::io::Error::other("deadline elapsed"));
        let err = classify_sdk_error("ListHostedZones", "*", &err);
        assert!(matches!(err, ZoneError::ProviderUnavailable { .. }));
    }

    #[test]
    fn test_to_delegation_set_handles_missing_set() {
        assert_eq!(to_delegation_set(None), DelegationSet::default());
    }

    #[test]
    fn test_to_aws_record_set_carries_values() {
        let servers = vec!["ns-1.awsdns-01.org".to_string(), "ns-2.awsdns-02.com".to_string()];
        let set = ResourceRecordSet::ns("app.example.com", 300, &servers);
        let aws = to_aws_record_set("ChangeResourceRecordSets", &set).unwrap();

        assert_eq!(aws.name(), "app.example.com");
        assert_eq!(*aws.r#type(), RrType::Ns);
        assert_eq!(aws.ttl(), Some(300));
        let values: Vec<&str> = aws.resource_records().iter().map(|r| r.value()).collect();
        assert_eq!(values, vec!["ns-1.awsdns-01.org", "ns-2.awsdns-02.com"]);
    }
}
