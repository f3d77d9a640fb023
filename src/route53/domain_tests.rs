// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Unit tests for `domain.rs`

#[cfg(test)]
mod tests {
    use super::super::*;

    #[test]
    fn test_classify_root_domain() {
        assert_eq!(
            classify("example.com"),
            DomainClass {
                is_root: true,
                root: "example.com".to_string(),
            }
        );
    }

    #[test]
    fn test_classify_subdomain() {
        assert_eq!(
            classify("a.example.com"),
            DomainClass {
                is_root: false,
                root: "example.com".to_string(),
            }
        );
        assert_eq!(classify("a.b.example.com").root, "example.com");
    }

    #[test]
    fn test_classify_ignores_trailing_dot() {
        let class = classify("app.example.com.");
        assert!(!class.is_root);
        assert_eq!(class.root, "example.com");
    }

    #[test]
    fn test_classify_single_label_is_root() {
        let class = classify("localhost");
        assert!(class.is_root);
        assert_eq!(class.root, "localhost");
    }

    #[test]
    fn test_classify_multi_label_suffix_is_not_recognised() {
        // Single-label TLDs are assumed, so co.uk is treated as the root
        assert_eq!(classify("shop.example.co.uk").root, "co.uk");
    }

    #[test]
    fn test_is_subdomain_of() {
        assert!(is_subdomain_of("x.example.com", "example.com"));
        assert!(is_subdomain_of("a.b.example.com", "example.com"));
        assert!(is_subdomain_of("X.Example.COM.", "example.com"));
        assert!(!is_subdomain_of("example.com", "example.com"));
        assert!(!is_subdomain_of("badexample.com", "example.com"));
        assert!(!is_subdomain_of("example.org", "example.com"));
        assert!(!is_subdomain_of("x.example.com", ""));
    }

    #[test]
    fn test_validate_delegation_accepts_subdomain() {
        assert!(validate_delegation("x.example.com", "example.com", false).is_ok());
    }

    #[test]
    fn test_validate_delegation_rejects_mismatch() {
        let err = validate_delegation("x.example.org", "example.com", false).unwrap_err();
        assert_eq!(err.status_reason(), "InvalidDomain");
        assert!(!err.is_transient());
    }

    #[test]
    fn test_validate_delegation_rejects_self_and_empty() {
        assert!(validate_delegation("example.com", "example.com", false).is_err());
        assert!(validate_delegation("", "example.com", false).is_err());
        assert!(validate_delegation("x.example.com", " ", false).is_err());
    }

    #[test]
    fn test_validate_delegation_rejects_private_zone() {
        let err = validate_delegation("app.corp.internal", "corp.internal", true).unwrap_err();
        assert!(matches!(
            &err,
            ZoneError::InvalidDomain { reason, .. } if reason.contains("private")
        ));
        assert!(!err.is_transient());
    }
}
