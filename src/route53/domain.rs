// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Root-domain classification.
//!
//! A name with two labels or fewer is a root domain; anything longer is a
//! subdomain whose root is its last two labels. Multi-label public suffixes
//! such as `co.uk` are not recognised: single-label TLDs are assumed.

use crate::dns_errors::ZoneError;

/// Classification of a domain name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DomainClass {
    pub is_root: bool,
    pub root: String,
}

/// Classify `name` as a root domain or a subdomain and derive its root.
///
/// A trailing dot is ignored.
///
/// # Example
///
/// ```rust
/// use hostzone::route53::domain::classify;
///
/// let class = classify("a.example.com");
/// assert!(!class.is_root);
/// assert_eq!(class.root, "example.com");
/// ```
#[must_use]
pub fn classify(name: &str) -> DomainClass {
    let name = name.trim_end_matches('.');
    let labels: Vec<&str> = name.split('.').collect();

    if labels.len() <= 2 {
        return DomainClass {
            is_root: true,
            root: name.to_string(),
        };
    }

    DomainClass {
        is_root: false,
        root: labels[labels.len() - 2..].join("."),
    }
}

/// True if `name` is a strict subdomain of `root` by whole-label suffix.
///
/// Comparison is case-insensitive and ignores trailing dots. A name is not a
/// subdomain of itself, and `badexample.com` is not a subdomain of `example.com`.
#[must_use]
pub fn is_subdomain_of(name: &str, root: &str) -> bool {
    let name = name.trim_end_matches('.').to_ascii_lowercase();
    let root = root.trim_end_matches('.').to_ascii_lowercase();

    if root.is_empty() || name.len() <= root.len() {
        return false;
    }

    name.strip_suffix(&root)
        .is_some_and(|prefix| prefix.len() > 1 && prefix.ends_with('.'))
}

/// Check that `domain` can be delegated from `root_domain`.
///
/// Private hosted zones have no delegation set, so there are no name servers
/// to publish in the root zone.
///
/// # Errors
///
/// Returns [`ZoneError::InvalidDomain`] if either name is empty, `domain`
/// is not a strict subdomain of `root_domain`, or the zone is private.
pub fn validate_delegation(
    domain: &str,
    root_domain: &str,
    is_private: bool,
) -> Result<(), ZoneError> {
    let invalid = |reason: &str| ZoneError::InvalidDomain {
        domain: domain.to_string(),
        root_domain: root_domain.to_string(),
        reason: reason.to_string(),
    };

    if domain.trim().is_empty() {
        return Err(invalid("domain name is empty"));
    }
    if root_domain.trim().is_empty() {
        return Err(invalid("root domain name is empty"));
    }
    if !is_subdomain_of(domain, root_domain) {
        return Err(invalid("domain is not a subdomain of the root domain"));
    }
    if is_private {
        return Err(invalid(
            "private hosted zones cannot be delegated from a root domain",
        ));
    }

    Ok(())
}

#[cfg(test)]
#[path = "domain_tests.rs"]
mod domain_tests;
