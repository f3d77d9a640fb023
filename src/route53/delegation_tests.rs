// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Unit tests for `delegation.rs`

#[cfg(test)]
mod tests {
    use super::super::*;
    use crate::route53::memory::{InMemoryProvider, ProviderCall, ProviderOperation};
    use crate::route53::types::ChangeAction;

    fn servers(names: &[&str]) -> Vec<String> {
        names.iter().map(ToString::to_string).collect()
    }

    #[tokio::test]
    async fn test_link_missing_parent_is_not_found() {
        let provider = InMemoryProvider::new();
        let err = link(&provider, "example.com", "app.example.com", &servers(&["ns-1.test"]))
            .await
            .unwrap_err();
        assert_eq!(err, ZoneError::zone_not_found("example.com"));
        assert!(provider.mutations().await.is_empty());
    }

    #[tokio::test]
    async fn test_link_creates_ns_record_with_ttl() {
        let provider = InMemoryProvider::new();
        let parent = provider.seed_zone("example.com", false).await;
        let ns = servers(&["ns-1.test", "ns-2.test", "ns-3.test", "ns-4.test"]);

        link(&provider, "example.com", "app.example.com", &ns)
            .await
            .unwrap();

        let record = provider
            .record_set("example.com", "app.example.com", RecordType::Ns)
            .await
            .unwrap();
        assert_eq!(record.values, ns);
        assert_eq!(record.ttl, Some(DELEGATION_RECORD_TTL_SECS));

        let mutations = provider.mutations().await;
        assert_eq!(mutations.len(), 1);
        match &mutations[0] {
            ProviderCall::ChangeRecordSets { zone_id, changes } => {
                assert_eq!(zone_id, &parent.id);
                assert_eq!(changes.len(), 1);
                assert_eq!(changes[0].action, ChangeAction::Create);
            }
            other => panic!("unexpected call: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_link_is_reentrant() {
        let provider = InMemoryProvider::new();
        provider.seed_zone("example.com", false).await;
        let ns = servers(&["ns-1.test", "ns-2.test"]);

        link(&provider, "example.com", "app.example.com", &ns)
            .await
            .unwrap();
        link(&provider, "example.com", "app.example.com", &ns)
            .await
            .unwrap();

        assert_eq!(provider.call_count(ProviderOperation::ChangeRecordSets).await, 1);
    }

    #[tokio::test]
    async fn test_link_replaces_stale_record_in_one_batch() {
        let provider = InMemoryProvider::new();
        provider.seed_zone("example.com", false).await;

        link(&provider, "example.com", "app.example.com", &servers(&["old-1.test"]))
            .await
            .unwrap();
        provider.clear_calls().await;

        let fresh = servers(&["new-1.test", "new-2.test"]);
        link(&provider, "example.com", "app.example.com", &fresh)
            .await
            .unwrap();

        let mutations = provider.mutations().await;
        assert_eq!(mutations.len(), 1);
        match &mutations[0] {
            ProviderCall::ChangeRecordSets { changes, .. } => {
                let actions: Vec<ChangeAction> = changes.iter().map(|c| c.action).collect();
                assert_eq!(actions, vec![ChangeAction::Delete, ChangeAction::Create]);
            }
            other => panic!("unexpected call: {other:?}"),
        }

        let record = provider
            .record_set("example.com", "app.example.com", RecordType::Ns)
            .await
            .unwrap();
        assert_eq!(record.values, fresh);
    }

    #[tokio::test]
    async fn test_link_rejects_empty_name_servers() {
        let provider = InMemoryProvider::new();
        provider.seed_zone("example.com", false).await;
        let err = link(&provider, "example.com", "app.example.com", &[])
            .await
            .unwrap_err();
        assert!(matches!(err, ZoneError::ProviderRejected { .. }));
    }

    #[tokio::test]
    async fn test_unlink_missing_parent_is_ok() {
        let provider = InMemoryProvider::new();
        unlink(&provider, "example.com", "app.example.com")
            .await
            .unwrap();
        assert!(provider.mutations().await.is_empty());
    }

    #[tokio::test]
    async fn test_unlink_missing_record_is_ok() {
        let provider = InMemoryProvider::new();
        provider.seed_zone("example.com", false).await;
        unlink(&provider, "example.com", "app.example.com")
            .await
            .unwrap();
        assert!(provider.mutations().await.is_empty());
    }

    #[tokio::test]
    async fn test_unlink_removes_record() {
        let provider = InMemoryProvider::new();
        provider.seed_zone("example.com", false).await;
        link(&provider, "example.com", "app.example.com", &servers(&["ns-1.test"]))
            .await
            .unwrap();

        unlink(&provider, "example.com", "app.example.com")
            .await
            .unwrap();

        assert!(provider
            .record_set("example.com", "app.example.com", RecordType::Ns)
            .await
            .is_none());
    }

    #[tokio::test]
    async fn test_unlink_propagates_read_failure() {
        let provider = InMemoryProvider::new();
        provider.seed_zone("example.com", false).await;
        provider
            .fail_next(
                ProviderOperation::ListRecordSets,
                ZoneError::ProviderUnavailable {
                    operation: "ListResourceRecordSets".to_string(),
                    reason: "throttled".to_string(),
                },
            )
            .await;

        let err = unlink(&provider, "example.com", "app.example.com")
            .await
            .unwrap_err();
        assert!(err.is_transient());
    }
}
