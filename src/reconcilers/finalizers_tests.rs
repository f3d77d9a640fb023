// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Unit tests for `finalizers.rs`

#[cfg(test)]
mod tests {
    use super::super::*;
    use crate::crd::DNSZoneSpec;
    use crate::reconcilers::memory_store::InMemoryZoneStore;
    use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;

    const TEST_FINALIZER: &str = "test.dns.zone/finalizer";
    const TEST_NAMESPACE: &str = "test-namespace";
    const TEST_NAME: &str = "test-zone";

    /// Helper to create a test DNSZone
    fn create_test_zone(finalizers: Option<Vec<String>>) -> DNSZone {
        DNSZone {
            metadata: ObjectMeta {
                name: Some(TEST_NAME.to_string()),
                namespace: Some(TEST_NAMESPACE.to_string()),
                finalizers,
                generation: Some(1),
                ..Default::default()
            },
            spec: DNSZoneSpec {
                domain_name: "app.example.com".to_string(),
                root_domain_name: None,
                is_private_hosted_zone: false,
            },
            status: None,
        }
    }

    async fn stored(store: &InMemoryZoneStore) -> DNSZone {
        store.get(TEST_NAMESPACE, TEST_NAME).await.unwrap().unwrap()
    }

    #[test]
    fn test_has_finalizer() {
        assert!(!has_finalizer(&create_test_zone(None), TEST_FINALIZER));
        assert!(!has_finalizer(&create_test_zone(Some(vec![])), TEST_FINALIZER));
        assert!(has_finalizer(
            &create_test_zone(Some(vec![TEST_FINALIZER.to_string()])),
            TEST_FINALIZER
        ));
        assert!(!has_finalizer(
            &create_test_zone(Some(vec!["other/finalizer".to_string()])),
            TEST_FINALIZER
        ));
    }

    #[test]
    fn test_with_finalizer_preserves_others_and_is_idempotent() {
        let zone = create_test_zone(Some(vec!["other/finalizer".to_string()]));
        let finalizers = with_finalizer(&zone, TEST_FINALIZER);
        assert_eq!(finalizers, vec!["other/finalizer", TEST_FINALIZER]);

        let zone = create_test_zone(Some(finalizers));
        assert_eq!(with_finalizer(&zone, TEST_FINALIZER).len(), 2);
    }

    #[test]
    fn test_without_finalizer_preserves_others() {
        let zone = create_test_zone(Some(vec![
            TEST_FINALIZER.to_string(),
            "other/finalizer".to_string(),
        ]));
        assert_eq!(without_finalizer(&zone, TEST_FINALIZER), vec!["other/finalizer"]);
    }

    #[tokio::test]
    async fn test_ensure_finalizer_adds_once() {
        let store = InMemoryZoneStore::new();
        store.insert(create_test_zone(None)).await;

        let zone = stored(&store).await;
        assert!(ensure_finalizer(&store, &zone, TEST_FINALIZER).await.unwrap());

        let zone = stored(&store).await;
        assert!(has_finalizer(&zone, TEST_FINALIZER));
        assert!(!ensure_finalizer(&store, &zone, TEST_FINALIZER).await.unwrap());
    }

    #[tokio::test]
    async fn test_ensure_finalizer_on_stale_resource_conflicts() {
        let store = InMemoryZoneStore::new();
        store.insert(create_test_zone(None)).await;
        let stale = stored(&store).await;

        // Someone else writes in between
        store.insert(create_test_zone(None)).await;

        let err = ensure_finalizer(&store, &stale, TEST_FINALIZER)
            .await
            .unwrap_err();
        assert!(matches!(err, ZoneError::PersistConflict { .. }));
        assert!(!has_finalizer(&stored(&store).await, TEST_FINALIZER));
    }

    #[tokio::test]
    async fn test_remove_finalizer_releases_deleted_resource() {
        let store = InMemoryZoneStore::new();
        store
            .insert(create_test_zone(Some(vec![TEST_FINALIZER.to_string()])))
            .await;
        store.mark_deleted(TEST_NAMESPACE, TEST_NAME).await;

        let zone = stored(&store).await;
        assert!(zone.metadata.deletion_timestamp.is_some());
        assert!(remove_finalizer(&store, &zone, TEST_FINALIZER).await.unwrap());

        assert!(!store.contains(TEST_NAMESPACE, TEST_NAME).await);
    }

    #[tokio::test]
    async fn test_remove_absent_finalizer_is_noop() {
        let store = InMemoryZoneStore::new();
        store.insert(create_test_zone(None)).await;

        let zone = stored(&store).await;
        assert!(!remove_finalizer(&store, &zone, TEST_FINALIZER).await.unwrap());
    }
}
