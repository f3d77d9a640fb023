// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Unit tests for `ZoneManager`

#[cfg(test)]
mod tests {
    use super::super::*;

    fn manager() -> (Arc<InMemoryProvider>, ZoneManager) {
        let provider = Arc::new(InMemoryProvider::new());
        let manager = ZoneManager::new(provider.clone());
        (provider, manager)
    }

    #[tokio::test]
    async fn test_manager_round_trip() {
        let (provider, manager) = manager();

        let child = manager
            .ensure_zone_with_root("app.example.com", "example.com", false)
            .await
            .unwrap();
        assert!(manager.zone_exists("example.com").await.unwrap());
        assert_eq!(
            manager.list_nameservers("app.example.com").await.unwrap(),
            Some(child.delegation_set.name_servers.clone())
        );

        manager.unlink("example.com", "app.example.com").await.unwrap();
        manager.delete_zone("app.example.com").await.unwrap();
        manager.delete_zone("example.com").await.unwrap();

        assert!(provider.zone_names().await.is_empty());
    }

    #[tokio::test]
    async fn test_manager_shares_provider_across_clones() {
        let (provider, manager) = manager();
        let clone = manager.clone();

        clone.ensure_zone("example.com", false).await.unwrap();

        assert!(manager.find_zone_id("example.com").await.unwrap().is_some());
        assert_eq!(provider.call_count(ProviderOperation::CreateZone).await, 1);
    }

    #[test]
    fn test_debug_does_not_require_provider_debug() {
        let (_, manager) = manager();
        assert!(format!("{manager:?}").starts_with("ZoneManager"));
    }
}
