/// Recently used selections, persisted per category
use crate::collation;
use crate::error::StoreError;
use crate::selection::{PartitionedView, RecentList, SelectionItem};
use crate::storage::KeyValueStore;
use std::collections::HashSet;

/// Tracks a bounded most-recently-used list for each category key.
///
/// The store keeps no state of its own between calls; every operation reads
/// the persisted list from the backend. Reads never fail: a missing or
/// corrupt entry is treated as an empty list.
pub struct RecentSelectionStore<S: KeyValueStore> {
    backend: S,
}

impl<S: KeyValueStore> RecentSelectionStore<S> {
    pub fn new(backend: S) -> Self {
        RecentSelectionStore { backend }
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    /// Load the recent list for `category_key`, empty if absent or unreadable
    pub fn load(&self, category_key: &str) -> RecentList {
        let raw = match self.backend.get_item(category_key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return RecentList::new(),
            Err(e) => {
                log::warn!("Error reading recent list '{}': {}", category_key, e);
                return RecentList::new();
            }
        };

        match serde_json::from_str::<Vec<SelectionItem>>(&raw) {
            Ok(items) => RecentList::from_items(items),
            Err(e) => {
                log::warn!("Discarding corrupt recent list '{}': {}", category_key, e);
                RecentList::new()
            }
        }
    }

    /// Move `item` to the front of the recent list and persist it
    pub fn record_selection(&self, category_key: &str, item: SelectionItem) -> Result<(), StoreError> {
        item.validate()?;

        let mut recent = self.load(category_key);
        recent.promote(item);

        let json = serde_json::to_string(&recent).map_err(|e| {
            log::warn!("Error serializing recent list '{}': {}", category_key, e);
            StoreError::from(e)
        })?;

        self.backend.set_item(category_key, &json).map_err(|e| {
            log::warn!("Error saving recent list '{}': {}", category_key, e);
            e
        })?;

        log::debug!("Recorded selection for '{}' ({} recent)", category_key, recent.len());
        Ok(())
    }

    /// Split `catalog` into the recent entries and the rest, sorted by name
    pub fn partition(&self, category_key: &str, catalog: &[SelectionItem]) -> PartitionedView {
        let recent = self.load(category_key);
        let recent_ids: HashSet<&str> = recent.ids().collect();

        let mut others: Vec<SelectionItem> = catalog
            .iter()
            .filter(|item| !recent_ids.contains(item.id.as_str()))
            .cloned()
            .collect();

        collation::sort_by_name(&mut others, |item| item.name.as_str());

        PartitionedView { recent, others }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::MAX_RECENT;
    use crate::storage::MemoryStore;

    const REGIONS: &str = "recentAwsRegions";
    const PROJECTS: &str = "recentGcpProjects";

    /// Backend that always rejects writes, like a full quota
    struct FullStore;

    impl KeyValueStore for FullStore {
        fn get_item(&self, _key: &str) -> Result<Option<String>, StoreError> {
            Ok(None)
        }

        fn set_item(&self, key: &str, _value: &str) -> Result<(), StoreError> {
            Err(StoreError::StorageWrite {
                key: key.to_string(),
                reason: "QuotaExceededError".to_string(),
            })
        }
    }

    /// Backend whose reads fail outright
    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
            Err(StoreError::StorageRead {
                key: key.to_string(),
                reason: "SecurityError".to_string(),
            })
        }

        fn set_item(&self, _key: &str, _value: &str) -> Result<(), StoreError> {
            Ok(())
        }
    }

    fn create_test_store() -> RecentSelectionStore<MemoryStore> {
        RecentSelectionStore::new(MemoryStore::new())
    }

    fn item(id: &str, name: &str) -> SelectionItem {
        SelectionItem::new(id, name)
    }

    fn ids(list: &RecentList) -> Vec<&str> {
        list.ids().collect()
    }

    #[test]
    fn test_load_empty_category() {
        let store = create_test_store();

        let recent = store.load(REGIONS);

        assert!(recent.is_empty());
    }

    #[test]
    fn test_load_corrupt_payload() {
        let store = create_test_store();
        store.backend().set_item(REGIONS, "{not valid json").unwrap();

        let recent = store.load(REGIONS);

        assert!(recent.is_empty());
    }

    #[test]
    fn test_load_wrong_shape_payload() {
        let store = create_test_store();
        store.backend().set_item(REGIONS, r#"{"id":"us-east-1"}"#).unwrap();

        assert!(store.load(REGIONS).is_empty());
    }

    #[test]
    fn test_load_entry_without_name() {
        let store = create_test_store();
        store
            .backend()
            .set_item(REGIONS, r#"[{"id":"a","name":"A"},{"id":"b"}]"#)
            .unwrap();

        let recent = store.load(REGIONS);

        assert_eq!(recent.len(), 2);
        assert_eq!(recent.as_slice()[1], SelectionItem::new("b", "b"));
    }

    #[test]
    fn test_load_read_failure() {
        let store = RecentSelectionStore::new(BrokenStore);

        assert!(store.load(REGIONS).is_empty());
    }

    #[test]
    fn test_record_then_reselect_moves_to_front() {
        let store = create_test_store();

        store.record_selection(REGIONS, item("us-east-1", "US East (N. Virginia)")).unwrap();
        store.record_selection(REGIONS, item("us-west-2", "US West (Oregon)")).unwrap();
        store.record_selection(REGIONS, item("us-east-1", "US East (N. Virginia)")).unwrap();

        let recent = store.load(REGIONS);
        assert_eq!(ids(&recent), vec!["us-east-1", "us-west-2"]);
        assert_eq!(recent.len(), 2);
    }

    #[test]
    fn test_record_six_drops_oldest() {
        let store = create_test_store();

        for id in ["A", "B", "C", "D", "E", "F"] {
            store.record_selection(REGIONS, item(id, id)).unwrap();
        }

        let recent = store.load(REGIONS);
        assert_eq!(ids(&recent), vec!["F", "E", "D", "C", "B"]);
    }

    #[test]
    fn test_rerecord_uses_latest_name() {
        let store = create_test_store();

        store.record_selection(PROJECTS, item("proj-1", "Old Name")).unwrap();
        store.record_selection(PROJECTS, item("proj-1", "New Name")).unwrap();

        let recent = store.load(PROJECTS);
        assert_eq!(recent.len(), 1);
        assert_eq!(recent.first().unwrap().name, "New Name");
    }

    #[test]
    fn test_length_bounded_for_long_sequences() {
        let store = create_test_store();

        for i in 0..40 {
            let id = format!("region-{}", i % 9);
            store.record_selection(REGIONS, item(&id, &id)).unwrap();

            let recent = store.load(REGIONS);
            assert!(recent.len() <= MAX_RECENT);
            assert_eq!(recent.first().unwrap().id, id);

            let unique: HashSet<&str> = recent.ids().collect();
            assert_eq!(unique.len(), recent.len());
        }
    }

    #[test]
    fn test_categories_are_independent() {
        let store = create_test_store();

        store.record_selection(REGIONS, item("us-east-1", "US East")).unwrap();
        store.record_selection(PROJECTS, item("my-project", "My Project")).unwrap();

        assert_eq!(ids(&store.load(REGIONS)), vec!["us-east-1"]);
        assert_eq!(ids(&store.load(PROJECTS)), vec!["my-project"]);
    }

    #[test]
    fn test_persisted_format() {
        let store = create_test_store();

        store.record_selection(REGIONS, item("us-west-2", "US West (Oregon)")).unwrap();
        store.record_selection(REGIONS, item("eu-west-1", "Europe (Ireland)")).unwrap();

        let raw = store.backend().get_item(REGIONS).unwrap().unwrap();
        let parsed: Vec<SelectionItem> = serde_json::from_str(&raw).unwrap();
        assert_eq!(
            parsed,
            vec![item("eu-west-1", "Europe (Ireland)"), item("us-west-2", "US West (Oregon)")]
        );
    }

    #[test]
    fn test_record_over_corrupt_payload_starts_fresh() {
        let store = create_test_store();
        store.backend().set_item(REGIONS, "garbage").unwrap();

        store.record_selection(REGIONS, item("us-east-1", "US East")).unwrap();

        assert_eq!(ids(&store.load(REGIONS)), vec!["us-east-1"]);
    }

    #[test]
    fn test_record_rejects_empty_id() {
        let store = create_test_store();

        let result = store.record_selection(REGIONS, item("", "Nowhere"));

        assert!(matches!(result, Err(StoreError::InvalidItem(_))));
        assert!(store.backend().is_empty());
    }

    #[test]
    fn test_record_write_failure_is_reported() {
        let store = RecentSelectionStore::new(FullStore);

        let result = store.record_selection(REGIONS, item("us-east-1", "US East"));

        assert!(matches!(result, Err(StoreError::StorageWrite { .. })));
        assert!(store.load(REGIONS).is_empty());
    }

    #[test]
    fn test_partition_scenario() {
        let store = create_test_store();
        store.record_selection(REGIONS, item("a", "Alpha")).unwrap();
        let catalog = vec![item("z", "Zeta"), item("a", "Alpha")];

        let view = store.partition(REGIONS, &catalog);

        assert_eq!(view.recent.as_slice(), &[item("a", "Alpha")]);
        assert_eq!(view.others, vec![item("z", "Zeta")]);
    }

    #[test]
    fn test_partition_is_disjoint_and_sorted() {
        let store = create_test_store();
        store.record_selection(REGIONS, item("us-west-2", "US West (Oregon)")).unwrap();
        store.record_selection(REGIONS, item("eu-west-1", "Europe (Ireland)")).unwrap();
        let catalog = vec![
            item("us-east-1", "US East (N. Virginia)"),
            item("eu-north-1", "Europe (Stockholm)"),
            item("eu-west-1", "Europe (Ireland)"),
            item("se-1", "Ängelholm"),
            item("us-west-2", "US West (Oregon)"),
            item("ap-northeast-1", "asia Pacific (Tokyo)"),
        ];

        let view = store.partition(REGIONS, &catalog);

        for other in &view.others {
            assert!(!view.recent.contains(&other.id));
        }
        let names: Vec<&str> = view.others.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Ängelholm", "asia Pacific (Tokyo)", "Europe (Stockholm)", "US East (N. Virginia)"]
        );
    }

    #[test]
    fn test_partition_keeps_recent_not_in_catalog() {
        let store = create_test_store();
        store.record_selection(PROJECTS, item("old-project", "Old Project")).unwrap();

        let view = store.partition(PROJECTS, &[]);

        assert_eq!(ids(&view.recent), vec!["old-project"]);
        assert!(view.others.is_empty());
    }

    #[test]
    fn test_partition_does_not_mutate() {
        let store = create_test_store();
        store.record_selection(REGIONS, item("a", "Alpha")).unwrap();
        let before = store.backend().get_item(REGIONS).unwrap();

        let _ = store.partition(REGIONS, &[item("b", "Beta")]);

        assert_eq!(store.backend().get_item(REGIONS).unwrap(), before);
    }
}
