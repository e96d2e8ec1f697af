/// Data structures for region and project selection
use crate::error::StoreError;
use serde::{Deserialize, Serialize};

/// Maximum number of entries kept in a recent list
pub const MAX_RECENT: usize = 5;

/// A selectable entry: a region, a project, ...
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SelectionItem {
    pub id: String,
    #[serde(default)]
    pub name: String,
}

impl SelectionItem {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> SelectionItem {
        SelectionItem {
            id: id.into(),
            name: name.into(),
        }
    }

    /// Build an item whose display name falls back to its id
    pub fn with_fallback_name(id: impl Into<String>, name: Option<String>) -> SelectionItem {
        let id = id.into();
        let name = name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| id.clone());
        SelectionItem { id, name }
    }

    pub fn validate(&self) -> Result<(), StoreError> {
        if self.id.trim().is_empty() {
            return Err(StoreError::InvalidItem(format!(
                "id must not be empty (name: '{}')",
                self.name
            )));
        }
        Ok(())
    }
}

/// Most-recently-used entries for one category, newest first.
///
/// Holds at most [`MAX_RECENT`] items with unique ids. The only way to add
/// to it is [`RecentList::promote`], which keeps both properties.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct RecentList {
    items: Vec<SelectionItem>,
}

impl RecentList {
    pub fn new() -> Self {
        RecentList { items: Vec::new() }
    }

    /// Rebuild a list from persisted data, dropping duplicates and blank
    /// ids, naming unnamed entries by their id and capping the length.
    pub fn from_items(items: Vec<SelectionItem>) -> Self {
        let mut list = RecentList::new();
        for item in items {
            if item.id.trim().is_empty() || list.contains(&item.id) {
                continue;
            }
            list.items.push(SelectionItem::with_fallback_name(item.id, Some(item.name)));
        }
        list.items.truncate(MAX_RECENT);
        list
    }

    /// Move `item` to the front, replacing any entry with the same id
    pub fn promote(&mut self, item: SelectionItem) {
        self.items.retain(|existing| existing.id != item.id);
        self.items.insert(0, item);
        self.items.truncate(MAX_RECENT);
    }

    pub fn contains(&self, id: &str) -> bool {
        self.items.iter().any(|item| item.id == id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(|item| item.id.as_str())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SelectionItem> {
        self.items.iter()
    }

    pub fn first(&self) -> Option<&SelectionItem> {
        self.items.first()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn as_slice(&self) -> &[SelectionItem] {
        &self.items
    }
}

impl<'a> IntoIterator for &'a RecentList {
    type Item = &'a SelectionItem;
    type IntoIter = std::slice::Iter<'a, SelectionItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Recent entries plus everything else in the catalog, ready to render
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartitionedView {
    pub recent: RecentList,
    pub others: Vec<SelectionItem>,
}

impl PartitionedView {
    pub fn is_empty(&self) -> bool {
        self.recent.is_empty() && self.others.is_empty()
    }

    /// Look up a display name across both groups
    pub fn name_of(&self, id: &str) -> Option<&str> {
        self.recent
            .iter()
            .chain(self.others.iter())
            .find(|item| item.id == id)
            .map(|item| item.name.as_str())
    }
}
