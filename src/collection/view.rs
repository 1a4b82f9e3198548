//! List view state
//!
//! The in-memory collection behind a page: full record list, sort key,
//! search text and the single expanded detail panel. Pure state — every
//! remote effect happens before an action reaches this type, so after
//! any successful mutation the collection matches what a fresh scoped
//! fetch would return.

use crate::domain::{ContentRecord, RecordId};

use super::action::CollectionAction;

/// Sort key for the list. `Name` is case-insensitive lexicographic,
/// `Date` chronological ascending by parsed timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    Name,
    Date,
}

#[derive(Debug, Clone)]
pub struct CollectionView<T: ContentRecord> {
    records: Vec<T>,
    sort_by: SortKey,
    search: String,
    expanded: Option<RecordId>,
}

impl<T: ContentRecord> CollectionView<T> {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            sort_by: SortKey::Name,
            search: String::new(),
            expanded: None,
        }
    }

    pub fn records(&self) -> &[T] {
        &self.records
    }

    pub fn sort_by(&self) -> SortKey {
        self.sort_by
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn expanded(&self) -> Option<RecordId> {
        self.expanded
    }

    pub fn get(&self, id: RecordId) -> Option<&T> {
        self.records.iter().find(|r| r.id() == id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Re-order the whole collection in place; stable for equal keys.
    pub fn set_sort(&mut self, key: SortKey) {
        self.sort_by = key;
        match key {
            SortKey::Name => self.records.sort_by(|a, b| {
                a.display_name()
                    .to_lowercase()
                    .cmp(&b.display_name().to_lowercase())
            }),
            // Unparseable timestamps compare as None and sort first
            SortKey::Date => self.records.sort_by(|a, b| a.timestamp().cmp(&b.timestamp())),
        }
    }

    /// Narrow the rendered subsequence; the collection itself is
    /// untouched.
    pub fn set_search(&mut self, text: impl Into<String>) {
        self.search = text.into();
    }

    /// The rendered subsequence: case-insensitive substring match on
    /// the display name.
    pub fn visible(&self) -> Vec<&T> {
        let needle = self.search.to_lowercase();
        self.records
            .iter()
            .filter(|r| r.display_name().to_lowercase().contains(&needle))
            .collect()
    }

    /// At most one detail panel is open. Toggling the open id closes
    /// it; any other id moves the expansion there.
    pub fn toggle_expanded(&mut self, id: RecordId) {
        self.expanded = if self.expanded == Some(id) {
            None
        } else {
            Some(id)
        };
    }

    /// Insert-or-replace by id. Called only after the remote write has
    /// already succeeded.
    pub fn upsert(&mut self, record: T) {
        match self.records.iter().position(|r| r.id() == record.id()) {
            Some(pos) => self.records[pos] = record,
            None => self.records.push(record),
        }
    }

    /// Remove by id; an absent id is a no-op. Collapses the panel if
    /// it pointed at the removed record.
    pub fn remove(&mut self, id: RecordId) {
        self.records.retain(|r| r.id() != id);
        if self.expanded == Some(id) {
            self.expanded = None;
        }
    }

    /// Fold one action over the state.
    pub fn apply(&mut self, action: CollectionAction<T>) {
        match action {
            CollectionAction::Loaded(records) => {
                self.records = records;
                if let Some(id) = self.expanded {
                    if self.get(id).is_none() {
                        self.expanded = None;
                    }
                }
            }
            CollectionAction::Added(record) | CollectionAction::Updated(record) => {
                self.upsert(record)
            }
            CollectionAction::Deleted(id) => self.remove(id),
            CollectionAction::Sorted(key) => self.set_sort(key),
        }
    }
}

impl<T: ContentRecord> Default for CollectionView<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FoodReview, RecordId, Review, UserId};
    use uuid::Uuid;

    fn photo(id: RecordId, owner: UserId, name: &str, date: &str) -> FoodReview {
        let mut p = FoodReview::new(
            owner,
            name.to_string(),
            format!("https://cdn.example/{}.jpg", id),
            date.to_string(),
            &Review {
                content: "ok".to_string(),
                rating: 3,
            },
        );
        p.id = id;
        p
    }

    fn loaded(records: Vec<FoodReview>) -> CollectionView<FoodReview> {
        let mut view = CollectionView::new();
        view.apply(CollectionAction::Loaded(records));
        view
    }

    #[test]
    fn name_sort_is_case_insensitive_lexicographic() {
        let owner = Uuid::new_v4();
        let mut view = loaded(vec![
            photo(1, owner, "banana split", "2024-01-02"),
            photo(2, owner, "Apple Pie", "2024-01-01"),
        ]);
        view.set_sort(SortKey::Name);

        let names: Vec<&str> = view.records().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Apple Pie", "banana split"]);
        for pair in view.records().windows(2) {
            assert!(pair[0].name.to_lowercase() <= pair[1].name.to_lowercase());
        }
    }

    #[test]
    fn date_sort_is_chronological_ascending() {
        let owner = Uuid::new_v4();
        let mut view = loaded(vec![
            photo(1, owner, "c", "2024-06-01"),
            photo(2, owner, "a", "2023-12-31"),
            photo(3, owner, "b", "2024-01-15"),
        ]);
        view.set_sort(SortKey::Date);

        let dates: Vec<_> = view.records().iter().map(|p| p.timestamp()).collect();
        for pair in dates.windows(2) {
            assert!(pair[0] <= pair[1]);
        }
        assert_eq!(view.records()[0].name, "a");
    }

    #[test]
    fn sort_is_stable_for_equal_keys() {
        let owner = Uuid::new_v4();
        let mut view = loaded(vec![
            photo(1, owner, "Taco", "2024-01-01"),
            photo(2, owner, "taco", "2024-01-01"),
            photo(3, owner, "TACO", "2024-01-01"),
        ]);
        view.set_sort(SortKey::Name);
        let ids: Vec<_> = view.records().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn search_is_substring_not_prefix_and_leaves_collection_alone() {
        let owner = Uuid::new_v4();
        let mut view = loaded(vec![
            photo(1, owner, "Banana Split", "2024-01-01"),
            photo(2, owner, "Apple Pie", "2024-01-01"),
        ]);
        view.set_search("SPLIT");

        let visible: Vec<&str> = view.visible().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(visible, vec!["Banana Split"]);
        assert_eq!(view.len(), 2);

        view.set_search("");
        assert_eq!(view.visible().len(), 2);
    }

    #[test]
    fn toggle_expanded_keeps_at_most_one_panel_open() {
        let owner = Uuid::new_v4();
        let mut view = loaded(vec![
            photo(1, owner, "a", "2024-01-01"),
            photo(2, owner, "b", "2024-01-01"),
        ]);

        view.toggle_expanded(1);
        assert_eq!(view.expanded(), Some(1));

        // Same id again collapses
        view.toggle_expanded(1);
        assert_eq!(view.expanded(), None);

        view.toggle_expanded(1);
        view.toggle_expanded(2);
        assert_eq!(view.expanded(), Some(2));
    }

    #[test]
    fn upsert_appends_new_and_replaces_existing() {
        let owner = Uuid::new_v4();
        let mut view = loaded(vec![photo(1, owner, "a", "2024-01-01")]);

        view.apply(CollectionAction::Added(photo(2, owner, "b", "2024-01-02")));
        assert_eq!(view.len(), 2);

        view.apply(CollectionAction::Updated(photo(1, owner, "renamed", "2024-01-01")));
        assert_eq!(view.len(), 2);
        assert_eq!(view.get(1).unwrap().name, "renamed");
    }

    #[test]
    fn deleting_removes_exactly_that_id_and_missing_id_is_a_noop() {
        let owner = Uuid::new_v4();
        let mut view = loaded(vec![
            photo(1, owner, "a", "2024-01-01"),
            photo(2, owner, "b", "2024-01-01"),
        ]);

        view.apply(CollectionAction::Deleted(1));
        assert_eq!(view.len(), 1);
        assert!(view.get(1).is_none());

        view.apply(CollectionAction::Deleted(99));
        assert_eq!(view.len(), 1);
    }

    #[test]
    fn deleting_the_expanded_record_collapses_the_panel() {
        let owner = Uuid::new_v4();
        let mut view = loaded(vec![photo(1, owner, "a", "2024-01-01")]);
        view.toggle_expanded(1);

        view.apply(CollectionAction::Deleted(1));
        assert_eq!(view.expanded(), None);
    }

    #[test]
    fn reload_drops_expansion_of_vanished_records() {
        let owner = Uuid::new_v4();
        let mut view = loaded(vec![photo(1, owner, "a", "2024-01-01")]);
        view.toggle_expanded(1);

        view.apply(CollectionAction::Loaded(vec![photo(2, owner, "b", "2024-01-01")]));
        assert_eq!(view.expanded(), None);
    }
}
