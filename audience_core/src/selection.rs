use serde::{Deserialize, Serialize};

use audience_runtime::{ConstructionMode, Segment, SegmentKey};

use crate::catalog::SegmentCatalog;

/// Segments picked by the user, in pick order, plus the base subset.
///
/// `base` is always a subset of `selected`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionState {
    selected: Vec<SegmentKey>,
    base: Vec<SegmentKey>,
    pub mode: ConstructionMode,
}

impl SelectionState {
    pub fn with_keys<I>(keys: I) -> Self
    where
        I: IntoIterator<Item = SegmentKey>,
    {
        let mut state = Self::default();
        for key in keys {
            if !state.is_selected(&key) {
                state.selected.push(key);
            }
        }
        state
    }

    pub fn select_all(catalog: &SegmentCatalog) -> Self {
        Self::with_keys(catalog.keys().cloned())
    }

    pub fn selected(&self) -> &[SegmentKey] {
        &self.selected
    }

    pub fn base(&self) -> &[SegmentKey] {
        &self.base
    }

    pub fn is_selected(&self, key: &SegmentKey) -> bool {
        self.selected.contains(key)
    }

    pub fn is_base(&self, key: &SegmentKey) -> bool {
        self.base.contains(key)
    }

    /// Flip membership. Deselecting also drops the key from the base set.
    /// Returns whether the key is selected afterwards.
    pub fn toggle_segment(&mut self, key: &SegmentKey) -> bool {
        if let Some(idx) = self.selected.iter().position(|k| k == key) {
            self.selected.remove(idx);
            self.base.retain(|k| k != key);
            false
        } else {
            self.selected.push(key.clone());
            true
        }
    }

    /// Flip base membership for a selected key; unselected keys are ignored.
    /// Returns whether the key is a base segment afterwards.
    pub fn toggle_base(&mut self, key: &SegmentKey) -> bool {
        if !self.is_selected(key) {
            return false;
        }
        if let Some(idx) = self.base.iter().position(|k| k == key) {
            self.base.remove(idx);
            false
        } else {
            self.base.push(key.clone());
            true
        }
    }

    /// Selected segments that resolve in the catalog, in selection order.
    pub fn active_segments<'a>(&self, catalog: &'a SegmentCatalog) -> Vec<&'a Segment> {
        self.selected
            .iter()
            .filter_map(|key| catalog.get(key))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(value: &str) -> SegmentKey {
        SegmentKey::from(value)
    }

    #[test]
    fn toggle_preserves_insertion_order() {
        let mut state = SelectionState::default();
        assert!(state.toggle_segment(&key("b")));
        assert!(state.toggle_segment(&key("a")));
        assert!(state.toggle_segment(&key("c")));
        assert!(!state.toggle_segment(&key("a")));
        assert!(state.toggle_segment(&key("a")));
        assert_eq!(state.selected(), &[key("b"), key("c"), key("a")]);
    }

    #[test]
    fn base_stays_subset_of_selection() {
        let mut state = SelectionState::with_keys([key("a"), key("b")]);
        assert!(!state.toggle_base(&key("z")));
        assert!(state.base().is_empty());

        assert!(state.toggle_base(&key("a")));
        assert!(state.is_base(&key("a")));
        state.toggle_segment(&key("a"));
        assert!(!state.is_base(&key("a")));
        assert!(state.base().is_empty());

        state.toggle_segment(&key("a"));
        assert!(!state.is_base(&key("a")));
    }

    #[test]
    fn select_all_takes_catalog_order() {
        let catalog = SegmentCatalog::builtin();
        let state = SelectionState::select_all(&catalog);
        let expected: Vec<SegmentKey> = catalog.keys().cloned().collect();
        assert_eq!(state.selected(), expected.as_slice());
        assert_eq!(state.active_segments(&catalog).len(), catalog.len());
    }

    #[test]
    fn unknown_keys_are_not_active() {
        let catalog = SegmentCatalog::builtin();
        let mut state = SelectionState::default();
        state.toggle_segment(&key("Nobody_none"));
        let first = catalog.segments()[0].unique_id.clone();
        state.toggle_segment(&first);
        let active = state.active_segments(&catalog);
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].unique_id, first);
    }
}
