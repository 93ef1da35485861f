//! Two-level lookup: action id, then percent.

use std::collections::HashMap;

use crate::model::{PositionalAction, PositionalParameters, PositionalRecord};

/// Immutable once built; a refresh publishes a whole new value.
#[derive(Debug, Clone, Default)]
pub struct PositionalIndex {
    actions: HashMap<u32, PositionalAction>,
}

impl PositionalIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge one row.
    ///
    /// The first row seen for an action fixes its name and position. A later
    /// row with the same percent replaces the earlier one.
    pub fn insert(&mut self, record: PositionalRecord) {
        let (action, params) = record.into_parts();
        let entry = self.actions.entry(action.id).or_insert(action);
        entry.positionals.insert(params.percent, params);
    }

    pub fn get(&self, action_id: u32) -> Option<&PositionalAction> {
        self.actions.get(&action_id)
    }

    pub fn contains(&self, action_id: u32) -> bool {
        self.actions.contains_key(&action_id)
    }

    pub fn parameters(&self, action_id: u32, percent: u32) -> Option<&PositionalParameters> {
        self.actions.get(&action_id)?.parameters(percent)
    }

    pub fn is_hit(&self, action_id: u32, percent: u32) -> bool {
        self.parameters(action_id, percent)
            .map(|p| p.is_hit)
            .unwrap_or(false)
    }

    /// Number of actions
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Number of distinct (action, percent) entries
    pub fn row_count(&self) -> usize {
        self.actions.values().map(|a| a.positionals.len()).sum()
    }

    /// Actions in ascending id order
    pub fn iter(&self) -> impl Iterator<Item = &PositionalAction> {
        let mut actions: Vec<_> = self.actions.values().collect();
        actions.sort_by_key(|a| a.id);
        actions.into_iter()
    }
}

impl FromIterator<PositionalRecord> for PositionalIndex {
    fn from_iter<I: IntoIterator<Item = PositionalRecord>>(iter: I) -> Self {
        let mut index = Self::new();
        for record in iter {
            index.insert(record);
        }
        index
    }
}
