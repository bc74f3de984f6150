mod loader;

use std::collections::BTreeMap;

use tracing::debug;

use crate::codes::{InvCategoryId, InvGroupId, StateType};
use crate::error::Result;

pub use loader::{
    DEFAULT_CATEGORIES_PATH, DEFAULT_GROUPS_PATH, DEFAULT_STATES_PATH, TableSources,
    parse_categories, parse_groups, parse_states,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvGroup {
    pub id: InvGroupId,
    pub category: InvCategoryId,
    pub name: String,
}

/// Read-only code → name tables used when rendering comments.
///
/// Loaded once at startup and passed by reference into every encode and
/// render call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceTables {
    categories: BTreeMap<InvCategoryId, String>,
    groups: BTreeMap<InvGroupId, InvGroup>,
    states: BTreeMap<StateType, String>,
}

impl ReferenceTables {
    pub fn new(
        categories: BTreeMap<InvCategoryId, String>,
        groups: BTreeMap<InvGroupId, InvGroup>,
        states: BTreeMap<StateType, String>,
    ) -> Self {
        Self {
            categories,
            groups,
            states,
        }
    }

    pub fn load(sources: &TableSources) -> Result<Self> {
        let categories = loader::load_categories(sources)?;
        let groups = loader::load_groups(sources)?;
        let states = loader::load_states(sources)?;
        let tables = Self::new(categories, groups, states);
        debug!(
            categories = tables.category_count(),
            groups = tables.group_count(),
            states = tables.state_count(),
            "loaded reference tables"
        );
        Ok(tables)
    }

    pub fn category(&self, id: InvCategoryId) -> Option<&str> {
        self.categories.get(&id).map(String::as_str)
    }

    pub fn group(&self, id: InvGroupId) -> Option<&InvGroup> {
        self.groups.get(&id)
    }

    pub fn state(&self, id: StateType) -> Option<&str> {
        self.states.get(&id).map(String::as_str)
    }

    pub fn insert_category(&mut self, id: InvCategoryId, name: impl Into<String>) {
        self.categories.insert(id, name.into());
    }

    pub fn insert_group(&mut self, group: InvGroup) {
        self.groups.insert(group.id, group);
    }

    pub fn insert_state(&mut self, id: StateType, name: impl Into<String>) {
        self.states.insert(id, name.into());
    }

    pub fn category_count(&self) -> usize {
        self.categories.len()
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    pub fn state_count(&self) -> usize {
        self.states.len()
    }
}
