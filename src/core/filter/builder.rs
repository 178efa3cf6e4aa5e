//! Stateful filter editor over the immutable tree operations

use super::model::{FilterCondition, FilterGroup, Logic};
use super::tree;
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

type ChangeCallback = Box<dyn Fn(&Arc<FilterGroup>) + Send + Sync>;

/// Holds the current root of an editing session.
///
/// Each mutation swaps in a new root produced by [`tree`] and then hands it
/// to the `on_change` callback, if one is registered. The builder keeps no
/// other state; persisting the tree is up to the callback.
///
/// # Example
///
/// ```rust,ignore
/// let mut builder = FilterBuilder::new().on_change(|root| publish(root.clone()));
/// let root_id = builder.root_id();
/// let condition_id = builder.add_condition(root_id).unwrap();
/// ```
pub struct FilterBuilder {
    root: Arc<FilterGroup>,
    on_change: Option<ChangeCallback>,
}

impl FilterBuilder {
    /// Start a session with an empty AND root
    pub fn new() -> Self {
        Self::from_root(FilterGroup::root())
    }

    /// Resume editing an existing tree
    pub fn from_root(root: Arc<FilterGroup>) -> Self {
        Self {
            root,
            on_change: None,
        }
    }

    /// Register the callback invoked with the new root after every edit
    pub fn on_change(
        mut self,
        callback: impl Fn(&Arc<FilterGroup>) + Send + Sync + 'static,
    ) -> Self {
        self.on_change = Some(Box::new(callback));
        self
    }

    pub fn root(&self) -> &Arc<FilterGroup> {
        &self.root
    }

    pub fn root_id(&self) -> Uuid {
        self.root.id
    }

    /// Add a default condition; returns its id when the group exists
    pub fn add_condition(&mut self, group_id: Uuid) -> Option<Uuid> {
        let condition = FilterCondition::default();
        let id = condition.id;
        let changed = self.commit(tree::add_condition_with(&self.root, group_id, condition));
        changed.then_some(id)
    }

    pub fn update_condition(&mut self, condition: FilterCondition) {
        self.commit(tree::update_condition(&self.root, condition));
    }

    pub fn remove_condition(&mut self, condition_id: Uuid) {
        self.commit(tree::remove_condition(&self.root, condition_id));
    }

    /// Add an empty AND subgroup; returns its id when the parent exists
    pub fn add_group(&mut self, parent_id: Uuid) -> Option<Uuid> {
        let group = FilterGroup::new(Logic::And);
        let id = group.id;
        let changed = self.commit(tree::add_group_with(&self.root, parent_id, group));
        changed.then_some(id)
    }

    pub fn remove_group(&mut self, group_id: Uuid) {
        self.commit(tree::remove_group(&self.root, group_id));
    }

    pub fn toggle_logic(&mut self, group_id: Uuid) {
        self.commit(tree::toggle_logic(&self.root, group_id));
    }

    /// Set a group's logic, toggling only when it differs
    pub fn set_logic(&mut self, group_id: Uuid, logic: Logic) {
        let current = self.root.find_group(group_id).map(|g| g.logic);
        if current.is_some_and(|l| l != logic) {
            self.toggle_logic(group_id);
        }
    }

    /// Clear every condition and subgroup, keeping the root id and logic
    pub fn reset(&mut self) {
        let cleared = FilterGroup {
            id: self.root.id,
            logic: self.root.logic,
            conditions: Vec::new(),
            groups: Vec::new(),
        };
        self.commit(Arc::new(cleared));
    }

    // Reports the root even when the edit was a no-op.
    fn commit(&mut self, next: Arc<FilterGroup>) -> bool {
        let changed = !Arc::ptr_eq(&self.root, &next);
        self.root = next;
        if let Some(callback) = &self.on_change {
            callback(&self.root);
        }
        changed
    }
}

impl Default for FilterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for FilterBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterBuilder")
            .field("root", &self.root)
            .field("on_change", &self.on_change.is_some())
            .finish()
    }
}
