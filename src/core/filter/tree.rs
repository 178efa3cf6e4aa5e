//! Immutable edits over a filter tree
//!
//! Every edit returns a new root. Only the groups on the path from the root
//! to the edited group are rebuilt; every other subtree is shared with the
//! previous version (`Arc::ptr_eq` holds for them). Edits that reference an
//! id not present in the tree return the original root unchanged.

use super::model::{FilterCondition, FilterGroup, Logic};
use std::sync::Arc;
use uuid::Uuid;

/// Append a default condition (`name contains ""`) to a group
pub fn add_condition(root: &Arc<FilterGroup>, group_id: Uuid) -> Arc<FilterGroup> {
    add_condition_with(root, group_id, FilterCondition::default())
}

/// Append a specific condition to a group
pub fn add_condition_with(
    root: &Arc<FilterGroup>,
    group_id: Uuid,
    condition: FilterCondition,
) -> Arc<FilterGroup> {
    edit(
        root,
        |group| group.id == group_id,
        |group| {
            let mut next = group.clone();
            next.conditions.push(condition.clone());
            next
        },
    )
}

/// Replace the condition carrying the same id as `condition`
pub fn update_condition(root: &Arc<FilterGroup>, condition: FilterCondition) -> Arc<FilterGroup> {
    let id = condition.id;
    edit(
        root,
        |group| group.conditions.iter().any(|c| c.id == id),
        |group| {
            let mut next = group.clone();
            for slot in next.conditions.iter_mut().filter(|c| c.id == id) {
                *slot = condition.clone();
            }
            next
        },
    )
}

/// Drop a condition from its owning group
pub fn remove_condition(root: &Arc<FilterGroup>, condition_id: Uuid) -> Arc<FilterGroup> {
    edit(
        root,
        |group| group.conditions.iter().any(|c| c.id == condition_id),
        |group| {
            let mut next = group.clone();
            next.conditions.retain(|c| c.id != condition_id);
            next
        },
    )
}

/// Append a new empty AND group under `parent_id`
pub fn add_group(root: &Arc<FilterGroup>, parent_id: Uuid) -> Arc<FilterGroup> {
    add_group_with(root, parent_id, FilterGroup::new(Logic::And))
}

/// Append a specific subgroup under `parent_id`
pub fn add_group_with(
    root: &Arc<FilterGroup>,
    parent_id: Uuid,
    group: FilterGroup,
) -> Arc<FilterGroup> {
    let child = Arc::new(group);
    edit(
        root,
        |group| group.id == parent_id,
        |group| {
            let mut next = group.clone();
            next.groups.push(Arc::clone(&child));
            next
        },
    )
}

/// Remove a subgroup from its parent. The root itself cannot be removed.
pub fn remove_group(root: &Arc<FilterGroup>, group_id: Uuid) -> Arc<FilterGroup> {
    edit(
        root,
        |group| group.groups.iter().any(|g| g.id == group_id),
        |group| {
            let mut next = group.clone();
            next.groups.retain(|g| g.id != group_id);
            next
        },
    )
}

/// Flip a group between AND and OR
pub fn toggle_logic(root: &Arc<FilterGroup>, group_id: Uuid) -> Arc<FilterGroup> {
    edit(
        root,
        |group| group.id == group_id,
        |group| FilterGroup {
            logic: group.logic.toggled(),
            ..group.clone()
        },
    )
}

fn edit<P, E>(root: &Arc<FilterGroup>, is_target: P, apply: E) -> Arc<FilterGroup>
where
    P: Fn(&FilterGroup) -> bool,
    E: Fn(&FilterGroup) -> FilterGroup,
{
    rewrite(root, &is_target, &apply).unwrap_or_else(|| Arc::clone(root))
}

// Returns `None` when the target is not in this subtree, so callers keep
// their existing `Arc`.
fn rewrite<P, E>(node: &Arc<FilterGroup>, is_target: &P, apply: &E) -> Option<Arc<FilterGroup>>
where
    P: Fn(&FilterGroup) -> bool,
    E: Fn(&FilterGroup) -> FilterGroup,
{
    if is_target(&**node) {
        return Some(Arc::new(apply(&**node)));
    }

    node.groups.iter().enumerate().find_map(|(index, child)| {
        rewrite(child, is_target, apply).map(|replaced| {
            let mut groups = node.groups.clone();
            groups[index] = replaced;
            Arc::new(FilterGroup {
                id: node.id,
                logic: node.logic,
                conditions: node.conditions.clone(),
                groups,
            })
        })
    })
}
