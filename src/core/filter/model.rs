//! Filter tree data model

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// Generate an opaque identifier for a new tree node
pub fn new_id() -> Uuid {
    Uuid::new_v4()
}

/// Fields a condition can target
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FilterField {
    #[default]
    Name,
    Age,
    Status,
    /// Any field name this build does not know; never matches
    #[serde(other)]
    Unknown,
}

impl FilterField {
    /// Whether the field is compared numerically
    pub fn is_numeric(&self) -> bool {
        matches!(self, FilterField::Age)
    }
}

/// Comparison operators
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FilterOperator {
    Equals,
    #[default]
    Contains,
    GreaterThan,
    LessThan,
    /// Accepted by the schema; no date-typed field exists yet
    DateAfter,
    /// Accepted by the schema; no date-typed field exists yet
    DateBefore,
    #[serde(other)]
    Unknown,
}

/// How a group combines its children
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Logic {
    #[default]
    #[serde(rename = "AND", alias = "and")]
    And,
    #[serde(rename = "OR", alias = "or")]
    Or,
}

impl Logic {
    pub fn toggled(self) -> Self {
        match self {
            Logic::And => Logic::Or,
            Logic::Or => Logic::And,
        }
    }
}

/// A single field/operator/value rule, the leaf of the tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCondition {
    #[serde(default = "new_id")]
    pub id: Uuid,
    #[serde(default)]
    pub field: FilterField,
    #[serde(default)]
    pub operator: FilterOperator,
    #[serde(default)]
    pub value: String,
}

impl FilterCondition {
    pub fn new(field: FilterField, operator: FilterOperator, value: impl Into<String>) -> Self {
        Self {
            id: new_id(),
            field,
            operator,
            value: value.into(),
        }
    }
}

impl Default for FilterCondition {
    /// `name contains ""`, which matches every record
    fn default() -> Self {
        Self::new(FilterField::default(), FilterOperator::default(), "")
    }
}

/// A node combining conditions and subgroups under AND/OR.
///
/// Groups own their children; subgroups sit behind `Arc` so edits can reuse
/// untouched subtrees between tree versions. Equality is structural.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterGroup {
    #[serde(default = "new_id")]
    pub id: Uuid,
    #[serde(default)]
    pub logic: Logic,
    #[serde(default)]
    pub conditions: Vec<FilterCondition>,
    #[serde(default)]
    pub groups: Vec<Arc<FilterGroup>>,
}

impl FilterGroup {
    /// Create an empty group
    pub fn new(logic: Logic) -> Self {
        Self {
            id: new_id(),
            logic,
            conditions: Vec::new(),
            groups: Vec::new(),
        }
    }

    /// Create the empty AND root of a fresh editing session
    pub fn root() -> Arc<Self> {
        Arc::new(Self::new(Logic::And))
    }

    pub fn with_condition(mut self, condition: FilterCondition) -> Self {
        self.conditions.push(condition);
        self
    }

    pub fn with_group(mut self, group: FilterGroup) -> Self {
        self.groups.push(Arc::new(group));
        self
    }

    /// A group with no conditions and no subgroups
    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty() && self.groups.is_empty()
    }

    /// Total number of groups and conditions in this subtree
    pub fn node_count(&self) -> usize {
        1 + self.conditions.len() + self.groups.iter().map(|g| g.node_count()).sum::<usize>()
    }

    /// Find a group by id in this subtree
    pub fn find_group(&self, id: Uuid) -> Option<&FilterGroup> {
        if self.id == id {
            return Some(self);
        }
        self.groups.iter().find_map(|g| g.find_group(id))
    }

    /// Find a condition by id in this subtree
    pub fn find_condition(&self, id: Uuid) -> Option<&FilterCondition> {
        self.conditions
            .iter()
            .find(|c| c.id == id)
            .or_else(|| self.groups.iter().find_map(|g| g.find_condition(id)))
    }
}

impl Default for FilterGroup {
    fn default() -> Self {
        Self::new(Logic::And)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_condition() {
        let condition = FilterCondition::default();
        assert_eq!(condition.field, FilterField::Name);
        assert_eq!(condition.operator, FilterOperator::Contains);
        assert!(condition.value.is_empty());
    }

    #[test]
    fn test_wire_names() {
        let condition = FilterCondition::new(FilterField::Age, FilterOperator::GreaterThan, "25");
        let value = serde_json::to_value(&condition).unwrap();
        assert_eq!(value["field"], "age");
        assert_eq!(value["operator"], "greater-than");

        let group = FilterGroup::new(Logic::Or);
        assert_eq!(serde_json::to_value(&group).unwrap()["logic"], "OR");
    }

    #[test]
    fn test_unknown_names_deserialize() {
        let group: FilterGroup = serde_json::from_value(json!({
            "logic": "and",
            "conditions": [
                { "field": "salary", "operator": "between", "value": "1" }
            ]
        }))
        .unwrap();

        assert_eq!(group.logic, Logic::And);
        assert_eq!(group.conditions[0].field, FilterField::Unknown);
        assert_eq!(group.conditions[0].operator, FilterOperator::Unknown);
    }

    #[test]
    fn test_nested_lookup() {
        let leaf = FilterCondition::new(FilterField::Status, FilterOperator::Equals, "employed");
        let leaf_id = leaf.id;
        let child = FilterGroup::new(Logic::Or).with_condition(leaf);
        let child_id = child.id;
        let root = FilterGroup::new(Logic::And).with_group(child);

        assert_eq!(root.node_count(), 3);
        assert_eq!(root.find_group(child_id).map(|g| g.logic), Some(Logic::Or));
        assert!(root.find_condition(leaf_id).is_some());
        assert!(root.find_condition(new_id()).is_none());
    }
}
