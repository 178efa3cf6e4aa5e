//! Recursive boolean filter over applicant records
//!
//! - [`model`]: the tree value (groups of conditions and subgroups)
//! - [`eval`]: pure membership tests against a [`Record`](crate::core::record::Record)
//! - [`tree`]: immutable, structurally shared edits
//! - [`builder`]: an editing session that reports each new root

pub mod builder;
pub mod eval;
pub mod model;
pub mod tree;

pub use builder::FilterBuilder;
pub use eval::{filter_records, matches_condition, matches_group};
pub use model::{FilterCondition, FilterField, FilterGroup, FilterOperator, Logic, new_id};
