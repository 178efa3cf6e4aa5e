//! Record traits defining what the query engine reads from a row

use crate::core::field::FieldValue;
use crate::core::filter::FilterField;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Base trait for anything the filter evaluator can run against.
///
/// The evaluator only needs a stable identifier and dynamic access to the
/// filterable fields. Fields a record does not carry return
/// [`FieldValue::Null`].
pub trait Record {
    /// Get the unique identifier for this record
    fn id(&self) -> Uuid;

    /// Get the value of a filterable field
    fn field_value(&self, field: FilterField) -> FieldValue;
}

/// Trait for records shown in the master-detail list.
///
/// Extends [`Record`] with the fields the list/selection state machine
/// searches, filters and sorts on.
pub trait Listed: Record {
    /// Display name, matched by free-text search
    fn display_name(&self) -> &str;

    /// Secondary identifying text (e.g. email), matched by free-text search
    fn secondary_key(&self) -> &str;

    /// Batch label for the batch equality filter
    fn batch(&self) -> &str;

    /// Raw stage text for the stage equality filter
    fn stage(&self) -> &str;

    /// Creation timestamp, used for sorting
    fn created_at(&self) -> DateTime<Utc>;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Row {
        id: Uuid,
        label: String,
    }

    impl Record for Row {
        fn id(&self) -> Uuid {
            self.id
        }

        fn field_value(&self, field: FilterField) -> FieldValue {
            match field {
                FilterField::Name => FieldValue::String(self.label.clone()),
                _ => FieldValue::Null,
            }
        }
    }

    #[test]
    fn test_missing_fields_are_null() {
        let row = Row {
            id: Uuid::new_v4(),
            label: "widget".to_string(),
        };
        assert_eq!(row.field_value(FilterField::Name).to_text(), "widget");
        assert!(row.field_value(FilterField::Age).is_null());
        assert_ne!(row.id(), Uuid::nil());
    }
}
