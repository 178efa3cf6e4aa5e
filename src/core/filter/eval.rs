//! Filter evaluation
//!
//! Evaluation never fails: values that cannot be compared make the condition
//! not match, and empty groups match everything at any depth.

use super::model::{FilterCondition, FilterField, FilterGroup, FilterOperator, Logic};
use crate::core::field::{FieldValue, parse_number};
use crate::core::record::Record;

/// Decide whether a single condition matches a record
pub fn matches_condition<R: Record + ?Sized>(record: &R, condition: &FilterCondition) -> bool {
    match condition.field {
        FilterField::Unknown => false,
        field if field.is_numeric() => {
            matches_number(&record.field_value(field), condition.operator, &condition.value)
        }
        field => matches_text(
            &record.field_value(field).to_text(),
            condition.operator,
            &condition.value,
        ),
    }
}

/// Decide whether a record belongs to the set described by a group.
///
/// Conditions and subgroups are combined under the group's logic. Both AND
/// and OR are vacuously true for an empty group.
pub fn matches_group<R: Record + ?Sized>(record: &R, group: &FilterGroup) -> bool {
    if group.is_empty() {
        return true;
    }

    let mut results = group
        .conditions
        .iter()
        .map(|condition| matches_condition(record, condition))
        .chain(group.groups.iter().map(|child| matches_group(record, child)));

    match group.logic {
        Logic::And => results.all(|matched| matched),
        Logic::Or => results.any(|matched| matched),
    }
}

/// Apply a filter tree to a collection, keeping input order
pub fn filter_records<'a, R: Record>(records: &'a [R], group: &FilterGroup) -> Vec<&'a R> {
    records
        .iter()
        .filter(|record| matches_group(*record, group))
        .collect()
}

fn matches_number(field: &FieldValue, operator: FilterOperator, value: &str) -> bool {
    let (Some(actual), Some(expected)) = (field.as_number(), parse_number(value)) else {
        return false;
    };

    match operator {
        FilterOperator::Equals => actual == expected,
        FilterOperator::GreaterThan => actual > expected,
        FilterOperator::LessThan => actual < expected,
        _ => false,
    }
}

// Ordering operators on text are unsupported and never match.
fn matches_text(field: &str, operator: FilterOperator, value: &str) -> bool {
    let needle = value.trim().to_lowercase();
    let haystack = field.trim().to_lowercase();

    match operator {
        FilterOperator::Equals => haystack == needle,
        FilterOperator::Contains => needle.is_empty() || haystack.contains(&needle),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::applicant::Applicant;

    fn abel() -> Applicant {
        Applicant::new("Abel", "abel@example.com")
            .with_age(24.0)
            .with_status("unemployed")
    }

    fn cond(field: FilterField, operator: FilterOperator, value: &str) -> FilterCondition {
        FilterCondition::new(field, operator, value)
    }

    fn hits(record: &Applicant, field: FilterField, operator: FilterOperator, value: &str) -> bool {
        matches_condition(record, &cond(field, operator, value))
    }

    #[test]
    fn test_empty_group_matches_at_any_depth() {
        let nested = FilterGroup::new(Logic::Or)
            .with_group(FilterGroup::new(Logic::And).with_group(FilterGroup::new(Logic::Or)));

        assert!(matches_group(&abel(), &FilterGroup::new(Logic::And)));
        assert!(matches_group(&abel(), &FilterGroup::new(Logic::Or)));
        assert!(matches_group(&abel(), &nested));
    }

    #[test]
    fn test_and_or() {
        let yes = cond(FilterField::Name, FilterOperator::Equals, "abel");
        let no = cond(FilterField::Name, FilterOperator::Equals, "sara");

        let and = FilterGroup::new(Logic::And)
            .with_condition(yes.clone())
            .with_condition(no.clone());
        let or = FilterGroup::new(Logic::Or)
            .with_condition(yes)
            .with_condition(no);

        assert!(!matches_group(&abel(), &and));
        assert!(matches_group(&abel(), &or));
    }

    #[test]
    fn test_numeric_fails_closed() {
        let record = Applicant::new("X", "").with_age("not-a-number");
        assert!(!matches_condition(
            &record,
            &cond(FilterField::Age, FilterOperator::Equals, "5")
        ));

        assert!(!matches_condition(
            &abel(),
            &cond(FilterField::Age, FilterOperator::Equals, "five")
        ));
        assert!(!matches_condition(
            &abel(),
            &cond(FilterField::Age, FilterOperator::GreaterThan, "")
        ));
    }

    #[test]
    fn test_numeric_comparisons() {
        let record = abel();
        assert!(hits(&record, FilterField::Age, FilterOperator::Equals, " 24 "));
        assert!(hits(&record, FilterField::Age, FilterOperator::GreaterThan, "18"));
        assert!(hits(&record, FilterField::Age, FilterOperator::LessThan, "24.5"));
        assert!(!hits(&record, FilterField::Age, FilterOperator::LessThan, "24"));
    }

    #[test]
    fn test_numeric_field_rejects_text_operators() {
        assert!(!hits(&abel(), FilterField::Age, FilterOperator::Contains, "2"));
        assert!(!hits(&abel(), FilterField::Age, FilterOperator::Contains, ""));
    }

    #[test]
    fn test_contains_empty_matches_everything() {
        let blank = Applicant::new("", "");
        for value in ["", "   "] {
            let condition = cond(FilterField::Name, FilterOperator::Contains, value);
            assert!(matches_condition(&abel(), &condition));
            assert!(matches_condition(&blank, &condition));
        }
    }

    #[test]
    fn test_text_is_trimmed_and_case_insensitive() {
        let record = abel();
        assert!(hits(&record, FilterField::Status, FilterOperator::Equals, " UNEMPLOYED "));
        assert!(hits(&record, FilterField::Status, FilterOperator::Contains, "Employ"));
        assert!(!hits(&record, FilterField::Status, FilterOperator::Equals, "employ"));
    }

    #[test]
    fn test_unsupported_operators_never_match() {
        let record = abel();
        for operator in [
            FilterOperator::GreaterThan,
            FilterOperator::LessThan,
            FilterOperator::DateAfter,
            FilterOperator::DateBefore,
            FilterOperator::Unknown,
        ] {
            assert!(!matches_condition(&record, &cond(FilterField::Name, operator, "a")));
        }
        assert!(!hits(&record, FilterField::Age, FilterOperator::DateAfter, "2020-01-01"));
        assert!(!hits(&record, FilterField::Unknown, FilterOperator::Contains, ""));
    }

    #[test]
    fn test_bad_rule_does_not_hide_or_branch() {
        let group = FilterGroup::new(Logic::Or)
            .with_condition(cond(FilterField::Unknown, FilterOperator::Equals, "x"))
            .with_condition(cond(FilterField::Name, FilterOperator::Contains, "ab"));
        assert!(matches_group(&abel(), &group));
    }

    #[test]
    fn test_filter_records_keeps_order() {
        let records = vec![
            Applicant::new("Abel", "").with_age(24.0),
            Applicant::new("Sara", "").with_age(31.0),
            Applicant::new("Tom", "").with_age(40.0),
        ];
        let group = FilterGroup::new(Logic::And)
            .with_condition(cond(FilterField::Age, FilterOperator::GreaterThan, "25"));

        let names: Vec<&str> = filter_records(&records, &group)
            .iter()
            .map(|a| a.name.as_str())
            .collect();
        assert_eq!(names, vec!["Sara", "Tom"]);
    }
}
