//! Property tests for the filter evaluator and tree edits

use proptest::prelude::*;
use std::sync::Arc;
use uuid::Uuid;
use waitlist::prelude::{
    Applicant, FilterCondition, FilterField, FilterGroup, FilterOperator, Logic, PaginationMeta,
    filter_records, tree,
};

fn arb_field() -> impl Strategy<Value = FilterField> {
    prop_oneof![
        Just(FilterField::Name),
        Just(FilterField::Age),
        Just(FilterField::Status),
    ]
}

fn arb_operator() -> impl Strategy<Value = FilterOperator> {
    prop_oneof![
        Just(FilterOperator::Equals),
        Just(FilterOperator::Contains),
        Just(FilterOperator::GreaterThan),
        Just(FilterOperator::LessThan),
        Just(FilterOperator::DateAfter),
    ]
}

fn arb_condition() -> impl Strategy<Value = FilterCondition> {
    (arb_field(), arb_operator(), "[a-z0-9 ]{0,6}")
        .prop_map(|(field, operator, value)| FilterCondition::new(field, operator, value))
}

fn arb_logic() -> impl Strategy<Value = Logic> {
    prop_oneof![Just(Logic::And), Just(Logic::Or)]
}

fn arb_group() -> impl Strategy<Value = FilterGroup> {
    let leaf = (arb_logic(), prop::collection::vec(arb_condition(), 0..3)).prop_map(
        |(logic, conditions)| FilterGroup {
            conditions,
            ..FilterGroup::new(logic)
        },
    );
    leaf.prop_recursive(3, 16, 3, |inner| {
        (
            arb_logic(),
            prop::collection::vec(arb_condition(), 0..3),
            prop::collection::vec(inner, 0..3),
        )
            .prop_map(|(logic, conditions, groups)| FilterGroup {
                conditions,
                groups: groups.into_iter().map(Arc::new).collect(),
                ..FilterGroup::new(logic)
            })
    })
}

fn arb_applicant() -> impl Strategy<Value = Applicant> {
    (
        "[A-Za-z]{1,8}",
        prop::option::of(0u8..90),
        "[a-z]{0,10}",
    )
        .prop_map(|(name, age, status)| {
            let applicant = Applicant::new(name.clone(), format!("{}@example.com", name))
                .with_status(status);
            match age {
                Some(age) => applicant.with_age(f64::from(age)),
                None => applicant,
            }
        })
}

proptest! {
    #[test]
    fn empty_group_matches_every_record(
        records in prop::collection::vec(arb_applicant(), 0..10),
        logic in arb_logic(),
    ) {
        let group = FilterGroup::new(logic);
        prop_assert_eq!(filter_records(&records, &group).len(), records.len());
    }

    #[test]
    fn filtering_never_adds_or_reorders(
        records in prop::collection::vec(arb_applicant(), 0..10),
        group in arb_group(),
    ) {
        let matched = filter_records(&records, &group);
        prop_assert!(matched.len() <= records.len());

        let positions: Vec<usize> = matched
            .iter()
            .map(|m| records.iter().position(|r| r.id == m.id).unwrap())
            .collect();
        prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn toggling_twice_restores_the_tree(group in arb_group()) {
        let root = Arc::new(group);
        let twice = tree::toggle_logic(&tree::toggle_logic(&root, root.id), root.id);
        prop_assert_eq!(&*twice, &*root);
    }

    #[test]
    fn edits_to_missing_ids_return_the_same_root(group in arb_group()) {
        let root = Arc::new(group);
        let missing = Uuid::new_v4();

        prop_assert!(Arc::ptr_eq(&tree::add_condition(&root, missing), &root));
        prop_assert!(Arc::ptr_eq(&tree::remove_condition(&root, missing), &root));
        prop_assert!(Arc::ptr_eq(&tree::remove_group(&root, missing), &root));
        prop_assert!(Arc::ptr_eq(&tree::toggle_logic(&root, missing), &root));
    }

    #[test]
    fn pagination_stays_in_bounds(total in 0usize..500, page in 0usize..100, size in 0usize..50) {
        let meta = PaginationMeta::new(total, page, size);
        prop_assert!(meta.safe_page >= 1 && meta.safe_page <= meta.total_pages);
        prop_assert!(meta.range().end <= total);
        prop_assert!(meta.range().start <= meta.range().end);
    }
}
