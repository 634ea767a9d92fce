//! Integration tests for forest building, linearization and flattening.

use chartsort::domain::{
    build_forest, flatten, linearize_forest, order_groups, AccountGroup, DomainError, Forest,
};
use chartsort::tree_traits::TreeNodeConvert;
use chartsort::util::testing;

fn names(groups: &[&AccountGroup]) -> Vec<String> {
    groups.iter().map(|g| g.name.clone()).collect()
}

fn root_names(forest: &Forest<AccountGroup>) -> Vec<&str> {
    forest
        .roots()
        .iter()
        .map(|&idx| forest[idx].data.name.as_str())
        .collect()
}

// ============================================================
// Forest builder
// ============================================================

#[test]
fn given_flat_groups_when_building_then_roots_keep_input_order() {
    // Arrange
    testing::init_test_setup();
    let groups = vec![
        AccountGroup::root("Liabilities").after("Assets"),
        AccountGroup::child("Current Assets", "Assets"),
        AccountGroup::root("Assets"),
    ];

    // Act
    let forest = build_forest(groups).unwrap();

    // Assert: nothing is ordered yet
    assert_eq!(root_names(&forest), vec!["Liabilities", "Assets"]);
    assert_eq!(forest.len(), 3);
    let nested: Vec<(&str, usize)> = forest
        .iter()
        .map(|(idx, node)| (node.data.name.as_str(), forest.depth_of(idx)))
        .filter(|(_, depth)| *depth > 0)
        .collect();
    assert_eq!(nested, vec![("Current Assets", 1)]);
}

#[test]
fn given_missing_parent_when_building_then_unknown_parent() {
    // Arrange
    let groups = vec![
        AccountGroup::root("Assets"),
        AccountGroup::child("Cash Equivalents", "Current Assets"),
    ];

    // Act
    let err = build_forest(groups).unwrap_err();

    // Assert
    assert_eq!(
        err,
        DomainError::UnknownParent {
            parent: "Current Assets".into(),
            child: "Cash Equivalents".into()
        }
    );
}

#[test]
fn given_duplicate_group_when_building_then_duplicate_key() {
    let err = build_forest(vec![AccountGroup::root("Assets"), AccountGroup::root("Assets")]).unwrap_err();
    assert_eq!(err, DomainError::DuplicateKey("Assets".into()));
}

#[test]
fn given_empty_parent_when_building_then_group_is_root() {
    // Arrange
    let mut group = AccountGroup::root("Equity");
    group.parent = Some(String::new());

    // Act
    let forest = build_forest(vec![group]).unwrap();

    // Assert
    assert_eq!(root_names(&forest), vec!["Equity"]);
}

// ============================================================
// Linearizer and flattener
// ============================================================

#[test]
fn given_balance_sheet_groups_when_ordering_then_flattens_preorder() {
    // Arrange
    let groups = vec![
        AccountGroup::root("Assets"),
        AccountGroup::root("Liabilities").after("Assets"),
        AccountGroup::child("Current Assets", "Assets"),
    ];

    // Act
    let forest = linearize_forest(build_forest(groups).unwrap()).unwrap();

    // Assert
    assert_eq!(
        names(&flatten(&forest)),
        vec!["Assets", "Current Assets", "Liabilities"]
    );
}

#[test]
fn given_roots_in_reverse_when_linearizing_then_constraint_wins_over_input_order() {
    // Arrange
    let forest = build_forest(vec![
        AccountGroup::root("Liabilities").after("Assets"),
        AccountGroup::root("Assets"),
    ])
    .unwrap();

    // Act
    let ordered = linearize_forest(forest).unwrap();

    // Assert
    assert_eq!(root_names(&ordered), vec!["Assets", "Liabilities"]);
}

#[test]
fn given_sample_chart_when_ordering_groups_then_every_level_is_ordered() {
    // Arrange
    testing::init_test_setup();

    // Act
    let ordered = order_groups(testing::sample_groups()).unwrap();

    // Assert
    let flat: Vec<&str> = ordered.iter().map(|g| g.name.as_str()).collect();
    assert_eq!(
        flat,
        vec!["Assets", "Current Assets", "Fixed Assets", "Liabilities", "Equity"]
    );
}

#[test]
fn given_cycle_in_child_level_when_linearizing_then_whole_build_fails() {
    // Arrange: roots are fine, the children of Assets are not
    let forest = build_forest(vec![
        AccountGroup::root("Assets"),
        AccountGroup::child("Current Assets", "Assets").after("Fixed Assets"),
        AccountGroup::child("Fixed Assets", "Assets").after("Current Assets"),
    ])
    .unwrap();

    // Act
    let result = linearize_forest(forest);

    // Assert
    assert!(matches!(result, Err(DomainError::CycleDetected { .. })));
}

#[test]
fn given_display_after_naming_other_parent_child_when_ordering_then_unknown_reference() {
    // Arrange: display_after is scoped to siblings
    let groups = vec![
        AccountGroup::root("Assets"),
        AccountGroup::root("Liabilities"),
        AccountGroup::child("Current Assets", "Assets"),
        AccountGroup::child("Current Liabilities", "Liabilities").after("Current Assets"),
    ];

    // Act
    let err = order_groups(groups).unwrap_err();

    // Assert
    assert_eq!(
        err,
        DomainError::UnknownReference {
            referenced: "Current Assets".into(),
            referrer: "Current Liabilities".into()
        }
    );
}

#[test]
fn given_ordered_forest_when_flattening_then_length_matches_node_count() {
    let forest = linearize_forest(build_forest(testing::sample_groups()).unwrap()).unwrap();
    assert_eq!(flatten(&forest).len(), forest.len());
}

#[test]
fn given_ordered_forest_when_rendering_then_tree_lists_groups_in_order() {
    // Arrange
    let forest = linearize_forest(build_forest(testing::sample_groups()).unwrap()).unwrap();

    // Act
    let rendered = forest.to_tree_string().to_string();

    // Assert
    let positions: Vec<usize> = ["Assets", "Current Assets", "Fixed Assets", "Liabilities", "Equity"]
        .iter()
        .map(|name| rendered.find(name).unwrap())
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]), "{rendered}");
}
