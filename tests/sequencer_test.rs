//! Integration tests for display-after sequencing.

use rstest::rstest;

use chartsort::domain::{sequence, sequence_by, Account, DomainError};

/// Minimal record with its own field names, ordered through accessors.
#[derive(Debug, Clone, PartialEq)]
struct Line {
    id: &'static str,
    after: Option<&'static str>,
}

fn line(id: &'static str, after: &'static str) -> Line {
    Line {
        id,
        after: Some(after).filter(|a| !a.is_empty()),
    }
}

fn ids(lines: &[Line]) -> Vec<&str> {
    lines.iter().map(|l| l.id).collect()
}

fn sequence_lines(lines: Vec<Line>) -> Result<Vec<Line>, DomainError> {
    sequence_by(lines, |l: &Line| l.id, |l: &Line| l.after)
}

#[test]
fn given_chain_with_empty_after_when_sequencing_then_keeps_chain_order() {
    // Arrange
    let input = vec![line("A", ""), line("B", "A"), line("C", "B")];

    // Act
    let ordered = sequence_lines(input).unwrap();

    // Assert
    assert_eq!(ids(&ordered), vec!["A", "B", "C"]);
}

#[test]
fn given_accounts_with_empty_display_after_when_sequencing_then_treated_as_absent() {
    // Arrange
    let mut first = Account::new("Cash", "Current Assets");
    first.display_after = Some(String::new());
    let input = vec![Account::new("Inventory", "Current Assets").after("Cash"), first];

    // Act
    let ordered = sequence(input).unwrap();

    // Assert
    let names: Vec<&str> = ordered.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, vec!["Cash", "Inventory"]);
}

#[rstest]
#[case::already_ordered(vec![line("A", ""), line("B", "A"), line("C", "B")], vec!["A", "B", "C"])]
#[case::reversed(vec![line("C", "B"), line("B", "A"), line("A", "")], vec!["A", "B", "C"])]
#[case::independent(vec![line("X", ""), line("Y", ""), line("Z", "")], vec!["X", "Y", "Z"])]
#[case::fan_out(vec![line("B", "A"), line("C", "A"), line("A", "")], vec!["A", "B", "C"])]
#[case::free_item_before_follower(
    vec![line("A", ""), line("B", "A"), line("C", "")],
    vec!["A", "C", "B"]
)]
#[case::ready_keeps_input_order(
    vec![line("Liabilities", "Assets"), line("Assets", ""), line("Equity", "")],
    vec!["Assets", "Equity", "Liabilities"]
)]
fn given_valid_constraints_when_sequencing_then_orders(#[case] input: Vec<Line>, #[case] expected: Vec<&str>) {
    let ordered = sequence_lines(input).unwrap();
    assert_eq!(ids(&ordered), expected);
}

#[test]
fn given_follower_listed_before_free_items_when_sequencing_then_follower_goes_last() {
    // Arrange: X waits on A, Y is free from the start
    let input = vec![line("X", "A"), line("A", ""), line("Y", "")];

    // Act
    let ordered = sequence_lines(input).unwrap();

    // Assert
    assert_eq!(ids(&ordered), vec!["A", "Y", "X"]);
}

#[test]
fn given_mutual_follow_when_sequencing_then_cycle_detected() {
    // Arrange
    let input = vec![line("A", "B"), line("B", "A")];

    // Act
    let err = sequence_lines(input).unwrap_err();

    // Assert
    assert_eq!(
        err,
        DomainError::CycleDetected {
            keys: vec!["A".into(), "B".into()]
        }
    );
}

#[test]
fn given_self_follow_when_sequencing_then_cycle_detected() {
    let err = sequence_lines(vec![line("A", ""), line("B", "B")]).unwrap_err();
    assert_eq!(err, DomainError::CycleDetected { keys: vec!["B".into()] });
}

#[test]
fn given_duplicate_key_when_sequencing_then_duplicate_key() {
    // Arrange: duplicates fail regardless of their other fields
    let input = vec![line("A", ""), line("B", "A"), line("A", "B")];

    // Act
    let err = sequence_lines(input).unwrap_err();

    // Assert
    assert_eq!(err, DomainError::DuplicateKey("A".into()));
}

#[test]
fn given_missing_predecessor_when_sequencing_then_unknown_reference() {
    let err = sequence_lines(vec![line("A", ""), line("B", "Z")]).unwrap_err();
    assert_eq!(
        err,
        DomainError::UnknownReference {
            referenced: "Z".into(),
            referrer: "B".into()
        }
    );
}

#[test]
fn given_empty_input_when_sequencing_then_empty_output() {
    assert!(sequence_lines(Vec::new()).unwrap().is_empty());
}
