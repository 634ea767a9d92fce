//! Domain-level errors (no external dependencies)

use itertools::Itertools;
use thiserror::Error;

/// Domain errors are data-integrity violations in the supplied records.
/// All of them are terminal: the build that raised one returns nothing else.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("duplicate key: {0:?}")]
    DuplicateKey(String),

    #[error("unknown reference {referenced:?} (display after, from {referrer:?})")]
    UnknownReference { referenced: String, referrer: String },

    #[error("unknown parent {parent:?} for group {child:?}")]
    UnknownParent { parent: String, child: String },

    #[error("cycle detected among: {}", .keys.iter().join(", "))]
    CycleDetected { keys: Vec<String> },

    #[error("leaf {leaf:?} references unknown group {group:?}")]
    UnknownGroup { leaf: String, group: String },
}

impl DomainError {
    pub(crate) fn unknown_reference(referenced: &str, referrer: &str) -> Self {
        Self::UnknownReference {
            referenced: referenced.to_string(),
            referrer: referrer.to_string(),
        }
    }

    pub(crate) fn unknown_parent(parent: &str, child: &str) -> Self {
        Self::UnknownParent {
            parent: parent.to_string(),
            child: child.to_string(),
        }
    }
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_message_lists_keys() {
        let err = DomainError::CycleDetected {
            keys: vec!["a".into(), "b".into()],
        };
        assert_eq!(err.to_string(), "cycle detected among: a, b");
    }

    #[test]
    fn test_unknown_parent_message() {
        let err = DomainError::unknown_parent("Assets", "Cash Equivalents");
        assert_eq!(
            err.to_string(),
            "unknown parent \"Assets\" for group \"Cash Equivalents\""
        );
    }
}
