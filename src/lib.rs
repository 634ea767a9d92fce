//! Hierarchical ordering for charts of accounts.
//!
//! Flat group records are linked into a forest by their parent key, every
//! sibling level is ordered by "display after" constraints, and leaf records
//! are attached to their groups and ordered the same way.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod tree_traits;
pub mod util;

pub use application::{ApplicationError, ApplicationResult};
pub use domain::{
    assemble, build_forest, flatten, linearize, order_groups, sequence, sequence_by, Account,
    AccountGroup, CompositeTree, DomainError, DomainResult, Forest, OrphanPolicy,
};
