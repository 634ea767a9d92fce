//! Domain layer: the ordering engine and the records it orders
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod arena;
pub mod builder;
pub mod composite;
pub mod entities;
pub mod error;
pub mod linearize;
pub mod sequencer;

pub use arena::{Forest, GroupNode};
pub use builder::{build_forest, ForestBuilder};
pub use composite::{assemble, assemble_composite_tree, CompositeNode, CompositeTree, OrphanPolicy};
pub use entities::*;
pub use error::{DomainError, DomainResult};
pub use linearize::{flatten, linearize, linearize_forest, order_groups};
pub use sequencer::{sequence, sequence_by, sequence_order, SequenceEntry};
