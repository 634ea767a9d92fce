//! Hierarchical linearization: sequence every sibling level of a forest.

use generational_arena::Index;
use tracing::{debug, instrument, trace};

use crate::domain::arena::Forest;
use crate::domain::builder::ForestBuilder;
use crate::domain::entities::{Nested, Sequenced};
use crate::domain::error::DomainResult;
use crate::domain::sequencer::{sequence_order, SequenceEntry};

/// Order the roots and, level by level, every child list of `forest`.
///
/// The forest is consumed so a failure never leaves a half-ordered forest
/// behind. Levels are processed top-down in pre-order; the first sequencing
/// error aborts the whole pass.
#[instrument(level = "debug", skip_all, fields(nodes = forest.len()))]
pub fn linearize<G: Sequenced>(mut forest: Forest<G>) -> DomainResult<Forest<G>> {
    let roots = order_siblings(&forest, forest.roots())?;
    forest.set_roots(roots);

    let mut pending: Vec<Index> = forest.roots().iter().rev().copied().collect();
    while let Some(idx) = pending.pop() {
        let children = &forest[idx].children;
        if children.is_empty() {
            continue;
        }
        let ordered = order_siblings(&forest, children)?;
        trace!(parent = forest[idx].data.key(), children = ordered.len(), "level ordered");
        pending.extend(ordered.iter().rev().copied());
        forest.set_children(idx, ordered);
    }

    debug!("forest linearized");
    Ok(forest)
}

fn order_siblings<G: Sequenced>(forest: &Forest<G>, siblings: &[Index]) -> DomainResult<Vec<Index>> {
    let entries: Vec<SequenceEntry<'_>> = siblings
        .iter()
        .map(|&idx| {
            let data = &forest[idx].data;
            SequenceEntry::new(data.key(), data.follows())
        })
        .collect();
    let order = sequence_order(&entries)?;
    Ok(order.into_iter().map(|pos| siblings[pos]).collect())
}

/// Linearize an already built forest.
pub fn linearize_forest<G: Sequenced>(forest: Forest<G>) -> DomainResult<Forest<G>> {
    linearize(forest)
}

/// Pre-order flattening of a forest, borrowing the records.
pub fn flatten<G>(forest: &Forest<G>) -> Vec<&G> {
    forest.iter().map(|(_, node)| &node.data).collect()
}

impl<G> Forest<G> {
    /// Pre-order flattening that hands the records back to the caller.
    pub fn into_flattened(mut self) -> Vec<G> {
        let order: Vec<Index> = self.iter().map(|(idx, _)| idx).collect();
        order
            .into_iter()
            .filter_map(|idx| self.take_node(idx).map(|node| node.data))
            .collect()
    }
}

/// Build, linearize and flatten group records in one call.
pub fn order_groups<G: Nested>(records: Vec<G>) -> DomainResult<Vec<G>> {
    let forest = linearize(ForestBuilder::build(records)?)?;
    Ok(forest.into_flattened())
}
