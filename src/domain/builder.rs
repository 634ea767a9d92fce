//! Forest builder: links flat group records into trees by their parent key.

use std::collections::{HashMap, HashSet};

use generational_arena::Index;
use tracing::{debug, instrument};

use crate::domain::arena::Forest;
use crate::domain::entities::Nested;
use crate::domain::error::{DomainError, DomainResult};

/// Constructs an unordered forest from group records.
///
/// Roots keep their input order and every child list keeps the input order of
/// its members. Sibling ordering is left to the linearizer.
pub struct ForestBuilder;

impl ForestBuilder {
    #[instrument(level = "debug", skip_all, fields(records = records.len()))]
    pub fn build<G: Nested>(records: Vec<G>) -> DomainResult<Forest<G>> {
        let mut forest = Forest::with_capacity(records.len());

        // Parents are resolved by position so the records can move into the arena
        let parent_positions = Self::resolve_parents(&records)?;
        let indices: Vec<Index> = records
            .into_iter()
            .map(|record| forest.insert_detached(record))
            .collect();

        for (pos, parent) in parent_positions.into_iter().enumerate() {
            forest.attach(indices[pos], parent.map(|p| indices[p]));
        }

        Self::check_reachable(&forest, &indices)?;
        debug!(roots = forest.roots().len(), nodes = forest.len(), "forest built");
        Ok(forest)
    }

    /// Map every record to the position of its parent record.
    fn resolve_parents<G: Nested>(records: &[G]) -> DomainResult<Vec<Option<usize>>> {
        let mut positions: HashMap<&str, usize> = HashMap::with_capacity(records.len());
        for (pos, record) in records.iter().enumerate() {
            if positions.insert(record.key(), pos).is_some() {
                return Err(DomainError::DuplicateKey(record.key().to_string()));
            }
        }

        records
            .iter()
            .map(|record| match record.parent_key() {
                None => Ok(None),
                Some(parent) => positions
                    .get(parent)
                    .copied()
                    .map(Some)
                    .ok_or_else(|| DomainError::unknown_parent(parent, record.key())),
            })
            .collect()
    }

    /// Every node must hang below some root; anything else sits on a parent loop.
    fn check_reachable<G: Nested>(forest: &Forest<G>, indices: &[Index]) -> DomainResult<()> {
        let reachable: HashSet<Index> = forest.iter().map(|(idx, _)| idx).collect();
        if reachable.len() == indices.len() {
            return Ok(());
        }

        let keys = indices
            .iter()
            .filter(|idx| !reachable.contains(*idx))
            .map(|&idx| forest[idx].data.key().to_string())
            .collect();
        Err(DomainError::CycleDetected { keys })
    }
}

/// Build an unordered forest from flat group records.
pub fn build_forest<G: Nested>(records: Vec<G>) -> DomainResult<Forest<G>> {
    ForestBuilder::build(records)
}
