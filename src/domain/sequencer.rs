//! Display-after sequencing (Kahn's algorithm).
//!
//! Every item names at most one predecessor. The sequencer emits items so that
//! each predecessor precedes its followers. Ready items wait in a FIFO queue:
//! items without a predecessor start in input order, and a follower joins the
//! back of the queue once its predecessor has been emitted.

use std::collections::{HashMap, VecDeque};

use tracing::trace;

use crate::domain::entities::Sequenced;
use crate::domain::error::{DomainError, DomainResult};

/// Key and optional predecessor of one item, borrowed from wherever the item lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SequenceEntry<'a> {
    pub key: &'a str,
    pub follows: Option<&'a str>,
}

impl<'a> SequenceEntry<'a> {
    pub fn new(key: &'a str, follows: Option<&'a str>) -> Self {
        Self { key, follows }
    }
}

/// Compute the output order for `entries` as positions into the input slice.
///
/// Fails with `DuplicateKey` when two entries share a key, `UnknownReference`
/// when a predecessor is missing and `CycleDetected` when no order exists.
pub fn sequence_order(entries: &[SequenceEntry<'_>]) -> DomainResult<Vec<usize>> {
    let mut positions: HashMap<&str, usize> = HashMap::with_capacity(entries.len());
    for (pos, entry) in entries.iter().enumerate() {
        if positions.insert(entry.key, pos).is_some() {
            return Err(DomainError::DuplicateKey(entry.key.to_string()));
        }
    }

    // followed -> followers
    let mut dependents: Vec<Vec<usize>> = vec![Vec::new(); entries.len()];
    let mut in_degree: Vec<usize> = vec![0; entries.len()];
    for (pos, entry) in entries.iter().enumerate() {
        if let Some(follows) = entry.follows {
            let predecessor = positions
                .get(follows)
                .copied()
                .ok_or_else(|| DomainError::unknown_reference(follows, entry.key))?;
            dependents[predecessor].push(pos);
            in_degree[pos] += 1;
        }
    }

    let mut ready: VecDeque<usize> = (0..entries.len())
        .filter(|&pos| in_degree[pos] == 0)
        .collect();
    let mut order = Vec::with_capacity(entries.len());

    while let Some(pos) = ready.pop_front() {
        order.push(pos);
        for &follower in &dependents[pos] {
            in_degree[follower] -= 1;
            if in_degree[follower] == 0 {
                ready.push_back(follower);
            }
        }
    }

    if order.len() < entries.len() {
        let keys = entries
            .iter()
            .zip(&in_degree)
            .filter(|(_, degree)| **degree > 0)
            .map(|(entry, _)| entry.key.to_string())
            .collect();
        return Err(DomainError::CycleDetected { keys });
    }

    trace!(items = entries.len(), "sequenced");
    Ok(order)
}

/// Reorder `items` using explicit accessors for the key and the predecessor.
pub fn sequence_by<T, K, F>(items: Vec<T>, key_of: K, follow_of: F) -> DomainResult<Vec<T>>
where
    K: Fn(&T) -> &str,
    F: Fn(&T) -> Option<&str>,
{
    let order = {
        let entries: Vec<SequenceEntry<'_>> = items
            .iter()
            .map(|item| SequenceEntry::new(key_of(item), follow_of(item)))
            .collect();
        sequence_order(&entries)?
    };
    Ok(permute(items, &order))
}

/// Reorder any [`Sequenced`] collection.
pub fn sequence<T: Sequenced>(items: Vec<T>) -> DomainResult<Vec<T>> {
    sequence_by(items, T::key, T::follows)
}

/// Move items into `order`, which must be a permutation of their positions.
fn permute<T>(items: Vec<T>, order: &[usize]) -> Vec<T> {
    let mut slots: Vec<Option<T>> = items.into_iter().map(Some).collect();
    order.iter().filter_map(|&pos| slots[pos].take()).collect()
}
