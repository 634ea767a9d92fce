//! Composite trees: ordered groups with their ordered leaf records attached.

use std::collections::HashMap;

use generational_arena::{Arena, Index};
use serde::ser::{SerializeStruct, Serializer};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::domain::arena::Forest;
use crate::domain::builder::ForestBuilder;
use crate::domain::entities::{Attached, Nested, Sequenced};
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::linearize::linearize;
use crate::domain::sequencer::sequence;

/// What to do with a leaf whose group key names no group.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OrphanPolicy {
    /// Drop the leaf and remember its key
    #[default]
    Lenient,
    /// Fail with `UnknownGroup`
    Strict,
}

impl std::str::FromStr for OrphanPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lenient" => Ok(Self::Lenient),
            "strict" => Ok(Self::Strict),
            other => Err(format!("unknown orphan policy: {other} (expected lenient or strict)")),
        }
    }
}

/// One node of a composite tree. The virtual root has no group.
#[derive(Debug)]
pub struct CompositeNode<G, L> {
    pub group: Option<G>,
    /// Attached leaves, sequenced among themselves
    pub leaves: Vec<L>,
    pub parent: Option<Index>,
    pub children: Vec<Index>,
}

impl<G, L> CompositeNode<G, L> {
    fn new(group: Option<G>, parent: Option<Index>) -> Self {
        Self {
            group,
            leaves: Vec::new(),
            parent,
            children: Vec::new(),
        }
    }

    pub fn is_virtual_root(&self) -> bool {
        self.group.is_none()
    }
}

/// Single-handle tree of groups and leaves.
#[derive(Debug)]
pub struct CompositeTree<G, L> {
    arena: Arena<CompositeNode<G, L>>,
    root: Index,
    by_key: HashMap<String, Index>,
    dropped: Vec<String>,
}

impl<G, L> CompositeTree<G, L> {
    fn with_root(capacity: usize) -> Self {
        let mut arena = Arena::with_capacity(capacity + 1);
        let root = arena.insert(CompositeNode::new(None, None));
        Self {
            arena,
            root,
            by_key: HashMap::with_capacity(capacity),
            dropped: Vec::new(),
        }
    }

    fn push_child(&mut self, group: G, parent: Index) -> Index {
        let idx = self.arena.insert(CompositeNode::new(Some(group), Some(parent)));
        if let Some(parent_node) = self.arena.get_mut(parent) {
            parent_node.children.push(idx);
        }
        idx
    }

    /// Index of the virtual root.
    pub fn root(&self) -> Index {
        self.root
    }

    pub fn root_node(&self) -> &CompositeNode<G, L> {
        &self.arena[self.root]
    }

    pub fn get_node(&self, idx: Index) -> Option<&CompositeNode<G, L>> {
        self.arena.get(idx)
    }

    /// Node for the group with this key.
    pub fn find(&self, key: &str) -> Option<&CompositeNode<G, L>> {
        self.by_key.get(key).and_then(|&idx| self.arena.get(idx))
    }

    /// Number of group nodes, not counting the virtual root.
    pub fn group_count(&self) -> usize {
        self.arena.len() - 1
    }

    pub fn leaf_count(&self) -> usize {
        self.arena.iter().map(|(_, node)| node.leaves.len()).sum()
    }

    /// Keys of leaves dropped because their group does not exist.
    pub fn dropped_leaves(&self) -> &[String] {
        &self.dropped
    }

    /// Pre-order traversal starting at the virtual root, with node depth
    /// (the virtual root is at depth 0).
    pub fn iter(&self) -> CompositeIterator<'_, G, L> {
        CompositeIterator {
            tree: self,
            stack: vec![(self.root, 0)],
        }
    }
}

pub struct CompositeIterator<'a, G, L> {
    tree: &'a CompositeTree<G, L>,
    stack: Vec<(Index, usize)>,
}

impl<'a, G, L> Iterator for CompositeIterator<'a, G, L> {
    type Item = (usize, &'a CompositeNode<G, L>);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((idx, depth)) = self.stack.pop() {
            if let Some(node) = self.tree.get_node(idx) {
                for &child in node.children.iter().rev() {
                    self.stack.push((child, depth + 1));
                }
                return Some((depth, node));
            }
        }
        None
    }
}

/// Assemble groups and leaves into one ordered composite tree.
///
/// Groups go through the forest builder and the linearizer; the composite tree
/// mirrors the ordered forest below a virtual root. Each leaf joins the node its
/// group key names, then every node's leaves are sequenced on their own.
#[instrument(level = "debug", skip_all, fields(groups = groups.len(), leaves = leaves.len()))]
pub fn assemble<G, L>(groups: Vec<G>, leaves: Vec<L>, policy: OrphanPolicy) -> DomainResult<CompositeTree<G, L>>
where
    G: Nested,
    L: Attached,
{
    let forest = linearize(ForestBuilder::build(groups)?)?;
    let mut tree = mirror(forest);

    for leaf in leaves {
        match tree.by_key.get(leaf.group_key()).copied() {
            Some(idx) => {
                if let Some(node) = tree.arena.get_mut(idx) {
                    node.leaves.push(leaf);
                }
            }
            None if policy == OrphanPolicy::Strict => {
                return Err(DomainError::UnknownGroup {
                    leaf: leaf.key().to_string(),
                    group: leaf.group_key().to_string(),
                });
            }
            None => {
                warn!(leaf = leaf.key(), group = leaf.group_key(), "dropping leaf with unknown group");
                tree.dropped.push(leaf.key().to_string());
            }
        }
    }

    // Arena order is pre-order, so the first failing level is the topmost one
    for (_, node) in tree.arena.iter_mut() {
        if !node.leaves.is_empty() {
            let attached = std::mem::take(&mut node.leaves);
            node.leaves = sequence(attached)?;
        }
    }

    debug!(
        groups = tree.group_count(),
        leaves = tree.leaf_count(),
        dropped = tree.dropped.len(),
        "composite tree assembled"
    );
    Ok(tree)
}

/// Assemble a composite tree from flat group and leaf records.
pub fn assemble_composite_tree<G, L>(
    groups: Vec<G>,
    leaves: Vec<L>,
    policy: OrphanPolicy,
) -> DomainResult<CompositeTree<G, L>>
where
    G: Nested,
    L: Attached,
{
    assemble(groups, leaves, policy)
}

/// Move an ordered forest below a fresh virtual root, keeping its shape.
fn mirror<G: Sequenced, L>(mut forest: Forest<G>) -> CompositeTree<G, L> {
    let mut tree = CompositeTree::with_root(forest.len());
    let mut pending: Vec<(Index, Index)> = forest
        .roots()
        .iter()
        .rev()
        .map(|&idx| (idx, tree.root))
        .collect();

    while let Some((forest_idx, parent)) = pending.pop() {
        let Some(node) = forest.take_node(forest_idx) else {
            continue;
        };
        let key = node.data.key().to_string();
        let idx = tree.push_child(node.data, parent);
        tree.by_key.insert(key, idx);
        pending.extend(node.children.iter().rev().map(|&child| (child, idx)));
    }
    tree
}

/// Borrowed view used to serialize one node and its subtree.
struct NodeView<'a, G, L> {
    tree: &'a CompositeTree<G, L>,
    node: &'a CompositeNode<G, L>,
}

impl<G: Serialize, L: Serialize> Serialize for NodeView<'_, G, L> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let children: Vec<NodeView<'_, G, L>> = self
            .node
            .children
            .iter()
            .filter_map(|&idx| self.tree.get_node(idx))
            .map(|node| NodeView { tree: self.tree, node })
            .collect();

        let mut state = serializer.serialize_struct("CompositeNode", 3)?;
        state.serialize_field("group", &self.node.group)?;
        state.serialize_field("leaves", &self.node.leaves)?;
        state.serialize_field("children", &children)?;
        state.end()
    }
}

/// Serializes as nested `{ group, leaves, children }` objects from the virtual root down.
impl<G: Serialize, L: Serialize> Serialize for CompositeTree<G, L> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        NodeView {
            tree: self,
            node: self.root_node(),
        }
        .serialize(serializer)
    }
}
