use generational_arena::{Arena, Index};

/// Group record plus the arena links that place it in a forest.
#[derive(Debug)]
pub struct GroupNode<G> {
    /// Record carried unchanged through every build step
    pub data: G,
    /// Index of parent node in the arena, None for root nodes
    pub parent: Option<Index>,
    /// Indices of child nodes in the arena
    pub children: Vec<Index>,
}

/// Arena-based forest of group records.
///
/// Uses generational arena for memory-safe node references and O(1) lookups.
/// The forest exclusively owns its nodes; roots are kept in an explicit
/// ordered list.
#[derive(Debug)]
pub struct Forest<G> {
    /// Arena storage for all tree nodes
    arena: Arena<GroupNode<G>>,
    /// Root nodes in forest order
    roots: Vec<Index>,
}

impl<G> Default for Forest<G> {
    fn default() -> Self {
        Self::new()
    }
}

impl<G> Forest<G> {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            roots: Vec::new(),
        }
    }

    pub fn with_capacity(n: usize) -> Self {
        Self {
            arena: Arena::with_capacity(n),
            roots: Vec::with_capacity(n),
        }
    }

    /// Insert a node without linking it anywhere yet.
    pub(crate) fn insert_detached(&mut self, data: G) -> Index {
        self.arena.insert(GroupNode {
            data,
            parent: None,
            children: Vec::new(),
        })
    }

    /// Link `node` below `parent`, or append it to the roots when `parent` is None.
    pub(crate) fn attach(&mut self, node: Index, parent: Option<Index>) {
        if let Some(current) = self.arena.get_mut(node) {
            current.parent = parent;
        }
        match parent {
            Some(parent_idx) => {
                if let Some(parent) = self.arena.get_mut(parent_idx) {
                    parent.children.push(node);
                }
            }
            None => self.roots.push(node),
        }
    }

    pub fn get_node(&self, idx: Index) -> Option<&GroupNode<G>> {
        self.arena.get(idx)
    }

    pub(crate) fn set_roots(&mut self, roots: Vec<Index>) {
        self.roots = roots;
    }

    pub(crate) fn set_children(&mut self, idx: Index, children: Vec<Index>) {
        if let Some(node) = self.arena.get_mut(idx) {
            node.children = children;
        }
    }

    pub(crate) fn take_node(&mut self, idx: Index) -> Option<GroupNode<G>> {
        self.arena.remove(idx)
    }

    pub fn roots(&self) -> &[Index] {
        &self.roots
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Pre-order traversal over every root, children in list order.
    pub fn iter(&self) -> TreeIterator<'_, G> {
        TreeIterator::new(self)
    }

    /// Distance from the node to its root (roots are at 0).
    pub fn depth_of(&self, idx: Index) -> usize {
        let mut depth = 0;
        let mut current = self.get_node(idx).and_then(|n| n.parent);
        while let Some(parent) = current {
            depth += 1;
            current = self.get_node(parent).and_then(|n| n.parent);
        }
        depth
    }
}

impl<G> std::ops::Index<Index> for Forest<G> {
    type Output = GroupNode<G>;

    /// Panics if `idx` was not issued by this forest.
    fn index(&self, idx: Index) -> &Self::Output {
        &self.arena[idx]
    }
}

pub struct TreeIterator<'a, G> {
    forest: &'a Forest<G>,
    stack: Vec<Index>,
}

impl<'a, G> TreeIterator<'a, G> {
    fn new(forest: &'a Forest<G>) -> Self {
        // Roots in reverse so the first root is popped first
        let stack = forest.roots().iter().rev().copied().collect();
        Self { forest, stack }
    }
}

impl<'a, G> Iterator for TreeIterator<'a, G> {
    type Item = (Index, &'a GroupNode<G>);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current_idx) = self.stack.pop() {
            if let Some(node) = self.forest.get_node(current_idx) {
                // Push children in reverse order for left-to-right traversal
                for &child in node.children.iter().rev() {
                    self.stack.push(child);
                }
                return Some((current_idx, node));
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::AccountGroup;

    fn sample() -> (Forest<AccountGroup>, Index) {
        let mut forest = Forest::new();
        let mut add = |group: AccountGroup, parent: Option<Index>| {
            let idx = forest.insert_detached(group);
            forest.attach(idx, parent);
            idx
        };
        let assets = add(AccountGroup::root("Assets"), None);
        let current = add(AccountGroup::child("Current Assets", "Assets"), Some(assets));
        let cash = add(AccountGroup::child("Cash Equivalents", "Current Assets"), Some(current));
        add(AccountGroup::root("Liabilities"), None);
        (forest, cash)
    }

    fn names<'a>(items: impl Iterator<Item = (Index, &'a GroupNode<AccountGroup>)>) -> Vec<&'a str> {
        items.map(|(_, node)| node.data.name.as_str()).collect()
    }

    #[test]
    fn test_preorder_visits_roots_in_order() {
        let (forest, _) = sample();
        assert_eq!(
            names(forest.iter()),
            vec!["Assets", "Current Assets", "Cash Equivalents", "Liabilities"]
        );
    }

    #[test]
    fn test_attach_links_both_directions() {
        let (forest, cash) = sample();
        let parent = forest[cash].parent.unwrap();
        assert_eq!(forest[parent].data.name, "Current Assets");
        assert_eq!(forest[parent].children, vec![cash]);
        assert_eq!(forest.roots().len(), 2);
    }

    #[test]
    fn test_depth_of_counts_levels_above() {
        let (forest, cash) = sample();
        let depths: Vec<(&str, usize)> = forest
            .iter()
            .map(|(idx, node)| (node.data.name.as_str(), forest.depth_of(idx)))
            .collect();
        assert_eq!(
            depths,
            vec![("Assets", 0), ("Current Assets", 1), ("Cash Equivalents", 2), ("Liabilities", 0)]
        );
        assert_eq!(forest.depth_of(cash), 2);
    }

    #[test]
    fn test_empty_forest() {
        let forest: Forest<AccountGroup> = Forest::default();
        assert!(forest.is_empty());
        assert_eq!(forest.iter().count(), 0);
    }
}
