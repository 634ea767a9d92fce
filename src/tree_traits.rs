/*
Text rendering of forests and composite trees via termtree.
Leaves of a composite node are listed before its child groups.
 */
use generational_arena::Index;
use termtree::Tree;

use crate::domain::{CompositeTree, Forest, Sequenced};

/// Label used for the node that holds several roots.
pub const VIRTUAL_ROOT_LABEL: &str = "Chart of Accounts";

pub trait TreeNodeConvert {
    fn to_tree_string(&self) -> Tree<String>;
}

impl<G: Sequenced> TreeNodeConvert for Forest<G> {
    fn to_tree_string(&self) -> Tree<String> {
        fn build_tree<G: Sequenced>(forest: &Forest<G>, node_idx: Index) -> Tree<String> {
            let Some(node) = forest.get_node(node_idx) else {
                return Tree::new(String::new());
            };
            let mut tree = Tree::new(node.data.key().to_string());
            for &child_idx in &node.children {
                tree.push(build_tree(forest, child_idx));
            }
            tree
        }

        let leaves: Vec<_> = self
            .roots()
            .iter()
            .map(|&root| build_tree(self, root))
            .collect();
        Tree::new(VIRTUAL_ROOT_LABEL.to_string()).with_leaves(leaves)
    }
}

impl<G: Sequenced, L: Sequenced> TreeNodeConvert for CompositeTree<G, L> {
    fn to_tree_string(&self) -> Tree<String> {
        fn build_tree<G: Sequenced, L: Sequenced>(composite: &CompositeTree<G, L>, node_idx: Index) -> Tree<String> {
            let Some(node) = composite.get_node(node_idx) else {
                return Tree::new(String::new());
            };
            let label = node
                .group
                .as_ref()
                .map(|g| g.key().to_string())
                .unwrap_or_else(|| VIRTUAL_ROOT_LABEL.to_string());
            let mut tree = Tree::new(label);
            for leaf in &node.leaves {
                tree.push(Tree::new(format!("· {}", leaf.key())));
            }
            for &child_idx in &node.children {
                tree.push(build_tree(composite, child_idx));
            }
            tree
        }

        build_tree(self, self.root())
    }
}
