//! Non-interactive rendering of a node tree with `termtree`.

use generational_arena::Index;
use termtree::Tree;
use tracing::instrument;

use crate::domain::NodeTree;

pub trait TreeNodeConvert {
    fn to_tree_string(&self, title: &str) -> Tree<String>;
}

impl TreeNodeConvert for NodeTree {
    /// Whole hierarchy under `title`, every node expanded, labels unstyled.
    #[instrument(level = "debug", skip(self))]
    fn to_tree_string(&self, title: &str) -> Tree<String> {
        fn build_tree(tree: &NodeTree, idx: Index) -> Tree<String> {
            let leaves: Vec<_> = tree
                .children(idx)
                .iter()
                .map(|&child| build_tree(tree, child))
                .collect();
            Tree::new(tree.display_name(idx)).with_leaves(leaves)
        }

        let leaves: Vec<_> = self
            .children(self.root())
            .iter()
            .map(|&child| build_tree(self, child))
            .collect();
        Tree::new(title.to_string()).with_leaves(leaves)
    }
}
