use std::fmt::Display;

use termtree::Tree;
use tracing::instrument;

use crate::arena::ArenaTree;
use crate::errors::{TreeError, TreeResult};
use crate::node::Node;
use crate::tree_stack::height_stack;

const ABSENT: &str = "-";

/// Deepest tree, in levels, that [`render`] accepts.
pub const MAX_RENDER_DEPTH: usize = 1024;

pub trait TreeNodeConvert {
    fn to_tree_string(&self) -> Tree<String>;
}

impl<T: Display> TreeNodeConvert for Node<T> {
    /// Builds without recursion. The returned `Tree` displays iteratively but
    /// drops recursively; use [`render`] for input of unknown depth.
    #[instrument(level = "trace", skip(self))]
    fn to_tree_string(&self) -> Tree<String> {
        self.fold(|node, left, right| {
            let mut tree = Tree::new(node.value.to_string());
            if node.is_leaf() {
                return tree;
            }
            // Keep left/right positions visible when only one child exists
            for child in [left, right] {
                tree.push(child.unwrap_or_else(|| Tree::new(ABSENT.to_string())));
            }
            tree
        })
    }
}

/// Renders a tree, refusing trees with more than [`MAX_RENDER_DEPTH`] levels.
#[instrument(level = "debug", skip(node))]
pub fn render<T: Display>(node: &Node<T>) -> TreeResult<Tree<String>> {
    let levels = height_stack(Some(node)) + 1;
    if levels > MAX_RENDER_DEPTH as i64 {
        return Err(TreeError::DepthLimitExceeded {
            limit: MAX_RENDER_DEPTH,
        });
    }
    Ok(node.to_tree_string())
}

impl<T: Display + Clone> TreeNodeConvert for ArenaTree<T> {
    fn to_tree_string(&self) -> Tree<String> {
        match self.to_node() {
            Ok(Some(root)) => root.to_tree_string(),
            Ok(None) => Tree::new("Empty tree".to_string()),
            Err(e) => Tree::new(format!("Invalid tree: {}", e)),
        }
    }
}
