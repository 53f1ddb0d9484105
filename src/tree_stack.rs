use tracing::instrument;

use crate::node::Node;

/*
Stack based traversal, no recursion.

Each stack entry is a (node, edges) pair: the node and the number of edges
between it and the root. The root starts at 0, a child is pushed with
edges + 1. The height is the largest edge count seen, so the call stack
never grows with the tree and degenerate chains of any length are fine.
 */

/// Height via depth-first traversal with an explicit stack; -1 for `None`.
#[instrument(level = "trace", skip(node))]
pub fn height_stack<T>(node: Option<&Node<T>>) -> i64 {
    let Some(root) = node else {
        return -1;
    };
    let mut max_edges = 0;
    let mut stack = vec![(root, 0_i64)];

    while let Some((node, edges)) = stack.pop() {
        if edges > max_edges {
            max_edges = edges;
        }
        for child in [node.left(), node.right()].into_iter().flatten() {
            stack.push((child, edges + 1));
        }
    }

    max_edges
}
