use std::collections::VecDeque;

use tracing::instrument;

use crate::node::Node;

/// Height via breadth-first traversal; -1 for `None`.
///
/// Each pass of the outer loop drains exactly one level, so the number of
/// passes is the number of levels and the height is one less.
#[instrument(level = "trace", skip(node))]
pub fn height_queue<T>(node: Option<&Node<T>>) -> i64 {
    let mut levels = 0;
    let mut queue = VecDeque::new();
    queue.extend(node);

    while !queue.is_empty() {
        levels += 1;
        for _ in 0..queue.len() {
            if let Some(node) = queue.pop_front() {
                queue.extend(node.left());
                queue.extend(node.right());
            }
        }
    }

    levels - 1
}

/// Nodes grouped by level, root level first.
#[instrument(level = "trace", skip(node))]
pub fn levels<T>(node: Option<&Node<T>>) -> Vec<Vec<&T>> {
    let mut result = Vec::new();
    let mut queue = VecDeque::new();
    queue.extend(node);

    while !queue.is_empty() {
        let mut level = Vec::with_capacity(queue.len());
        for _ in 0..queue.len() {
            if let Some(node) = queue.pop_front() {
                level.push(&node.value);
                queue.extend(node.left());
                queue.extend(node.right());
            }
        }
        result.push(level);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_height_queue() {
        assert_eq!(height_queue::<i32>(None), -1);
        assert_eq!(height_queue(Some(&Node::leaf(1))), 0);
        assert_eq!(height_queue(Some(&Node::perfect(4, 0))), 4);
    }

    #[test]
    fn test_levels() {
        let tree = Node::leaf(1)
            .with_left(Node::leaf(2).with_right(Node::leaf(4)))
            .with_right(Node::leaf(3));
        assert_eq!(levels(Some(&tree)), vec![vec![&1], vec![&2, &3], vec![&4]]);
        assert!(levels::<i32>(None).is_empty());
    }
}
