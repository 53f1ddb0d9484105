//! Owned binary tree nodes.
//!
//! Children are `Option<Box<Node<T>>>`, so an owned tree is acyclic and
//! finite by construction. Everything that walks the whole tree (`len`,
//! `leaves`, `mirror`, `fold`, `Clone`, `PartialEq`, `Debug`, `Drop`) uses an
//! explicit stack or queue instead of recursion. The recursive pieces are
//! `height` and `perfect`.

use std::collections::VecDeque;
use std::fmt;

use tracing::instrument;

use crate::height::height;

/// Child slot of a node, `None` marks an empty subtree.
pub type Link<T> = Option<Box<Node<T>>>;

pub struct Node<T> {
    pub value: T,
    pub left: Link<T>,
    pub right: Link<T>,
}

impl<T> Node<T> {
    pub fn new(value: T, left: Option<Node<T>>, right: Option<Node<T>>) -> Self {
        Self {
            value,
            left: left.map(Box::new),
            right: right.map(Box::new),
        }
    }

    pub fn leaf(value: T) -> Self {
        Self {
            value,
            left: None,
            right: None,
        }
    }

    pub fn with_left(mut self, child: Node<T>) -> Self {
        self.left = Some(Box::new(child));
        self
    }

    pub fn with_right(mut self, child: Node<T>) -> Self {
        self.right = Some(Box::new(child));
        self
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn left(&self) -> Option<&Node<T>> {
        self.left.as_deref()
    }

    pub fn right(&self) -> Option<&Node<T>> {
        self.right.as_deref()
    }

    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    /// Height of the subtree rooted here, in edges (a leaf is 0).
    pub fn height(&self) -> i64 {
        height(Some(self))
    }

    /// Number of nodes in the subtree rooted here.
    #[instrument(level = "trace", skip(self))]
    pub fn len(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend(node.left());
            stack.extend(node.right());
        }
        count
    }

    /// Always false: a `Node` is at least one vertex. Empty trees are `None`.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Leaf values in left-to-right order.
    #[instrument(level = "trace", skip(self))]
    pub fn leaves(&self) -> Vec<&T> {
        let mut leaves = Vec::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            if node.is_leaf() {
                leaves.push(&node.value);
            } else {
                // Push right first so the left subtree is visited first
                stack.extend(node.right());
                stack.extend(node.left());
            }
        }
        leaves
    }

    /// Swaps left and right children at every node.
    #[instrument(level = "trace", skip(self))]
    pub fn mirror(&mut self) {
        let mut stack: Vec<&mut Node<T>> = vec![self];
        while let Some(node) = stack.pop() {
            let Node { left, right, .. } = node;
            std::mem::swap(left, right);
            if let Some(l) = left.as_deref_mut() {
                stack.push(l);
            }
            if let Some(r) = right.as_deref_mut() {
                stack.push(r);
            }
        }
    }

    /// Bottom-up fold: `f` receives each node with the folded results of its
    /// left and right subtrees (`None` for an absent child).
    pub fn fold<R>(&self, mut f: impl FnMut(&Node<T>, Option<R>, Option<R>) -> R) -> R {
        // Breadth-first order puts every child after its parent
        let mut nodes: Vec<&Node<T>> = vec![self];
        let mut links: Vec<(Option<usize>, Option<usize>)> = Vec::new();
        let mut next = 0;
        while next < nodes.len() {
            let node = nodes[next];
            let left = node.left().map(|child| {
                nodes.push(child);
                nodes.len() - 1
            });
            let right = node.right().map(|child| {
                nodes.push(child);
                nodes.len() - 1
            });
            links.push((left, right));
            next += 1;
        }

        let mut results: Vec<Option<R>> = Vec::with_capacity(nodes.len());
        results.resize_with(nodes.len(), || None);
        for idx in (1..nodes.len()).rev() {
            let (l, r) = links[idx];
            let left = l.and_then(|c| results[c].take());
            let right = r.and_then(|c| results[c].take());
            results[idx] = Some(f(nodes[idx], left, right));
        }
        let (l, r) = links[0];
        let left = l.and_then(|c| results[c].take());
        let right = r.and_then(|c| results[c].take());
        f(self, left, right)
    }

    /// Degenerate chain where every node has only a left child.
    /// The first value is the root. Returns `None` for no values.
    pub fn chain_left<I>(values: I) -> Option<Node<T>>
    where
        I: IntoIterator<Item = T>,
    {
        let values: Vec<T> = values.into_iter().collect();
        let mut current: Option<Node<T>> = None;
        for value in values.into_iter().rev() {
            current = Some(Node {
                value,
                left: current.map(Box::new),
                right: None,
            });
        }
        current
    }

    /// Degenerate chain where every node has only a right child.
    pub fn chain_right<I>(values: I) -> Option<Node<T>>
    where
        I: IntoIterator<Item = T>,
    {
        let values: Vec<T> = values.into_iter().collect();
        let mut current: Option<Node<T>> = None;
        for value in values.into_iter().rev() {
            current = Some(Node {
                value,
                left: None,
                right: current.map(Box::new),
            });
        }
        current
    }
}

impl<T: Clone> Node<T> {
    /// Perfect tree with every leaf at edge-depth `depth` (2^(depth+1) - 1 nodes).
    pub fn perfect(depth: usize, value: T) -> Node<T> {
        if depth == 0 {
            return Node::leaf(value);
        }
        let left = Node::perfect(depth - 1, value.clone());
        let right = Node::perfect(depth - 1, value.clone());
        Node::new(value, Some(left), Some(right))
    }
}

impl<T> Drop for Node<T> {
    fn drop(&mut self) {
        // Unlink children iteratively so long chains don't recurse in drop glue
        let mut pending: Vec<Box<Node<T>>> = Vec::new();
        pending.extend(self.left.take());
        pending.extend(self.right.take());
        while let Some(mut node) = pending.pop() {
            pending.extend(node.left.take());
            pending.extend(node.right.take());
        }
    }
}

impl<T: Clone> Clone for Node<T> {
    fn clone(&self) -> Self {
        self.fold(|node, left, right| Node {
            value: node.value.clone(),
            left: left.map(Box::new),
            right: right.map(Box::new),
        })
    }
}

impl<T: PartialEq> PartialEq for Node<T> {
    fn eq(&self, other: &Self) -> bool {
        let mut stack = vec![(self, other)];
        while let Some((a, b)) = stack.pop() {
            if a.value != b.value {
                return false;
            }
            for pair in [(a.left(), b.left()), (a.right(), b.right())] {
                match pair {
                    (Some(x), Some(y)) => stack.push((x, y)),
                    (None, None) => {}
                    _ => return false,
                }
            }
        }
        true
    }
}

impl<T: Eq> Eq for Node<T> {}

/// Level-order notation: `Node[1, 2, -, 3]`, trailing absent children dropped.
impl<T: fmt::Debug> fmt::Debug for Node<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut slots: Vec<Option<&Node<T>>> = Vec::new();
        let mut queue = VecDeque::from([Some(self)]);
        while let Some(slot) = queue.pop_front() {
            if let Some(node) = slot {
                queue.push_back(node.left());
                queue.push_back(node.right());
            }
            slots.push(slot);
        }
        while matches!(slots.last(), Some(None)) {
            slots.pop();
        }

        write!(f, "Node[")?;
        for (i, slot) in slots.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            match slot {
                Some(node) => write!(f, "{:?}", node.value)?,
                None => write!(f, "-")?,
            }
        }
        write!(f, "]")
    }
}

impl<T: fmt::Display> fmt::Display for Node<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}
