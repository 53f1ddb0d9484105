use std::collections::{HashMap, HashSet};
use std::fmt;

use generational_arena::{Arena, Index};
use tracing::{debug, instrument};

use crate::errors::{TreeError, TreeResult};
use crate::node::Node;

/// Which child slot of a parent a node occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Left => write!(f, "left"),
            Side::Right => write!(f, "right"),
        }
    }
}

/// Tree node stored in the arena.
#[derive(Debug)]
pub struct ArenaNode<T> {
    pub value: T,
    /// Index of parent node, None for the root. Only maintained by `insert_*`.
    pub parent: Option<Index>,
    pub left: Option<Index>,
    pub right: Option<Index>,
}

impl<T> ArenaNode<T> {
    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    fn child(&self, side: Side) -> Option<Index> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    fn child_mut(&mut self, side: Side) -> &mut Option<Index> {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }
}

/// Arena-based binary tree.
///
/// Children are referenced by generational index, so links can be rewired
/// freely with [`ArenaTree::set_child`]. That also means an arena tree can
/// contain a cycle or a shared child; every traversal tracks visited
/// indices and fails with [`TreeError::CycleDetected`] instead of looping.
#[derive(Debug)]
pub struct ArenaTree<T> {
    arena: Arena<ArenaNode<T>>,
    root: Option<Index>,
}

impl<T> Default for ArenaTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ArenaTree<T> {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            root: None,
        }
    }

    /// Inserts a new root. An existing root becomes unreachable but stays in the arena.
    #[instrument(level = "trace", skip(self, value))]
    pub fn insert_root(&mut self, value: T) -> Index {
        let idx = self.arena.insert(ArenaNode {
            value,
            parent: None,
            left: None,
            right: None,
        });
        self.root = Some(idx);
        idx
    }

    pub fn insert_left(&mut self, parent: Index, value: T) -> TreeResult<Index> {
        self.insert_child(parent, Side::Left, value)
    }

    pub fn insert_right(&mut self, parent: Index, value: T) -> TreeResult<Index> {
        self.insert_child(parent, Side::Right, value)
    }

    #[instrument(level = "trace", skip(self, value))]
    pub fn insert_child(&mut self, parent: Index, side: Side, value: T) -> TreeResult<Index> {
        let parent_node = self.arena.get(parent).ok_or(TreeError::NodeNotFound)?;
        if parent_node.child(side).is_some() {
            return Err(TreeError::SlotOccupied { side });
        }
        let idx = self.arena.insert(ArenaNode {
            value,
            parent: Some(parent),
            left: None,
            right: None,
        });
        if let Some(parent_node) = self.arena.get_mut(parent) {
            *parent_node.child_mut(side) = Some(idx);
        }
        Ok(idx)
    }

    /// Rewires a child slot without any structural checks.
    ///
    /// Does not update `parent` of the linked node.
    #[instrument(level = "trace", skip(self))]
    pub fn set_child(&mut self, parent: Index, side: Side, child: Option<Index>) -> TreeResult<()> {
        let parent_node = self.arena.get_mut(parent).ok_or(TreeError::NodeNotFound)?;
        *parent_node.child_mut(side) = child;
        Ok(())
    }

    pub fn get(&self, idx: Index) -> Option<&ArenaNode<T>> {
        self.arena.get(idx)
    }

    pub fn get_mut(&mut self, idx: Index) -> Option<&mut ArenaNode<T>> {
        self.arena.get_mut(idx)
    }

    pub fn root(&self) -> Option<Index> {
        self.root
    }

    /// Number of nodes stored, reachable or not.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Pre-order walk from the root, left before right.
    ///
    /// Fails on the first index reached twice or on a dangling child index.
    #[instrument(level = "trace", skip(self))]
    fn preorder(&self) -> TreeResult<Vec<(Index, usize)>> {
        let mut order = Vec::new();
        let mut visited = HashSet::new();
        let mut stack: Vec<(Index, usize)> = self.root.into_iter().map(|r| (r, 0)).collect();

        while let Some((idx, edges)) = stack.pop() {
            if !visited.insert(idx) {
                let (slot, _) = idx.into_raw_parts();
                debug!("revisited arena slot {}", slot);
                return Err(TreeError::CycleDetected(slot));
            }
            let node = self.arena.get(idx).ok_or(TreeError::NodeNotFound)?;
            stack.extend(node.right.map(|r| (r, edges + 1)));
            stack.extend(node.left.map(|l| (l, edges + 1)));
            order.push((idx, edges));
        }

        Ok(order)
    }

    /// Height in edges of the tree reachable from the root; -1 when empty.
    #[instrument(level = "debug", skip(self))]
    pub fn height(&self) -> TreeResult<i64> {
        let order = self.preorder()?;
        Ok(order
            .iter()
            .map(|&(_, edges)| edges as i64)
            .max()
            .unwrap_or(-1))
    }

    /// Edges between `idx` and the root, following parent links.
    #[instrument(level = "trace", skip(self))]
    pub fn depth_of(&self, idx: Index) -> TreeResult<usize> {
        let mut node = self.arena.get(idx).ok_or(TreeError::NodeNotFound)?;
        let mut depth = 0;
        while let Some(parent) = node.parent {
            node = self.arena.get(parent).ok_or(TreeError::NodeNotFound)?;
            depth += 1;
        }
        Ok(depth)
    }

    /// Leaf values reachable from the root, left to right.
    #[instrument(level = "debug", skip(self))]
    pub fn leaf_values(&self) -> TreeResult<Vec<&T>> {
        let order = self.preorder()?;
        Ok(order
            .into_iter()
            .filter_map(|(idx, _)| self.arena.get(idx))
            .filter(|node| node.is_leaf())
            .map(|node| &node.value)
            .collect())
    }
}

impl<T: Clone> ArenaTree<T> {
    /// Copies an owned tree into a fresh arena.
    #[instrument(level = "debug", skip(root))]
    pub fn from_node(root: &Node<T>) -> Self {
        let mut tree = ArenaTree::new();
        let root_idx = tree.insert_root(root.value.clone());
        let mut stack = vec![(root, root_idx)];

        while let Some((node, idx)) = stack.pop() {
            for (side, child) in [(Side::Left, node.left()), (Side::Right, node.right())] {
                if let Some(child) = child {
                    // Slots of a freshly inserted node are always free
                    if let Ok(child_idx) = tree.insert_child(idx, side, child.value.clone()) {
                        stack.push((child, child_idx));
                    }
                }
            }
        }

        tree
    }

    /// Copies the reachable tree into an owned [`Node`]; `None` when empty.
    ///
    /// Fails when the links contain a cycle or a shared child.
    #[instrument(level = "debug", skip(self))]
    pub fn to_node(&self) -> TreeResult<Option<Node<T>>> {
        let Some(root) = self.root else {
            return Ok(None);
        };
        let order = self.preorder()?;
        let mut built: HashMap<Index, Node<T>> = HashMap::with_capacity(order.len());

        // Reverse pre-order visits every child before its parent
        for &(idx, _) in order.iter().rev() {
            let node = self.arena.get(idx).ok_or(TreeError::NodeNotFound)?;
            let left = node.left.and_then(|l| built.remove(&l));
            let right = node.right.and_then(|r| built.remove(&r));
            built.insert(idx, Node::new(node.value.clone(), left, right));
        }

        Ok(built.remove(&root))
    }
}
