//! Height of a binary tree, measured in edges.
//!
//! An absent tree has height -1, a single node has height 0, and every
//! additional level adds one. The recursive descent carries the depth as an
//! accumulator: an absent child returns the accumulator unchanged and a
//! present node returns the larger of its children's results, each reached
//! with `depth + 1`. That counts levels; the top-level call subtracts one to
//! turn levels into edges. Subtracting at every level instead would cancel
//! the increments and collapse every tree to its starting depth.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::config::Settings;
use crate::errors::{TreeError, TreeResult};
use crate::node::Node;
use crate::tree_queue::height_queue;
use crate::tree_stack::height_stack;

/// Height of the tree rooted at `node`; -1 when `node` is `None`.
pub fn height<T>(node: Option<&Node<T>>) -> i64 {
    height_from(node, 0)
}

/// Height with an explicit starting depth.
///
/// `height_from(node, d) == height(node) + d` for every input, including an
/// absent root. Results beyond the range of `i64` saturate at its bounds.
pub fn height_from<T>(node: Option<&Node<T>>, depth: i64) -> i64 {
    let edges = levels(node, i128::from(depth)) - 1;
    i64::try_from(edges).unwrap_or(if edges > 0 { i64::MAX } else { i64::MIN })
}

// i128 leaves headroom for any i64 start plus the levels of a real tree
fn levels<T>(node: Option<&Node<T>>, depth: i128) -> i128 {
    let Some(node) = node else {
        return depth;
    };
    let l = levels(node.left(), depth + 1);
    let r = levels(node.right(), depth + 1);
    l.max(r)
}

/// Recursive height that refuses to descend below `limit` levels.
///
/// Fails with [`TreeError::DepthLimitExceeded`] exactly when the tree has
/// more than `limit` levels (`height + 1 > limit`). An absent tree never fails.
#[instrument(level = "debug", skip(node))]
pub fn height_checked<T>(node: Option<&Node<T>>, limit: usize) -> TreeResult<i64> {
    Ok(levels_checked(node, 0, limit)? - 1)
}

fn levels_checked<T>(node: Option<&Node<T>>, depth: i64, limit: usize) -> TreeResult<i64> {
    let Some(node) = node else {
        return Ok(depth);
    };
    // node sits on level depth + 1
    if depth as usize >= limit {
        return Err(TreeError::DepthLimitExceeded { limit });
    }
    let l = levels_checked(node.left(), depth + 1, limit)?;
    let r = levels_checked(node.right(), depth + 1, limit)?;
    Ok(l.max(r))
}

/// Traversal used to compute a height. All strategies agree on every tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Recursive descent with a depth accumulator
    #[default]
    Recursive,
    /// Depth-first with an explicit stack
    Stack,
    /// Breadth-first, level by level
    Queue,
}

impl Strategy {
    pub fn height<T>(self, node: Option<&Node<T>>) -> i64 {
        match self {
            Strategy::Recursive => height(node),
            Strategy::Stack => height_stack(node),
            Strategy::Queue => height_queue(node),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Strategy::Recursive => "recursive",
            Strategy::Stack => "stack",
            Strategy::Queue => "queue",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for Strategy {
    type Err = TreeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "recursive" => Ok(Strategy::Recursive),
            "stack" => Ok(Strategy::Stack),
            "queue" => Ok(Strategy::Queue),
            other => Err(TreeError::InvalidStrategy(other.to_string())),
        }
    }
}

/// Deepest level count the recursive strategy descends to inside [`measure`].
pub const MAX_RECURSIVE_LEVELS: usize = 4096;

/// Height using the strategy and depth limit from `settings`.
///
/// With a limit of at most [`MAX_RECURSIVE_LEVELS`], the recursive strategy
/// stops descending as soon as the limit is crossed. Without a limit, or with
/// a larger one, it falls back to the explicit stack. The iterative
/// strategies measure first and compare.
#[instrument(level = "debug", skip(node))]
pub fn measure<T>(node: Option<&Node<T>>, settings: &Settings) -> TreeResult<i64> {
    let strategy = match (settings.strategy, settings.max_depth) {
        (Strategy::Recursive, Some(limit)) if limit <= MAX_RECURSIVE_LEVELS => {
            let result = height_checked(node, limit)?;
            debug!("height: {}", result);
            return Ok(result);
        }
        (Strategy::Recursive, _) => {
            debug!("limit above recursion bound, using stack");
            Strategy::Stack
        }
        (strategy, _) => strategy,
    };

    let result = strategy.height(node);
    if let Some(limit) = settings.max_depth {
        if result + 1 > i64::try_from(limit).unwrap_or(i64::MAX) {
            return Err(TreeError::DepthLimitExceeded { limit });
        }
    }
    debug!("height: {}", result);
    Ok(result)
}
