//! Binary tree height.
//!
//! The core is [`height`]: a recursive descent with a depth accumulator that
//! reports the number of edges on the longest root-to-leaf path, -1 for an
//! empty tree and 0 for a single node. Around it sit iterative traversals
//! ([`height_stack`], [`height_queue`]) for trees too deep to recurse
//! through, an arena-backed tree with cycle detection, a level-order parser
//! and the `bstheight` CLI.
//!
//! ```
//! use bstheight::{height, Node};
//!
//! let tree = Node::leaf("a")
//!     .with_left(Node::leaf("b").with_left(Node::leaf("d")))
//!     .with_right(Node::leaf("c"));
//! assert_eq!(height(Some(&tree)), 2);
//! assert_eq!(height::<&str>(None), -1);
//! ```

pub mod arena;
pub mod builder;
pub mod cli;
pub mod config;
pub mod errors;
pub mod exitcode;
pub mod height;
pub mod node;
pub mod parser;
pub mod tree_queue;
pub mod tree_stack;
pub mod tree_traits;
pub mod util;

pub use arena::{ArenaNode, ArenaTree, Side};
pub use builder::TreeBuilder;
pub use config::Settings;
pub use errors::{TreeError, TreeResult};
pub use height::{height, height_checked, height_from, measure, Strategy};
pub use node::Node;
pub use parser::parse_tree;
pub use tree_queue::height_queue;
pub use tree_stack::height_stack;
