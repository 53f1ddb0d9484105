//! Level-order tree notation.
//!
//! A tree is written as its nodes in breadth-first order, with an absent
//! marker (`-`, `null`, `nil` or `none`) standing in for a missing child:
//!
//! ```text
//! [a, b, c, d]          a(b(d), c)
//! 1 - 2 - 3             right-leaning chain 1 -> 2 -> 3
//! ```
//!
//! Tokens may be separated by whitespace or commas, the whole list may be
//! wrapped in brackets, and lines starting with `//` are comments.

use nom::bytes::complete::take_while1;
use nom::character::complete::{char, multispace0};
use nom::combinator::{all_consuming, opt};
use nom::multi::separated_list0;
use nom::sequence::{delimited, preceded, tuple};
use nom::{Finish, IResult};
use tracing::{debug, instrument};

use crate::arena::ArenaTree;
use crate::errors::{TreeError, TreeResult};
use crate::node::Node;

const ABSENT_MARKERS: [&str; 4] = ["-", "null", "nil", "none"];

fn is_separator(c: char) -> bool {
    c.is_whitespace() || c == ','
}

fn separator(input: &str) -> IResult<&str, &str> {
    take_while1(is_separator)(input)
}

fn token(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| !is_separator(c) && c != '[' && c != ']')(input)
}

// Optional brackets around a separated token list
fn token_list(input: &str) -> IResult<&str, Vec<&str>> {
    delimited(
        tuple((multispace0, opt(char('[')))),
        preceded(opt(separator), separated_list0(separator, token)),
        tuple((opt(separator), opt(char(']')), multispace0)),
    )(input)
}

// Comment lines become spaces of the same byte length so error offsets
// still point into the caller's input
fn blank_comments(input: &str) -> String {
    input
        .split_inclusive('\n')
        .map(|line| {
            if !line.trim_start().starts_with("//") {
                return line.to_string();
            }
            let body = line.trim_end_matches(['\r', '\n']);
            format!("{}{}", " ".repeat(body.len()), &line[body.len()..])
        })
        .collect()
}

/// Splits level-order input into tokens, `None` for absent markers.
///
/// `extra_marker` adds one more absent marker (matched exactly). A
/// [`TreeError::Syntax`] offset is a byte offset into `input`.
#[instrument(level = "trace")]
pub fn tokenize(input: &str, extra_marker: Option<&str>) -> TreeResult<Vec<Option<String>>> {
    let content = blank_comments(input);
    let (_, tokens) = all_consuming(token_list)(content.as_str())
        .finish()
        .map_err(|e| TreeError::Syntax {
            offset: content.len() - e.input.len(),
        })?;

    Ok(tokens
        .into_iter()
        .map(|t| {
            let absent = ABSENT_MARKERS.iter().any(|m| t.eq_ignore_ascii_case(m))
                || extra_marker == Some(t);
            if absent {
                None
            } else {
                Some(t.to_string())
            }
        })
        .collect())
}

/// Builds a tree from level-order tokens.
///
/// Tokens are consumed in pairs per parent (left, then right) in the order
/// the parents were created. Trailing absent markers are allowed; a value
/// with no free parent slot is an error.
#[instrument(level = "debug", skip(tokens))]
pub fn from_level_order(tokens: &[Option<String>]) -> TreeResult<Option<Node<String>>> {
    let mut iter = tokens.iter().enumerate();
    let root_value = match iter.next() {
        None => return Ok(None),
        Some((_, None)) => {
            if let Some((pos, _)) = iter.find(|(_, t)| t.is_some()) {
                return Err(TreeError::Parse {
                    position: pos + 1,
                    reason: "value after an absent root".to_string(),
                });
            }
            return Ok(None);
        }
        Some((_, Some(value))) => value.clone(),
    };

    let mut tree = ArenaTree::new();
    let mut parents = std::collections::VecDeque::new();
    parents.push_back(tree.insert_root(root_value));

    while let Some(parent) = parents.pop_front() {
        for (idx, token) in [iter.next(), iter.next()].into_iter().flatten().enumerate() {
            let (_, value) = token;
            if let Some(value) = value {
                let child = if idx == 0 {
                    tree.insert_left(parent, value.clone())?
                } else {
                    tree.insert_right(parent, value.clone())?
                };
                parents.push_back(child);
            }
        }
    }

    if let Some((pos, _)) = iter.find(|(_, t)| t.is_some()) {
        return Err(TreeError::Parse {
            position: pos + 1,
            reason: "no free parent slot for value".to_string(),
        });
    }

    debug!("parsed {} nodes", tree.len());
    tree.to_node()
}

/// Parses level-order notation into a tree; `None` for an empty tree.
pub fn parse_tree(input: &str, extra_marker: Option<&str>) -> TreeResult<Option<Node<String>>> {
    let tokens = tokenize(input, extra_marker)?;
    from_level_order(&tokens)
}
