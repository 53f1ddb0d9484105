use std::path::PathBuf;
use thiserror::Error;

use crate::arena::Side;

#[derive(Error, Debug)]
pub enum TreeError {
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read file: {0}")]
    FileReadError(#[from] std::io::Error),

    #[error("Unreadable tree input at byte {offset}")]
    Syntax { offset: usize },

    #[error("Invalid level-order input at token {position}: {reason}")]
    Parse { position: usize, reason: String },

    #[error("Node reached twice (cycle or shared child) at arena slot {0}")]
    CycleDetected(usize),

    #[error("Node not found in arena")]
    NodeNotFound,

    #[error("{side} child slot already occupied")]
    SlotOccupied { side: Side },

    #[error("Tree deeper than the configured limit of {limit} levels")]
    DepthLimitExceeded { limit: usize },

    #[error("Tree larger than the configured limit of {limit} nodes")]
    TooManyNodes { limit: usize },

    #[error("Config error: {message}")]
    Config { message: String },

    #[error("Unknown strategy: {0} (expected recursive, stack or queue)")]
    InvalidStrategy(String),
}

pub type TreeResult<T> = Result<T, TreeError>;
