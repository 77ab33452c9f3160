//! Error type shared by every fallible operation of the crate.

use thiserror::Error;

/// Errors reported by the node store, the diagram builder and evaluation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Malformed or insufficient construction inputs.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A variable level or an input position lies outside its sequence.
    #[error("index {index} is out of range (length {len})")]
    OutOfRange { index: usize, len: usize },

    /// A character of an assignment is not `'0'` or `'1'`.
    #[error("invalid assignment symbol {0:?}")]
    InvalidInput(char),

    /// The node store cannot hold another node.
    #[error("node allocation failed: {0}")]
    AllocationFailure(String),

    /// The store was torn down and has no bucket table.
    #[error("node store is not initialized, call `reset` first")]
    Uninitialized,

    /// No candidate ordering produced a diagram.
    #[error("no ordering produced a diagram")]
    NoViableOrdering,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
