//! Custom error types for pipesort operations.

use std::fmt;

use thiserror::Error;

use crate::lane::Lane;

/// Result type alias for pipesort operations
pub type Result<T> = std::result::Result<T, PipesortError>;

/// Direction of a failed channel operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelOp {
    /// A send toward the successor stage.
    Send,
    /// A receive from the predecessor stage.
    Receive,
}

impl fmt::Display for ChannelOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChannelOp::Send => write!(f, "send"),
            ChannelOp::Receive => write!(f, "receive"),
        }
    }
}

/// Error type for pipesort operations
#[derive(Error, Debug)]
pub enum PipesortError {
    /// Input file contained no elements
    #[error("Empty input file '{path}': nothing to sort")]
    EmptyInput {
        /// Path to the offending file
        path: String,
    },

    /// Invalid parameter value provided
    #[error("Invalid parameter '{parameter}': {reason}")]
    InvalidParameter {
        /// The parameter name
        parameter: String,
        /// Explanation of why it's invalid
        reason: String,
    },

    /// Externally supplied stage count does not match the required one
    #[error(
        "Invalid stage count {stage_count}: sorting {element_count} element(s) \
         requires exactly {required} stage(s)"
    )]
    StageCountMismatch {
        /// The supplied stage count
        stage_count: usize,
        /// The required stage count, `ceil(log2(n)) + 1`
        required: usize,
        /// Number of elements being sorted
        element_count: u64,
    },

    /// A channel send or receive failed mid-run.
    ///
    /// Fatal for the whole run: a single lost message permanently
    /// desynchronizes every downstream lane-routing counter.
    #[error("Stage {stage}: {op} on lane {lane} failed: channel closed")]
    Transport {
        /// The stage whose channel operation failed
        stage: usize,
        /// Which operation failed
        op: ChannelOp,
        /// The lane the operation addressed
        lane: Lane,
    },

    /// A protocol invariant did not hold; indicates a router or threshold bug
    #[error("Stage {stage}: protocol invariant violated: {detail}")]
    InvariantViolation {
        /// The stage that detected the violation
        stage: usize,
        /// What was observed
        detail: String,
    },

    /// A stage thread panicked
    #[error("Stage {stage} panicked")]
    StagePanicked {
        /// The stage whose thread panicked
        stage: usize,
    },

    /// File-level I/O failure
    #[error("I/O error: {source}")]
    Io {
        /// The underlying I/O error
        #[from]
        source: std::io::Error,
    },
}
