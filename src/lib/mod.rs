#![deny(unsafe_code)]
#![allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::uninlined_format_args
)]

//! # pipesort - Pipeline-Parallel Merge Sort Library
//!
//! Sorts a byte sequence through a fixed chain of cooperating stages, each
//! stage merging two lanes of previously-sorted runs and forwarding
//! doubled-length runs to its successor. Stage 0 is the source, the last
//! stage is the sink, and every intermediate stage is a generic merger
//! parameterized only by its position in the chain.
//!
//! ## Modules
//!
//! - **[`router`]** - Lane-tag arithmetic over stage index and element counters
//! - **[`lane`]** - The two-valued lane tag and per-stage lane buffers
//! - **[`merge`]** - The readiness gate, balance policy, and merge step
//! - **[`stage`]** - Source/middle/sink stage controllers
//! - **[`transport`]** - Blocking per-lane channels between adjacent stages
//! - **[`topology`]** - Stage-count validation and role assignment
//! - **[`pipeline`]** - The whole-pipeline driver
//! - **[`byte_io`]** - Raw byte file input and output
//! - **[`logging`]**, **[`progress`]**, **[`validation`]** - Shared utilities
//!
//! ## Quick Start
//!
//! ```
//! use pipesort_lib::pipeline::{PipelineConfig, sort_elements};
//!
//! # fn main() -> pipesort_lib::Result<()> {
//! let sorted = sort_elements(&[8u8, 1, 6, 3, 7, 2, 5, 4], &PipelineConfig::default())?;
//! assert_eq!(sorted, vec![1, 2, 3, 4, 5, 6, 7, 8]);
//! # Ok(())
//! # }
//! ```
//!
//! The protocol is generic over any `T: Ord + Copy + Send + Sync`; the CLI
//! instantiates it with `u8`.

pub mod byte_io;
pub mod errors;
pub mod lane;
pub mod logging;
pub mod merge;
pub mod pipeline;
pub mod progress;
pub mod router;
pub mod stage;
pub mod topology;
pub mod transport;
pub mod validation;

pub use errors::{ChannelOp, PipesortError, Result};
pub use lane::{Lane, LaneBuffers};
pub use pipeline::{PipelineConfig, SortOutput, sort_elements, sort_into};
pub use topology::{StageRole, Topology};
