//! CLI command implementations for pipesort.
//!
//! Each submodule implements one subcommand:
//!
//! - [`sort`] - Sort a raw byte file through the stage pipeline
//! - [`generate`] - Produce a random byte file suitable as `sort` input

#![allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::missing_errors_doc,
    clippy::must_use_candidate,
    clippy::uninlined_format_args
)]

pub mod command;
pub mod generate;
pub mod sort;
