//! Integration tests for the pipesort library.
//!
//! These tests validate the whole pipeline end to end, the inter-stage
//! protocol as observed on live channels, and the fail-fast behavior on
//! transport failures.

mod helpers;
mod test_pipeline_sort;
mod test_stage_protocol;
mod test_transport_failures;
