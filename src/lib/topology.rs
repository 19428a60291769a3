//! Pipeline topology: stage count validation and role assignment.

use crate::errors::{PipesortError, Result};
use crate::router;

/// A stage's role, derived from its position in the chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageRole {
    /// Stage 0: emits the raw elements as singleton runs; never receives.
    Source,
    /// An intermediate merger.
    Middle,
    /// The last stage: accumulates and emits the fully merged output.
    Sink,
}

/// Fixed topology for one run.
///
/// `stage_count == ceil(log2(element_count)) + 1` is a hard precondition of
/// the run-doubling schedule and is validated before any message flows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Topology {
    element_count: u64,
    stage_count: usize,
}

impl Topology {
    /// Build the topology for `element_count` elements, computing the
    /// required stage count.
    pub fn for_elements(element_count: u64) -> Result<Self> {
        if element_count == 0 {
            return Err(PipesortError::InvalidParameter {
                parameter: "element_count".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(Self { element_count, stage_count: router::required_stage_count(element_count) })
    }

    /// Validate an externally supplied stage count against the required one.
    pub fn with_stage_count(element_count: u64, stage_count: usize) -> Result<Self> {
        let topology = Self::for_elements(element_count)?;
        if stage_count != topology.stage_count {
            return Err(PipesortError::StageCountMismatch {
                stage_count,
                required: topology.stage_count,
                element_count,
            });
        }
        Ok(topology)
    }

    /// Number of elements in the run.
    #[must_use]
    pub fn element_count(&self) -> u64 {
        self.element_count
    }

    /// Total number of stages.
    #[must_use]
    pub fn stage_count(&self) -> usize {
        self.stage_count
    }

    /// Role of stage `id`.
    #[must_use]
    pub fn role(&self, id: usize) -> StageRole {
        debug_assert!(id < self.stage_count);
        if id == 0 {
            StageRole::Source
        } else if id == self.stage_count - 1 {
            StageRole::Sink
        } else {
            StageRole::Middle
        }
    }

    /// A single-stage topology (one element): there is no pipeline to run and
    /// the driver emits the element directly.
    #[must_use]
    pub fn is_bypass(&self) -> bool {
        self.stage_count == 1
    }
}
