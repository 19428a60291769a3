//! The per-stage merge engine.
//!
//! Consumes a stage's two lane buffers once the readiness threshold is met,
//! taking one element per step and preserving the invariant that the emitted
//! stream is a sequence of sorted runs of exactly `2^id` elements (the final
//! run may be a shorter tail once input is exhausted).

use crate::lane::{Lane, LaneBuffers};
use crate::router;

/// Merge state for a middle or sink stage.
///
/// Tracks, within the output run in progress, how many elements each lane has
/// contributed. A lane that has contributed its full `2^(id-1)`-element chunk
/// is closed for the rest of the run regardless of value comparison; without
/// that cap a merge could stray into the next run buffered behind the current
/// one on the same lane, and the resulting run-length drift would
/// desynchronize every downstream router.
#[derive(Debug)]
pub struct MergeEngine {
    /// Per-lane contribution cap for one output run: `2^(id-1)`.
    chunk_len: u64,
    /// Output run length: `2^id`.
    run_len: u64,
    /// Elements taken from each lane within the current output run.
    taken: [u64; 2],
}

impl MergeEngine {
    /// Create the engine for stage `id` (`id >= 1`).
    #[must_use]
    pub fn new(id: usize) -> Self {
        debug_assert!(id >= 1, "the source does not merge");
        Self { chunk_len: router::input_chunk_len(id), run_len: router::output_run_len(id), taken: [0, 0] }
    }

    /// Whether a new output run may begin.
    ///
    /// A full run needs a complete chunk on Q0 and at least one element on Q1
    /// before a meaningful comparison is possible. Once input is exhausted,
    /// whatever remains buffered forms tail runs and may be merged as is.
    #[must_use]
    pub fn ready<T>(&self, bufs: &LaneBuffers<T>, input_done: bool) -> bool {
        if input_done {
            return bufs.total_len() > 0;
        }
        bufs.len(Lane::Q0) as u64 >= self.chunk_len && !bufs.is_empty(Lane::Q1)
    }

    fn lane_open(&self, lane: Lane) -> bool {
        self.taken[lane.index()] < self.chunk_len
    }

    fn run_taken(&self) -> u64 {
        self.taken[0] + self.taken[1]
    }

    /// Perform one compare-and-take, removing and returning the chosen
    /// element.
    ///
    /// Returns `None` when no step is determined yet: the readiness gate has
    /// not been met, or the step needs a front that has not arrived and input
    /// is still flowing. Ties between equal fronts are taken from Q0 first
    /// (consistent, not semantically significant).
    pub fn step<T: Ord>(&mut self, bufs: &mut LaneBuffers<T>, input_done: bool) -> Option<T> {
        if self.run_taken() == 0 && !self.ready(bufs, input_done) {
            return None;
        }

        let q0_avail = self.lane_open(Lane::Q0) && !bufs.is_empty(Lane::Q0);
        let q1_avail = self.lane_open(Lane::Q1) && !bufs.is_empty(Lane::Q1);

        let lane = match (q0_avail, q1_avail) {
            (true, true) => match (bufs.front(Lane::Q0), bufs.front(Lane::Q1)) {
                (Some(a), Some(b)) if b < a => Lane::Q1,
                _ => Lane::Q0,
            },
            (true, false) => {
                if self.lane_open(Lane::Q1) && !input_done {
                    // Q1's share of this run is still in flight.
                    return None;
                }
                Lane::Q0
            }
            (false, true) => {
                if self.lane_open(Lane::Q0) && !input_done {
                    return None;
                }
                Lane::Q1
            }
            (false, false) => {
                if input_done {
                    // Both lanes drained mid-run: a short tail run closes early.
                    self.taken = [0, 0];
                }
                return None;
            }
        };

        let value = bufs.pop(lane)?;
        self.taken[lane.index()] += 1;
        if self.run_taken() == self.run_len {
            self.taken = [0, 0];
        }
        Some(value)
    }
}
