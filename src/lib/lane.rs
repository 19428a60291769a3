//! Lane tags and per-stage lane buffers.
//!
//! Every stage owns exactly two lanes. The two-lane cardinality is a protocol
//! invariant, so the buffers are a fixed two-element array indexed by [`Lane`],
//! never a keyed map.

use std::collections::VecDeque;
use std::fmt;

/// One of the two logical sub-channels a stage uses to keep two interleaved
/// sorted runs distinguishable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lane {
    /// Lane 0.
    Q0,
    /// Lane 1.
    Q1,
}

impl Lane {
    /// Both lanes, in tag order.
    pub const BOTH: [Lane; 2] = [Lane::Q0, Lane::Q1];

    /// Array index for this lane.
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Lane::Q0 => 0,
            Lane::Q1 => 1,
        }
    }

    /// Lane for the low bit of a router computation (0 => Q0, nonzero => Q1).
    #[must_use]
    pub fn from_bit(bit: u64) -> Lane {
        if bit == 0 { Lane::Q0 } else { Lane::Q1 }
    }
}

impl fmt::Display for Lane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Lane::Q0 => write!(f, "Q0"),
            Lane::Q1 => write!(f, "Q1"),
        }
    }
}

/// A stage's pair of lane queues.
///
/// Each queue holds received-but-not-yet-merged elements and is internally
/// sorted ascending at all times as a consequence of the upstream merge
/// invariant; lanes are never re-sorted locally.
#[derive(Debug)]
pub struct LaneBuffers<T> {
    queues: [VecDeque<T>; 2],
}

impl<T> LaneBuffers<T> {
    /// Create an empty pair of lane queues.
    #[must_use]
    pub fn new() -> Self {
        Self { queues: [VecDeque::new(), VecDeque::new()] }
    }

    /// Append an element at the tail of a lane.
    pub fn push(&mut self, lane: Lane, value: T) {
        self.queues[lane.index()].push_back(value);
    }

    /// The oldest element of a lane, if any.
    #[must_use]
    pub fn front(&self, lane: Lane) -> Option<&T> {
        self.queues[lane.index()].front()
    }

    /// Remove and return the oldest element of a lane.
    pub fn pop(&mut self, lane: Lane) -> Option<T> {
        self.queues[lane.index()].pop_front()
    }

    /// Number of buffered elements on one lane.
    #[must_use]
    pub fn len(&self, lane: Lane) -> usize {
        self.queues[lane.index()].len()
    }

    /// Number of buffered elements across both lanes.
    #[must_use]
    pub fn total_len(&self) -> usize {
        Lane::BOTH.iter().map(|lane| self.len(*lane)).sum()
    }

    /// Whether one lane is empty.
    #[must_use]
    pub fn is_empty(&self, lane: Lane) -> bool {
        self.queues[lane.index()].is_empty()
    }

    /// Whether both lanes are empty.
    #[must_use]
    pub fn all_empty(&self) -> bool {
        Lane::BOTH.iter().all(|lane| self.is_empty(*lane))
    }
}

impl<T> Default for LaneBuffers<T> {
    fn default() -> Self {
        Self::new()
    }
}
