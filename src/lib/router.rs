//! Lane routing arithmetic.
//!
//! Pure functions of a stage's index and its monotonically increasing
//! element counters. Stage `id` sends in chunks of `2^id` elements per lane
//! (the run length it produces) and receives in chunks of `2^(id-1)` (the run
//! length its predecessor produces), so for every counter value `k`,
//! `send_lane(id, k) == recv_lane(id + 1, k)`. That identity is what lets a
//! receiver block on a single predicted lane and always be matched by its
//! predecessor's next send.

use crate::lane::Lane;

/// Lane on which stage `id` sends its `sent_count`-th element.
///
/// Bit `id` of the counter: outgoing elements alternate lanes in chunks of
/// `2^id`. For the source (`id = 0`) this degenerates to per-element
/// alternation, forming two interleaved singleton-run lanes.
#[must_use]
pub fn send_lane(id: usize, sent_count: u64) -> Lane {
    Lane::from_bit((sent_count >> id) & 1)
}

/// Lane on which stage `id` receives its `received_count`-th element.
///
/// Bit `id - 1` of the counter: incoming elements are grouped into the
/// predecessor's run length `2^(id-1)`. Only meaningful for `id >= 1`.
#[must_use]
pub fn recv_lane(id: usize, received_count: u64) -> Lane {
    debug_assert!(id >= 1, "the source has no receive side");
    Lane::from_bit((received_count >> (id - 1)) & 1)
}

/// Length of the runs stage `id` receives (`2^(id-1)`), for `id >= 1`.
#[must_use]
pub fn input_chunk_len(id: usize) -> u64 {
    debug_assert!(id >= 1, "the source has no input chunks");
    1 << (id - 1)
}

/// Length of the runs stage `id` produces (`2^id`).
#[must_use]
pub fn output_run_len(id: usize) -> u64 {
    1 << id
}

/// Number of stages required to sort `element_count` elements:
/// `ceil(log2(n)) + 1`.
///
/// This relationship is a hard precondition of the whole scheme; there is no
/// graceful degradation for other stage counts.
#[must_use]
pub fn required_stage_count(element_count: u64) -> usize {
    debug_assert!(element_count >= 1);
    if element_count == 1 {
        1
    } else {
        (u64::BITS - (element_count - 1).leading_zeros()) as usize + 1
    }
}
