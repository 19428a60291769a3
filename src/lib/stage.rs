//! Stage controllers: one sequential control loop per pipeline stage.
//!
//! Each controller owns its counters and lane buffers exclusively and talks
//! to its neighbors only through the lane transport. The controllers are
//! generic over the transport traits so tests can hand-wire stages with
//! recording or fault-injecting links.

use log::debug;

use crate::errors::{ChannelOp, PipesortError, Result};
use crate::lane::{Lane, LaneBuffers};
use crate::merge::MergeEngine;
use crate::pipeline::SortOutput;
use crate::router;
use crate::transport::{LaneRx, LaneTx};

fn transport_err(stage: usize, op: ChannelOp, lane: Lane) -> PipesortError {
    PipesortError::Transport { stage, op, lane }
}

/// Run the source stage (`id = 0`).
///
/// Streams each input element in index order onto the lane the router
/// assigns, forming two interleaved singleton-run lanes. Never receives.
pub fn run_source<T, Tx>(input: &[T], tx: &Tx) -> Result<()>
where
    T: Ord + Copy,
    Tx: LaneTx<T> + ?Sized,
{
    debug!("stage 0 (source): sending {} element(s)", input.len());
    for (sent, &value) in input.iter().enumerate() {
        let lane = router::send_lane(0, sent as u64);
        tx.send(lane, value).map_err(|_| transport_err(0, ChannelOp::Send, lane))?;
    }
    debug!("stage 0 (source): done");
    Ok(())
}

/// Run a middle stage (`0 < id < stage_count - 1`).
///
/// Interleaves receive and send one-for-one rather than batching, so the
/// stage starts forwarding doubled runs before it has drained its input.
pub fn run_middle<T, Rx, Tx>(id: usize, element_count: u64, rx: &Rx, tx: &Tx) -> Result<()>
where
    T: Ord + Copy,
    Rx: LaneRx<T> + ?Sized,
    Tx: LaneTx<T> + ?Sized,
{
    debug!("stage {id} (middle): starting");
    let mut bufs = LaneBuffers::new();
    let mut engine = MergeEngine::new(id);
    let mut received: u64 = 0;
    let mut sent: u64 = 0;

    while sent < element_count {
        if received < element_count {
            let lane = router::recv_lane(id, received);
            let value =
                rx.recv(lane).map_err(|_| transport_err(id, ChannelOp::Receive, lane))?;
            bufs.push(lane, value);
            received += 1;
        }

        let input_done = received == element_count;
        if let Some(value) = engine.step(&mut bufs, input_done) {
            let lane = router::send_lane(id, sent);
            tx.send(lane, value).map_err(|_| transport_err(id, ChannelOp::Send, lane))?;
            sent += 1;
        } else if input_done && bufs.all_empty() && sent < element_count {
            return Err(PipesortError::InvariantViolation {
                stage: id,
                detail: format!(
                    "both lanes empty with {sent} of {element_count} element(s) sent"
                ),
            });
        }
    }

    debug!("stage {id} (middle): done ({received} received, {sent} sent)");
    Ok(())
}

/// Run the sink stage (`id = stage_count - 1`).
///
/// Receives until the whole input has arrived, routing each element exactly
/// as a middle stage does, then drains both lanes through the merge engine,
/// emitting the final sequence in ascending order.
pub fn run_sink<T, Rx, O>(id: usize, element_count: u64, rx: &Rx, output: &mut O) -> Result<()>
where
    T: Ord + Copy,
    Rx: LaneRx<T> + ?Sized,
    O: SortOutput<T>,
{
    debug!("stage {id} (sink): starting");
    let mut bufs = LaneBuffers::new();
    for received in 0..element_count {
        let lane = router::recv_lane(id, received);
        let value = rx.recv(lane).map_err(|_| transport_err(id, ChannelOp::Receive, lane))?;
        bufs.push(lane, value);
    }

    let mut engine = MergeEngine::new(id);
    let mut emitted: u64 = 0;
    while let Some(value) = engine.step(&mut bufs, true) {
        output.emit(value)?;
        emitted += 1;
    }

    if emitted != element_count || !bufs.all_empty() {
        return Err(PipesortError::InvariantViolation {
            stage: id,
            detail: format!(
                "drain emitted {emitted} of {element_count} element(s) with {} left buffered",
                bufs.total_len()
            ),
        });
    }

    debug!("stage {id} (sink): done ({element_count} received and emitted)");
    Ok(())
}
