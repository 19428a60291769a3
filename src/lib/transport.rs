//! Point-to-point lane transport between adjacent stages.
//!
//! One bounded `crossbeam_channel` pair per lane gives FIFO delivery per
//! (sender, lane) pair without ordering guarantees across lanes, which is
//! exactly the contract the routing arithmetic relies on. The [`LaneTx`] /
//! [`LaneRx`] traits are the seam where tests substitute fault-injecting or
//! recording transports.

use crossbeam_channel::{Receiver, Sender, bounded};
use thiserror::Error;

use crate::lane::Lane;

/// The single transport failure mode: the peer endpoint is gone.
///
/// A deliberate abort and a crash look identical to a neighbor; both surface
/// as a closed channel and are fatal for the whole run.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("channel closed")]
pub struct ChannelClosed;

/// Sending half of a stage link: blocking, at-most-one-element-per-call.
pub trait LaneTx<T> {
    /// Send one element on `lane`, blocking until the transport accepts it.
    fn send(&self, lane: Lane, value: T) -> Result<(), ChannelClosed>;
}

/// Receiving half of a stage link: blocking, at-most-one-element-per-call.
pub trait LaneRx<T> {
    /// Receive one element from `lane`, blocking until one is available.
    fn recv(&self, lane: Lane) -> Result<T, ChannelClosed>;
}

/// Production sender: one bounded channel per lane.
pub struct ChannelTx<T> {
    lanes: [Sender<T>; 2],
}

/// Production receiver: one bounded channel per lane.
pub struct ChannelRx<T> {
    lanes: [Receiver<T>; 2],
}

/// Construct a connected transmit/receive pair with `capacity` slots per lane.
///
/// Any capacity preserves correctness: lane prediction keeps sender and
/// receiver in step, so the bound only limits memory per link.
#[must_use]
pub fn lane_channels<T>(capacity: usize) -> (ChannelTx<T>, ChannelRx<T>) {
    let (tx0, rx0) = bounded(capacity);
    let (tx1, rx1) = bounded(capacity);
    (ChannelTx { lanes: [tx0, tx1] }, ChannelRx { lanes: [rx0, rx1] })
}

impl<T> LaneTx<T> for ChannelTx<T> {
    fn send(&self, lane: Lane, value: T) -> Result<(), ChannelClosed> {
        self.lanes[lane.index()].send(value).map_err(|_| ChannelClosed)
    }
}

impl<T> LaneRx<T> for ChannelRx<T> {
    fn recv(&self, lane: Lane) -> Result<T, ChannelClosed> {
        self.lanes[lane.index()].recv().map_err(|_| ChannelClosed)
    }
}
