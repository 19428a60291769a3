//! Whole-pipeline driver.
//!
//! Builds the topology, wires one bounded two-lane channel link per adjacent
//! stage pair, spawns one thread per stage under a scoped-thread region,
//! releases all stages through a startup barrier, joins them, and maps any
//! stage failure to a single whole-run error.

use std::sync::Barrier;
use std::thread;

use log::{debug, info};

use crate::errors::{PipesortError, Result};
use crate::progress::ProgressTracker;
use crate::stage;
use crate::topology::Topology;
use crate::transport::{ChannelRx, lane_channels};

/// Tuning knobs for one pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Bounded capacity per lane channel.
    pub channel_capacity: usize,
    /// Sink-side progress logging interval, in elements.
    pub progress_interval: u64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self { channel_capacity: 1024, progress_interval: 1 << 20 }
    }
}

/// Sink-only producer seam: accepts the final elements one at a time,
/// strictly in ascending order.
pub trait SortOutput<T> {
    /// Accept the next element of the sorted sequence.
    fn emit(&mut self, value: T) -> Result<()>;
}

impl<T> SortOutput<T> for Vec<T> {
    fn emit(&mut self, value: T) -> Result<()> {
        self.push(value);
        Ok(())
    }
}

/// Counts emitted elements and forwards them, so the sink's drain shows up
/// in the log for large inputs.
struct ProgressOutput<'a, O> {
    inner: &'a mut O,
    progress: &'a ProgressTracker,
}

impl<T, O: SortOutput<T>> SortOutput<T> for ProgressOutput<'_, O> {
    fn emit(&mut self, value: T) -> Result<()> {
        self.progress.log_if_needed(1);
        self.inner.emit(value)
    }
}

/// Sort `input` through the pipeline, appending the result to a fresh `Vec`.
pub fn sort_elements<T>(input: &[T], config: &PipelineConfig) -> Result<Vec<T>>
where
    T: Ord + Copy + Send + Sync,
{
    let mut output = Vec::with_capacity(input.len());
    sort_into(input, config, &mut output)?;
    Ok(output)
}

/// Sort `input` through the pipeline into `output`.
///
/// On success the sink has emitted exactly `input.len()` elements in
/// ascending order; on any failure nothing further is emitted and the error
/// names the failing stage and operation.
pub fn sort_into<T, O>(input: &[T], config: &PipelineConfig, output: &mut O) -> Result<()>
where
    T: Ord + Copy + Send + Sync,
    O: SortOutput<T> + Send,
{
    let topology = Topology::for_elements(input.len() as u64)?;

    if topology.is_bypass() {
        // A single element needs no pipeline.
        info!("Single-element input, bypassing the pipeline");
        if let Some(&value) = input.first() {
            output.emit(value)?;
        }
        return Ok(());
    }

    info!(
        "Starting pipeline: {} element(s) across {} stage(s) (channel capacity {})",
        topology.element_count(),
        topology.stage_count(),
        config.channel_capacity
    );
    run_pipeline(input, &topology, config, output)
}

fn run_pipeline<T, O>(
    input: &[T],
    topology: &Topology,
    config: &PipelineConfig,
    output: &mut O,
) -> Result<()>
where
    T: Ord + Copy + Send + Sync,
    O: SortOutput<T> + Send,
{
    let stage_count = topology.stage_count();
    let element_count = topology.element_count();
    let barrier = Barrier::new(stage_count);
    let progress = ProgressTracker::new("Emitted elements").with_interval(config.progress_interval);

    let mut results: Vec<(usize, Result<()>)> = Vec::with_capacity(stage_count);
    thread::scope(|scope| {
        let barrier = &barrier;
        let mut handles = Vec::with_capacity(stage_count);
        let mut rx_prev: Option<ChannelRx<T>> = None;

        // Source and middles; each creates the link to its successor.
        for id in 0..stage_count - 1 {
            let (tx, rx_next) = lane_channels::<T>(config.channel_capacity);
            let rx = rx_prev.replace(rx_next);
            let handle = if id == 0 {
                scope.spawn(move || {
                    barrier.wait();
                    stage::run_source(input, &tx)
                })
            } else {
                let rx = rx.expect("every non-source stage has a predecessor link");
                scope.spawn(move || {
                    barrier.wait();
                    stage::run_middle(id, element_count, &rx, &tx)
                })
            };
            handles.push((id, handle));
        }

        // Sink borrows the output collaborator directly.
        let sink_id = stage_count - 1;
        let rx = rx_prev.take().expect("the sink has a predecessor link");
        let mut sink_output = ProgressOutput { inner: output, progress: &progress };
        let handle = scope.spawn(move || {
            barrier.wait();
            stage::run_sink(sink_id, element_count, &rx, &mut sink_output)
        });
        handles.push((sink_id, handle));
        debug!("spawned {stage_count} stage thread(s), barrier released");

        for (id, handle) in handles {
            let result =
                handle.join().unwrap_or(Err(PipesortError::StagePanicked { stage: id }));
            results.push((id, result));
        }
    });

    // A failing stage drops its endpoints and cascades ChannelClosed through
    // the chain; report the root cause in preference to the disconnections it
    // induced in neighbors.
    let mut first_transport: Option<PipesortError> = None;
    let mut root: Option<PipesortError> = None;
    for (_, result) in results {
        if let Err(error) = result {
            match error {
                PipesortError::Transport { .. } => {
                    if first_transport.is_none() {
                        first_transport = Some(error);
                    }
                }
                _ => {
                    if root.is_none() {
                        root = Some(error);
                    }
                }
            }
        }
    }
    if let Some(error) = root.or(first_transport) {
        return Err(error);
    }

    progress.log_final();
    Ok(())
}
