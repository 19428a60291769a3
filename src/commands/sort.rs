//! Sort a raw byte file through the stage pipeline.
//!
//! Reads the input bytes (the file size is the element count), runs the
//! pipeline-parallel merge sort across `ceil(log2(n)) + 1` stage threads, and
//! writes the sorted bytes to a file or prints them as space-separated
//! decimals.

use anyhow::{Context, Result, bail};
use clap::Parser;
use log::info;
use pipesort_lib::byte_io::{format_elements, read_elements, write_elements};
use pipesort_lib::logging::{OperationTimer, format_count};
use pipesort_lib::pipeline::{PipelineConfig, sort_elements};
use pipesort_lib::topology::Topology;
use pipesort_lib::validation::validate_file_exists;
use std::path::PathBuf;

use crate::commands::command::Command;

/// Sort a byte file.
///
/// Sorts raw bytes using a pipeline-parallel merge sort: one thread per
/// stage, each stage merging two lanes of sorted runs and forwarding
/// doubled-length runs to its successor.
#[derive(Debug, Parser)]
#[command(
    name = "sort",
    about = "Sort a raw byte file through the stage pipeline",
    long_about = r#"
Sort a raw byte file using a pipeline-parallel merge sort.

The input file is treated as a sequence of unsigned bytes; its size is the
element count. The sorter runs one thread per pipeline stage. Stage 0 streams
the input as singleton runs, each intermediate stage merges two lanes of runs
into runs of twice the length, and the final stage emits the fully sorted
sequence.

The stage count is always ceil(log2(n)) + 1 for n input bytes. Passing
--stages with any other value is a configuration error.

OUTPUT:

  With --output, the sorted bytes are written verbatim to the given file.
  Without it, they are printed to stdout as space-separated decimals.

EXAMPLES:

  # Sort a file and write the raw sorted bytes
  pipesort sort -i numbers -o sorted

  # Print the sorted values as text
  pipesort sort -i numbers

  # Sort and double-check the result (order + multiset preservation)
  pipesort sort -i numbers -o sorted --verify
"#
)]
pub struct Sort {
    /// Input byte file.
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,

    /// Output file for the raw sorted bytes (prints text to stdout if omitted).
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Total number of pipeline stages.
    ///
    /// Must equal ceil(log2(n)) + 1 for n input bytes; computed automatically
    /// when omitted. Exposed so schedulers that pre-allocate workers can
    /// assert their allocation matches.
    #[arg(long = "stages")]
    pub stages: Option<usize>,

    /// Bounded capacity of each inter-stage channel, per lane.
    #[arg(long = "channel-capacity", default_value = "1024")]
    pub channel_capacity: usize,

    /// Verify the output: ascending order plus count-for-count multiset
    /// equality with the input.
    #[arg(long = "verify")]
    pub verify: bool,
}

impl Command for Sort {
    fn execute(&self) -> Result<()> {
        validate_file_exists(&self.input, "Input file")?;
        if self.channel_capacity == 0 {
            bail!("--channel-capacity must be greater than 0");
        }

        let elements = read_elements(&self.input)
            .with_context(|| format!("reading input '{}'", self.input.display()))?;
        let element_count = elements.len() as u64;

        // Validate any externally supplied stage count before a single
        // element flows.
        let topology = match self.stages {
            Some(stages) => Topology::with_stage_count(element_count, stages)?,
            None => Topology::for_elements(element_count)?,
        };

        info!("Starting Sort");
        info!("Input: {} ({} element(s))", self.input.display(), format_count(element_count));
        info!("Stages: {}", topology.stage_count());

        let timer = OperationTimer::new("Sorting");
        let config =
            PipelineConfig { channel_capacity: self.channel_capacity, ..PipelineConfig::default() };
        let sorted = sort_elements(&elements, &config)?;
        timer.log_completion(element_count);

        if self.verify {
            verify_sorted(&elements, &sorted)?;
            info!("Verification: PASS");
        }

        match &self.output {
            Some(path) => {
                write_elements(path, &sorted)
                    .with_context(|| format!("writing output '{}'", path.display()))?;
                info!("Output: {}", path.display());
            }
            None => println!("{}", format_elements(&sorted)),
        }

        info!("=== Summary ===");
        info!("Elements sorted: {}", format_count(element_count));
        info!("Stages: {}", topology.stage_count());
        info!("Channel capacity: {}", self.channel_capacity);
        Ok(())
    }
}

/// Check ascending order and byte-histogram equality with the input.
fn verify_sorted(input: &[u8], output: &[u8]) -> Result<()> {
    if output.len() != input.len() {
        bail!("verification failed: {} element(s) in, {} out", input.len(), output.len());
    }
    if let Some(window) = output.windows(2).find(|w| w[0] > w[1]) {
        bail!("verification failed: {} precedes {} in the output", window[0], window[1]);
    }

    let mut histogram = [0i64; 256];
    for &value in input {
        histogram[value as usize] += 1;
    }
    for &value in output {
        histogram[value as usize] -= 1;
    }
    if let Some(value) = histogram.iter().position(|&count| count != 0) {
        bail!("verification failed: count mismatch for value {value}");
    }
    Ok(())
}
