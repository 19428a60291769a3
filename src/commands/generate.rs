//! Generate a random byte file suitable as `sort` input.

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use pipesort_lib::byte_io::write_elements;
use pipesort_lib::logging::format_count;
use pipesort_lib::router::required_stage_count;
use pipesort_lib::validation::validate_positive;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::PathBuf;

use crate::commands::command::Command;

/// Generate a file of uniformly random bytes.
#[derive(Debug, Parser)]
#[command(
    name = "generate",
    about = "Generate a random byte file for sort input",
    long_about = r#"
Generate a file of uniformly random unsigned bytes.

The output is suitable as input to `pipesort sort`. Pass --seed for a
reproducible file; otherwise OS entropy is used.

EXAMPLES:

  # 64 random bytes
  pipesort generate -o numbers --count 64

  # Reproducible input for a regression case
  pipesort generate -o numbers --count 1024 --seed 42
"#
)]
pub struct Generate {
    /// Output byte file.
    #[arg(short = 'o', long = "output")]
    pub output: PathBuf,

    /// Number of bytes to generate.
    #[arg(short = 'n', long = "count")]
    pub count: u64,

    /// Seed for reproducible output (uses OS entropy if omitted).
    #[arg(long = "seed")]
    pub seed: Option<u64>,
}

/// Create a random number generator, optionally seeded for reproducibility.
#[must_use]
pub fn create_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    }
}

impl Command for Generate {
    fn execute(&self) -> Result<()> {
        validate_positive(self.count, "count")?;

        info!("Generating {} random byte(s)", format_count(self.count));
        if let Some(seed) = self.seed {
            info!("Seed: {seed}");
        }

        let mut rng = create_rng(self.seed);
        let elements: Vec<u8> = (0..self.count).map(|_| rng.random()).collect();

        write_elements(&self.output, &elements)
            .with_context(|| format!("writing output '{}'", self.output.display()))?;

        info!("Output: {}", self.output.display());
        info!("Sorting this file will use {} stage(s)", required_stage_count(self.count));
        Ok(())
    }
}
