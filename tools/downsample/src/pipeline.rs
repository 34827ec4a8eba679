//! Read, reduce, write

use std::path::PathBuf;
use std::time::Instant;

use tracing::{info, warn};
use voltage_downsample::Downsampler;

use crate::codec;
use crate::config::Settings;
use crate::error::Result;

/// Outcome of one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub input: PathBuf,
    pub output: PathBuf,
    pub samples: usize,
    pub points: usize,
}

/// Reduce the configured input file and write the result
///
/// Nothing is written when reading or reducing fails.
pub fn run(settings: &Settings) -> Result<RunSummary> {
    let started = Instant::now();
    let output = settings.output_path();

    let downsampler = Downsampler::new(settings.points)?.parallel(settings.parallel);

    let series = codec::read_series(&settings.input)?;
    if series.is_empty() {
        warn!(input = %settings.input.display(), "input contains no samples");
    }

    let points = downsampler.reduce(&series.timestamps, &series.values)?;
    codec::write_points_file(&output, &points)?;

    info!(
        samples = series.len(),
        points = points.len(),
        desired = settings.points,
        parallel = settings.parallel,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Reduced {} to {}",
        settings.input.display(),
        output.display()
    );

    Ok(RunSummary {
        input: settings.input.clone(),
        output,
        samples: series.len(),
        points: points.len(),
    })
}
