//! Window reducer
//!
//! Collapses each window of a measurement series into one point: the weighted
//! average of its values (see [`crate::weights`]) labelled with the timestamp
//! of the window's middle sample.

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::{DownsampleError, Result};
use crate::weights::{compute_weights, weighted_average};
use crate::window::{Window, WindowPlan};

/// Desired point count used by callers that do not choose one
pub const DEFAULT_DESIRED_POINTS: usize = 100;

/// One input measurement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample<T> {
    pub timestamp: T,
    pub value: f64,
}

impl<T> Sample<T> {
    pub fn new(timestamp: T, value: f64) -> Self {
        Self { timestamp, value }
    }
}

/// One reduced point: representative timestamp and weighted average
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputPoint<T> {
    pub timestamp: T,
    pub value: f64,
}

/// Reduce `values` to at most `desired_points` points, sequentially
///
/// # Errors
/// * `InvalidArgument` when `desired_points` is zero
/// * `MismatchedLength` when the two sequences differ in length
pub fn reduce<T: Clone>(
    timestamps: &[T],
    values: &[f64],
    desired_points: usize,
) -> Result<Vec<OutputPoint<T>>> {
    let plan = plan(timestamps.len(), values.len(), desired_points)?;
    let points = plan
        .windows()
        .map(|window| reduce_window(timestamps, values, window))
        .collect::<Vec<_>>();

    debug!(
        input = values.len(),
        output = points.len(),
        window_size = plan.window_size(),
        "reduced series"
    );
    Ok(points)
}

/// Same as [`reduce`], with windows distributed across the rayon thread pool
///
/// Output order and values are identical to the sequential pass.
#[cfg(feature = "parallel")]
pub fn reduce_parallel<T: Clone + Send + Sync>(
    timestamps: &[T],
    values: &[f64],
    desired_points: usize,
) -> Result<Vec<OutputPoint<T>>> {
    let plan = plan(timestamps.len(), values.len(), desired_points)?;
    let points = (0..plan.window_count())
        .into_par_iter()
        .filter_map(|i| plan.window(i))
        .map(|window| reduce_window(timestamps, values, window))
        .collect::<Vec<_>>();

    debug!(
        input = values.len(),
        output = points.len(),
        window_size = plan.window_size(),
        "reduced series in parallel"
    );
    Ok(points)
}

/// Reduce a sequence of [`Sample`]s
pub fn reduce_samples<T: Clone>(
    samples: &[Sample<T>],
    desired_points: usize,
) -> Result<Vec<OutputPoint<T>>> {
    let (timestamps, values): (Vec<T>, Vec<f64>) = samples
        .iter()
        .map(|s| (s.timestamp.clone(), s.value))
        .unzip();
    reduce(&timestamps, &values, desired_points)
}

fn plan(timestamps: usize, values: usize, desired_points: usize) -> Result<WindowPlan> {
    let plan = WindowPlan::new(values, desired_points)?;
    if timestamps != values {
        return Err(DownsampleError::mismatched_length(timestamps, values));
    }
    Ok(plan)
}

fn reduce_window<T: Clone>(timestamps: &[T], values: &[f64], window: Window) -> OutputPoint<T> {
    let window_values = &values[window.range()];
    let weights = compute_weights(window_values);
    let value = weighted_average(window_values, &weights);

    trace!(
        window = window.index,
        start = window.start,
        end = window.end,
        avg = value,
        "window"
    );

    OutputPoint {
        timestamp: timestamps[window.midpoint()].clone(),
        value,
    }
}

/// Reusable reduction settings
///
/// ```rust
/// use voltage_downsample::Downsampler;
///
/// let ts = ["t0", "t1", "t2", "t3"];
/// let values = [1.0, 1.0, 9.0, 9.0];
/// let points = Downsampler::new(2).unwrap().reduce(&ts, &values).unwrap();
/// assert_eq!(points.len(), 2);
/// assert_eq!(points[0].timestamp, "t1");
/// assert_eq!(points[1].value, 9.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Downsampler {
    desired_points: usize,
    parallel: bool,
}

impl Default for Downsampler {
    fn default() -> Self {
        Self {
            desired_points: DEFAULT_DESIRED_POINTS,
            parallel: false,
        }
    }
}

impl Downsampler {
    /// Create a downsampler producing at most `desired_points` points
    pub fn new(desired_points: usize) -> Result<Self> {
        if desired_points == 0 {
            return Err(DownsampleError::invalid_argument(
                "desired point count must be greater than 0",
            ));
        }
        Ok(Self {
            desired_points,
            parallel: false,
        })
    }

    /// Reduce windows on the rayon pool when available
    ///
    /// Without the `parallel` feature this setting is ignored.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn desired_points(&self) -> usize {
        self.desired_points
    }

    pub fn is_parallel(&self) -> bool {
        self.parallel
    }

    #[cfg(feature = "parallel")]
    pub fn reduce<T: Clone + Send + Sync>(
        &self,
        timestamps: &[T],
        values: &[f64],
    ) -> Result<Vec<OutputPoint<T>>> {
        if self.parallel {
            reduce_parallel(timestamps, values, self.desired_points)
        } else {
            reduce(timestamps, values, self.desired_points)
        }
    }

    #[cfg(not(feature = "parallel"))]
    pub fn reduce<T: Clone>(&self, timestamps: &[T], values: &[f64]) -> Result<Vec<OutputPoint<T>>> {
        reduce(timestamps, values, self.desired_points)
    }
}
