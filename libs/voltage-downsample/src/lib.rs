//! voltage-downsample - Outlier-aware downsampling for measurement series
//!
//! Reduces a long, time-ordered series (e.g. power readings) to a fixed number
//! of representative points. Each window is collapsed into a weighted average
//! in which the most deviating values count double, so spikes survive the
//! reduction instead of being averaged away.
//!
//! # Example
//!
//! ```rust
//! use voltage_downsample::reduce;
//!
//! let timestamps: Vec<String> = (0..10).map(|i| format!("12:00:{:02}", i)).collect();
//! let power = [1.0, 2.0, 3.0, 4.0, 5.0, 100.0, 7.0, 8.0, 9.0, 10.0];
//!
//! let points = reduce(&timestamps, &power, 2).unwrap();
//! assert_eq!(points.len(), 2);
//! assert_eq!(points[1].timestamp, "12:00:07");
//! // The spike pulls the window above its plain mean of 26.8
//! assert_eq!(points[1].value, 39.0);
//! ```
//!
//! # Algorithm
//!
//! | Step | Description |
//! |------|-------------|
//! | Windows | `ceil(n / desired)` samples each, last one may be shorter |
//! | Distance | gap between each value and the mean of the other values |
//! | Bonus | top `ceil(20%)` distances weigh 2.0, the rest 1.0 |
//! | Output | normalized weighted average, timestamp of the middle sample |
//!
//! With the default `parallel` feature, [`reduce_parallel`] spreads windows
//! across the rayon thread pool with identical results.

pub mod error;
pub mod reducer;
pub mod weights;
pub mod window;

// Re-exports for convenience
pub use error::{DownsampleError, Result};
pub use reducer::{reduce, reduce_samples, Downsampler, OutputPoint, Sample, DEFAULT_DESIRED_POINTS};
pub use weights::{compute_weights, weighted_average};
pub use window::{Window, WindowPlan};

#[cfg(feature = "parallel")]
pub use reducer::reduce_parallel;
