//! Window planning
//!
//! Splits `len` samples into at most `desired` contiguous windows of
//! `ceil(len / desired)` samples each; the last window may be shorter.

use std::ops::Range;

use crate::error::{DownsampleError, Result};

/// A contiguous run of input indices reduced to one output point
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    /// Position of this window in the output
    pub index: usize,
    /// First input index (inclusive)
    pub start: usize,
    /// Last input index (exclusive)
    pub end: usize,
}

impl Window {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Index of the representative sample in the full input (floor of the midpoint)
    pub fn midpoint(&self) -> usize {
        self.start + (self.end - self.start) / 2
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// Window layout for one reduction pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowPlan {
    len: usize,
    desired: usize,
    window_size: usize,
}

impl WindowPlan {
    /// Plan windows for `len` samples
    ///
    /// # Errors
    /// `InvalidArgument` when `desired` is zero
    pub fn new(len: usize, desired: usize) -> Result<Self> {
        if desired == 0 {
            return Err(DownsampleError::invalid_argument(
                "desired point count must be greater than 0",
            ));
        }
        Ok(Self {
            len,
            desired,
            window_size: len.div_ceil(desired),
        })
    }

    /// Samples per window (0 for empty input)
    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// Number of windows this plan yields, never more than `desired`
    pub fn window_count(&self) -> usize {
        if self.window_size == 0 {
            return 0;
        }
        self.len.div_ceil(self.window_size).min(self.desired)
    }

    /// The `i`-th window, or `None` once its start runs past the input
    pub fn window(&self, index: usize) -> Option<Window> {
        if index >= self.desired || self.window_size == 0 {
            return None;
        }
        let start = index * self.window_size;
        if start >= self.len {
            return None;
        }
        Some(Window {
            index,
            start,
            end: (start + self.window_size).min(self.len),
        })
    }

    pub fn windows(&self) -> impl Iterator<Item = Window> + '_ {
        (0..self.desired).map_while(move |i| self.window(i))
    }
}
