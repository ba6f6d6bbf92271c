// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Sliding-window geometry shared by the pooling and convolution operators.
//!
//! A window of size `k` is placed around its anchor with offsets
//! `-(k - 1) / 2 ..= -(k - 1) / 2 + k - 1`, so even kernels extend one
//! further after the anchor than before it. Windows are clamped to the
//! input instead of padded: taps outside `[0, len)` are skipped.

use std::ops::Range;

use rayon::prelude::*;

use crate::{KernelConfig, Shape, TensorError};

/// Computes `⌈n / stride⌉`, the number of output positions produced when
/// stepping over `n` inputs with the given stride.
///
/// # Panics
/// Panics if `stride` is zero.
///
/// # Examples
/// ```
/// use nn_kernels::ceil_div;
/// assert_eq!(ceil_div(5, 2), 3);
/// assert_eq!(ceil_div(4, 2), 2);
/// ```
pub fn ceil_div(n: usize, stride: usize) -> usize {
    n / stride + usize::from(n % stride != 0)
}

/// Offsets of a window along one axis, relative to its anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Window {
    min: isize,
    max: isize,
}

impl Window {
    /// Window of `size` taps (`size >= 1`) around an anchor.
    pub(crate) fn centered(size: usize) -> Self {
        let size = size as isize;
        let min = -((size - 1) / 2);
        Self {
            min,
            max: min + size - 1,
        }
    }

    /// Input positions covered by the window at `anchor`, clamped to `0..len`.
    pub(crate) fn clamp(&self, anchor: usize, len: usize) -> Range<usize> {
        let anchor = anchor as isize;
        let lo = (anchor + self.min).max(0);
        let hi = (anchor + self.max).min(len as isize - 1);
        if hi < lo {
            return 0..0;
        }
        lo as usize..hi as usize + 1
    }

    /// Index of input position `pos` within the window anchored at `anchor`.
    pub(crate) fn tap(&self, anchor: usize, pos: usize) -> usize {
        (pos as isize - (anchor as isize + self.min)) as usize
    }
}

/// Output grid of a strided 2-D window sweep over `(rows, cols)`.
#[derive(Debug, Clone, Copy)]
pub(crate) struct WindowGrid {
    pub rows: usize,
    pub cols: usize,
    pub out_rows: usize,
    pub out_cols: usize,
    row_stride: usize,
    col_stride: usize,
    window_y: Window,
    window_x: Window,
}

impl WindowGrid {
    pub(crate) fn new(
        rows: usize,
        cols: usize,
        (kernel_height, kernel_width): (usize, usize),
        (row_stride, col_stride): (usize, usize),
    ) -> Self {
        Self {
            rows,
            cols,
            out_rows: ceil_div(rows, row_stride),
            out_cols: ceil_div(cols, col_stride),
            row_stride,
            col_stride,
            window_y: Window::centered(kernel_height),
            window_x: Window::centered(kernel_width),
        }
    }

    /// Input rows feeding output row `y`.
    pub(crate) fn input_rows(&self, y: usize) -> Range<usize> {
        self.window_y.clamp(y * self.row_stride, self.rows)
    }

    /// Input columns feeding output column `x`.
    pub(crate) fn input_cols(&self, x: usize) -> Range<usize> {
        self.window_x.clamp(x * self.col_stride, self.cols)
    }

    /// Kernel row used when input row `y2` contributes to output row `y`.
    pub(crate) fn kernel_row(&self, y: usize, y2: usize) -> usize {
        self.window_y.tap(y * self.row_stride, y2)
    }

    /// Kernel column used when input column `x2` contributes to output column `x`.
    pub(crate) fn kernel_col(&self, x: usize, x2: usize) -> usize {
        self.window_x.tap(x * self.col_stride, x2)
    }
}

/// Logs a rejected call and hands the error back.
pub(crate) fn rejected(err: TensorError) -> TensorError {
    tracing::warn!("rejected call: {err}");
    err
}

pub(crate) fn expect_rank(
    op: &'static str,
    operand: &'static str,
    shape: &Shape,
    expected: usize,
) -> Result<(), TensorError> {
    if shape.rank() != expected {
        return Err(TensorError::InvalidRank {
            op,
            operand,
            expected,
            actual: shape.rank(),
        });
    }
    Ok(())
}

/// Checks a `(row, col, depth)` stride triple and returns the spatial strides.
pub(crate) fn spatial_strides(
    op: &'static str,
    strides: &[usize],
) -> Result<(usize, usize), TensorError> {
    if strides.len() != 3 {
        return Err(TensorError::InvalidRank {
            op,
            operand: "strides",
            expected: 3,
            actual: strides.len(),
        });
    }
    if strides[2] != 1 {
        return Err(TensorError::UnsupportedStride {
            op,
            axis: 2,
            stride: strides[2],
        });
    }
    if let Some(axis) = strides[..2].iter().position(|&s| s == 0) {
        return Err(TensorError::InvalidStride { op, axis });
    }
    Ok((strides[0], strides[1]))
}

pub(crate) fn spatial_kernel(
    op: &'static str,
    height: usize,
    width: usize,
) -> Result<(usize, usize), TensorError> {
    for (axis, size) in [height, width].into_iter().enumerate() {
        if size == 0 {
            return Err(TensorError::InvalidKernelSize { op, axis });
        }
    }
    Ok((height, width))
}

/// Fills `output` one row of `row_len` elements at a time.
///
/// Rows are handed to the rayon pool when `config` allows it. Each row is
/// written by exactly one call to `fill_row`, so the result does not depend
/// on scheduling. Returns `true` if the parallel path was taken.
pub(crate) fn fill_rows<F>(
    output: &mut [f32],
    row_len: usize,
    config: &KernelConfig,
    fill_row: F,
) -> bool
where
    F: Fn(usize, &mut [f32]) + Send + Sync,
{
    if row_len == 0 {
        return false;
    }
    let rows = output.len() / row_len;
    if config.use_parallel(rows) {
        output
            .par_chunks_mut(row_len)
            .enumerate()
            .for_each(|(y, row)| fill_row(y, row));
        true
    } else {
        for (y, row) in output.chunks_mut(row_len).enumerate() {
            fill_row(y, row);
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ceil_div() {
        assert_eq!(ceil_div(5, 2), 3);
        assert_eq!(ceil_div(4, 2), 2);
        assert_eq!(ceil_div(1, 5), 1);
        assert_eq!(ceil_div(0, 3), 0);
        assert_eq!(ceil_div(7, 1), 7);
        assert_eq!(ceil_div(usize::MAX, 2), usize::MAX / 2 + 1);
    }

    #[test]
    fn test_window_odd_is_symmetric() {
        let w = Window::centered(3);
        assert_eq!((w.min, w.max), (-1, 1));
        assert_eq!(Window::centered(1), Window { min: 0, max: 0 });
    }

    #[test]
    fn test_window_even_leans_forward() {
        assert_eq!(Window::centered(2), Window { min: 0, max: 1 });
        assert_eq!(Window::centered(4), Window { min: -1, max: 2 });
    }

    #[test]
    fn test_clamp_at_borders() {
        let w = Window::centered(3);
        assert_eq!(w.clamp(0, 3), 0..2);
        assert_eq!(w.clamp(1, 3), 0..3);
        assert_eq!(w.clamp(2, 3), 1..3);
        assert_eq!(w.clamp(0, 1), 0..1);
    }

    #[test]
    fn test_tap_index() {
        let w = Window::centered(3);
        assert_eq!(w.tap(1, 0), 0);
        assert_eq!(w.tap(1, 2), 2);
        // Clamped at the top edge: the first valid input row is tap 1.
        assert_eq!(w.tap(0, 0), 1);
    }

    #[test]
    fn test_grid_sizes() {
        let g = WindowGrid::new(5, 4, (3, 3), (2, 3));
        assert_eq!((g.out_rows, g.out_cols), (3, 2));
        assert_eq!(g.input_rows(2), 3..5);
        assert_eq!(g.input_cols(1), 2..4);
        assert_eq!(g.kernel_row(2, 3), 0);
        assert_eq!(g.kernel_col(1, 3), 1);
    }

    #[test]
    fn test_spatial_strides() {
        assert_eq!(spatial_strides("op", &[2, 3, 1]).unwrap(), (2, 3));
        assert!(matches!(
            spatial_strides("op", &[1, 1]),
            Err(TensorError::InvalidRank { operand: "strides", expected: 3, actual: 2, .. })
        ));
        assert!(matches!(
            spatial_strides("op", &[1, 1, 2]),
            Err(TensorError::UnsupportedStride { axis: 2, stride: 2, .. })
        ));
        assert!(matches!(
            spatial_strides("op", &[1, 0, 1]),
            Err(TensorError::InvalidStride { axis: 1, .. })
        ));
    }

    #[test]
    fn test_fill_rows_paths_agree() {
        let fill = |y: usize, row: &mut [f32]| {
            for (i, v) in row.iter_mut().enumerate() {
                *v = (y * 10 + i) as f32;
            }
        };
        let mut seq = vec![0.0; 40];
        let mut par = vec![0.0; 40];
        let parallel = KernelConfig {
            parallel: true,
            min_parallel_rows: 2,
        };
        assert!(!fill_rows(&mut seq, 4, &KernelConfig::sequential(), fill));
        assert!(fill_rows(&mut par, 4, &parallel, fill));
        assert_eq!(seq, par);
        assert_eq!(seq[37], 91.0);
    }

    #[test]
    fn test_fill_rows_empty_row() {
        let mut out: Vec<f32> = vec![];
        assert!(!fill_rows(&mut out, 0, &KernelConfig::default(), |_, _| {
            panic!("no rows to fill")
        }));
    }
}
