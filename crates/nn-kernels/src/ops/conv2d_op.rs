// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! 2-D convolution (cross-correlation) over `(rows, cols, channels)` tensors.

use super::matmuladd;
use super::window::{expect_rank, fill_rows, rejected, spatial_kernel, spatial_strides, WindowGrid};
use crate::{KernelConfig, Shape, Tensor, TensorError};

const OP: &str = "conv2d";

/// Convolves a `(rows, cols, in_channels)` tensor with the default [`KernelConfig`].
///
/// See [`conv2d_with`].
pub fn conv2d(input: &Tensor, filter: &Tensor, strides: &[usize]) -> Result<Tensor, TensorError> {
    conv2d_with(input, filter, strides, &KernelConfig::default())
}

/// Convolves a `(rows, cols, in_channels)` tensor with a
/// `(height, width, in_channels, out_channels)` filter.
///
/// The filter is applied without flipping and without bias. Output `(y, x)`
/// is the sum, over every in-bounds input position `(y2, x2)` of the window
/// anchored at `(y * row_stride, x * col_stride)`, of the input channel
/// vector times that tap's `in_channels x out_channels` weight matrix.
/// Out-of-bounds taps are skipped, not zero-padded. Taps are accumulated in
/// row-major order, and the result is the same for every [`KernelConfig`].
///
/// Output shape: `(⌈rows / row_stride⌉, ⌈cols / col_stride⌉, out_channels)`.
///
/// # Errors
/// - [`TensorError::InvalidRank`] if `input` is not rank 3, `filter` not rank 4
///   or `strides` not rank 3.
/// - [`TensorError::UnsupportedStride`] if `strides[2] != 1`.
/// - [`TensorError::InvalidStride`] for a zero spatial stride.
/// - [`TensorError::ChannelMismatch`] if `input.shape()[2] != filter.shape()[2]`.
/// - [`TensorError::InvalidKernelSize`] if the filter has zero height or width.
pub fn conv2d_with(
    input: &Tensor,
    filter: &Tensor,
    strides: &[usize],
    config: &KernelConfig,
) -> Result<Tensor, TensorError> {
    let grid = validate(input.shape(), filter.shape(), strides).map_err(rejected)?;

    let filter_dims = filter.shape().dims();
    let (filter_width, in_channels, out_channels) = (filter_dims[1], filter_dims[2], filter_dims[3]);
    let tap_len = in_channels * out_channels;

    let out_shape = Shape::spatial(grid.out_rows, grid.out_cols, out_channels);
    let src = input.elements();
    let weights = filter.elements();
    let mut elements = vec![0.0f32; out_shape.num_elements()];

    let parallel = fill_rows(&mut elements, grid.out_cols * out_channels, config, |y, row| {
        let rows = grid.input_rows(y);
        for (x, acc) in row.chunks_exact_mut(out_channels).enumerate() {
            let cols = grid.input_cols(x);
            for y2 in rows.clone() {
                let ky = grid.kernel_row(y, y2);
                for x2 in cols.clone() {
                    let kx = grid.kernel_col(x, x2);
                    let pixel = (y2 * grid.cols + x2) * in_channels;
                    let tap = (ky * filter_width + kx) * tap_len;
                    matmuladd(
                        &src[pixel..pixel + in_channels],
                        &weights[tap..tap + tap_len],
                        acc,
                    );
                }
            }
        }
    });

    tracing::debug!(
        "{OP}: {} * {} -> {} (strides {:?}, parallel: {parallel})",
        input.shape(),
        filter.shape(),
        out_shape,
        strides
    );
    Ok(Tensor::from_parts(out_shape, elements))
}

fn validate(shape: &Shape, filter: &Shape, strides: &[usize]) -> Result<WindowGrid, TensorError> {
    expect_rank(OP, "input", shape, 3)?;
    expect_rank(OP, "filter", filter, 4)?;
    let strides = spatial_strides(OP, strides)?;

    let dims = shape.dims();
    let filter_dims = filter.dims();
    if dims[2] != filter_dims[2] {
        return Err(TensorError::ChannelMismatch {
            op: OP,
            input: dims[2],
            filter: filter_dims[2],
        });
    }
    let kernel = spatial_kernel(OP, filter_dims[0], filter_dims[1])?;

    Ok(WindowGrid::new(dims[0], dims[1], kernel, strides))
}
