// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Spatial max pooling.

use super::window::{expect_rank, fill_rows, rejected, spatial_kernel, spatial_strides, WindowGrid};
use crate::{KernelConfig, Shape, Tensor, TensorError};

const OP: &str = "max_pool";

/// Max-pools a `(rows, cols, channels)` tensor with the default [`KernelConfig`].
///
/// See [`max_pool_with`].
pub fn max_pool(
    input: &Tensor,
    kernel_size: &[usize],
    strides: &[usize],
) -> Result<Tensor, TensorError> {
    max_pool_with(input, kernel_size, strides, &KernelConfig::default())
}

/// Max-pools a `(rows, cols, channels)` tensor over `(height, width, 1)`
/// windows stepped by `(row_stride, col_stride, 1)`.
///
/// The output has shape `(⌈rows / row_stride⌉, ⌈cols / col_stride⌉, channels)`.
/// Output `(y, x)` takes, per channel, the maximum of the window anchored at
/// input `(y * row_stride, x * col_stride)`. Windows are clipped at the
/// borders rather than padded, so edge outputs see fewer taps. A NaN
/// anywhere in a window makes that output NaN.
///
/// # Errors
/// - [`TensorError::InvalidRank`] if `input`, `kernel_size` or `strides` is not rank 3.
/// - [`TensorError::UnsupportedKernelDepth`] if `kernel_size[2] != 1`.
/// - [`TensorError::UnsupportedStride`] if `strides[2] != 1`.
/// - [`TensorError::InvalidKernelSize`] / [`TensorError::InvalidStride`] for
///   zero spatial kernel sizes or strides.
pub fn max_pool_with(
    input: &Tensor,
    kernel_size: &[usize],
    strides: &[usize],
    config: &KernelConfig,
) -> Result<Tensor, TensorError> {
    let grid = validate(input.shape(), kernel_size, strides).map_err(rejected)?;

    let channels = input.shape().dims()[2];
    let out_shape = Shape::spatial(grid.out_rows, grid.out_cols, channels);
    let src = input.elements();
    let mut elements = vec![0.0f32; out_shape.num_elements()];

    let parallel = fill_rows(&mut elements, grid.out_cols * channels, config, |y, row| {
        let rows = grid.input_rows(y);
        for (x, pixel) in row.chunks_exact_mut(channels).enumerate() {
            let cols = grid.input_cols(x);
            for (c, out) in pixel.iter_mut().enumerate() {
                let mut max = f32::NEG_INFINITY;
                for y2 in rows.clone() {
                    for x2 in cols.clone() {
                        max = nan_max(max, src[(y2 * grid.cols + x2) * channels + c]);
                    }
                }
                *out = max;
            }
        }
    });

    tracing::debug!(
        "{OP}: {} -> {} (kernel {:?}, strides {:?}, parallel: {parallel})",
        input.shape(),
        out_shape,
        kernel_size,
        strides
    );
    Ok(Tensor::from_parts(out_shape, elements))
}

/// Maximum of two values where a NaN on either side wins.
#[inline(always)]
fn nan_max(max: f32, v: f32) -> f32 {
    if v.is_nan() || v > max {
        v
    } else {
        max
    }
}

fn validate(
    shape: &Shape,
    kernel_size: &[usize],
    strides: &[usize],
) -> Result<WindowGrid, TensorError> {
    expect_rank(OP, "input", shape, 3)?;
    if kernel_size.len() != 3 {
        return Err(TensorError::InvalidRank {
            op: OP,
            operand: "kernel_size",
            expected: 3,
            actual: kernel_size.len(),
        });
    }
    if kernel_size[2] != 1 {
        return Err(TensorError::UnsupportedKernelDepth {
            op: OP,
            depth: kernel_size[2],
        });
    }
    let kernel = spatial_kernel(OP, kernel_size[0], kernel_size[1])?;
    let strides = spatial_strides(OP, strides)?;

    let dims = shape.dims();
    Ok(WindowGrid::new(dims[0], dims[1], kernel, strides))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_3x3() -> Tensor {
        Tensor::new(
            Shape::spatial(3, 3, 1),
            vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0],
        )
        .unwrap()
    }

    fn ramp(shape: Shape) -> Tensor {
        let n = shape.num_elements();
        // Scrambled but deterministic values, including negatives.
        let values = (0..n).map(|i| ((i * 37 % 101) as f32) - 50.0).collect();
        Tensor::new(shape, values).unwrap()
    }

    #[test]
    fn test_max_pool_identity() {
        let input = ramp(Shape::spatial(4, 5, 3));
        let output = max_pool(&input, &[1, 1, 1], &[1, 1, 1]).unwrap();
        assert_eq!(output, input);
    }

    #[test]
    fn test_max_pool_border_windows_shrink() {
        let output = max_pool(&grid_3x3(), &[3, 3, 1], &[1, 1, 1]).unwrap();
        assert_eq!(output.shape(), &Shape::spatial(3, 3, 1));
        // Corner (0, 0) sees only 1, 2, 4, 5.
        assert_eq!(output.get(&[0, 0, 0]), Some(5.0));
        assert_eq!(
            output.elements(),
            &[5.0, 6.0, 6.0, 8.0, 9.0, 9.0, 8.0, 9.0, 9.0]
        );
    }

    #[test]
    fn test_max_pool_even_kernel_stride_2() {
        let input = Tensor::new(
            Shape::spatial(4, 4, 1),
            (0..16).map(|i| i as f32).collect(),
        )
        .unwrap();
        let output = max_pool(&input, &[2, 2, 1], &[2, 2, 1]).unwrap();
        assert_eq!(output.shape(), &Shape::spatial(2, 2, 1));
        assert_eq!(output.elements(), &[5.0, 7.0, 13.0, 15.0]);
    }

    #[test]
    fn test_max_pool_output_size_rounds_up() {
        let input = ramp(Shape::spatial(5, 5, 1));
        let output = max_pool(&input, &[1, 1, 1], &[2, 2, 1]).unwrap();
        assert_eq!(output.shape(), &Shape::spatial(3, 3, 1));
        // 1x1 windows sample input rows/cols 0, 2, 4.
        assert_eq!(output.get(&[2, 1, 0]), input.get(&[4, 2, 0]));
    }

    #[test]
    fn test_max_pool_all_negative() {
        let input = Tensor::new(Shape::spatial(2, 2, 1), vec![-3.0, -1.0, -2.0, -4.0]).unwrap();
        let output = max_pool(&input, &[2, 2, 1], &[2, 2, 1]).unwrap();
        assert_eq!(output.elements(), &[-1.0]);
    }

    #[test]
    fn test_max_pool_nan_propagates() {
        for values in [vec![f32::NAN, 1.0], vec![1.0, f32::NAN]] {
            let input = Tensor::new(Shape::spatial(1, 2, 1), values).unwrap();
            let output = max_pool(&input, &[1, 2, 1], &[1, 2, 1]).unwrap();
            assert!(output.elements()[0].is_nan());
        }

        // Only the window containing the NaN is affected.
        let input = Tensor::new(Shape::spatial(1, 4, 1), vec![f32::NAN, 1.0, 2.0, 3.0]).unwrap();
        let output = max_pool(&input, &[1, 2, 1], &[1, 2, 1]).unwrap();
        assert!(output.elements()[0].is_nan());
        assert_eq!(output.elements()[1], 3.0);
    }

    #[test]
    fn test_max_pool_channels_independent() {
        let input = Tensor::new(Shape::spatial(1, 2, 2), vec![1.0, 10.0, 2.0, 5.0]).unwrap();
        let output = max_pool(&input, &[1, 2, 1], &[1, 2, 1]).unwrap();
        assert_eq!(output.shape(), &Shape::spatial(1, 1, 2));
        assert_eq!(output.elements(), &[2.0, 10.0]);
    }

    #[test]
    fn test_max_pool_parallel_matches_sequential() {
        let input = ramp(Shape::spatial(40, 9, 3));
        let parallel = KernelConfig {
            parallel: true,
            min_parallel_rows: 2,
        };
        let a = max_pool_with(&input, &[3, 2, 1], &[1, 2, 1], &parallel).unwrap();
        let b = max_pool_with(&input, &[3, 2, 1], &[1, 2, 1], &KernelConfig::sequential()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_max_pool_rejects_bad_rank() {
        let input = Tensor::zeros(Shape::matrix(3, 3));
        let err = max_pool(&input, &[1, 1, 1], &[1, 1, 1]).unwrap_err();
        assert!(matches!(
            err,
            TensorError::InvalidRank { operand: "input", expected: 3, actual: 2, .. }
        ));

        let err = max_pool(&grid_3x3(), &[1, 1], &[1, 1, 1]).unwrap_err();
        assert!(matches!(err, TensorError::InvalidRank { operand: "kernel_size", .. }));

        let err = max_pool(&grid_3x3(), &[1, 1, 1], &[1, 1, 1, 1]).unwrap_err();
        assert!(matches!(err, TensorError::InvalidRank { operand: "strides", .. }));
    }

    #[test]
    fn test_max_pool_rejects_depth() {
        let err = max_pool(&grid_3x3(), &[2, 2, 2], &[1, 1, 1]).unwrap_err();
        assert!(matches!(err, TensorError::UnsupportedKernelDepth { depth: 2, .. }));

        let err = max_pool(&grid_3x3(), &[2, 2, 1], &[1, 1, 3]).unwrap_err();
        assert!(matches!(err, TensorError::UnsupportedStride { axis: 2, stride: 3, .. }));
        assert!(err.to_string().contains("max_pool"));
    }

    #[test]
    fn test_max_pool_rejects_zero_sizes() {
        let err = max_pool(&grid_3x3(), &[0, 2, 1], &[1, 1, 1]).unwrap_err();
        assert!(matches!(err, TensorError::InvalidKernelSize { axis: 0, .. }));

        let err = max_pool(&grid_3x3(), &[2, 2, 1], &[1, 0, 1]).unwrap_err();
        assert!(matches!(err, TensorError::InvalidStride { axis: 1, .. }));
    }

    #[test]
    fn test_max_pool_empty_channels() {
        let input = Tensor::zeros(Shape::spatial(3, 3, 0));
        let output = max_pool(&input, &[2, 2, 1], &[2, 2, 1]).unwrap();
        assert_eq!(output.shape(), &Shape::spatial(2, 2, 0));
        assert!(output.is_empty());
    }
}
