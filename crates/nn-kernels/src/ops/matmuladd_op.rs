// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Vector-matrix multiply-accumulate, the inner loop of [`crate::conv2d`].

/// Accumulates `input @ weights` into `output`:
/// `output[c] += Σ_i input[i] * weights[i * out_channels + c]`.
///
/// `weights` is a row-major `[in_channels, out_channels]` matrix where
/// `in_channels = input.len()` and `out_channels = output.len()`. Rows of
/// `weights` are visited in order and each row is a saxpy over `output`, so
/// the summation order for every output channel is `i = 0, 1, ..`.
///
/// `weights.len()` must equal `input.len() * output.len()`. This is only
/// checked in debug builds; release builds stop at whichever of `input` or
/// the complete weight rows runs out first.
///
/// # Examples
/// ```
/// use nn_kernels::matmuladd;
/// let mut out = [1.0, 1.0];
/// matmuladd(&[1.0, 2.0], &[1.0, 0.0, 0.0, 1.0], &mut out);
/// assert_eq!(out, [2.0, 3.0]);
/// ```
pub fn matmuladd(input: &[f32], weights: &[f32], output: &mut [f32]) {
    let out_channels = output.len();
    debug_assert_eq!(
        weights.len(),
        input.len() * out_channels,
        "matmuladd: weights must hold {} x {} values",
        input.len(),
        out_channels
    );
    if out_channels == 0 {
        return;
    }

    for (&x, w_row) in input.iter().zip(weights.chunks_exact(out_channels)) {
        for (o, &w) in output.iter_mut().zip(w_row) {
            *o += x * w;
        }
    }
}
