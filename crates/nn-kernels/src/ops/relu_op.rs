// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Rectified linear unit activation.

use crate::Tensor;

/// Applies `max(x, 0)` element-wise, returning a tensor of the same shape.
///
/// NaN inputs pass through unchanged.
pub fn relu(input: &Tensor) -> Tensor {
    input.map(relu_scalar)
}

#[inline(always)]
fn relu_scalar(x: f32) -> f32 {
    if x < 0.0 {
        0.0
    } else {
        x
    }
}
