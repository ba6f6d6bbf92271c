// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Softmax activation operation.

use crate::Tensor;

/// Computes softmax over the whole tensor: `output[i] = exp(x[i]) / Σ_j exp(x[j])`.
///
/// Normalisation is global. Every element of the flattened tensor shares a
/// single denominator regardless of rank, so a `[2, 3]` input yields six
/// values summing to 1, not two rows summing to 1 each.
///
/// No maximum is subtracted before exponentiation: inputs above roughly 88
/// overflow `f32::exp` to infinity and the result contains NaN. Such values
/// are returned as-is.
pub fn softmax(input: &Tensor) -> Tensor {
    let exps = input.exp();
    let sum = exps.sum();
    exps.map(|e| e / sum)
}
