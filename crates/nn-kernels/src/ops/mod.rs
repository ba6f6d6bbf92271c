// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Tensor operators.
//!
//! Every operator borrows its inputs and returns a newly allocated tensor.
//! The windowed operators (`max_pool`, `conv2d`) validate all preconditions
//! before allocating, then fill their output row by row, optionally on the
//! rayon thread pool.

mod conv2d_op;
mod matmuladd_op;
mod max_pool_op;
mod relu_op;
mod softmax_op;
mod window;

pub use conv2d_op::{conv2d, conv2d_with};
pub use matmuladd_op::matmuladd;
pub use max_pool_op::{max_pool, max_pool_with};
pub use relu_op::relu;
pub use softmax_op::softmax;
pub use window::ceil_div;
