// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # nn-kernels
//!
//! Activation, pooling and convolution kernels for running pre-trained
//! convolutional networks on edge devices.
//!
//! This crate provides:
//! - [`Tensor`] — an immutable, row-major `f32` tensor.
//! - [`Shape`] — dimension descriptors with row-major stride arithmetic.
//! - Elementwise operators: [`relu`], [`softmax`].
//! - Windowed operators over `(rows, cols, channels)` tensors:
//!   [`max_pool`], [`conv2d`].
//! - The [`matmuladd`] vector-matrix accumulate used by `conv2d`.
//! - [`KernelConfig`] — optional tuning for row-parallel execution.
//!
//! # Design Goals
//! - Operators are pure: inputs are borrowed, every call returns a freshly
//!   allocated tensor.
//! - Malformed calls (wrong ranks, unsupported strides, channel mismatches)
//!   are rejected up front with a [`TensorError`] before any work is done.
//! - Parallel and sequential execution produce bit-identical results.
//!
//! # Example
//! ```
//! use nn_kernels::{conv2d, max_pool, relu, softmax, Shape, Tensor};
//!
//! let image = Tensor::new(Shape::spatial(2, 2, 1), vec![1.0, -2.0, 3.0, 4.0]).unwrap();
//! let filter = Tensor::new(Shape::filter(1, 1, 1, 2), vec![1.0, -1.0]).unwrap();
//!
//! let features = relu(&conv2d(&image, &filter, &[1, 1, 1]).unwrap());
//! let pooled = max_pool(&features, &[2, 2, 1], &[2, 2, 1]).unwrap();
//! let probs = softmax(&pooled);
//! assert_eq!(probs.shape(), &Shape::spatial(1, 1, 2));
//! ```

mod config;
mod error;
mod ops;
mod shape;
mod tensor;

pub use config::KernelConfig;
pub use error::TensorError;
pub use ops::{
    ceil_div, conv2d, conv2d_with, matmuladd, max_pool, max_pool_with, relu, softmax,
};
pub use shape::Shape;
pub use tensor::Tensor;
