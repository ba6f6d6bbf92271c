// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for tensor construction and operator preconditions.

use crate::Shape;

/// Errors that can occur when building tensors or calling operators.
///
/// Every variant describes a malformed call rather than a data-dependent
/// failure; operators check all of them before allocating their output.
#[derive(Debug, thiserror::Error)]
pub enum TensorError {
    /// The element buffer does not match the number of elements the shape describes.
    #[error("element count mismatch for shape {shape}: expected {expected} elements, got {actual}")]
    ElementCountMismatch {
        shape: Shape,
        expected: usize,
        actual: usize,
    },

    /// The shape describes more elements than fit in a `usize`.
    #[error("element count of shape {shape} overflows usize")]
    ShapeOverflow { shape: Shape },

    /// An operand has the wrong number of dimensions.
    #[error("{op}: `{operand}` must have rank {expected}, got {actual}")]
    InvalidRank {
        op: &'static str,
        operand: &'static str,
        expected: usize,
        actual: usize,
    },

    /// A stride along an axis the operator cannot step over.
    #[error("{op}: stride {stride} on axis {axis} is not supported (must be 1)")]
    UnsupportedStride {
        op: &'static str,
        axis: usize,
        stride: usize,
    },

    /// A spatial stride of zero.
    #[error("{op}: stride on axis {axis} must be at least 1")]
    InvalidStride { op: &'static str, axis: usize },

    /// A pooling window that spans more than one channel.
    #[error("{op}: kernel depth {depth} is not supported (must be 1)")]
    UnsupportedKernelDepth { op: &'static str, depth: usize },

    /// A kernel or filter with a zero spatial extent.
    #[error("{op}: kernel size on axis {axis} must be at least 1")]
    InvalidKernelSize { op: &'static str, axis: usize },

    /// The input channel count does not match the filter's input-channel axis.
    #[error("{op}: input has {input} channels but filter expects {filter}")]
    ChannelMismatch {
        op: &'static str,
        input: usize,
        filter: usize,
    },

    /// Configuration could not be read or parsed.
    #[error("configuration error: {0}")]
    Config(String),
}
