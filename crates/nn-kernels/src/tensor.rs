// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Core tensor type.

use crate::{Shape, TensorError};

/// An owned, immutable n-dimensional `f32` tensor.
///
/// `Tensor` is the value passed between operators. Its element count always
/// equals `shape.num_elements()`; constructors enforce this and no method
/// mutates the buffer afterwards. Operators never write into their inputs,
/// they allocate a new tensor for every result.
///
/// # Memory Layout
/// Elements are stored in row-major (C) order, last dimension fastest.
#[derive(Debug, Clone, PartialEq)]
pub struct Tensor {
    shape: Shape,
    elements: Vec<f32>,
}

impl Tensor {
    /// Creates a tensor from a shape and its row-major elements.
    ///
    /// # Errors
    /// Returns [`TensorError::ShapeOverflow`] if the shape's element count
    /// does not fit in a `usize`, and [`TensorError::ElementCountMismatch`]
    /// if `elements.len()` differs from `shape.num_elements()`.
    ///
    /// # Examples
    /// ```
    /// use nn_kernels::{Shape, Tensor};
    /// let t = Tensor::new(Shape::vector(3), vec![1.0, 2.0, 3.0]).unwrap();
    /// assert_eq!(t.elements(), &[1.0, 2.0, 3.0]);
    /// assert!(Tensor::new(Shape::vector(3), vec![1.0]).is_err());
    /// ```
    pub fn new(shape: Shape, elements: Vec<f32>) -> Result<Self, TensorError> {
        let Some(expected) = shape.checked_num_elements() else {
            return Err(TensorError::ShapeOverflow { shape });
        };
        if elements.len() != expected {
            return Err(TensorError::ElementCountMismatch {
                shape,
                expected,
                actual: elements.len(),
            });
        }
        Ok(Self { shape, elements })
    }

    /// Creates a new tensor filled with zeros.
    pub fn zeros(shape: Shape) -> Self {
        Self::filled(shape, 0.0)
    }

    /// Creates a new tensor with every element set to `value`.
    pub fn filled(shape: Shape, value: f32) -> Self {
        let elements = vec![value; shape.num_elements()];
        Self { shape, elements }
    }

    /// Wraps an operator's output buffer. The caller guarantees the length.
    pub(crate) fn from_parts(shape: Shape, elements: Vec<f32>) -> Self {
        debug_assert_eq!(elements.len(), shape.num_elements());
        Self { shape, elements }
    }

    /// Returns the tensor's shape.
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Returns the elements in row-major order.
    pub fn elements(&self) -> &[f32] {
        &self.elements
    }

    /// Consumes the tensor and returns its element buffer.
    pub fn into_elements(self) -> Vec<f32> {
        self.elements
    }

    /// Returns the number of elements.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns `true` if the tensor holds no elements.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Returns the element at a multi-index, or `None` if it is out of range.
    pub fn get(&self, index: &[usize]) -> Option<f32> {
        self.shape.offset(index).map(|i| self.elements[i])
    }

    /// Applies `f` to every element, returning a new tensor of the same shape.
    pub fn map(&self, f: impl Fn(f32) -> f32) -> Tensor {
        Self {
            shape: self.shape.clone(),
            elements: self.elements.iter().map(|&x| f(x)).collect(),
        }
    }

    /// Elementwise natural exponential.
    pub fn exp(&self) -> Tensor {
        self.map(f32::exp)
    }

    /// Sums every element, folding left to right in storage order.
    pub fn sum(&self) -> f32 {
        self.elements.iter().fold(0.0, |acc, &x| acc + x)
    }
}
