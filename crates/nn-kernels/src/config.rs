// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Kernel execution settings loaded from TOML files or constructed programmatically.
//!
//! # TOML Format
//! ```toml
//! parallel = true
//! min_parallel_rows = 16
//! ```

use crate::TensorError;
use std::path::Path;

/// Execution settings for the windowed operators.
///
/// Settings only affect scheduling. Output values are identical for every
/// configuration.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct KernelConfig {
    /// Whether output rows may be computed on the rayon thread pool.
    pub parallel: bool,
    /// Minimum number of output rows before the parallel path is used.
    pub min_parallel_rows: usize,
}

impl KernelConfig {
    /// Config that always runs on the calling thread.
    pub fn sequential() -> Self {
        Self {
            parallel: false,
            ..Self::default()
        }
    }

    /// Loads configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, TensorError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            TensorError::Config(format!("cannot read config '{}': {e}", path.display()))
        })?;
        Self::from_toml(&content)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, TensorError> {
        toml::from_str(toml_str)
            .map_err(|e| TensorError::Config(format!("TOML parse error: {e}")))
    }

    /// Serialises configuration to TOML.
    pub fn to_toml(&self) -> Result<String, TensorError> {
        toml::to_string_pretty(self)
            .map_err(|e| TensorError::Config(format!("TOML serialise error: {e}")))
    }

    /// Returns `true` if an operator producing `rows` output rows should
    /// split them across worker threads.
    pub fn use_parallel(&self, rows: usize) -> bool {
        self.parallel && rows >= self.min_parallel_rows.max(2)
    }
}

impl Default for KernelConfig {
    fn default() -> Self {
        Self {
            parallel: true,
            min_parallel_rows: 16,
        }
    }
}
