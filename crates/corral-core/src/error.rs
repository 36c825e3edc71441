// SPDX-FileCopyrightText: 2026 Corral Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Corral data catalog toolkit.

use thiserror::Error;

/// The primary error type used across catalog loading, driver resolution,
/// and data-source operations.
#[derive(Debug, Error)]
pub enum CorralError {
    /// Catalog load errors (unreadable file, malformed YAML, failed validation).
    #[error("catalog error: {0}")]
    Catalog(String),

    /// Named entry missing from a loaded catalog.
    #[error("entry not found: {catalog}/{name}")]
    EntryNotFound { catalog: String, name: String },

    /// Requested catalog was not registered under the given name.
    #[error("catalog not found: {name}")]
    CatalogNotFound { name: String },

    /// Driver name not present in the registry at resolution time.
    #[error("driver not found: {name}")]
    DriverNotFound { name: String },

    /// Data-source errors (network failure, API error, unreadable data).
    #[error("source error: {message}")]
    Source {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Partition index outside the source's declared partition count.
    #[error("invalid partition {index}: source has {npartitions} partition(s)")]
    InvalidPartition { index: usize, npartitions: usize },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}
