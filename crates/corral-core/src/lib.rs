// SPDX-FileCopyrightText: 2026 Corral Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Corral data catalog toolkit.
//!
//! This crate provides the data-source trait, the tabular data model
//! (schema, table, values), and the error type shared by the catalog
//! loader and every driver crate.

pub mod error;
pub mod source;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::CorralError;
pub use source::{Container, DataSource};
pub use types::{Column, DType, Field, Schema, Table, Value};
