// SPDX-FileCopyrightText: 2026 Corral Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Built-in drivers shipped with the catalog crate.

pub mod csv;

pub use csv::{CsvDriver, CsvSource};
