// SPDX-FileCopyrightText: 2026 Corral Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tutorial plugin: a GitHub repository's issue list as a Corral data source.
//!
//! [`GithubIssuesSource`] presents the issue-listing endpoint as a fixed
//! eight-column, single-partition dataframe. [`register`] adds the
//! `github_issues` driver to a [`corral_catalog::DriverRegistry`] so
//! catalogs can instantiate it by name.

pub mod client;
pub mod driver;
pub mod source;
pub mod types;

pub use client::{GithubClient, GithubClientOptions};
pub use driver::{register, GithubIssuesDriver};
pub use source::{GithubIssuesSource, DRIVER_NAME};
