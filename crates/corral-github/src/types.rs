// SPDX-FileCopyrightText: 2026 Corral Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Serde model of the GitHub issues API response, limited to the fields
//! the source projects into its table.

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// One issue from the repository issue-listing endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct Issue {
    pub number: i64,
    pub title: String,
    pub user: IssueAuthor,
    pub state: String,
    pub comments: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Absent for issues opened with an empty description.
    pub body: Option<String>,
}

/// The actor who opened an issue. Only the login identifier is projected.
#[derive(Debug, Clone, Deserialize)]
pub struct IssueAuthor {
    pub login: String,
}

/// Error body returned by the API on non-2xx responses.
#[derive(Debug, Deserialize)]
pub struct ApiError {
    pub message: String,
}
