// SPDX-FileCopyrightText: 2026 Corral Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Single-partition tabular source over a repository's issue list.

use async_trait::async_trait;
use corral_core::{CorralError, DType, DataSource, Field, Schema, Table, Value};
use serde_yaml::Mapping;
use tokio::sync::OnceCell;
use tracing::debug;

use crate::client::{GithubClient, GithubClientOptions};

/// Driver name the source registers under.
pub const DRIVER_NAME: &str = "github_issues";

/// A GitHub repository's issue list as a dataframe source.
///
/// Construction stores configuration and builds the HTTP client; no
/// network I/O happens before the first `read_partition` call. The schema
/// is fixed at eight columns and cached on first request; every read
/// performs one fresh remote fetch.
pub struct GithubIssuesSource {
    organization: String,
    repo: String,
    metadata: Option<Mapping>,
    client: GithubClient,
    schema: OnceCell<Schema>,
}

impl GithubIssuesSource {
    pub fn new(
        organization: impl Into<String>,
        repo: impl Into<String>,
        options: Option<GithubClientOptions>,
        metadata: Option<Mapping>,
    ) -> Result<Self, CorralError> {
        let client = GithubClient::new(options.unwrap_or_default())?;
        Ok(Self {
            organization: organization.into(),
            repo: repo.into(),
            metadata,
            client,
            schema: OnceCell::new(),
        })
    }

    pub fn organization(&self) -> &str {
        &self.organization
    }

    pub fn repo(&self) -> &str {
        &self.repo
    }

    pub fn metadata(&self) -> Option<&Mapping> {
        self.metadata.as_ref()
    }

    /// Points the underlying client at a mock server.
    #[cfg(test)]
    fn with_base_url(mut self, url: String) -> Self {
        self.client = self.client.with_base_url(url);
        self
    }

    fn issue_schema() -> Schema {
        Schema::new(
            vec![
                Field::new("number", DType::Int),
                Field::new("title", DType::Str),
                Field::new("user", DType::Str),
                Field::new("state", DType::Str),
                Field::new("comments", DType::Int),
                Field::new("created_at", DType::Datetime),
                Field::new("updated_at", DType::Datetime),
                Field::new("body", DType::Str),
            ],
            1,
        )
    }
}

#[async_trait]
impl DataSource for GithubIssuesSource {
    fn name(&self) -> &str {
        DRIVER_NAME
    }

    async fn schema(&self) -> Result<Schema, CorralError> {
        let schema = self
            .schema
            .get_or_init(|| async { Self::issue_schema() })
            .await;
        Ok(schema.clone())
    }

    async fn read_partition(&self, index: usize) -> Result<Table, CorralError> {
        let schema = self.schema().await?;
        if index >= schema.npartitions() {
            return Err(CorralError::InvalidPartition {
                index,
                npartitions: schema.npartitions(),
            });
        }

        let issues = self
            .client
            .list_issues(&self.organization, &self.repo)
            .await?;

        let mut table = Table::new(schema);
        for issue in issues {
            table.push_row(vec![
                Value::Int(issue.number),
                Value::Str(issue.title),
                // The author is projected down to its login identifier.
                Value::Str(issue.user.login),
                Value::Str(issue.state),
                Value::Int(issue.comments),
                Value::Datetime(issue.created_at),
                Value::Datetime(issue.updated_at),
                issue.body.map(Value::Str).unwrap_or(Value::Null),
            ])?;
        }

        debug!(
            organization = %self.organization,
            repo = %self.repo,
            rows = table.num_rows(),
            "issue table materialized"
        );
        Ok(table)
    }
}
