// SPDX-FileCopyrightText: 2026 Corral Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the GitHub issue-listing endpoint.
//!
//! Provides [`GithubClient`] which handles header construction, query
//! options, and `Link`-header pagination. Failures propagate to the caller
//! on the first error; there is no retry and no partial result.

use std::time::Duration;

use chrono::{DateTime, Utc};
use corral_core::CorralError;
use reqwest::header::{self, HeaderMap, HeaderValue};
use tracing::debug;

use crate::types::{ApiError, Issue};

/// Base URL for the GitHub REST API.
const API_BASE_URL: &str = "https://api.github.com";

const USER_AGENT: &str = concat!("corral-github/", env!("CARGO_PKG_VERSION"));

/// Query options for the issue-listing call.
///
/// An explicit owned structure copied at construction time, so callers
/// never share mutable option state between sources.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GithubClientOptions {
    /// Bearer token; the endpoint also works unauthenticated at a lower
    /// rate limit.
    pub token: Option<String>,
    /// Issue state filter (`open`, `closed`, `all`).
    pub state: Option<String>,
    /// Label names the listed issues must all carry.
    pub labels: Vec<String>,
    /// Only issues updated at or after this instant.
    pub since: Option<DateTime<Utc>>,
    /// Page size for the underlying pagination.
    pub per_page: Option<u32>,
}

/// HTTP client for GitHub API communication.
#[derive(Debug, Clone)]
pub struct GithubClient {
    client: reqwest::Client,
    options: GithubClientOptions,
    base_url: String,
}

impl GithubClient {
    /// Build the client with default headers. Performs no network I/O.
    pub fn new(options: GithubClientOptions) -> Result<Self, CorralError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "x-github-api-version",
            HeaderValue::from_static("2022-11-28"),
        );
        if let Some(token) = &options.token {
            let mut value =
                HeaderValue::from_str(&format!("Bearer {token}")).map_err(|e| {
                    CorralError::Catalog(format!("invalid API token header value: {e}"))
                })?;
            value.set_sensitive(true);
            headers.insert(header::AUTHORIZATION, value);
        }

        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| CorralError::Source {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            options,
            base_url: API_BASE_URL.to_string(),
        })
    }

    pub fn options(&self) -> &GithubClientOptions {
        &self.options
    }

    /// Overrides the base URL (for testing with wiremock).
    #[cfg(test)]
    pub(crate) fn with_base_url(mut self, url: String) -> Self {
        self.base_url = url;
        self
    }

    fn query_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(state) = &self.options.state {
            params.push(("state", state.clone()));
        }
        if !self.options.labels.is_empty() {
            params.push(("labels", self.options.labels.join(",")));
        }
        if let Some(since) = &self.options.since {
            params.push(("since", since.to_rfc3339()));
        }
        if let Some(per_page) = self.options.per_page {
            params.push(("per_page", per_page.to_string()));
        }
        params
    }

    /// List all issues of a repository, following pagination to exhaustion.
    ///
    /// One logical fetch: any network or API failure surfaces immediately
    /// as [`CorralError::Source`].
    pub async fn list_issues(&self, owner: &str, repo: &str) -> Result<Vec<Issue>, CorralError> {
        let mut url = format!("{}/repos/{owner}/{repo}/issues", self.base_url);
        let mut params = Some(self.query_params());
        let mut issues = Vec::new();

        loop {
            let mut request = self.client.get(&url);
            // Continuation URLs from the Link header already carry the
            // query string.
            if let Some(params) = params.take() {
                request = request.query(&params);
            }

            let response = request.send().await.map_err(|e| CorralError::Source {
                message: format!("HTTP request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

            let status = response.status();
            debug!(status = %status, url = %url, "issue list response received");

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                let message = if let Ok(api_err) = serde_json::from_str::<ApiError>(&body) {
                    format!("GitHub API error ({status}): {}", api_err.message)
                } else {
                    format!("GitHub API returned {status}: {body}")
                };
                return Err(CorralError::Source {
                    message,
                    source: None,
                });
            }

            let next = response
                .headers()
                .get(header::LINK)
                .and_then(|v| v.to_str().ok())
                .and_then(parse_next_link);

            let page: Vec<Issue> = response.json().await.map_err(|e| CorralError::Source {
                message: format!("failed to parse issue list: {e}"),
                source: Some(Box::new(e)),
            })?;
            issues.extend(page);

            match next {
                Some(next_url) => url = next_url,
                None => break,
            }
        }

        debug!(count = issues.len(), owner, repo, "issues fetched");
        Ok(issues)
    }
}

/// Extract the `rel="next"` target from a `Link` header value.
fn parse_next_link(header: &str) -> Option<String> {
    header.split(',').find_map(|part| {
        let (target, params) = part.split_once(';')?;
        if !params.contains(r#"rel="next""#) {
            return None;
        }
        let url = target.trim().strip_prefix('<')?.strip_suffix('>')?;
        Some(url.to_string())
    })
}
