// SPDX-FileCopyrightText: 2026 Corral Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Driver registration for the `github_issues` source.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use corral_catalog::{optional_str_arg, required_str_arg, Driver, DriverRegistry};
use corral_core::{CorralError, DataSource};
use serde_yaml::{Mapping, Value};

use crate::client::GithubClientOptions;
use crate::source::{GithubIssuesSource, DRIVER_NAME};

/// Factory instantiating [`GithubIssuesSource`] from catalog args.
///
/// Recognized args: `organization` and `repo` (required), plus the client
/// options `token`, `state`, `labels`, `since`, and `per_page`.
pub struct GithubIssuesDriver;

impl Driver for GithubIssuesDriver {
    fn name(&self) -> &'static str {
        DRIVER_NAME
    }

    fn open(
        &self,
        args: &Mapping,
        metadata: Option<Mapping>,
    ) -> Result<Box<dyn DataSource>, CorralError> {
        let organization = required_str_arg(DRIVER_NAME, args, "organization")?;
        let repo = required_str_arg(DRIVER_NAME, args, "repo")?;
        let options = client_options(args)?;
        let source = GithubIssuesSource::new(organization, repo, Some(options), metadata)?;
        Ok(Box::new(source))
    }
}

/// Register the `github_issues` driver. The plugin's entry-point hook.
pub fn register(registry: &mut DriverRegistry) {
    registry.register(Arc::new(GithubIssuesDriver));
}

fn client_options(args: &Mapping) -> Result<GithubClientOptions, CorralError> {
    let mut options = GithubClientOptions {
        token: optional_str_arg(DRIVER_NAME, args, "token")?,
        state: optional_str_arg(DRIVER_NAME, args, "state")?,
        ..Default::default()
    };

    if let Some(since) = optional_str_arg(DRIVER_NAME, args, "since")? {
        let parsed = since.parse::<DateTime<Utc>>().map_err(|e| {
            CorralError::Catalog(format!(
                "driver '{DRIVER_NAME}': argument 'since' is not an RFC 3339 timestamp: {e}"
            ))
        })?;
        options.since = Some(parsed);
    }

    match args.get("labels") {
        None | Some(Value::Null) => {}
        Some(Value::Sequence(items)) => {
            for item in items {
                let label = item.as_str().ok_or_else(|| {
                    CorralError::Catalog(format!(
                        "driver '{DRIVER_NAME}': 'labels' entries must be strings, got {item:?}"
                    ))
                })?;
                options.labels.push(label.to_string());
            }
        }
        Some(other) => {
            return Err(CorralError::Catalog(format!(
                "driver '{DRIVER_NAME}': argument 'labels' must be a sequence, got {other:?}"
            )));
        }
    }

    match args.get("per_page") {
        None | Some(Value::Null) => {}
        Some(Value::Number(n)) if n.as_u64().is_some_and(|v| v <= u64::from(u32::MAX)) => {
            options.per_page = n.as_u64().map(|v| v as u32);
        }
        Some(other) => {
            return Err(CorralError::Catalog(format!(
                "driver '{DRIVER_NAME}': argument 'per_page' must be a positive integer, got {other:?}"
            )));
        }
    }

    Ok(options)
}
