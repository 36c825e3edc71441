// SPDX-FileCopyrightText: 2026 Corral Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Serde model of the YAML catalog document.
//!
//! A catalog file declares named source entries, each binding a driver name
//! to constructor arguments:
//!
//! ```yaml
//! metadata:
//!   version: 1
//! sources:
//!   sea_ice:
//!     description: Northern hemisphere sea ice extent
//!     driver: csv
//!     args:
//!       urlpath: '{{ CATALOG_DIR }}/sea-ice.csv'
//! ```

use std::collections::BTreeMap;

use corral_core::CorralError;
use serde::Deserialize;
use serde_yaml::{Mapping, Value};

/// Top-level catalog document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogFile {
    #[serde(default)]
    pub metadata: CatalogMetadata,
    #[serde(default)]
    pub sources: BTreeMap<String, EntrySpec>,
}

/// The optional `metadata` section of a catalog file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CatalogMetadata {
    #[serde(default)]
    pub version: Option<u32>,
    #[serde(default)]
    pub description: Option<String>,
}

/// One named source definition within a catalog.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EntrySpec {
    /// Registered driver name (e.g. `csv`, `github_issues`).
    pub driver: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Constructor arguments handed to the driver.
    #[serde(default)]
    pub args: Mapping,
    /// Free-form metadata attached to the instantiated source.
    #[serde(default)]
    pub metadata: Mapping,
}

/// Placeholder in string args replaced by the catalog file's directory.
pub const CATALOG_DIR_TOKEN: &str = "{{ CATALOG_DIR }}";

/// Parse and validate a catalog document.
///
/// Malformed YAML, an empty source list, or an entry without a driver name
/// are all fatal load errors.
pub fn parse_catalog(text: &str) -> Result<CatalogFile, CorralError> {
    let file: CatalogFile = serde_yaml::from_str(text)
        .map_err(|e| CorralError::Catalog(format!("malformed catalog YAML: {e}")))?;

    if file.sources.is_empty() {
        return Err(CorralError::Catalog(
            "catalog declares no sources".to_string(),
        ));
    }
    for (name, spec) in &file.sources {
        if spec.driver.is_empty() {
            return Err(CorralError::Catalog(format!(
                "source '{name}' has an empty driver name"
            )));
        }
    }
    Ok(file)
}

/// Replace [`CATALOG_DIR_TOKEN`] in every string argument of the entry.
///
/// Packaged catalogs reference data files shipped next to them through this
/// token; substitution happens once at load time.
pub(crate) fn substitute_catalog_dir(spec: &mut EntrySpec, dir: &str) {
    let args = std::mem::take(&mut spec.args);
    spec.args = args
        .into_iter()
        .map(|(key, value)| (key, substitute_value(value, dir)))
        .collect();
}

fn substitute_value(value: Value, dir: &str) -> Value {
    match value {
        Value::String(s) if s.contains(CATALOG_DIR_TOKEN) => {
            Value::String(s.replace(CATALOG_DIR_TOKEN, dir))
        }
        Value::Sequence(items) => Value::Sequence(
            items
                .into_iter()
                .map(|item| substitute_value(item, dir))
                .collect(),
        ),
        Value::Mapping(map) => Value::Mapping(
            map.into_iter()
                .map(|(key, item)| (key, substitute_value(item, dir)))
                .collect(),
        ),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEA_CATALOG: &str = r#"
metadata:
  version: 1
sources:
  sea_ice:
    description: Northern hemisphere sea ice extent
    driver: csv
    args:
      urlpath: '{{ CATALOG_DIR }}/sea-ice.csv'
"#;

    #[test]
    fn parse_valid_catalog() {
        let file = parse_catalog(SEA_CATALOG).unwrap();
        assert_eq!(file.metadata.version, Some(1));
        assert_eq!(file.sources.len(), 1);

        let spec = &file.sources["sea_ice"];
        assert_eq!(spec.driver, "csv");
        assert_eq!(
            spec.description.as_deref(),
            Some("Northern hemisphere sea ice extent")
        );
        assert_eq!(
            spec.args.get("urlpath").and_then(Value::as_str),
            Some("{{ CATALOG_DIR }}/sea-ice.csv")
        );
    }

    #[test]
    fn parse_malformed_yaml_is_fatal() {
        let result = parse_catalog("sources: [not, a, mapping");
        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("malformed catalog YAML"), "got: {err}");
    }

    #[test]
    fn parse_rejects_empty_source_list() {
        let result = parse_catalog("metadata:\n  version: 1\n");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("no sources"));
    }

    #[test]
    fn parse_rejects_empty_driver() {
        let text = r#"
sources:
  bad:
    driver: ''
"#;
        let result = parse_catalog(text);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("empty driver name"));
    }

    #[test]
    fn catalog_dir_substitution_reaches_nested_args() {
        let text = r#"
sources:
  nested:
    driver: csv
    args:
      urlpath: '{{ CATALOG_DIR }}/data.csv'
      options:
        paths:
          - '{{ CATALOG_DIR }}/a.csv'
          - plain
"#;
        let mut file = parse_catalog(text).unwrap();
        let spec = file.sources.get_mut("nested").unwrap();
        substitute_catalog_dir(spec, "/srv/catalogs");

        assert_eq!(
            spec.args.get("urlpath").and_then(Value::as_str),
            Some("/srv/catalogs/data.csv")
        );
        let options = spec.args.get("options").and_then(Value::as_mapping).unwrap();
        let paths = options.get("paths").and_then(Value::as_sequence).unwrap();
        assert_eq!(paths[0].as_str(), Some("/srv/catalogs/a.csv"));
        assert_eq!(paths[1].as_str(), Some("plain"));
    }
}
