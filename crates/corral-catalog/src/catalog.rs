// SPDX-FileCopyrightText: 2026 Corral Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Loaded catalogs and their named entries.
//!
//! A [`Catalog`] is parsed once from a YAML document and immutable
//! thereafter. Entries are factories: resolving one through a
//! [`DriverRegistry`] instantiates a concrete data source.

use std::collections::BTreeMap;
use std::path::Path;

use corral_core::{CorralError, DataSource};
use tracing::debug;

use crate::model::{self, CatalogMetadata, EntrySpec};
use crate::registry::DriverRegistry;

/// A named registry of data-source definitions loaded from a YAML document.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    name: String,
    metadata: CatalogMetadata,
    entries: BTreeMap<String, CatalogEntry>,
}

/// One named entry of a loaded catalog.
///
/// Two lookups of the same entry yield equal descriptors; opening the entry
/// through a registry produces an identically configured source each time.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogEntry {
    name: String,
    spec: EntrySpec,
}

impl CatalogEntry {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Driver name this entry is bound to.
    pub fn driver(&self) -> &str {
        &self.spec.driver
    }

    pub fn description(&self) -> Option<&str> {
        self.spec.description.as_deref()
    }

    /// Instantiate the data source this entry describes.
    pub fn open(&self, registry: &DriverRegistry) -> Result<Box<dyn DataSource>, CorralError> {
        debug!(entry = %self.name, driver = %self.spec.driver, "resolving catalog entry");
        let driver = registry.get(&self.spec.driver)?;
        let metadata = if self.spec.metadata.is_empty() {
            None
        } else {
            Some(self.spec.metadata.clone())
        };
        driver.open(&self.spec.args, metadata)
    }
}

impl Catalog {
    /// Load a catalog from a YAML file on disk.
    ///
    /// An unreadable file, malformed YAML, or failed validation is fatal.
    /// `{{ CATALOG_DIR }}` in string args resolves to the file's directory.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CorralError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            CorralError::Catalog(format!("cannot read catalog '{}': {e}", path.display()))
        })?;
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "catalog".to_string());
        let dir = path
            .parent()
            .map(|p| p.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self::from_yaml(&name, &text, &dir)
    }

    /// Load a catalog from an in-memory YAML document.
    ///
    /// Used by data packages that embed their catalog; `catalog_dir` is the
    /// directory `{{ CATALOG_DIR }}` resolves against.
    pub fn from_yaml(name: &str, text: &str, catalog_dir: &str) -> Result<Self, CorralError> {
        let mut file = model::parse_catalog(text)?;
        for spec in file.sources.values_mut() {
            model::substitute_catalog_dir(spec, catalog_dir);
        }

        let entries = file
            .sources
            .into_iter()
            .map(|(entry_name, spec)| {
                (
                    entry_name.clone(),
                    CatalogEntry {
                        name: entry_name,
                        spec,
                    },
                )
            })
            .collect::<BTreeMap<_, _>>();

        debug!(catalog = name, entries = entries.len(), "catalog loaded");
        Ok(Self {
            name: name.to_string(),
            metadata: file.metadata,
            entries,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn metadata(&self) -> &CatalogMetadata {
        &self.metadata
    }

    /// Look up an entry by name.
    pub fn entry(&self, name: &str) -> Result<&CatalogEntry, CorralError> {
        self.entries
            .get(name)
            .ok_or_else(|| CorralError::EntryNotFound {
                catalog: self.name.clone(),
                name: name.to_string(),
            })
    }

    /// Resolve an entry and instantiate its data source in one step.
    pub fn open(
        &self,
        name: &str,
        registry: &DriverRegistry,
    ) -> Result<Box<dyn DataSource>, CorralError> {
        self.entry(name)?.open(registry)
    }

    /// Entry names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        self.entries.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
