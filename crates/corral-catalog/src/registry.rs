// SPDX-FileCopyrightText: 2026 Corral Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Explicit registries mapping names to factories.
//!
//! There is no runtime plugin discovery: drivers and packaged catalogs are
//! compiled in and registered at process startup, then looked up by name
//! when a catalog entry is resolved.

use std::collections::HashMap;
use std::sync::Arc;

use corral_core::{CorralError, DataSource};
use serde_yaml::{Mapping, Value};
use tracing::debug;

use crate::catalog::Catalog;
use crate::drivers::CsvDriver;

/// Factory for instantiating data sources from catalog entry arguments.
pub trait Driver: Send + Sync {
    /// Name this driver is registered under (e.g. `github_issues`).
    fn name(&self) -> &'static str;

    /// Instantiate a source from catalog args and optional entry metadata.
    ///
    /// Instantiation only stores configuration; it must not perform I/O.
    fn open(
        &self,
        args: &Mapping,
        metadata: Option<Mapping>,
    ) -> Result<Box<dyn DataSource>, CorralError>;
}

impl std::fmt::Debug for dyn Driver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Driver").field("name", &self.name()).finish()
    }
}

/// Registry of compiled-in drivers, keyed by driver name.
pub struct DriverRegistry {
    drivers: HashMap<String, Arc<dyn Driver>>,
}

impl DriverRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            drivers: HashMap::new(),
        }
    }

    /// Create a registry pre-populated with the built-in drivers (`csv`).
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(CsvDriver));
        registry
    }

    /// Register a driver under its own name. A later registration under the
    /// same name replaces the earlier one.
    pub fn register(&mut self, driver: Arc<dyn Driver>) {
        debug!(driver = driver.name(), "driver registered");
        self.drivers.insert(driver.name().to_string(), driver);
    }

    /// Look up a driver by name.
    pub fn get(&self, name: &str) -> Result<Arc<dyn Driver>, CorralError> {
        self.drivers
            .get(name)
            .cloned()
            .ok_or_else(|| CorralError::DriverNotFound {
                name: name.to_string(),
            })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.drivers.contains_key(name)
    }

    /// Registered driver names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.drivers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.drivers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drivers.is_empty()
    }
}

impl Default for DriverRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Factory producing a loaded catalog.
pub type CatalogFactory = Box<dyn Fn() -> Result<Catalog, CorralError> + Send + Sync>;

/// Registry of packaged catalogs, keyed by the name they were published under.
///
/// The counterpart to [`DriverRegistry`]: data packages register a
/// catalog-producing factory here so hosts can load their catalog by name.
#[derive(Default)]
pub struct CatalogRegistry {
    catalogs: HashMap<String, CatalogFactory>,
}

impl CatalogRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, name: impl Into<String>, factory: CatalogFactory) {
        let name = name.into();
        debug!(catalog = %name, "catalog registered");
        self.catalogs.insert(name, factory);
    }

    /// Load the catalog registered under `name`.
    pub fn load(&self, name: &str) -> Result<Catalog, CorralError> {
        let factory = self
            .catalogs
            .get(name)
            .ok_or_else(|| CorralError::CatalogNotFound {
                name: name.to_string(),
            })?;
        factory()
    }

    /// Registered catalog names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.catalogs.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.catalogs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.catalogs.is_empty()
    }
}

/// Fetch a required string argument from a driver args mapping.
pub fn required_str_arg(driver: &str, args: &Mapping, key: &str) -> Result<String, CorralError> {
    match args.get(key) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(other) => Err(CorralError::Catalog(format!(
            "driver '{driver}': argument '{key}' must be a string, got {other:?}"
        ))),
        None => Err(CorralError::Catalog(format!(
            "driver '{driver}': missing required argument '{key}'"
        ))),
    }
}

/// Fetch an optional string argument from a driver args mapping.
pub fn optional_str_arg(
    driver: &str,
    args: &Mapping,
    key: &str,
) -> Result<Option<String>, CorralError> {
    match args.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(CorralError::Catalog(format!(
            "driver '{driver}': argument '{key}' must be a string, got {other:?}"
        ))),
    }
}
