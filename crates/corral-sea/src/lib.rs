// SPDX-FileCopyrightText: 2026 Corral Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Example data package: sea ice extent as a packaged catalog.
//!
//! The catalog is a YAML document embedded next to this crate, with its
//! data file shipped under `data/`. The package exposes two entry points:
//! the `sea` catalog itself ([`catalog`], registered via [`register`]) and
//! the resolved `sea_ice` data source ([`sea_ice`]). Opening the entry
//! through either path yields an identically configured source.

use corral_catalog::{Catalog, CatalogRegistry, DriverRegistry};
use corral_core::{CorralError, DataSource};

/// Name the packaged catalog is registered under.
pub const CATALOG_NAME: &str = "sea";

/// Name of the catalog's single entry.
pub const ENTRY_NAME: &str = "sea_ice";

const SEA_YAML: &str = include_str!("../sea.yaml");

/// Load the packaged catalog.
///
/// `{{ CATALOG_DIR }}` resolves against this crate's directory, so the
/// shipped `data/sea-ice.csv` is found regardless of working directory.
pub fn catalog() -> Result<Catalog, CorralError> {
    Catalog::from_yaml(CATALOG_NAME, SEA_YAML, env!("CARGO_MANIFEST_DIR"))
}

/// Resolve the `sea_ice` entry to a concrete data source.
pub fn sea_ice(registry: &DriverRegistry) -> Result<Box<dyn DataSource>, CorralError> {
    catalog()?.open(ENTRY_NAME, registry)
}

/// Register the packaged catalog under the name `sea`.
pub fn register(registry: &mut CatalogRegistry) {
    registry.register(CATALOG_NAME, Box::new(catalog));
}

#[cfg(test)]
mod tests {
    use super::*;
    use corral_core::{DType, Value};

    #[test]
    fn catalog_loads_with_one_entry() {
        let catalog = catalog().unwrap();
        assert_eq!(catalog.name(), CATALOG_NAME);
        assert_eq!(catalog.names(), vec![ENTRY_NAME]);
        assert_eq!(catalog.metadata().version, Some(1));
    }

    #[test]
    fn entry_retrievable_twice_as_equal_descriptors() {
        let catalog = catalog().unwrap();
        assert_eq!(
            catalog.entry(ENTRY_NAME).unwrap(),
            catalog.entry(ENTRY_NAME).unwrap()
        );
    }

    #[tokio::test]
    async fn catalog_member_and_direct_data_object_are_identical() {
        let registry = DriverRegistry::with_builtins();

        let via_catalog = catalog().unwrap().open(ENTRY_NAME, &registry).unwrap();
        let direct = sea_ice(&registry).unwrap();

        assert_eq!(via_catalog.name(), direct.name());
        assert_eq!(
            via_catalog.schema().await.unwrap(),
            direct.schema().await.unwrap()
        );
        assert_eq!(
            via_catalog.read().await.unwrap(),
            direct.read().await.unwrap()
        );
    }

    #[tokio::test]
    async fn shipped_data_materializes() {
        let registry = DriverRegistry::with_builtins();
        let source = sea_ice(&registry).unwrap();

        let schema = source.schema().await.unwrap();
        assert_eq!(schema.names(), vec!["year", "month", "extent", "area"]);
        assert_eq!(schema.field("extent").unwrap().dtype, DType::Float);
        assert_eq!(schema.npartitions(), 1);

        let table = source.read().await.unwrap();
        assert_eq!(table.num_rows(), 12);
        assert_eq!(table.column("year").unwrap().values[0], Value::Int(2012));
        // September minimum.
        assert_eq!(table.column("extent").unwrap().values[8], Value::Float(3.57));
    }

    #[test]
    fn registered_catalog_loads_by_name() {
        let mut registry = CatalogRegistry::new();
        register(&mut registry);

        assert_eq!(registry.names(), vec![CATALOG_NAME]);
        let loaded = registry.load(CATALOG_NAME).unwrap();
        assert_eq!(loaded.names(), vec![ENTRY_NAME]);
        assert_eq!(loaded, catalog().unwrap());
    }
}
