// SPDX-FileCopyrightText: 2026 Corral Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! YAML catalog loader, driver registry, and built-in drivers.
//!
//! A catalog binds names to data-source definitions declared in a YAML
//! document. Entries are factories: resolving an entry looks its driver up
//! in an explicit [`DriverRegistry`] and instantiates a concrete
//! [`corral_core::DataSource`]. Data packages publish whole catalogs
//! through the companion [`CatalogRegistry`].

pub mod catalog;
pub mod drivers;
pub mod model;
pub mod registry;

pub use catalog::{Catalog, CatalogEntry};
pub use model::{CatalogFile, CatalogMetadata, EntrySpec, CATALOG_DIR_TOKEN};
pub use registry::{
    optional_str_arg, required_str_arg, CatalogFactory, CatalogRegistry, Driver, DriverRegistry,
};
