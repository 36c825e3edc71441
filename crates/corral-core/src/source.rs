// SPDX-FileCopyrightText: 2026 Corral Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The data-source trait implemented by every Corral driver.

use async_trait::async_trait;
use strum::{Display, EnumString};

use crate::error::CorralError;
use crate::types::{Schema, Table};

/// Kind of container a data source materializes into.
///
/// All current sources produce dataframes; the enum exists so catalogs can
/// describe other container kinds without a trait change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum Container {
    Dataframe,
}

/// A named adapter exposing a schema and one or more fetchable partitions
/// of tabular data.
///
/// Construction never performs I/O; the first `schema` call declares (and
/// caches) the column set, and each `read_partition` call materializes a
/// fresh table. Sources hold no connections between calls, so the default
/// `close` is a no-op.
#[async_trait]
pub trait DataSource: Send + Sync + 'static {
    /// Driver name of this source (e.g. `github_issues`).
    fn name(&self) -> &str;

    /// Container kind this source materializes into.
    fn container(&self) -> Container {
        Container::Dataframe
    }

    /// Declared column set and partition count.
    ///
    /// Deterministic, side-effect-free with respect to the result, and
    /// idempotent; implementations cache the schema on first call.
    async fn schema(&self) -> Result<Schema, CorralError>;

    /// Materialize one partition.
    ///
    /// Returns [`CorralError::InvalidPartition`] for an out-of-range index.
    /// Remote failures propagate per call with no retry and no partial
    /// results.
    async fn read_partition(&self, index: usize) -> Result<Table, CorralError>;

    /// Materialize the whole source by reading every declared partition.
    async fn read(&self) -> Result<Table, CorralError> {
        let schema = self.schema().await?;
        let mut table = self.read_partition(0).await?;
        for index in 1..schema.npartitions() {
            table.append(self.read_partition(index).await?)?;
        }
        Ok(table)
    }

    /// Release held resources. Sources hold none between calls.
    async fn close(&self) -> Result<(), CorralError> {
        Ok(())
    }
}

impl std::fmt::Debug for dyn DataSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DataSource").field("name", &self.name()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DType, Field, Value};

    /// Two-partition in-memory source exercising the provided `read`.
    struct Doubles;

    fn doubles_schema() -> Schema {
        Schema::new(vec![Field::new("n", DType::Int)], 2)
    }

    #[async_trait]
    impl DataSource for Doubles {
        fn name(&self) -> &str {
            "doubles"
        }

        async fn schema(&self) -> Result<Schema, CorralError> {
            Ok(doubles_schema())
        }

        async fn read_partition(&self, index: usize) -> Result<Table, CorralError> {
            if index >= 2 {
                return Err(CorralError::InvalidPartition {
                    index,
                    npartitions: 2,
                });
            }
            let mut table = Table::new(doubles_schema());
            table.push_row(vec![Value::Int(index as i64 * 2)])?;
            Ok(table)
        }
    }

    #[tokio::test]
    async fn read_concatenates_all_partitions() {
        let source = Doubles;
        let table = source.read().await.unwrap();
        assert_eq!(table.num_rows(), 2);
        assert_eq!(table.column("n").unwrap().values, vec![Value::Int(0), Value::Int(2)]);
    }

    #[tokio::test]
    async fn read_partition_rejects_out_of_range() {
        let source = Doubles;
        let err = source.read_partition(2).await.unwrap_err();
        assert!(matches!(
            err,
            CorralError::InvalidPartition {
                index: 2,
                npartitions: 2
            }
        ));
    }

    #[tokio::test]
    async fn default_close_is_noop() {
        let source = Doubles;
        source.close().await.unwrap();
        assert_eq!(source.container(), Container::Dataframe);
    }
}
