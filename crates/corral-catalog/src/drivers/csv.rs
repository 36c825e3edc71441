// SPDX-FileCopyrightText: 2026 Corral Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Built-in `csv` driver.
//!
//! Reads a local CSV file as a single-partition dataframe. The schema is
//! inferred from the header row by probing the first record: values that
//! parse as integers become `int` columns, as floats `float`, everything
//! else `str`. Packaged catalogs rely on this driver for data files
//! shipped next to the catalog.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use corral_core::{CorralError, DType, DataSource, Field, Schema, Table, Value};
use serde_yaml::Mapping;
use tokio::sync::OnceCell;
use tracing::debug;

use crate::registry::{required_str_arg, Driver};

pub const DRIVER_NAME: &str = "csv";

/// Factory registering [`CsvSource`] under the `csv` driver name.
pub struct CsvDriver;

impl Driver for CsvDriver {
    fn name(&self) -> &'static str {
        DRIVER_NAME
    }

    fn open(
        &self,
        args: &Mapping,
        metadata: Option<Mapping>,
    ) -> Result<Box<dyn DataSource>, CorralError> {
        let urlpath = required_str_arg(DRIVER_NAME, args, "urlpath")?;
        Ok(Box::new(CsvSource::new(urlpath, metadata)))
    }
}

/// Single-partition data source over a local CSV file.
pub struct CsvSource {
    path: PathBuf,
    metadata: Option<Mapping>,
    schema: OnceCell<Schema>,
}

impl CsvSource {
    /// Store the file path; no I/O happens until the first schema request.
    pub fn new(path: impl Into<PathBuf>, metadata: Option<Mapping>) -> Self {
        Self {
            path: path.into(),
            metadata,
            schema: OnceCell::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn metadata(&self) -> Option<&Mapping> {
        self.metadata.as_ref()
    }

    fn reader(&self) -> Result<csv::Reader<std::fs::File>, CorralError> {
        csv::Reader::from_path(&self.path).map_err(|e| CorralError::Source {
            message: format!("cannot open CSV file '{}': {e}", self.path.display()),
            source: Some(Box::new(e)),
        })
    }

    /// Probe the header and first record to declare column types.
    fn infer_schema(&self) -> Result<Schema, CorralError> {
        let mut reader = self.reader()?;
        let headers = reader
            .headers()
            .map_err(|e| CorralError::Source {
                message: format!("cannot read CSV header: {e}"),
                source: Some(Box::new(e)),
            })?
            .clone();

        let probe = match reader.records().next() {
            Some(record) => Some(record.map_err(|e| CorralError::Source {
                message: format!("cannot read first CSV record: {e}"),
                source: Some(Box::new(e)),
            })?),
            None => None,
        };

        let fields = headers
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let dtype = probe
                    .as_ref()
                    .and_then(|record| record.get(i))
                    .map(infer_dtype)
                    .unwrap_or(DType::Str);
                Field::new(name, dtype)
            })
            .collect();

        let schema = Schema::new(fields, 1);
        debug!(path = %self.path.display(), columns = schema.len(), "CSV schema inferred");
        Ok(schema)
    }

    fn load_table(&self, schema: &Schema) -> Result<Table, CorralError> {
        let mut reader = self.reader()?;
        let mut table = Table::new(schema.clone());
        for record in reader.records() {
            let record = record.map_err(|e| CorralError::Source {
                message: format!("cannot read CSV record: {e}"),
                source: Some(Box::new(e)),
            })?;
            let row = schema
                .fields()
                .iter()
                .enumerate()
                .map(|(i, field)| parse_value(record.get(i).unwrap_or(""), field))
                .collect::<Result<Vec<Value>, CorralError>>()?;
            table.push_row(row)?;
        }
        debug!(path = %self.path.display(), rows = table.num_rows(), "CSV table materialized");
        Ok(table)
    }
}

fn infer_dtype(raw: &str) -> DType {
    if raw.parse::<i64>().is_ok() {
        DType::Int
    } else if raw.parse::<f64>().is_ok() {
        DType::Float
    } else {
        DType::Str
    }
}

fn parse_value(raw: &str, field: &Field) -> Result<Value, CorralError> {
    if raw.is_empty() {
        return Ok(Value::Null);
    }
    match field.dtype {
        DType::Int => raw.parse::<i64>().map(Value::Int).map_err(|e| source_err(raw, field, e)),
        DType::Float => raw
            .parse::<f64>()
            .map(Value::Float)
            .map_err(|e| source_err(raw, field, e)),
        DType::Bool => raw
            .parse::<bool>()
            .map(Value::Bool)
            .map_err(|e| source_err(raw, field, e)),
        DType::Datetime => raw
            .parse::<chrono::DateTime<chrono::Utc>>()
            .map(Value::Datetime)
            .map_err(|e| source_err(raw, field, e)),
        DType::Str => Ok(Value::Str(raw.to_string())),
    }
}

fn source_err(
    raw: &str,
    field: &Field,
    e: impl std::error::Error + Send + Sync + 'static,
) -> CorralError {
    CorralError::Source {
        message: format!(
            "value '{raw}' in column '{}' does not parse as {}",
            field.name, field.dtype
        ),
        source: Some(Box::new(e)),
    }
}

#[async_trait]
impl DataSource for CsvSource {
    fn name(&self) -> &str {
        DRIVER_NAME
    }

    async fn schema(&self) -> Result<Schema, CorralError> {
        self.schema
            .get_or_try_init(|| async { self.infer_schema() })
            .await
            .cloned()
    }

    async fn read_partition(&self, index: usize) -> Result<Table, CorralError> {
        let schema = self.schema().await?;
        if index >= schema.npartitions() {
            return Err(CorralError::InvalidPartition {
                index,
                npartitions: schema.npartitions(),
            });
        }
        self.load_table(&schema)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_csv(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[tokio::test]
    async fn schema_inferred_from_header_and_first_record() {
        let file = write_csv("year,extent,region\n2012,3.57,north\n2013,5.05,north\n");
        let source = CsvSource::new(file.path(), None);

        let schema = source.schema().await.unwrap();
        assert_eq!(schema.names(), vec!["year", "extent", "region"]);
        assert_eq!(schema.field("year").unwrap().dtype, DType::Int);
        assert_eq!(schema.field("extent").unwrap().dtype, DType::Float);
        assert_eq!(schema.field("region").unwrap().dtype, DType::Str);
        assert_eq!(schema.npartitions(), 1);

        // Cached: repeated calls return the same schema.
        assert_eq!(source.schema().await.unwrap(), schema);
    }

    #[tokio::test]
    async fn read_partition_materializes_all_rows() {
        let file = write_csv("year,extent\n2012,3.57\n2013,5.05\n2014,5.02\n");
        let source = CsvSource::new(file.path(), None);

        let table = source.read_partition(0).await.unwrap();
        assert_eq!(table.num_rows(), 3);
        assert_eq!(
            table.column("year").unwrap().values,
            vec![Value::Int(2012), Value::Int(2013), Value::Int(2014)]
        );
        assert_eq!(table.column("extent").unwrap().values[0], Value::Float(3.57));
    }

    #[tokio::test]
    async fn empty_cells_become_null() {
        let file = write_csv("year,extent\n2012,3.57\n2013,\n");
        let source = CsvSource::new(file.path(), None);

        let table = source.read().await.unwrap();
        assert!(table.column("extent").unwrap().values[1].is_null());
    }

    #[tokio::test]
    async fn nonzero_partition_is_invalid() {
        let file = write_csv("a\n1\n");
        let source = CsvSource::new(file.path(), None);

        let err = source.read_partition(1).await.unwrap_err();
        assert!(matches!(
            err,
            CorralError::InvalidPartition {
                index: 1,
                npartitions: 1
            }
        ));
    }

    #[tokio::test]
    async fn missing_file_surfaces_as_source_error() {
        let source = CsvSource::new("/nonexistent/data.csv", None);
        let err = source.schema().await.unwrap_err();
        assert!(matches!(err, CorralError::Source { .. }));
    }

    #[tokio::test]
    async fn header_only_file_yields_empty_str_table() {
        let file = write_csv("a,b\n");
        let source = CsvSource::new(file.path(), None);

        let schema = source.schema().await.unwrap();
        assert_eq!(schema.field("a").unwrap().dtype, DType::Str);

        let table = source.read().await.unwrap();
        assert_eq!(table.num_rows(), 0);
    }

    #[test]
    fn driver_requires_urlpath() {
        let driver = CsvDriver;
        let err = driver.open(&Mapping::new(), None).unwrap_err();
        assert!(err.to_string().contains("missing required argument 'urlpath'"));
    }
}
