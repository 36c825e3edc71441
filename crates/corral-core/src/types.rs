// SPDX-FileCopyrightText: 2026 Corral Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tabular data model shared by all Corral data sources.
//!
//! A [`Schema`] declares the column names and types of a source independent
//! of row content; a [`Table`] is a fully materialized single partition whose
//! column set always exactly matches the schema it was built from.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::CorralError;

/// Declared type of a column.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum DType {
    Int,
    Float,
    Str,
    Bool,
    Datetime,
}

/// A single cell value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i64),
    Float(f64),
    Str(String),
    Bool(bool),
    Datetime(DateTime<Utc>),
    /// Missing value. Matches any declared column type.
    Null,
}

impl Value {
    /// Returns true if this value is admissible under the given column type.
    pub fn matches(&self, dtype: DType) -> bool {
        match self {
            Value::Int(_) => dtype == DType::Int,
            Value::Float(_) => dtype == DType::Float,
            Value::Str(_) => dtype == DType::Str,
            Value::Bool(_) => dtype == DType::Bool,
            Value::Datetime(_) => dtype == DType::Datetime,
            Value::Null => true,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_datetime(&self) -> Option<DateTime<Utc>> {
        match self {
            Value::Datetime(v) => Some(*v),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

/// A named, typed column declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    pub dtype: DType,
}

impl Field {
    pub fn new(name: impl Into<String>, dtype: DType) -> Self {
        Self {
            name: name.into(),
            dtype,
        }
    }
}

/// Declared column set and partition count of a data source.
///
/// Declared lazily by sources on first request and cached for the instance
/// lifetime; never re-computed afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    fields: Vec<Field>,
    npartitions: usize,
}

impl Schema {
    pub fn new(fields: Vec<Field>, npartitions: usize) -> Self {
        Self {
            fields,
            npartitions,
        }
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Look up a field declaration by column name.
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Column names in declaration order.
    pub fn names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }

    pub fn npartitions(&self) -> usize {
        self.npartitions
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// One materialized column: its declaration plus the cell values.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub field: Field,
    pub values: Vec<Value>,
}

/// A fully materialized partition in column-major layout.
///
/// Constructed fresh on each read; rows are appended with [`Table::push_row`],
/// which enforces that every row matches the declared schema.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    schema: Schema,
    columns: Vec<Column>,
    num_rows: usize,
}

impl Table {
    /// Create an empty table whose columns mirror the given schema.
    pub fn new(schema: Schema) -> Self {
        let columns = schema
            .fields()
            .iter()
            .map(|field| Column {
                field: field.clone(),
                values: Vec::new(),
            })
            .collect();
        Self {
            schema,
            columns,
            num_rows: 0,
        }
    }

    /// Append one row, given in schema declaration order.
    ///
    /// Rejects rows whose arity or value types disagree with the schema.
    pub fn push_row(&mut self, row: Vec<Value>) -> Result<(), CorralError> {
        if row.len() != self.columns.len() {
            return Err(CorralError::Internal(format!(
                "row has {} values, table has {} columns",
                row.len(),
                self.columns.len()
            )));
        }
        for (column, value) in self.columns.iter().zip(&row) {
            if !value.matches(column.field.dtype) {
                return Err(CorralError::Internal(format!(
                    "column '{}' declared {} but row value is {value:?}",
                    column.field.name, column.field.dtype
                )));
            }
        }
        for (column, value) in self.columns.iter_mut().zip(row) {
            column.values.push(value);
        }
        self.num_rows += 1;
        Ok(())
    }

    /// Append all rows of another table with an identical schema.
    pub fn append(&mut self, other: Table) -> Result<(), CorralError> {
        if other.schema != self.schema {
            return Err(CorralError::Internal(
                "cannot append table with a different schema".to_string(),
            ));
        }
        for (column, incoming) in self.columns.iter_mut().zip(other.columns) {
            column.values.extend(incoming.values);
        }
        self.num_rows += other.num_rows;
        Ok(())
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Look up a materialized column by name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.field.name == name)
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }
}
