//! JSON array parser

use std::borrow::Cow;
use std::io::BufReader;
use std::path::Path;

use indexmap::IndexSet;
use serde_json::Value;

use crate::error::{PrepError, Result};
use crate::model::{CellValue, Column, Table};

use super::Parser;

/// Parser for JSON files holding an array of records
pub struct JsonParser;

impl JsonParser {
    /// Build a table from an already-decoded JSON document
    pub fn parse_value(&self, value: Value, path: &Path) -> Result<Table> {
        // Handle both arrays and single objects
        let array = match value {
            Value::Array(arr) => arr,
            Value::Object(_) => vec![value],
            _ => {
                return Err(PrepError::Parse {
                    path: path.to_path_buf(),
                    line: 1,
                    detail: "JSON must be an array or object".to_string(),
                })
            }
        };

        // Collect all unique keys across all objects to build column list
        let mut column_names: IndexSet<String> = IndexSet::new();
        for item in &array {
            if let Value::Object(obj) = item {
                column_names.extend(obj.keys().cloned());
            }
        }

        let columns: Vec<Column> = column_names.iter().map(Column::new).collect();
        let mut table = Table::new(columns);

        // Convert each object to a row
        for (idx, item) in array.iter().enumerate() {
            let Value::Object(obj) = item else {
                return Err(PrepError::Parse {
                    path: path.to_path_buf(),
                    line: idx + 1,
                    detail: format!("record {} is not an object", idx),
                });
            };
            let cells = column_names
                .iter()
                .map(|key| json_value_to_cell(obj.get(key)))
                .collect();
            table.add_row(cells, idx + 1);
        }

        // A key holding both numbers and text is read as text
        table.infer_column_types();
        table.stringify_mixed_columns();
        Ok(table)
    }
}

impl Parser for JsonParser {
    fn parse(&self, path: &Path) -> Result<Table> {
        let file = super::open(path)?;
        let value: Value =
            serde_json::from_reader(BufReader::new(file)).map_err(|e| PrepError::Parse {
                path: path.to_path_buf(),
                line: e.line(),
                detail: e.to_string(),
            })?;
        self.parse_value(value, path)
    }

    fn supports_extension(&self, ext: &str) -> bool {
        ext.eq_ignore_ascii_case("json")
    }
}

fn json_value_to_cell(value: Option<&Value>) -> CellValue {
    match value {
        None | Some(Value::Null) => CellValue::Null,
        Some(Value::Bool(b)) => CellValue::Bool(*b),
        Some(Value::Number(n)) => {
            if let Some(i) = n.as_i64() {
                CellValue::Int(i)
            } else if let Some(f) = n.as_f64() {
                CellValue::Float(f)
            } else {
                CellValue::String(Cow::Owned(n.to_string()))
            }
        }
        Some(Value::String(s)) => CellValue::String(Cow::Owned(s.clone())),
        // Nested values are kept as their JSON text
        Some(nested) => CellValue::String(Cow::Owned(nested.to_string())),
    }
}
