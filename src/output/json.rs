//! JSON serialization

use std::io::Write;

use indexmap::IndexMap;

use crate::error::Result;
use crate::model::{CellValue, Table};

use super::TableWriter;

/// Writes the table as an array of row objects, keys in column order
pub struct JsonOutput {
    pretty: bool,
}

impl JsonOutput {
    pub fn new() -> Self {
        Self { pretty: true }
    }

    pub fn compact() -> Self {
        Self { pretty: false }
    }
}

impl Default for JsonOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl TableWriter for JsonOutput {
    fn write(&self, table: &Table, writer: &mut dyn Write) -> Result<()> {
        let records: Vec<IndexMap<&str, &CellValue>> = table
            .rows
            .iter()
            .map(|row| table.column_names().zip(row.cells.iter()).collect())
            .collect();

        if self.pretty {
            serde_json::to_writer_pretty(&mut *writer, &records)?;
        } else {
            serde_json::to_writer(&mut *writer, &records)?;
        }
        writeln!(writer)?;

        Ok(())
    }

    fn supports_extension(&self, ext: &str) -> bool {
        ext.eq_ignore_ascii_case("json")
    }
}
