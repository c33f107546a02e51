//! Output of the transformed table

mod csv;
mod json;
mod report;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::{PrepError, Result};
use crate::model::Table;

pub use self::csv::CsvOutput;
pub use self::json::JsonOutput;
pub use self::report::{render_to_stdout, Reporter};

/// Trait for table serializers
pub trait TableWriter {
    /// Write the whole table to a writer
    fn write(&self, table: &Table, writer: &mut dyn Write) -> Result<()>;

    /// Check if this writer produces files with the given extension
    fn supports_extension(&self, ext: &str) -> bool;
}

/// Factory for choosing a serializer by file extension
pub struct OutputFactory {
    writers: Vec<Box<dyn TableWriter>>,
}

impl Default for OutputFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputFactory {
    pub fn new() -> Self {
        Self {
            writers: vec![Box::new(CsvOutput), Box::new(JsonOutput::new())],
        }
    }

    /// Get a writer for the given output path
    pub fn get_writer(&self, path: &Path) -> Result<&dyn TableWriter> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        self.writers
            .iter()
            .find(|w| w.supports_extension(&ext))
            .map(|w| w.as_ref())
            .ok_or_else(|| PrepError::UnsupportedFormat {
                path: path.to_path_buf(),
            })
    }

    /// Write a table to a file, choosing the format from its extension
    pub fn write_to_path(&self, table: &Table, path: &Path) -> Result<()> {
        let writer = self.get_writer(path)?;
        let mut file = BufWriter::new(File::create(path)?);
        writer.write(table, &mut file)?;
        file.flush()?;
        tracing::info!(
            path = %path.display(),
            rows = table.row_count(),
            columns = table.column_count(),
            "wrote transformed table"
        );
        Ok(())
    }
}
