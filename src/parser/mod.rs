//! Loaders for reading tabular data files

mod csv;
mod json;

use std::path::Path;

use crate::error::{PrepError, Result};
use crate::model::Table;

pub use self::csv::CsvParser;
pub use self::json::JsonParser;

/// Trait for parsing tabular data files
pub trait Parser: Send + Sync {
    /// Parse a file and return a Table
    fn parse(&self, path: &Path) -> Result<Table>;

    /// Check if this parser can handle the given file extension
    fn supports_extension(&self, ext: &str) -> bool;
}

/// Factory for creating parsers based on file extension
pub struct ParserFactory {
    parsers: Vec<Box<dyn Parser>>,
}

impl Default for ParserFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl ParserFactory {
    /// Create a new parser factory with all supported parsers
    pub fn new() -> Self {
        Self {
            parsers: vec![Box::new(CsvParser), Box::new(JsonParser)],
        }
    }

    /// Get a parser for the given file path
    pub fn get_parser(&self, path: &Path) -> Result<&dyn Parser> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        self.parsers
            .iter()
            .find(|p| p.supports_extension(&ext))
            .map(|p| p.as_ref())
            .ok_or_else(|| PrepError::UnsupportedFormat {
                path: path.to_path_buf(),
            })
    }

    /// Parse a file using the appropriate parser
    pub fn parse(&self, path: &Path) -> Result<Table> {
        let parser = self.get_parser(path)?;
        let table = parser.parse(path)?;
        tracing::debug!(
            path = %path.display(),
            rows = table.row_count(),
            columns = table.column_count(),
            "loaded table"
        );
        Ok(table)
    }
}

fn open(path: &Path) -> Result<std::fs::File> {
    std::fs::File::open(path).map_err(|source| PrepError::MissingInput {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_parser_by_extension() {
        let factory = ParserFactory::new();
        assert!(factory.get_parser(Path::new("cars.csv")).is_ok());
        assert!(factory.get_parser(Path::new("cars.TSV")).is_ok());
        assert!(factory.get_parser(Path::new("cars.json")).is_ok());
        assert!(matches!(
            factory.get_parser(Path::new("cars.xlsx")),
            Err(PrepError::UnsupportedFormat { .. })
        ));
    }

    #[test]
    fn test_missing_input() {
        let factory = ParserFactory::new();
        let err = factory
            .parse(Path::new("/nonexistent/dir/cars.csv"))
            .unwrap_err();
        assert!(matches!(err, PrepError::MissingInput { .. }));
        assert_eq!(err.stage(), Some("load"));
    }
}
