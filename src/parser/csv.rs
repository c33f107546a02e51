//! CSV file parser
//!
//! Cells are typed per column rather than per cell: every column gets the
//! narrowest of bool, int, float or text that fits all of its non-null
//! values, and the whole column is converted to that type. A column of
//! `A6,80,100` therefore stays text throughout.

use std::borrow::Cow;
use std::io::BufReader;
use std::path::Path;

use indexmap::IndexSet;
use rustc_hash::FxBuildHasher;

use crate::error::{PrepError, Result};
use crate::model::{CellType, CellValue, Column, Table};

use super::Parser;

/// Parser for CSV and TSV files
pub struct CsvParser;

impl CsvParser {
    /// Parse delimited data from any reader
    pub fn parse_reader<R: std::io::Read>(
        &self,
        reader: R,
        delimiter: u8,
        path: &Path,
    ) -> Result<Table> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .delimiter(delimiter)
            .flexible(true)
            .from_reader(reader);

        // Read headers
        let headers = csv_reader
            .headers()
            .map_err(|e| PrepError::Parse {
                path: path.to_path_buf(),
                line: 1,
                detail: e.to_string(),
            })?
            .clone();

        let names = dedupe_headers(headers.iter());
        let width = names.len();

        // Read rows as raw text first; typing needs the whole column
        let mut raw_rows: Vec<(Vec<String>, usize)> = Vec::new();
        for (line_num, result) in csv_reader.records().enumerate() {
            let line = line_num + 2; // +2 for 1-indexing and header
            let record = result.map_err(|e| PrepError::Parse {
                path: path.to_path_buf(),
                line,
                detail: e.to_string(),
            })?;

            let mut fields: Vec<String> = record.iter().map(str::to_string).collect();
            if fields.len() != width {
                tracing::warn!(
                    line,
                    expected = width,
                    actual = fields.len(),
                    "ragged CSV row, padding with nulls"
                );
            }
            fields.resize(width, String::new());
            raw_rows.push((fields, line));
        }

        let column_types: Vec<CellType> = (0..width)
            .map(|idx| column_type(raw_rows.iter().map(|(fields, _)| fields[idx].as_str())))
            .collect();

        let columns: Vec<Column> = names
            .into_iter()
            .zip(&column_types)
            .map(|(name, &cell_type)| Column::with_type(name, cell_type))
            .collect();
        let mut table = Table::new(columns);

        for (fields, line) in raw_rows {
            let cells = fields
                .into_iter()
                .zip(&column_types)
                .map(|(raw, &cell_type)| convert_cell(raw, cell_type))
                .collect();
            table.add_row(cells, line);
        }

        table.infer_column_types();
        Ok(table)
    }
}

impl Parser for CsvParser {
    fn parse(&self, path: &Path) -> Result<Table> {
        let file = super::open(path)?;
        let delimiter = match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("tsv") => b'\t',
            _ => b',',
        };
        self.parse_reader(BufReader::new(file), delimiter, path)
    }

    fn supports_extension(&self, ext: &str) -> bool {
        matches!(ext.to_lowercase().as_str(), "csv" | "tsv" | "txt")
    }
}

/// Rename repeated header names to `name.1`, `name.2`, ...
fn dedupe_headers<'a>(headers: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut taken: IndexSet<String, FxBuildHasher> = IndexSet::default();

    for header in headers {
        let mut name = header.to_string();
        let mut suffix = 1;
        while taken.contains(&name) {
            name = format!("{}.{}", header, suffix);
            suffix += 1;
        }
        if name != header {
            tracing::warn!(header, renamed = %name, "duplicate CSV header");
        }
        taken.insert(name);
    }

    taken.into_iter().collect()
}

fn is_null_text(trimmed: &str) -> bool {
    trimmed.is_empty() || trimmed.eq_ignore_ascii_case("null") || trimmed == "NA" || trimmed == "NaN"
}

fn parse_bool(trimmed: &str) -> Option<bool> {
    if trimmed.eq_ignore_ascii_case("true") {
        Some(true)
    } else if trimmed.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

/// Type a single raw field would have on its own
fn sniff(raw: &str) -> CellType {
    let trimmed = raw.trim();
    if is_null_text(trimmed) {
        CellType::Null
    } else if parse_bool(trimmed).is_some() {
        CellType::Bool
    } else if trimmed.parse::<i64>().is_ok() {
        CellType::Int
    } else if trimmed.parse::<f64>().is_ok() {
        CellType::Float
    } else {
        CellType::String
    }
}

/// One type for a whole column; anything that does not agree becomes text
fn column_type<'a>(values: impl Iterator<Item = &'a str>) -> CellType {
    match values.fold(CellType::Null, |acc, raw| acc.widen(sniff(raw))) {
        CellType::Mixed => CellType::String,
        other => other,
    }
}

fn convert_cell(raw: String, cell_type: CellType) -> CellValue {
    let trimmed = raw.trim();
    if is_null_text(trimmed) {
        return CellValue::Null;
    }

    let converted = match cell_type {
        CellType::Bool => parse_bool(trimmed).map(CellValue::Bool),
        CellType::Int => trimmed.parse::<i64>().ok().map(CellValue::Int),
        CellType::Float => trimmed.parse::<f64>().ok().map(CellValue::Float),
        _ => None,
    };

    // Text keeps the field exactly as read
    converted.unwrap_or(CellValue::String(Cow::Owned(raw)))
}
