//! CSV serialization

use std::io::Write;

use crate::error::Result;
use crate::model::{CellValue, Table};

use super::TableWriter;

/// Writes the table as comma-separated values with a header row
pub struct CsvOutput;

impl TableWriter for CsvOutput {
    fn write(&self, table: &Table, writer: &mut dyn Write) -> Result<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer.write_record(table.column_names())?;

        for row in &table.rows {
            csv_writer.write_record(row.cells.iter().map(|cell| match cell {
                CellValue::Null => String::new(),
                other => other.display().into_owned(),
            }))?;
        }

        csv_writer.flush()?;
        Ok(())
    }

    fn supports_extension(&self, ext: &str) -> bool {
        ext.eq_ignore_ascii_case("csv")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_csv() {
        let table = Table::from_columns(vec![
            ("odometer_value", vec![CellValue::Int(190000), CellValue::Null]),
            ("color_0", vec![CellValue::Int(1), CellValue::Int(0)]),
        ]);
        let mut buf = Vec::new();
        CsvOutput.write(&table, &mut buf).unwrap();

        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text, "odometer_value,color_0\n190000,1\n,0\n");
    }
}
