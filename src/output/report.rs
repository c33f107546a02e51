//! Shape and head summary of the final table

use std::io::{self, Write};

use tabled::builder::Builder;
use tabled::settings::Style;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::config::DEFAULT_HEAD_ROWS;
use crate::model::Table;

/// Prints the table's dimensions and its first rows
pub struct Reporter {
    head_rows: usize,
}

impl Reporter {
    pub fn new(head_rows: usize) -> Self {
        Self { head_rows }
    }

    /// Render the shape line and head table
    pub fn render(&self, table: &Table, writer: &mut dyn WriteColor) -> io::Result<()> {
        let (rows, columns) = table.shape();
        writer.set_color(ColorSpec::new().set_bold(true).set_fg(Some(Color::Cyan)))?;
        write!(writer, "Data size = {} x {}", rows, columns)?;
        writer.reset()?;
        writeln!(writer)?;

        if columns == 0 {
            return Ok(());
        }
        writeln!(writer, "{}", self.head_table(table))
    }

    fn head_table(&self, table: &Table) -> String {
        let mut builder = Builder::default();
        let header = table.column_names().map(str::to_string);
        builder.push_record(std::iter::once(String::new()).chain(header));

        // Leading column holds the row position
        for (i, row) in table.head(self.head_rows).iter().enumerate() {
            let cells = row.cells.iter().map(|c| c.display().into_owned());
            builder.push_record(std::iter::once(i.to_string()).chain(cells));
        }

        let mut rendered = builder.build();
        rendered.with(Style::psql());
        rendered.to_string()
    }
}

impl Default for Reporter {
    fn default() -> Self {
        Self::new(DEFAULT_HEAD_ROWS)
    }
}

/// Render the report to stdout
pub fn render_to_stdout(table: &Table, head_rows: usize, color: ColorChoice) -> io::Result<()> {
    let mut stdout = StandardStream::stdout(color);
    Reporter::new(head_rows).render(table, &mut stdout)?;
    stdout.flush()
}
