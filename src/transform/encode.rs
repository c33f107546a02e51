//! One-hot expansion of categorical columns

use indexmap::IndexSet;
use rustc_hash::FxBuildHasher;

use crate::config::ValueOrdering;
use crate::error::{PrepError, Result};
use crate::model::{CellType, CellValue, Column, Table};

pub const STAGE: &str = "encode";

/// A distinct value of a categorical column
///
/// Nulls form their own category, which sorts after every text value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Value(String),
    Missing,
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Category::Value(s) => write!(f, "{}", s),
            Category::Missing => write!(f, "NULL"),
        }
    }
}

type CategorySet = IndexSet<Category, FxBuildHasher>;

/// How one column was expanded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodingReport {
    /// Name of the removed column
    pub column: String,
    /// `categories[i]` is the value flagged by `generated[i]`
    pub categories: Vec<Category>,
    /// Names of the appended indicator columns
    pub generated: Vec<String>,
}

impl EncodingReport {
    /// Number of distinct values
    pub fn cardinality(&self) -> usize {
        self.categories.len()
    }
}

/// Replace every named column with its one-hot indicator columns.
///
/// Columns are processed in the given order; indicators for each are appended
/// at the end of the table as `<name>_0 .. <name>_{D-1}`.
pub fn encode_categoricals(
    mut table: Table,
    columns: &[String],
    ordering: ValueOrdering,
) -> Result<(Table, Vec<EncodingReport>)> {
    let mut reports = Vec::with_capacity(columns.len());
    for name in columns {
        if let Some(report) = encode_column(&mut table, name, ordering)? {
            tracing::info!("Feature {}, Unique values = {}", name, report.cardinality());
            reports.push(report);
        } else {
            tracing::debug!(column = %name, "string column not present, skipping");
        }
    }
    Ok((table, reports))
}

fn encode_column(
    table: &mut Table,
    name: &str,
    ordering: ValueOrdering,
) -> Result<Option<EncodingReport>> {
    let Some(idx) = table.column_index(name) else {
        return Ok(None);
    };

    let codes = table
        .rows
        .iter()
        .map(|row| match row.get(idx) {
            Some(CellValue::String(s)) => Ok(Category::Value(s.to_string())),
            Some(CellValue::Null) | None => Ok(Category::Missing),
            Some(other) => Err(PrepError::Encoding {
                stage: STAGE,
                column: name.to_string(),
                detail: format!(
                    "line {}: {} value '{}' cannot be ordered with text categories",
                    row.source_line,
                    CellType::of(other),
                    other
                ),
            }),
        })
        .collect::<Result<Vec<_>>>()?;

    let categories = distinct_categories(&codes, ordering);
    let generated: Vec<String> = (0..categories.len())
        .map(|i| format!("{}_{}", name, i))
        .collect();

    if let Some(clash) = generated.iter().find(|g| table.column_index(g).is_some()) {
        return Err(PrepError::Encoding {
            stage: STAGE,
            column: name.to_string(),
            detail: format!("generated column {} already exists", clash),
        });
    }

    // Each indicator is a full CellValue (at least 24 bytes), so D categories
    // grow every row by D of them. Rows are reserved once before appending.
    let mut indicators: Vec<Vec<CellValue>> = categories
        .iter()
        .map(|_| Vec::with_capacity(codes.len()))
        .collect();
    for code in &codes {
        let hot = categories.get_index_of(code);
        for (i, column) in indicators.iter_mut().enumerate() {
            column.push(CellValue::Int(i64::from(hot == Some(i))));
        }
    }

    table.drop_column(name);
    table.reserve_columns(generated.len());
    for (column_name, values) in generated.iter().zip(indicators) {
        table.push_column(Column::with_type(column_name.clone(), CellType::Int), values)?;
    }

    Ok(Some(EncodingReport {
        column: name.to_string(),
        categories: categories.into_iter().collect(),
        generated,
    }))
}

/// Distinct values of a column in the requested order
fn distinct_categories(codes: &[Category], ordering: ValueOrdering) -> CategorySet {
    let mut set: CategorySet = codes.iter().cloned().collect();
    if ordering == ValueOrdering::Lexicographic {
        set.sort();
    }
    set
}

#[cfg(test)]
mod tests {
    use super::*;

    fn color_table() -> Table {
        Table::from_columns(vec![
            ("year", vec![CellValue::Int(2010), CellValue::Int(2002), CellValue::Int(2015)]),
            (
                "color",
                vec![CellValue::from("red"), CellValue::from("blue"), CellValue::from("red")],
            ),
        ])
    }

    fn row_values(table: &Table, row: usize) -> Vec<CellValue> {
        table.rows[row].cells.clone()
    }

    #[test]
    fn test_color_scenario() {
        let (table, reports) = encode_categoricals(
            color_table(),
            &["color".to_string()],
            ValueOrdering::Lexicographic,
        )
        .unwrap();

        let names: Vec<_> = table.column_names().collect();
        assert_eq!(names, vec!["year", "color_0", "color_1"]);
        assert_eq!(
            reports[0].categories,
            vec![Category::Value("blue".into()), Category::Value("red".into())]
        );

        // blue sorts first, so red rows light up color_1
        assert_eq!(
            row_values(&table, 0),
            vec![CellValue::Int(2010), CellValue::Int(0), CellValue::Int(1)]
        );
        assert_eq!(
            row_values(&table, 1),
            vec![CellValue::Int(2002), CellValue::Int(1), CellValue::Int(0)]
        );
        assert_eq!(table.rows[0].cells[1..], table.rows[2].cells[1..]);
    }

    #[test]
    fn test_first_appearance_ordering() {
        let (table, reports) = encode_categoricals(
            color_table(),
            &["color".to_string()],
            ValueOrdering::FirstAppearance,
        )
        .unwrap();

        assert_eq!(reports[0].categories[0], Category::Value("red".into()));
        assert_eq!(table.rows[0].cells[1], CellValue::Int(1));
        assert_eq!(table.rows[1].cells[2], CellValue::Int(1));
    }

    #[test]
    fn test_constant_column_emits_single_indicator() {
        let table = Table::from_columns(vec![(
            "body_type",
            vec![CellValue::from("sedan"), CellValue::from("sedan")],
        )]);
        let (table, reports) =
            encode_categoricals(table, &["body_type".to_string()], ValueOrdering::Lexicographic)
                .unwrap();

        assert_eq!(reports[0].generated, vec!["body_type_0"]);
        assert!(table.column_values(0).all(|v| *v == CellValue::Int(1)));
    }

    #[test]
    fn test_nulls_form_last_category() {
        let table = Table::from_columns(vec![(
            "engine_fuel",
            vec![CellValue::Null, CellValue::from("gas"), CellValue::from("diesel")],
        )]);
        let (table, reports) = encode_categoricals(
            table,
            &["engine_fuel".to_string()],
            ValueOrdering::Lexicographic,
        )
        .unwrap();

        assert_eq!(reports[0].categories.last(), Some(&Category::Missing));
        assert_eq!(
            table.rows[0].cells,
            vec![CellValue::Int(0), CellValue::Int(0), CellValue::Int(1)]
        );
    }

    #[test]
    fn test_non_text_value_is_rejected() {
        // The loaders type whole columns, so text and numbers only meet in a
        // hand-built table
        let mut table = Table::new(vec![Column::new("engine_type")]);
        table.add_row(vec![CellValue::from("gasoline")], 2);
        table.add_row(vec![CellValue::Float(1.6)], 3);

        let err = encode_categoricals(table, &["engine_type".to_string()], ValueOrdering::default())
            .unwrap_err();

        match err {
            PrepError::Encoding { stage, column, detail } => {
                assert_eq!(stage, "encode");
                assert_eq!(column, "engine_type");
                assert!(detail.starts_with("line 3: float value '1.6'"), "{}", detail);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_generated_name_clash_is_rejected() {
        let table = Table::from_columns(vec![
            ("trim", vec![CellValue::from("base")]),
            ("trim_0", vec![CellValue::Int(4)]),
        ]);
        let err = encode_categoricals(table, &["trim".to_string()], ValueOrdering::default())
            .unwrap_err();
        assert!(matches!(err, PrepError::Encoding { .. }));
    }

    #[test]
    fn test_later_columns_append_after_earlier_indicators() {
        let table = Table::from_columns(vec![
            ("color", vec![CellValue::from("red"), CellValue::from("blue")]),
            ("drivetrain", vec![CellValue::from("front"), CellValue::from("all")]),
        ]);
        let (table, _) = encode_categoricals(
            table,
            &["color".to_string(), "drivetrain".to_string()],
            ValueOrdering::Lexicographic,
        )
        .unwrap();

        let names: Vec<_> = table.column_names().collect();
        assert_eq!(names, vec!["color_0", "color_1", "drivetrain_0", "drivetrain_1"]);
    }
}
