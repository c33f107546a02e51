//! Boolean to 1/0 coercion

use crate::model::{CellValue, Table};

pub const STAGE: &str = "normalize";

/// Rewrite `true`/`false` cells of the given columns as `1`/`0`.
///
/// Cells of any other kind are left as they are. Unknown column names are
/// skipped.
pub fn normalize_booleans(mut table: Table, columns: &[String]) -> Table {
    for name in columns {
        let Some(idx) = table.column_index(name) else {
            tracing::debug!(column = %name, "boolean column not present, skipping");
            continue;
        };

        table.map_column(idx, |cell| match cell {
            CellValue::Bool(b) => CellValue::Int(i64::from(*b)),
            other => other.clone(),
        });
        table.infer_column_type(idx);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CellType;

    #[test]
    fn test_booleans_become_ints() {
        let table = Table::from_columns(vec![(
            "is_new",
            vec![CellValue::Bool(true), CellValue::Bool(false), CellValue::Bool(true)],
        )]);
        let table = normalize_booleans(table, &["is_new".to_string()]);

        let values: Vec<_> = table.column_values(0).cloned().collect();
        assert_eq!(
            values,
            vec![CellValue::Int(1), CellValue::Int(0), CellValue::Int(1)]
        );
        assert_eq!(table.columns[0].inferred_type, CellType::Int);
    }

    #[test]
    fn test_non_boolean_cells_pass_through() {
        let table = Table::from_columns(vec![(
            "has_warranty",
            vec![CellValue::Bool(false), CellValue::Null, CellValue::from("unknown")],
        )]);
        let table = normalize_booleans(table, &["has_warranty".to_string()]);

        let values: Vec<_> = table.column_values(0).cloned().collect();
        assert_eq!(
            values,
            vec![CellValue::Int(0), CellValue::Null, CellValue::from("unknown")]
        );
    }

    #[test]
    fn test_missing_column_is_noop() {
        let table = Table::from_columns(vec![("year", vec![CellValue::Int(2001)])]);
        let before = table.clone();
        assert_eq!(normalize_booleans(table, &["is_new".to_string()]), before);
    }
}
