//! Column kind classification

use crate::config::InferenceStrategy;
use crate::model::{CellType, ColumnKind, Table};

pub const STAGE: &str = "classify";

/// A column whose values disagree with its assigned kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ambiguity {
    pub column: String,
    pub kind: ColumnKind,
    /// Non-null values of a different kind
    pub mismatched: usize,
    /// Row index of the first such value
    pub first_row: usize,
}

/// Column kinds decided for one table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    /// Every column with its kind, in table order
    pub kinds: Vec<(String, ColumnKind)>,
    pub ambiguities: Vec<Ambiguity>,
}

impl Classification {
    /// Columns classified as boolean, in table order
    pub fn boolean_columns(&self) -> Vec<String> {
        self.columns_of(ColumnKind::Boolean)
    }

    /// Columns classified as string, in table order
    pub fn string_columns(&self) -> Vec<String> {
        self.columns_of(ColumnKind::String)
    }

    /// Kind assigned to a column
    pub fn kind_of(&self, column: &str) -> Option<ColumnKind> {
        self.kinds
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, kind)| *kind)
    }

    fn columns_of(&self, kind: ColumnKind) -> Vec<String> {
        self.kinds
            .iter()
            .filter(|(_, k)| *k == kind)
            .map(|(name, _)| name.clone())
            .collect()
    }
}

/// Assign a kind to every column and flag values that disagree with it
pub fn classify(table: &Table, strategy: InferenceStrategy) -> Classification {
    let mut result = Classification::default();

    for (idx, column) in table.columns.iter().enumerate() {
        let kind = match strategy {
            InferenceStrategy::FirstRow => first_row_kind(table, idx),
            InferenceStrategy::Majority => majority_kind(table, idx),
        };
        let type_name = table
            .rows
            .first()
            .and_then(|row| row.get(idx))
            .map(CellType::of)
            .unwrap_or_default();
        tracing::info!("Feature = {}, Type = {} ({})", column.name, type_name, kind);

        if let Some(ambiguity) = find_ambiguity(table, idx, kind) {
            tracing::warn!(
                column = %ambiguity.column,
                kind = %ambiguity.kind,
                mismatched = ambiguity.mismatched,
                first_row = ambiguity.first_row,
                "column holds values of a different kind than classified"
            );
            result.ambiguities.push(ambiguity);
        }
        result.kinds.push((column.name.clone(), kind));
    }

    result
}

fn first_row_kind(table: &Table, idx: usize) -> ColumnKind {
    table
        .rows
        .first()
        .and_then(|row| row.get(idx))
        .map(ColumnKind::of)
        .unwrap_or(ColumnKind::Other)
}

/// Most frequent kind among non-null values; ties favour boolean, then string
fn majority_kind(table: &Table, idx: usize) -> ColumnKind {
    let mut counts = [0usize; 3];
    for cell in table.column_values(idx).filter(|c| !c.is_null()) {
        match ColumnKind::of(cell) {
            ColumnKind::Boolean => counts[0] += 1,
            ColumnKind::String => counts[1] += 1,
            ColumnKind::Other => counts[2] += 1,
        }
    }

    let [boolean, string, other] = counts;
    if boolean > 0 && boolean >= string && boolean >= other {
        ColumnKind::Boolean
    } else if string > 0 && string >= other {
        ColumnKind::String
    } else {
        ColumnKind::Other
    }
}

fn find_ambiguity(table: &Table, idx: usize, kind: ColumnKind) -> Option<Ambiguity> {
    let mut mismatched = table
        .column_values(idx)
        .enumerate()
        .filter(|(_, cell)| !cell.is_null() && ColumnKind::of(cell) != kind)
        .map(|(row, _)| row);

    let first_row = mismatched.next()?;
    Some(Ambiguity {
        column: table.columns[idx].name.clone(),
        kind,
        mismatched: 1 + mismatched.count(),
        first_row,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CellValue;

    fn mixed_table() -> Table {
        Table::from_columns(vec![
            (
                "is_new",
                vec![CellValue::Bool(true), CellValue::Bool(false), CellValue::Bool(true)],
            ),
            (
                "color",
                vec![CellValue::from("red"), CellValue::from("blue"), CellValue::from("red")],
            ),
            (
                "price",
                vec![CellValue::Float(10.0), CellValue::Int(3), CellValue::Float(7.5)],
            ),
        ])
    }

    #[test]
    fn test_classify_first_row() {
        let c = classify(&mixed_table(), InferenceStrategy::FirstRow);
        assert_eq!(c.boolean_columns(), vec!["is_new"]);
        assert_eq!(c.string_columns(), vec!["color"]);
        assert_eq!(c.kind_of("price"), Some(ColumnKind::Other));
        assert!(c.ambiguities.is_empty());
    }

    #[test]
    fn test_first_row_misclassification_is_reported() {
        let table = Table::from_columns(vec![(
            "engine_type",
            vec![CellValue::Int(0), CellValue::from("diesel"), CellValue::from("gasoline")],
        )]);
        let c = classify(&table, InferenceStrategy::FirstRow);
        assert_eq!(c.kind_of("engine_type"), Some(ColumnKind::Other));
        assert_eq!(
            c.ambiguities,
            vec![Ambiguity {
                column: "engine_type".to_string(),
                kind: ColumnKind::Other,
                mismatched: 2,
                first_row: 1,
            }]
        );
    }

    #[test]
    fn test_majority_ignores_atypical_first_row() {
        let table = Table::from_columns(vec![(
            "engine_type",
            vec![CellValue::Null, CellValue::from("diesel"), CellValue::from("gasoline")],
        )]);
        let first = classify(&table, InferenceStrategy::FirstRow);
        assert_eq!(first.kind_of("engine_type"), Some(ColumnKind::Other));

        let majority = classify(&table, InferenceStrategy::Majority);
        assert_eq!(majority.kind_of("engine_type"), Some(ColumnKind::String));
        assert!(majority.ambiguities.is_empty());
    }

    #[test]
    fn test_empty_table_is_other() {
        let table = Table::new(vec![crate::model::Column::new("empty")]);
        let c = classify(&table, InferenceStrategy::FirstRow);
        assert_eq!(c.kind_of("empty"), Some(ColumnKind::Other));
        let c = classify(&table, InferenceStrategy::Majority);
        assert_eq!(c.kind_of("empty"), Some(ColumnKind::Other));
    }
}
