//! Column metadata and type information

use serde::{Deserialize, Serialize};

use super::table::CellValue;

/// Inferred cell type for a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CellType {
    #[default]
    Null,
    Bool,
    Int,
    Float,
    String,
    Mixed,
}

impl CellType {
    /// Type of a single cell
    pub fn of(value: &CellValue) -> CellType {
        match value {
            CellValue::Null => CellType::Null,
            CellValue::Bool(_) => CellType::Bool,
            CellValue::Int(_) => CellType::Int,
            CellValue::Float(_) => CellType::Float,
            CellValue::String(_) => CellType::String,
        }
    }

    /// Widen the type to accommodate another type
    pub fn widen(self, other: CellType) -> CellType {
        if self == other {
            return self;
        }

        match (self, other) {
            (CellType::Null, t) | (t, CellType::Null) => t,
            (CellType::Int, CellType::Float) | (CellType::Float, CellType::Int) => CellType::Float,
            _ => CellType::Mixed,
        }
    }
}

impl std::fmt::Display for CellType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CellType::Null => write!(f, "null"),
            CellType::Bool => write!(f, "bool"),
            CellType::Int => write!(f, "int"),
            CellType::Float => write!(f, "float"),
            CellType::String => write!(f, "string"),
            CellType::Mixed => write!(f, "mixed"),
        }
    }
}

/// Semantic kind the pipeline assigns to a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnKind {
    /// Rewritten to 1/0
    Boolean,
    /// One-hot encoded
    String,
    /// Passed through unchanged
    Other,
}

impl ColumnKind {
    /// Kind a single value would give its column
    pub fn of(value: &CellValue) -> ColumnKind {
        match value {
            CellValue::Bool(_) => ColumnKind::Boolean,
            CellValue::String(_) => ColumnKind::String,
            _ => ColumnKind::Other,
        }
    }
}

impl std::fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ColumnKind::Boolean => write!(f, "boolean"),
            ColumnKind::String => write!(f, "string"),
            ColumnKind::Other => write!(f, "other"),
        }
    }
}

/// Column metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// Column name (from header)
    pub name: String,
    /// Inferred type from data
    pub inferred_type: CellType,
}

impl Column {
    /// Create a new column with a name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            inferred_type: CellType::Null,
        }
    }

    /// Create a column with a specified type
    pub fn with_type(name: impl Into<String>, cell_type: CellType) -> Self {
        Self {
            name: name.into(),
            inferred_type: cell_type,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_widen() {
        assert_eq!(CellType::Null.widen(CellType::Int), CellType::Int);
        assert_eq!(CellType::Int.widen(CellType::Float), CellType::Float);
        assert_eq!(CellType::Bool.widen(CellType::String), CellType::Mixed);
        assert_eq!(CellType::String.widen(CellType::Int), CellType::Mixed);
    }

    #[test]
    fn test_column_kind_of() {
        assert_eq!(ColumnKind::of(&CellValue::Bool(false)), ColumnKind::Boolean);
        assert_eq!(ColumnKind::of(&CellValue::from("red")), ColumnKind::String);
        assert_eq!(ColumnKind::of(&CellValue::Int(3)), ColumnKind::Other);
        assert_eq!(ColumnKind::of(&CellValue::Null), ColumnKind::Other);
    }
}
