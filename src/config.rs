//! Configuration handling for featprep

use std::path::PathBuf;

/// Input file read when none is given
pub const DEFAULT_INPUT: &str = "cars.csv";

/// Rows shown by the reporter
pub const DEFAULT_HEAD_ROWS: usize = 5;

/// Columns dropped before classification: `location_region` holds bogus
/// data and `feature_0..feature_9` carry no documented meaning.
pub fn default_drop_columns() -> Vec<String> {
    std::iter::once("location_region".to_string())
        .chain((0..10).map(|i| format!("feature_{}", i)))
        .collect()
}

/// What the pruner does when a configured column is absent
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MissingColumnPolicy {
    /// Abort the run
    #[default]
    Error,
    /// Log a warning and continue
    Ignore,
}

/// Order in which distinct categorical values receive indicator indices
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ValueOrdering {
    /// Byte-wise ascending
    #[default]
    Lexicographic,
    /// Order of first occurrence in the column
    FirstAppearance,
}

impl std::str::FromStr for ValueOrdering {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "lexicographic" | "sorted" => Ok(ValueOrdering::Lexicographic),
            "first-appearance" | "first" => Ok(ValueOrdering::FirstAppearance),
            _ => Err(format!("Unknown value ordering: {}", s)),
        }
    }
}

/// How a column's kind is decided
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InferenceStrategy {
    /// Look at row 0 only
    #[default]
    FirstRow,
    /// Most frequent kind among non-null values
    Majority,
}

impl std::str::FromStr for InferenceStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "first-row" | "first" => Ok(InferenceStrategy::FirstRow),
            "majority" => Ok(InferenceStrategy::Majority),
            _ => Err(format!("Unknown inference strategy: {}", s)),
        }
    }
}

/// Configuration for a preparation run
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to the input table
    pub input: PathBuf,
    /// Where to write the transformed table, if anywhere
    pub output: Option<PathBuf>,
    /// Columns removed by the pruner
    pub drop_columns: Vec<String>,
    /// Behaviour for absent drop columns
    pub missing_columns: MissingColumnPolicy,
    /// Ordering of one-hot indicator columns
    pub ordering: ValueOrdering,
    /// Column kind inference
    pub inference: InferenceStrategy,
    /// Rows printed by the reporter
    pub head_rows: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            output: None,
            drop_columns: default_drop_columns(),
            missing_columns: MissingColumnPolicy::default(),
            ordering: ValueOrdering::default(),
            inference: InferenceStrategy::default(),
            head_rows: DEFAULT_HEAD_ROWS,
        }
    }
}

impl Config {
    /// Create a new Config for an input path
    pub fn new(input: PathBuf) -> Self {
        Self {
            input,
            ..Default::default()
        }
    }

    /// Set the output path
    pub fn with_output(mut self, output: PathBuf) -> Self {
        self.output = Some(output);
        self
    }

    /// Set the columns to drop
    pub fn with_drop_columns(mut self, columns: Vec<String>) -> Self {
        self.drop_columns = columns;
        self
    }

    /// Set the missing column policy
    pub fn with_missing_columns(mut self, policy: MissingColumnPolicy) -> Self {
        self.missing_columns = policy;
        self
    }

    /// Set the categorical value ordering
    pub fn with_ordering(mut self, ordering: ValueOrdering) -> Self {
        self.ordering = ordering;
        self
    }

    /// Set the column kind inference strategy
    pub fn with_inference(mut self, inference: InferenceStrategy) -> Self {
        self.inference = inference;
        self
    }

    /// Set the number of rows the reporter prints
    pub fn with_head_rows(mut self, rows: usize) -> Self {
        self.head_rows = rows;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_drop_columns() {
        let cols = default_drop_columns();
        assert_eq!(cols.len(), 11);
        assert_eq!(cols[0], "location_region");
        assert_eq!(cols[1], "feature_0");
        assert_eq!(cols[10], "feature_9");
    }

    #[test]
    fn test_parse_ordering() {
        assert_eq!(
            "lexicographic".parse::<ValueOrdering>(),
            Ok(ValueOrdering::Lexicographic)
        );
        assert_eq!(
            "First-Appearance".parse::<ValueOrdering>(),
            Ok(ValueOrdering::FirstAppearance)
        );
        assert!("random".parse::<ValueOrdering>().is_err());
    }
}
