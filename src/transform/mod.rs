//! Feature transformation pipeline
//!
//! Each stage consumes a [`Table`] and hands a new one to the next:
//! prune → classify → normalize → encode.

pub mod classify;
pub mod encode;
pub mod normalize;
pub mod prune;

use crate::config::Config;
use crate::error::Result;
use crate::model::Table;

pub use classify::{classify, Ambiguity, Classification};
pub use encode::{encode_categoricals, Category, EncodingReport};
pub use normalize::normalize_booleans;
pub use prune::prune_columns;

/// Table shape recorded after a stage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageSummary {
    pub stage: &'static str,
    pub rows: usize,
    pub columns: usize,
}

impl StageSummary {
    fn of(stage: &'static str, table: &Table) -> Self {
        let summary = Self {
            stage,
            rows: table.row_count(),
            columns: table.column_count(),
        };
        tracing::debug!(
            stage = summary.stage,
            rows = summary.rows,
            columns = summary.columns,
            "stage complete"
        );
        summary
    }
}

/// Result of a full pipeline run
#[derive(Debug)]
pub struct PipelineOutput {
    /// The numeric table
    pub table: Table,
    pub classification: Classification,
    pub encodings: Vec<EncodingReport>,
    /// Shape after loading and after every stage
    pub stages: Vec<StageSummary>,
}

/// Runs the transformation stages in order
pub struct Pipeline {
    config: Config,
}

impl Pipeline {
    /// Create a new pipeline with configuration
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Transform a loaded table
    pub fn run(&self, table: Table) -> Result<PipelineOutput> {
        let mut stages = vec![StageSummary::of("load", &table)];

        let table = prune_columns(
            table,
            &self.config.drop_columns,
            self.config.missing_columns,
        )?;
        stages.push(StageSummary::of(prune::STAGE, &table));

        let classification = classify(&table, self.config.inference);
        stages.push(StageSummary::of(classify::STAGE, &table));

        let table = normalize_booleans(table, &classification.boolean_columns());
        stages.push(StageSummary::of(normalize::STAGE, &table));

        let (table, encodings) = encode_categoricals(
            table,
            &classification.string_columns(),
            self.config.ordering,
        )?;
        stages.push(StageSummary::of(encode::STAGE, &table));

        Ok(PipelineOutput {
            table,
            classification,
            encodings,
            stages,
        })
    }
}

/// Convenience function to run the pipeline
pub fn prepare(table: Table, config: &Config) -> Result<PipelineOutput> {
    Pipeline::new(config.clone()).run(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MissingColumnPolicy;
    use crate::model::CellValue;

    fn listings() -> Table {
        Table::from_columns(vec![
            (
                "manufacturer_name",
                vec![CellValue::from("Subaru"), CellValue::from("Audi"), CellValue::from("Subaru")],
            ),
            (
                "location_region",
                vec![CellValue::from("Minsk"), CellValue::from("Brest"), CellValue::from("Minsk")],
            ),
            (
                "is_exchangeable",
                vec![CellValue::Bool(false), CellValue::Bool(true), CellValue::Bool(true)],
            ),
            (
                "odometer_value",
                vec![CellValue::Int(190000), CellValue::Int(290000), CellValue::Int(402000)],
            ),
        ])
    }

    fn config() -> Config {
        Config::default().with_drop_columns(vec!["location_region".to_string()])
    }

    #[test]
    fn test_run_produces_numeric_table() {
        let output = Pipeline::new(config()).run(listings()).unwrap();
        let names: Vec<_> = output.table.column_names().collect();
        assert_eq!(
            names,
            vec![
                "is_exchangeable",
                "odometer_value",
                "manufacturer_name_0",
                "manufacturer_name_1"
            ]
        );
        assert!(output
            .table
            .rows
            .iter()
            .flat_map(|r| r.cells.iter())
            .all(|c| matches!(c, CellValue::Int(_))));
    }

    #[test]
    fn test_stage_shapes() {
        let output = prepare(listings(), &config()).unwrap();
        let shapes: Vec<_> = output
            .stages
            .iter()
            .map(|s| (s.stage, s.rows, s.columns))
            .collect();
        assert_eq!(
            shapes,
            vec![
                ("load", 3, 4),
                ("prune", 3, 3),
                ("classify", 3, 3),
                ("normalize", 3, 3),
                ("encode", 3, 4),
            ]
        );
    }

    #[test]
    fn test_default_drop_list_requires_columns() {
        let err = prepare(listings(), &Config::default()).unwrap_err();
        assert_eq!(err.stage(), Some("prune"));

        let tolerant = Config::default().with_missing_columns(MissingColumnPolicy::Ignore);
        let output = prepare(listings(), &tolerant).unwrap();
        assert!(output.table.column("location_region").is_none());
    }
}
