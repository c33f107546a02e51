//! Removal of configured columns

use crate::config::MissingColumnPolicy;
use crate::error::{PrepError, Result};
use crate::model::Table;

pub const STAGE: &str = "prune";

/// Drop every named column from the table.
///
/// Under [`MissingColumnPolicy::Error`] an absent column aborts with
/// [`PrepError::MissingColumn`]; under `Ignore` it is logged and skipped.
pub fn prune_columns(
    mut table: Table,
    columns: &[String],
    policy: MissingColumnPolicy,
) -> Result<Table> {
    for name in columns {
        match (table.drop_column(name), policy) {
            (Some(_), _) => tracing::debug!(column = %name, "dropped column"),
            (None, MissingColumnPolicy::Ignore) => {
                tracing::warn!(column = %name, "column to drop not found, skipping");
            }
            (None, MissingColumnPolicy::Error) => {
                return Err(PrepError::MissingColumn {
                    stage: STAGE,
                    column: name.clone(),
                });
            }
        }
    }
    Ok(table)
}
