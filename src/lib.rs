//! featprep - numeric feature preparation for tabular listing data
//!
//! Loads a table of mixed-type records, drops unreliable columns, turns
//! boolean columns into 1/0 and one-hot encodes text columns so the result
//! can be fed to a machine-learning model.

pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod output;
pub mod parser;
pub mod transform;

pub use config::Config;
pub use error::{PrepError, Result};
pub use model::Table;
pub use transform::{prepare, Pipeline, PipelineOutput};
