//! featprep - numeric feature preparation for tabular listing data

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use termcolor::ColorChoice;

use featprep::config::{
    default_drop_columns, Config, InferenceStrategy, MissingColumnPolicy, ValueOrdering,
    DEFAULT_HEAD_ROWS, DEFAULT_INPUT,
};
use featprep::logging;
use featprep::output::{render_to_stdout, OutputFactory};
use featprep::parser::ParserFactory;
use featprep::transform::Pipeline;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliOrdering {
    Lexicographic,
    FirstAppearance,
}

impl From<CliOrdering> for ValueOrdering {
    fn from(o: CliOrdering) -> Self {
        match o {
            CliOrdering::Lexicographic => ValueOrdering::Lexicographic,
            CliOrdering::FirstAppearance => ValueOrdering::FirstAppearance,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliInference {
    FirstRow,
    Majority,
}

impl From<CliInference> for InferenceStrategy {
    fn from(i: CliInference) -> Self {
        match i {
            CliInference::FirstRow => InferenceStrategy::FirstRow,
            CliInference::Majority => InferenceStrategy::Majority,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliColor {
    Auto,
    Always,
    Never,
}

impl From<CliColor> for ColorChoice {
    fn from(c: CliColor) -> Self {
        match c {
            CliColor::Auto => ColorChoice::Auto,
            CliColor::Always => ColorChoice::Always,
            CliColor::Never => ColorChoice::Never,
        }
    }
}

/// Turn mixed-type tabular listing data into a numeric feature matrix
#[derive(Parser, Debug)]
#[command(name = "featprep")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input table (CSV, TSV or JSON)
    #[arg(default_value = DEFAULT_INPUT)]
    input: PathBuf,

    /// Write the transformed table here (.csv or .json)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Column(s) to drop before encoding (comma-separated) [default: location_region,feature_0..feature_9]
    #[arg(long, value_delimiter = ',')]
    drop: Option<Vec<String>>,

    /// Skip drop columns that are not in the input instead of failing
    #[arg(long)]
    ignore_missing: bool,

    /// Order of one-hot indicator columns
    #[arg(long, value_enum, default_value = "lexicographic")]
    ordering: CliOrdering,

    /// How each column's kind is decided
    #[arg(long, value_enum, default_value = "first-row")]
    infer: CliInference,

    /// Rows shown in the final report
    #[arg(long, default_value_t = DEFAULT_HEAD_ROWS)]
    head: usize,

    /// When to color the report
    #[arg(long, value_enum, default_value = "auto")]
    color: CliColor,

    /// Log every stage
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(1)
        }
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose)?;

    let missing_columns = if cli.ignore_missing {
        MissingColumnPolicy::Ignore
    } else {
        MissingColumnPolicy::Error
    };

    let mut config = Config::new(cli.input.clone())
        .with_drop_columns(cli.drop.unwrap_or_else(default_drop_columns))
        .with_missing_columns(missing_columns)
        .with_ordering(cli.ordering.into())
        .with_inference(cli.infer.into())
        .with_head_rows(cli.head);
    if let Some(output) = cli.output {
        config = config.with_output(output);
    }

    let table = ParserFactory::new()
        .parse(&config.input)
        .with_context(|| format!("Failed to load {}", config.input.display()))?;

    let output = Pipeline::new(config.clone())
        .run(table)
        .context("Failed to transform table")?;

    if let Some(ref path) = config.output {
        OutputFactory::new()
            .write_to_path(&output.table, path)
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }

    render_to_stdout(&output.table, config.head_rows, cli.color.into())
        .context("Failed to print report")?;

    Ok(())
}
