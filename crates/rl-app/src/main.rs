//! RegLens CLI

mod config;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use log::info;
use serde::Serialize;

use config::AppConfig;
use rl_core::data::{BuiltinDataset, DataSource};
use rl_models::lm::{DiagnosticResults, Diagnostics, IntervalKind, PlotSeries, PredictionInterval};
use rl_models::{AnalysisSession, SummaryRecord, REPORT_FILE_NAME};

#[derive(Parser)]
#[command(name = "reglens")]
#[command(about = "RegLens - explore a table and fit a simple linear regression")]
#[command(version)]
struct Cli {
    /// Show debug logs (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// TOML settings file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List columns and their types
    Columns {
        #[command(flatten)]
        source: SourceArgs,
    },

    /// Per-column summary statistics
    Describe {
        #[command(flatten)]
        source: SourceArgs,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Pearson correlations between numeric columns
    Correlate {
        #[command(flatten)]
        source: SourceArgs,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Fit response ~ predictor and print the summary
    Fit(FitArgs),
}

#[derive(Args)]
#[group(required = true, multiple = false)]
struct SourceArgs {
    /// Built-in dataset (mtcars, faithful)
    #[arg(long)]
    dataset: Option<BuiltinDataset>,

    /// CSV file with a header row
    #[arg(long)]
    csv: Option<PathBuf>,
}

#[derive(Args)]
struct FitArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Predictor column
    #[arg(short = 'x', long)]
    predictor: String,

    /// Response column
    #[arg(short = 'y', long)]
    response: String,

    /// Predict the response at these predictor values
    #[arg(long, allow_negative_numbers = true, num_args = 1..)]
    predict: Vec<f64>,

    /// Directory to write the text report into
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Write plot series and diagnostics as JSON to this file
    #[arg(long)]
    plot_data: Option<PathBuf>,

    /// Print JSON instead of text
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct FitOutput<'a> {
    summary: &'a SummaryRecord,
    predictions: &'a [PredictionInterval],
}

#[derive(Serialize)]
struct PlotData {
    series: PlotSeries,
    diagnostics: DiagnosticResults,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = AppConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Columns { source } => cmd_columns(&source, &config),
        Commands::Describe { source, json } => cmd_describe(&source, &config, json),
        Commands::Correlate { source, json } => cmd_correlate(&source, &config, json),
        Commands::Fit(args) => cmd_fit(&args, &config),
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_target(false)
        .init();
}

fn open_session(source: &SourceArgs, config: &AppConfig) -> Result<AnalysisSession> {
    let data_source = match (&source.dataset, &source.csv) {
        (Some(dataset), _) => DataSource::Builtin(*dataset),
        (None, Some(path)) => {
            let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
            DataSource::csv(bytes)
        }
        (None, None) => anyhow::bail!("either --dataset or --csv is required"),
    };

    let session = AnalysisSession::from_source(&data_source, &config.csv)
        .context("loading dataset")?
        .with_settings(config.regression, config.narrative)?;
    info!("loaded {}", session.dataset());
    Ok(session)
}

fn cmd_columns(source: &SourceArgs, config: &AppConfig) -> Result<()> {
    let session = open_session(source, config)?;
    for (name, series) in session.dataset().columns() {
        println!("{}\t{}", name, series.dtype());
    }
    Ok(())
}

fn cmd_describe(source: &SourceArgs, config: &AppConfig, json: bool) -> Result<()> {
    let session = open_session(source, config)?;
    let summary = session.summarize();

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        for (name, column) in &summary {
            println!("{}\n  {}", name, column);
        }
    }
    Ok(())
}

fn cmd_correlate(source: &SourceArgs, config: &AppConfig, json: bool) -> Result<()> {
    let session = open_session(source, config)?;
    let matrix = session.correlation()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&matrix)?);
    } else {
        println!("{}", matrix);
    }
    Ok(())
}

fn cmd_fit(args: &FitArgs, config: &AppConfig) -> Result<()> {
    let mut session = open_session(&args.source, config)?;
    session.select(&args.predictor, &args.response)?;
    let model = session.run_regression().with_context(|| {
        format!("fitting {} ~ {}", args.response, args.predictor)
    })?;
    info!("fitted {}", model);

    let level = config.regression.confidence_level;
    let predictions = args
        .predict
        .iter()
        .map(|&x| model.predict_interval(x, level, IntervalKind::Prediction))
        .collect::<rl_models::Result<Vec<_>>>()?;

    if let Some(path) = &args.plot_data {
        let plot = PlotData {
            series: model.plot_series(),
            diagnostics: Diagnostics::run_all(model)?,
        };
        fs::write(path, serde_json::to_string_pretty(&plot)?)
            .with_context(|| format!("writing {}", path.display()))?;
        info!("wrote plot data to {}", path.display());
    }

    let record = session.summary_record()?;

    if args.json {
        let output = FitOutput {
            summary: &record,
            predictions: &predictions,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print!("{}", record.to_text());
        for p in &predictions {
            println!(
                "\nPredicted {} at {} = {}: {:.3} ({}% prediction interval [{:.3}, {:.3}])",
                record.response,
                record.predictor,
                p.x,
                p.fit,
                p.level * 100.0,
                p.lower,
                p.upper
            );
        }
    }

    if let Some(dir) = &args.output {
        let path = write_report(dir, &record)?;
        println!("\nReport written to {}", path.display());
    }

    Ok(())
}

fn write_report(dir: &Path, record: &SummaryRecord) -> Result<PathBuf> {
    fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    let path = dir.join(REPORT_FILE_NAME);
    fs::write(&path, record.to_text()).with_context(|| format!("writing {}", path.display()))?;
    Ok(path)
}
