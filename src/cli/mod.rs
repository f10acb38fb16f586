// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// This is the entry point for all user interaction.
// It uses the `clap` crate to parse command line arguments.
// All business logic is delegated to Layer 2 (application).
//
// Three commands are supported:
//   1. `train`    — fits the LSTM on the filtered stunting series
//   2. `forecast` — loads a checkpoint and predicts future values
//   3. `trend`    — yearly totals of the filtered data
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

pub mod commands;

use anyhow::Result;
use clap::Parser;
use std::path::Path;

use commands::{Commands, ForecastArgs, TrainArgs, TrendArgs};
use crate::data::loader::CsvLoader;
use crate::infra::report::format_totals;

#[derive(Parser, Debug)]
#[command(
    name = "stunting-forecast",
    version = "0.1.0",
    about = "Forecast child stunting counts with a stacked LSTM trained on regional CSV data."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Dispatch to the matching use case. Routing only.
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Train(args)    => run_train(args),
            Commands::Forecast(args) => run_forecast(args),
            Commands::Trend(args)    => run_trend(args),
        }
    }
}

fn run_train(args: TrainArgs) -> Result<()> {
    use crate::application::train_use_case::{TrainConfig, TrainUseCase};

    let config: TrainConfig = args.into();
    tracing::info!("Starting training on: {}", config.data.data_path);

    let source   = CsvLoader::new(&config.data.data_path);
    let ckpt_dir = config.checkpoint_dir.clone();
    TrainUseCase::new(config).execute(&source)?;

    println!("Training complete. Checkpoint saved to '{}'.", ckpt_dir);
    Ok(())
}

fn run_forecast(args: ForecastArgs) -> Result<()> {
    use crate::application::forecast_use_case::ForecastUseCase;

    let use_case = ForecastUseCase::new(&args.checkpoint_dir)?;
    let values   = use_case.forecast(args.steps, args.data_path.as_deref())?;

    for (step, value) in values.iter().enumerate() {
        println!("t+{:<3} {:.1}", step + 1, value);
    }
    Ok(())
}

fn run_trend(args: TrendArgs) -> Result<()> {
    use crate::application::trend_use_case::TrendUseCase;

    let source = CsvLoader::new(&args.data.data_path);
    let totals = TrendUseCase::new(args.data.into())
        .execute(&source, args.out_dir.as_deref().map(Path::new))?;

    print!("{}", format_totals(&totals));
    Ok(())
}
