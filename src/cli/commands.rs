// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Defines the three subcommands: `train`, `forecast` and `trend`
// and all their configurable flags. Every flag has a default, so
// `stunting-forecast train` alone reproduces the standard run.
//
// Reference: Rust Book §12 (Building a CLI Program)

use clap::{Args, Subcommand};

use crate::application::prepare::DataConfig;
use crate::application::train_use_case::TrainConfig;
use crate::domain::record::ColumnMap;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Train the LSTM forecaster on the stunting CSV
    Train(TrainArgs),

    /// Forecast future values with a trained checkpoint
    Forecast(ForecastArgs),

    /// Print yearly totals of the filtered data
    Trend(TrendArgs),
}

/// Input file and the slice of it to use. Shared by `train` and `trend`.
#[derive(Args, Debug, Clone)]
pub struct DataArgs {
    /// CSV file with one row per region and year
    #[arg(long = "data", default_value = "Data.csv")]
    pub data_path: String,

    #[arg(long, default_value = "tahun")]
    pub year_column: String,

    #[arg(long, default_value = "jumlah_balita_stunting")]
    pub count_column: String,

    /// Region column; pass an empty string if the file has none
    #[arg(long, default_value = "nama_kabupaten_kota")]
    pub region_column: String,

    /// Identifier columns removed after filtering
    #[arg(
        long,
        value_delimiter = ',',
        default_values = ["kode_provinsi", "nama_provinsi", "kode_kabupaten_kota"]
    )]
    pub drop_columns: Vec<String>,

    /// First year kept (inclusive)
    #[arg(long, default_value_t = 2018)]
    pub from_year: i32,

    /// Last year kept (inclusive)
    #[arg(long, default_value_t = 2023)]
    pub to_year: i32,

    /// Stable-sort rows by year instead of rejecting unordered input
    #[arg(long)]
    pub sort_by_year: bool,
}

impl From<DataArgs> for DataConfig {
    fn from(a: DataArgs) -> Self {
        let region = Some(a.region_column).filter(|r| !r.is_empty());
        DataConfig {
            data_path:    a.data_path,
            columns:      ColumnMap { year: a.year_column, count: a.count_column, region },
            drop_columns: a.drop_columns,
            year_from:    a.from_year,
            year_to:      a.to_year,
            sort_by_year: a.sort_by_year,
        }
    }
}

/// All arguments for the `train` command.
#[derive(Args, Debug)]
pub struct TrainArgs {
    #[command(flatten)]
    pub data: DataArgs,

    /// Directory for weights, config, scaler, metrics and reports
    #[arg(long, default_value = "checkpoints")]
    pub checkpoint_dir: String,

    /// Fraction of the series used for training
    #[arg(long, default_value_t = 0.80)]
    pub training_pct: f64,

    /// Fraction of the series used for validation
    #[arg(long, default_value_t = 0.20)]
    pub validation_pct: f64,

    /// Window width (past values per example)
    #[arg(long, default_value_t = 30)]
    pub time_step: usize,

    #[arg(long, default_value_t = 25)]
    pub epochs: usize,

    #[arg(long, default_value_t = 5)]
    pub batch_size: usize,

    /// Adam learning rate
    #[arg(long, default_value_t = 1e-3)]
    pub lr: f64,

    /// Hidden sizes of the stacked LSTM layers, comma separated
    #[arg(long, value_delimiter = ',', default_values_t = [100usize, 100, 50])]
    pub lstm_hidden: Vec<usize>,

    /// Width of the dense layer before the output
    #[arg(long, default_value_t = 30)]
    pub dense_size: usize,

    #[arg(long, default_value_t = 0.1)]
    pub dropout: f64,

    /// Seed for weight init and batch shuffling
    #[arg(long, default_value_t = 42)]
    pub seed: u64,
}

/// Convert CLI TrainArgs into the application-layer TrainConfig.
/// The application layer never sees clap types.
impl From<TrainArgs> for TrainConfig {
    fn from(a: TrainArgs) -> Self {
        TrainConfig {
            data:           a.data.into(),
            checkpoint_dir: a.checkpoint_dir,
            training_pct:   a.training_pct,
            validation_pct: a.validation_pct,
            time_step:      a.time_step,
            epochs:         a.epochs,
            batch_size:     a.batch_size,
            lr:             a.lr,
            lstm_hidden:    a.lstm_hidden,
            dense_size:     a.dense_size,
            dropout:        a.dropout,
            seed:           a.seed,
        }
    }
}

/// All arguments for the `forecast` command
#[derive(Args, Debug)]
pub struct ForecastArgs {
    /// Directory where a training run saved its checkpoint
    #[arg(long, default_value = "checkpoints")]
    pub checkpoint_dir: String,

    /// How many values past the end of the series to predict
    #[arg(long, default_value_t = 1)]
    pub steps: usize,

    /// Read a different CSV than the one used for training
    #[arg(long = "data")]
    pub data_path: Option<String>,
}

/// All arguments for the `trend` command
#[derive(Args, Debug)]
pub struct TrendArgs {
    #[command(flatten)]
    pub data: DataArgs,

    /// Also write yearly_totals.csv into this directory
    #[arg(long)]
    pub out_dir: Option<String>,
}
