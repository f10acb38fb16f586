// ============================================================
// Layer 6 — Metrics
// ============================================================
// Two kinds of numbers come out of a training run:
//
//   EpochMetrics      — per-epoch MSE on the normalised training
//                       and validation windows, appended to
//                       metrics.csv as the run progresses
//
//   RegressionMetrics — MSE / RMSE / MAE between true and
//                       predicted values AFTER inverse scaling,
//                       i.e. in numbers of children
//
// Example metrics.csv (written with the csv crate, one row per
// epoch as training progresses):
//   epoch,train_loss,val_loss
//   1,0.084512,0.071233
//   2,0.031178,0.02941
//
// How to read the losses:
//   - Loss should decrease each epoch (model is learning)
//   - If val_loss increases while train_loss decreases → overfitting

use anyhow::{Context, Result};
use std::{
    fs::{self, OpenOptions},
    path::PathBuf,
};
use serde::{Deserialize, Serialize};

use crate::domain::errors::ShapeError;

/// One row of metrics data for a single training epoch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpochMetrics {
    /// The epoch number (starts at 1)
    pub epoch: usize,

    /// Average MSE over all training batches (normalised units)
    pub train_loss: f64,

    /// Average MSE over the validation batches; NaN when the
    /// validation segment produced no windows
    pub val_loss: f64,
}

impl EpochMetrics {
    pub fn new(epoch: usize, train_loss: f64, val_loss: f64) -> Self {
        Self { epoch, train_loss, val_loss }
    }
}

/// Logs epoch metrics to a CSV file for later analysis.
pub struct MetricsLogger {
    csv_path: PathBuf,
}

impl MetricsLogger {
    /// Create a new MetricsLogger, starting a fresh metrics.csv
    /// with its header row.
    pub fn new(dir: impl Into<String>) -> Result<Self> {
        let dir = PathBuf::from(dir.into());
        fs::create_dir_all(&dir)?;

        let csv_path = dir.join("metrics.csv");
        let mut writer = csv::Writer::from_path(&csv_path)
            .with_context(|| format!("Cannot create '{}'", csv_path.display()))?;
        writer.write_record(["epoch", "train_loss", "val_loss"])?;
        writer.flush()?;
        tracing::debug!("Created metrics CSV: '{}'", csv_path.display());

        Ok(Self { csv_path })
    }

    /// Append one epoch's metrics as a new row in the CSV.
    pub fn log(&self, m: &EpochMetrics) -> Result<()> {
        let file = OpenOptions::new()
            .append(true)
            .open(&self.csv_path)
            .with_context(|| format!("Cannot append to '{}'", self.csv_path.display()))?;

        // Header was written once by `new`
        let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(file);
        writer.serialize(m)?;
        writer.flush()?;

        tracing::debug!(
            "Logged epoch {} metrics: train_loss={:.4}, val_loss={:.4}",
            m.epoch,
            m.train_loss,
            m.val_loss,
        );

        Ok(())
    }

    pub fn csv_path(&self) -> &PathBuf {
        &self.csv_path
    }
}

// ─── Regression error metrics ─────────────────────────────────────────────────
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegressionMetrics {
    pub mse:  f64,
    pub rmse: f64,
    pub mae:  f64,
}

impl RegressionMetrics {
    /// Compare index-aligned true and predicted values.
    pub fn compute(actual: &[f64], predicted: &[f64]) -> Result<Self, ShapeError> {
        if actual.len() != predicted.len() {
            return Err(ShapeError::PredictionCount {
                expected: actual.len(),
                actual:   predicted.len(),
            });
        }
        if actual.is_empty() {
            return Err(ShapeError::EmptyWindowSet);
        }

        let n = actual.len() as f64;
        let (sq, abs) = actual
            .iter()
            .zip(predicted)
            .fold((0.0, 0.0), |(sq, abs), (a, p)| {
                let e = a - p;
                (sq + e * e, abs + e.abs())
            });

        let mse = sq / n;
        Ok(Self { mse, rmse: mse.sqrt(), mae: abs / n })
    }
}
