// ============================================================
// Layer 2 — TrainUseCase
// ============================================================
// Orchestrates the full training pipeline in order:
//
//   Step 1: Prepare the series          (Layer 2 - prepare)
//   Step 2: Yearly trend report         (Layer 4 - aggregator, Layer 6 - report)
//   Step 3: Split into segments         (Layer 4 - splitter)
//   Step 4: Window every segment        (Layer 4 - windower)
//   Step 5: Fit scaler on training      (Layer 4 - scaler)
//   Step 6: Save config + scaler        (Layer 6 - infra)
//   Step 7: Run training loop           (Layer 5 - ml)
//   Step 8: Evaluate in original units  (Layer 5 - ml, Layer 6 - metrics)
//
// Reference: Burn Book §5 (Training)

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::application::prepare::{prepare_series, DataConfig};
use crate::data::{
    aggregator::totals_by_year,
    dataset::WindowDataset,
    scaler::{MinMaxScaler, ScalerState},
    splitter::split_segments,
    windower::{make_windows, DEFAULT_TIME_STEP},
};
use crate::domain::errors::ShapeError;
use crate::domain::traits::{Forecaster, TableSource};
use crate::domain::window::WindowSet;
use crate::infra::{
    checkpoint::CheckpointManager,
    metrics::{EpochMetrics, MetricsLogger, RegressionMetrics},
    report::{format_totals, write_predictions, write_yearly_totals, PredictionRow},
};
use crate::ml::{inferencer::Inferencer, model::LstmForecasterConfig, trainer::run_training};

// ─── Training Configuration ──────────────────────────────────────────────────
// All settings for a training run. Serialisable so it can be
// saved next to the checkpoint and reloaded for forecasting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainConfig {
    pub data:           DataConfig,
    pub checkpoint_dir: String,
    pub training_pct:   f64,
    pub validation_pct: f64,
    pub time_step:      usize,
    pub epochs:         usize,
    pub batch_size:     usize,
    pub lr:             f64,
    pub lstm_hidden:    Vec<usize>,
    pub dense_size:     usize,
    pub dropout:        f64,
    pub seed:           u64,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            data:           DataConfig::default(),
            checkpoint_dir: "checkpoints".to_string(),
            training_pct:   0.80,
            validation_pct: 0.20,
            time_step:      DEFAULT_TIME_STEP,
            epochs:         25,
            batch_size:     5,
            lr:             1e-3,
            lstm_hidden:    vec![100, 100, 50],
            dense_size:     30,
            dropout:        0.1,
            seed:           42,
        }
    }
}

impl TrainConfig {
    pub fn model_config(&self) -> LstmForecasterConfig {
        LstmForecasterConfig::new(self.lstm_hidden.clone(), self.dense_size)
            .with_dropout(self.dropout)
    }

    /// Reject settings that would finish "successfully" without a
    /// usable checkpoint.
    pub fn validate(&self) -> Result<()> {
        if self.epochs == 0 {
            bail!("epochs must be at least 1; no checkpoint would be written");
        }
        if self.batch_size == 0 {
            bail!("batch_size must be at least 1");
        }
        if self.lstm_hidden.is_empty() {
            bail!("lstm_hidden needs at least one layer size");
        }
        Ok(())
    }
}

/// Error metrics and per-window predictions for one segment.
#[derive(Debug, Clone)]
pub struct SegmentEvaluation {
    pub segment: &'static str,
    pub metrics: RegressionMetrics,
    pub rows:    Vec<PredictionRow>,
}

/// What a finished run hands back to the caller.
#[derive(Debug, Clone)]
pub struct TrainSummary {
    pub scaler:      ScalerState,
    pub history:     Vec<EpochMetrics>,
    pub evaluations: Vec<SegmentEvaluation>,
}

// ─── TrainUseCase ─────────────────────────────────────────────────────────────
pub struct TrainUseCase {
    config: TrainConfig,
}

impl TrainUseCase {
    pub fn new(config: TrainConfig) -> Self {
        Self { config }
    }

    pub fn execute(&self, source: &impl TableSource) -> Result<TrainSummary> {
        let cfg = &self.config;
        cfg.validate()?;

        // ── Step 1: Load, filter, order ───────────────────────────────────────
        let prepared = prepare_series(source, &cfg.data)?;

        // ── Step 2: Trend report (side branch) ────────────────────────────────
        let totals       = totals_by_year(&prepared.records);
        let ckpt_manager = CheckpointManager::new(&cfg.checkpoint_dir);
        println!("{}", format_totals(&totals));
        write_yearly_totals(ckpt_manager.dir(), &totals)?;

        // ── Step 3: Contiguous train / validation / test split ────────────────
        let bounds   = split_segments(prepared.series.len(), cfg.training_pct, cfg.validation_pct)?;
        let segments = bounds.slice(&prepared.series);
        tracing::info!(
            "Split: {} train, {} validation, {} test",
            segments.training.len(),
            segments.validation.len(),
            segments.test.len(),
        );

        // ── Step 4: Windows on raw values ─────────────────────────────────────
        let train_raw = make_windows(segments.training,   cfg.time_step)?;
        let val_raw   = make_windows(segments.validation, cfg.time_step)?;
        let test_raw  = make_windows(segments.test,       cfg.time_step)?;
        tracing::info!(
            "Windows (time_step={}): {} train, {} validation, {} test",
            cfg.time_step, train_raw.len(), val_raw.len(), test_raw.len(),
        );

        if train_raw.is_empty() {
            return Err(ShapeError::EmptyWindowSet).with_context(|| {
                format!(
                    "Training segment has {} values; time_step {} needs at least {}",
                    segments.training.len(),
                    cfg.time_step,
                    cfg.time_step.saturating_add(2),
                )
            });
        }

        // ── Step 5: Fit once on training, reuse everywhere ────────────────────
        let mut scaler = MinMaxScaler::new();
        let state      = scaler.fit(segments.training)?;
        let train_set  = scaler.transform_windows(&train_raw)?;
        let val_set    = scaler.transform_windows(&val_raw)?;
        let test_set   = scaler.transform_windows(&test_raw)?;

        // ── Step 6: Save config + scaler for forecasting ──────────────────────
        ckpt_manager.save_config(cfg)?;
        ckpt_manager.save_scaler(&state)?;

        // ── Step 7: Train ─────────────────────────────────────────────────────
        let metrics_logger = MetricsLogger::new(&cfg.checkpoint_dir)?;
        let outcome = run_training(
            cfg,
            WindowDataset::from_windows(&train_set),
            WindowDataset::from_windows(&val_set),
            &ckpt_manager,
            &metrics_logger,
        )?;
        tracing::info!("Epoch losses written to '{}'", metrics_logger.csv_path().display());

        // ── Step 8: Predict + invert + score ──────────────────────────────────
        let inferencer = Inferencer::new(outcome.model);
        let mut evaluations = Vec::new();
        for (name, raw, scaled) in [
            ("train",      &train_raw, &train_set),
            ("validation", &val_raw,   &val_set),
            ("test",       &test_raw,  &test_set),
        ] {
            match evaluate_segment(name, raw, scaled, &inferencer, &scaler)? {
                Some(eval) => evaluations.push(eval),
                None => tracing::warn!("{} segment has no windows; skipping evaluation", name),
            }
        }

        println!("====== LSTM ERROR METRICS ======");
        for e in &evaluations {
            println!(
                "{:<10} RMSE={:.3}  MSE={:.3}  MAE={:.3}",
                e.segment, e.metrics.rmse, e.metrics.mse, e.metrics.mae
            );
        }

        let rows: Vec<PredictionRow> = evaluations.iter().flat_map(|e| e.rows.clone()).collect();
        write_predictions(ckpt_manager.dir(), &rows)?;

        Ok(TrainSummary { scaler: state, history: outcome.history, evaluations })
    }
}

/// Predict one segment and score it in original units.
/// Returns None for a segment without windows.
fn evaluate_segment(
    name:       &'static str,
    raw:        &WindowSet,
    scaled:     &WindowSet,
    forecaster: &impl Forecaster,
    scaler:     &MinMaxScaler,
) -> Result<Option<SegmentEvaluation>> {
    if scaled.is_empty() {
        return Ok(None);
    }
    if !raw.is_labelled() {
        bail!("{name} windows carry no labels to score against");
    }

    let predicted_norm = forecaster.predict(scaled)?;
    let predicted      = scaler.inverse_transform_all(&predicted_norm)?;
    let actual         = raw.labels();

    let metrics = RegressionMetrics::compute(actual, &predicted)?;
    let rows    = PredictionRow::for_segment(name, actual, &predicted);
    Ok(Some(SegmentEvaluation { segment: name, metrics, rows }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::prepare::tests::{table, MemorySource};

    fn small_config(dir: &str) -> TrainConfig {
        TrainConfig {
            checkpoint_dir: dir.to_string(),
            time_step:      3,
            epochs:         2,
            batch_size:     4,
            lstm_hidden:    vec![4],
            dense_size:     3,
            ..TrainConfig::default()
        }
    }

    fn rows(n: usize) -> Vec<(i32, &'static str, f64)> {
        (0..n).map(|i| (2018 + (i / 5) as i32, "R", 100.0 + i as f64)).collect()
    }

    #[test]
    fn test_end_to_end_training_run() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = small_config(dir.path().to_str().unwrap());

        // 30 rows → 24 train (20 windows), 6 validation (2 windows), 0 test
        let summary = TrainUseCase::new(cfg).execute(&MemorySource(table(&rows(30)))).unwrap();

        assert_eq!(summary.history.len(), 2);
        // Scaler fitted on the training segment only
        assert_eq!(summary.scaler, ScalerState { min: 100.0, max: 123.0 });

        let names: Vec<&str> = summary.evaluations.iter().map(|e| e.segment).collect();
        assert_eq!(names, vec!["train", "validation"]);
        assert_eq!(summary.evaluations[0].rows.len(), 20);
        assert_eq!(summary.evaluations[1].rows.len(), 2);
        // Validation labels are the raw counts, not normalised values
        assert_eq!(summary.evaluations[1].rows[0].actual, 127.0);

        for file in ["train_config.json", "scaler.json", "metrics.csv", "yearly_totals.csv", "predictions.csv"] {
            assert!(dir.path().join(file).exists(), "{file} missing");
        }
    }

    #[test]
    fn test_training_segment_too_short() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = TrainConfig { time_step: 30, ..small_config(dir.path().to_str().unwrap()) };

        let err = TrainUseCase::new(cfg).execute(&MemorySource(table(&rows(10)))).unwrap_err();
        assert_eq!(err.downcast_ref::<ShapeError>(), Some(&ShapeError::EmptyWindowSet));
    }

    #[test]
    fn test_huge_time_step_is_empty_window_error() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = TrainConfig { time_step: usize::MAX, ..small_config(dir.path().to_str().unwrap()) };

        let err = TrainUseCase::new(cfg).execute(&MemorySource(table(&rows(30)))).unwrap_err();
        assert_eq!(err.downcast_ref::<ShapeError>(), Some(&ShapeError::EmptyWindowSet));
    }

    #[test]
    fn test_zero_epochs_rejected_before_any_output() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = TrainConfig { epochs: 0, ..small_config(dir.path().to_str().unwrap()) };

        let err = TrainUseCase::new(cfg).execute(&MemorySource(table(&rows(30)))).unwrap_err();
        assert!(err.to_string().contains("epochs"));
        assert!(!dir.path().join("train_config.json").exists());
    }

    #[test]
    fn test_evaluate_requires_labels() {
        let device = burn::backend::ndarray::NdArrayDevice::default();
        let inferencer = Inferencer::new(LstmForecasterConfig::new(vec![2], 2).init(&device));
        let mut scaler = MinMaxScaler::new();
        scaler.fit(&[0.0, 1.0]).unwrap();

        let unlabelled = WindowSet::from_parts(2, vec![vec![0.2, 0.4]], vec![]).unwrap();
        assert!(evaluate_segment("test", &unlabelled, &unlabelled, &inferencer, &scaler).is_err());
    }

    #[test]
    fn test_evaluate_skips_empty_segment() {
        let device = burn::backend::ndarray::NdArrayDevice::default();
        let inferencer = Inferencer::new(LstmForecasterConfig::new(vec![2], 2).init(&device));
        let mut scaler = MinMaxScaler::new();
        scaler.fit(&[0.0, 1.0]).unwrap();

        let empty = WindowSet::empty(3);
        let eval  = evaluate_segment("test", &empty, &empty, &inferencer, &scaler).unwrap();
        assert!(eval.is_none());
    }
}
