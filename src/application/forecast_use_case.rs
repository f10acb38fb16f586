// ============================================================
// Layer 2 — Forecast Use Case
// ============================================================
// Rebuilds a trained model from its checkpoint directory and
// rolls it forward past the end of the observed series:
//
//   1. Load train_config.json, scaler.json and the latest weights
//   2. Prepare the series exactly as training did
//   3. Normalise the last `time_step` values with the saved scaler
//   4. Predict one step, slide the window, repeat
//   5. Map every prediction back to original units

use anyhow::{Context, Result};

use crate::application::prepare::prepare_series;
use crate::application::train_use_case::TrainConfig;
use crate::data::{loader::CsvLoader, scaler::MinMaxScaler};
use crate::domain::errors::ShapeError;
use crate::domain::traits::{Forecaster, TableSource};
use crate::domain::window::WindowSet;
use crate::infra::checkpoint::CheckpointManager;
use crate::ml::inferencer::Inferencer;

pub struct ForecastUseCase {
    config:     TrainConfig,
    scaler:     MinMaxScaler,
    inferencer: Inferencer,
}

impl ForecastUseCase {
    pub fn new(checkpoint_dir: &str) -> Result<Self> {
        let ckpt   = CheckpointManager::new(checkpoint_dir);
        let config = ckpt.load_config()?;
        let scaler = MinMaxScaler::from_state(ckpt.load_scaler()?)
            .context("Saved scaler state is unusable")?;
        let inferencer = Inferencer::from_checkpoint(&ckpt)?;
        tracing::info!(
            "Loaded checkpoint from '{}' (time_step={})",
            checkpoint_dir, config.time_step
        );
        Ok(Self { config, scaler, inferencer })
    }

    /// Forecast `steps` values after the end of the series read from
    /// `data_path`, or from the path recorded at training time.
    pub fn forecast(&self, steps: usize, data_path: Option<&str>) -> Result<Vec<f64>> {
        let path = data_path.unwrap_or(&self.config.data.data_path);
        self.forecast_from(&CsvLoader::new(path), steps)
    }

    pub fn forecast_from(&self, source: &impl TableSource, steps: usize) -> Result<Vec<f64>> {
        let prepared = prepare_series(source, &self.config.data)?;
        roll_forward(
            &prepared.series,
            steps,
            self.config.time_step,
            &self.inferencer,
            &self.scaler,
        )
    }
}

/// Feed each normalised prediction back in as the newest window value.
pub fn roll_forward(
    history:    &[f64],
    steps:      usize,
    width:      usize,
    forecaster: &impl Forecaster,
    scaler:     &MinMaxScaler,
) -> Result<Vec<f64>> {
    if width == 0 {
        return Err(ShapeError::ZeroWidth.into());
    }
    if history.len() < width {
        return Err(ShapeError::WindowLength { index: 0, expected: width, actual: history.len() })
            .context("Not enough history to seed the forecast window");
    }

    let mut window = scaler.transform_all(&history[history.len() - width..])?;
    let mut predicted_norm = Vec::with_capacity(steps);

    for _ in 0..steps {
        let set   = WindowSet::from_parts(width, vec![window.clone()], Vec::new())?;
        let preds = forecaster.predict(&set)?;
        let next  = *preds
            .first()
            .ok_or(ShapeError::PredictionCount { expected: 1, actual: 0 })?;

        predicted_norm.push(next);
        window.remove(0);
        window.push(next);
    }

    Ok(scaler.inverse_transform_all(&predicted_norm)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Predicts the newest value plus a fixed step, in normalised units.
    struct StepForecaster(f64);

    impl Forecaster for StepForecaster {
        fn predict(&self, windows: &WindowSet) -> Result<Vec<f64>> {
            Ok(windows.windows().iter().map(|w| w[w.len() - 1] + self.0).collect())
        }
    }

    fn fitted(min: f64, max: f64) -> MinMaxScaler {
        let mut s = MinMaxScaler::new();
        s.fit(&[min, max]).unwrap();
        s
    }

    #[test]
    fn test_predictions_feed_back_into_window() {
        let scaler = fitted(0.0, 10.0);
        let out = roll_forward(&[2.0, 4.0, 6.0, 8.0], 2, 3, &StepForecaster(0.1), &scaler).unwrap();
        assert_eq!(out.len(), 2);
        assert!((out[0] - 9.0).abs() < 1e-9);
        assert!((out[1] - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_steps_is_empty() {
        let scaler = fitted(0.0, 10.0);
        let out = roll_forward(&[1.0, 2.0], 0, 2, &StepForecaster(0.1), &scaler).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_short_history_rejected() {
        let scaler = fitted(0.0, 10.0);
        let err = roll_forward(&[1.0, 2.0], 1, 5, &StepForecaster(0.1), &scaler).unwrap_err();
        assert_eq!(
            err.downcast_ref::<ShapeError>(),
            Some(&ShapeError::WindowLength { index: 0, expected: 5, actual: 2 })
        );
    }

    #[test]
    fn test_unfitted_scaler_rejected() {
        let err = roll_forward(&[1.0, 2.0], 1, 2, &StepForecaster(0.1), &MinMaxScaler::new())
            .unwrap_err();
        assert!(err.downcast_ref::<crate::domain::errors::ScalerError>().is_some());
    }
}
