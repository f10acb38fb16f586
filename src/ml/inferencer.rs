// ============================================================
// Layer 5 — Inferencer
// ============================================================
// Runs a trained LstmForecaster over a WindowSet and hands back
// one normalised prediction per window. Implements the domain
// Forecaster trait so the application layer never sees tensors.
use anyhow::Result;
use burn::prelude::*;

use crate::data::batcher::windows_to_tensor;
use crate::domain::window::WindowSet;
use crate::domain::errors::ShapeError;
use crate::domain::traits::Forecaster;
use crate::infra::checkpoint::CheckpointManager;
use crate::ml::model::LstmForecaster;
use crate::ml::InferBackend;

pub struct Inferencer {
    model:  LstmForecaster<InferBackend>,
    device: burn::backend::ndarray::NdArrayDevice,
}

impl Inferencer {
    pub fn new(model: LstmForecaster<InferBackend>) -> Self {
        Self { model, device: Default::default() }
    }

    /// Rebuild the model from the saved config and load the latest weights.
    pub fn from_checkpoint(ckpt_manager: &CheckpointManager) -> Result<Self> {
        let device = burn::backend::ndarray::NdArrayDevice::default();
        let cfg    = ckpt_manager.load_config()?;
        let model: LstmForecaster<InferBackend> = cfg.model_config().init(&device);
        let model  = ckpt_manager.load_model(model, &device)?;
        tracing::info!("Model loaded from checkpoint");
        Ok(Self { model, device })
    }
}

impl Forecaster for Inferencer {
    fn predict(&self, windows: &WindowSet) -> Result<Vec<f64>> {
        // Empty sets cannot be reshaped to [n, W, 1]
        let [n, _, _] = windows.shape()?;

        let rows: Vec<Vec<f32>> = windows
            .windows()
            .iter()
            .map(|w| w.iter().map(|&v| v as f32).collect())
            .collect();

        let inputs = windows_to_tensor::<InferBackend>(&rows, &self.device);
        let output = self.model.forward(inputs); // [n, 1]

        let preds = output
            .into_data()
            .to_vec::<f32>()
            .map_err(|e| anyhow::anyhow!("Cannot read predictions: {e:?}"))?;

        if preds.len() != n {
            return Err(ShapeError::PredictionCount { expected: n, actual: preds.len() }.into());
        }
        Ok(preds.into_iter().map(f64::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::windower::make_windows;
    use crate::ml::model::LstmForecasterConfig;

    fn inferencer() -> Inferencer {
        let device = burn::backend::ndarray::NdArrayDevice::default();
        Inferencer::new(LstmForecasterConfig::new(vec![4], 2).init(&device))
    }

    #[test]
    fn test_one_prediction_per_window() {
        let set   = make_windows(&[0.0, 0.1, 0.2, 0.3, 0.4, 0.5, 0.6], 3).unwrap();
        let preds = inferencer().predict(&set).unwrap();
        assert_eq!(preds.len(), set.len());
        assert!(preds.iter().all(|p| p.is_finite()));
    }

    #[test]
    fn test_empty_set_is_shape_error() {
        let set = WindowSet::empty(3);
        let err = inferencer().predict(&set).unwrap_err();
        assert_eq!(err.downcast_ref::<ShapeError>(), Some(&ShapeError::EmptyWindowSet));
    }
}
