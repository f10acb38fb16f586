// ============================================================
// Layer 4 — Min-Max Scaler
// ============================================================
// Maps values into [0, 1] using the min and max of the data it
// was fitted on:
//
//   transform(v)         = (v - min) / (max - min)
//   inverse_transform(v) =  v * (max - min) + min
//
// Fit exactly once, on the TRAINING segment. The same fitted
// state then transforms validation/test windows and labels and
// inverts the model's predictions. A second `fit` call is
// rejected with `ScalerError::AlreadyFitted`, so evaluation data
// can never leak into the scaling parameters.
//
// Values outside the fitted range are NOT clamped: a validation
// value above the training max simply maps above 1.0.
//
// A flat fit set (max == min) has no usable range and fails at
// fit time with `ScalerError::ZeroRange`.

use serde::{Deserialize, Serialize};

use crate::domain::window::WindowSet;
use crate::domain::errors::ScalerError;

/// Fitted min/max — everything needed to invert a transform.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScalerState {
    pub min: f64,
    pub max: f64,
}

impl ScalerState {
    /// Validate a min/max pair, e.g. one read back from disk.
    pub fn new(min: f64, max: f64) -> Result<Self, ScalerError> {
        if max - min == 0.0 {
            return Err(ScalerError::ZeroRange(min));
        }
        Ok(Self { min, max })
    }

    pub fn range(&self) -> f64 {
        self.max - self.min
    }
}

#[derive(Debug, Clone, Default)]
pub struct MinMaxScaler {
    state: Option<ScalerState>,
}

impl MinMaxScaler {
    pub fn new() -> Self {
        Self { state: None }
    }

    /// A scaler that is already fitted with a previously saved state.
    pub fn from_state(state: ScalerState) -> Result<Self, ScalerError> {
        let state = ScalerState::new(state.min, state.max)?;
        Ok(Self { state: Some(state) })
    }

    /// Record min and max of `values`. Only allowed once.
    pub fn fit(&mut self, values: &[f64]) -> Result<ScalerState, ScalerError> {
        if self.state.is_some() {
            return Err(ScalerError::AlreadyFitted);
        }
        if values.is_empty() {
            return Err(ScalerError::EmptyInput);
        }

        let (min, max) = values
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));
        let state = ScalerState::new(min, max)?;

        tracing::debug!("Scaler fitted on {} values: min={}, max={}", values.len(), min, max);
        self.state = Some(state);
        Ok(state)
    }

    fn fitted(&self) -> Result<&ScalerState, ScalerError> {
        self.state.as_ref().ok_or(ScalerError::NotFitted)
    }

    pub fn transform(&self, v: f64) -> Result<f64, ScalerError> {
        let s = self.fitted()?;
        Ok((v - s.min) / s.range())
    }

    pub fn inverse_transform(&self, v: f64) -> Result<f64, ScalerError> {
        let s = self.fitted()?;
        Ok(v * s.range() + s.min)
    }

    pub fn transform_all(&self, values: &[f64]) -> Result<Vec<f64>, ScalerError> {
        values.iter().map(|&v| self.transform(v)).collect()
    }

    pub fn inverse_transform_all(&self, values: &[f64]) -> Result<Vec<f64>, ScalerError> {
        values.iter().map(|&v| self.inverse_transform(v)).collect()
    }

    /// Normalise every window value and label of a WindowSet.
    pub fn transform_windows(&self, set: &WindowSet) -> Result<WindowSet, ScalerError> {
        set.try_map(|v| self.transform(v))
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::windower::make_windows;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    #[test]
    fn test_fit_and_transform() {
        let mut s = MinMaxScaler::new();
        let state = s.fit(&[10.0, 20.0, 30.0]).unwrap();
        assert_eq!(state, ScalerState { min: 10.0, max: 30.0 });
        assert_eq!(s.transform(10.0).unwrap(), 0.0);
        assert_eq!(s.transform(20.0).unwrap(), 0.5);
        assert_eq!(s.transform(30.0).unwrap(), 1.0);
        // Not clamped
        assert_eq!(s.transform(40.0).unwrap(), 1.5);
    }

    #[test]
    fn test_round_trip_within_tolerance() {
        let mut rng = StdRng::seed_from_u64(3);
        let values: Vec<f64> = (0..100).map(|_| rng.gen_range(-500.0..5000.0)).collect();
        let mut s = MinMaxScaler::new();
        let state = s.fit(&values).unwrap();

        for _ in 0..500 {
            let v    = rng.gen_range(state.min..=state.max);
            let back = s.inverse_transform(s.transform(v).unwrap()).unwrap();
            assert!((back - v).abs() <= 1e-9 * v.abs().max(1.0), "{v} → {back}");
        }
    }

    #[test]
    fn test_refit_is_rejected_and_state_unchanged() {
        let mut s = MinMaxScaler::new();
        let first = s.fit(&[0.0, 100.0]).unwrap();
        assert_eq!(s.fit(&[5.0, 6.0]), Err(ScalerError::AlreadyFitted));
        assert_eq!(first, ScalerState { min: 0.0, max: 100.0 });
        assert_eq!(s.transform(50.0).unwrap(), 0.5);
    }

    #[test]
    fn test_use_before_fit() {
        let s = MinMaxScaler::new();
        assert_eq!(s.transform(1.0), Err(ScalerError::NotFitted));
        assert_eq!(s.inverse_transform(1.0), Err(ScalerError::NotFitted));
    }

    #[test]
    fn test_zero_range_and_empty_input() {
        let mut s = MinMaxScaler::new();
        assert_eq!(s.fit(&[7.0, 7.0, 7.0]), Err(ScalerError::ZeroRange(7.0)));
        // A failed fit leaves the scaler unfitted
        assert_eq!(s.transform(7.0), Err(ScalerError::NotFitted));
        assert_eq!(s.fit(&[]), Err(ScalerError::EmptyInput));
    }

    #[test]
    fn test_from_state_validates() {
        assert!(MinMaxScaler::from_state(ScalerState { min: 1.0, max: 1.0 }).is_err());
        let s = MinMaxScaler::from_state(ScalerState { min: 0.0, max: 4.0 }).unwrap();
        assert_eq!(s.inverse_transform(0.25).unwrap(), 1.0);
    }

    #[test]
    fn test_transform_windows_uses_training_fit() {
        let train: Vec<f64> = (0..10).map(|x| x as f64).collect();
        let val:   Vec<f64> = (10..16).map(|x| x as f64).collect();

        let mut s = MinMaxScaler::new();
        s.fit(&train).unwrap();

        let set    = make_windows(&val, 2).unwrap();
        let scaled = s.transform_windows(&set).unwrap();
        // 10 / 9 with the training range, not 0.0 as a refit on val would give
        assert!((scaled.windows()[0][0] - 10.0 / 9.0).abs() < 1e-12);
        assert!((scaled.labels()[0] - 12.0 / 9.0).abs() < 1e-12);
    }
}
