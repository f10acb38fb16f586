// ============================================================
// Layer 3 — WindowSet Domain Type
// ============================================================
// Index-aligned (window, label) pairs for one segment of the
// series. Built by the windower, normalised by the scaler and
// consumed by any Forecaster.
//
// The model wants a 3-D input [examples, W, 1]; asking an empty
// set for that shape is an error, so callers check `is_empty()`
// and skip the segment instead.

use serde::{Deserialize, Serialize};

use crate::domain::errors::ShapeError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowSet {
    width:   usize,
    windows: Vec<Vec<f64>>,
    labels:  Vec<f64>,
}

impl WindowSet {
    /// An empty set for the given width.
    pub fn empty(width: usize) -> Self {
        Self { width, windows: Vec::new(), labels: Vec::new() }
    }

    /// Build from explicit windows. Every window must have `width`
    /// elements. `labels` is either index-aligned with `windows` or
    /// empty for a prediction-only set.
    pub fn from_parts(
        width:   usize,
        windows: Vec<Vec<f64>>,
        labels:  Vec<f64>,
    ) -> Result<Self, ShapeError> {
        if width == 0 {
            return Err(ShapeError::ZeroWidth);
        }
        if let Some((index, w)) = windows.iter().enumerate().find(|(_, w)| w.len() != width) {
            return Err(ShapeError::WindowLength { index, expected: width, actual: w.len() });
        }
        if !labels.is_empty() && labels.len() != windows.len() {
            return Err(ShapeError::LabelCount { windows: windows.len(), labels: labels.len() });
        }
        Ok(Self { width, windows, labels })
    }

    pub fn len(&self)      -> usize { self.windows.len() }
    pub fn is_empty(&self) -> bool  { self.windows.is_empty() }

    /// True when every window has its label.
    pub fn is_labelled(&self) -> bool { self.labels.len() == self.windows.len() }

    pub fn windows(&self) -> &[Vec<f64>] { &self.windows }
    pub fn labels(&self)  -> &[f64]      { &self.labels }

    /// The model input shape: [examples, time_step, 1 feature].
    pub fn shape(&self) -> Result<[usize; 3], ShapeError> {
        if self.is_empty() {
            return Err(ShapeError::EmptyWindowSet);
        }
        Ok([self.windows.len(), self.width, 1])
    }

    /// Apply `f` to every window value and every label, keeping
    /// the shape. Stops at the first error.
    pub fn try_map<E>(&self, mut f: impl FnMut(f64) -> Result<f64, E>) -> Result<Self, E> {
        let windows = self
            .windows
            .iter()
            .map(|w| w.iter().map(|&v| f(v)).collect::<Result<Vec<_>, E>>())
            .collect::<Result<Vec<_>, E>>()?;
        let labels = self.labels.iter().map(|&v| f(v)).collect::<Result<Vec<_>, E>>()?;
        Ok(Self { width: self.width, windows, labels })
    }
}
