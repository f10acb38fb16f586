use burn::data::dataset::Dataset;
use serde::{Deserialize, Serialize};

use crate::domain::window::WindowSet;

/// One normalised training example: W past values and the next one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowSample {
    pub window: Vec<f32>,
    pub label:  f32,
}

pub struct WindowDataset {
    samples: Vec<WindowSample>,
}

impl WindowDataset {
    /// Build from an already-normalised, labelled WindowSet.
    pub fn from_windows(set: &WindowSet) -> Self {
        let samples = set
            .windows()
            .iter()
            .zip(set.labels())
            .map(|(w, &l)| WindowSample {
                window: w.iter().map(|&v| v as f32).collect(),
                label:  l as f32,
            })
            .collect();
        Self { samples }
    }

    pub fn sample_count(&self) -> usize { self.samples.len() }
}

impl Dataset<WindowSample> for WindowDataset {
    fn get(&self, index: usize) -> Option<WindowSample> {
        self.samples.get(index).cloned()
    }

    fn len(&self) -> usize {
        self.samples.len()
    }
}
