// ============================================================
// Layer 4 — Window Batcher
// ============================================================
// Implements Burn's Batcher trait to stack WindowSamples into the
// tensors the LSTM consumes.
//
// How batching works here:
//   Input:  Vec of N WindowSamples, each window of length W
//   Output: WindowBatch with
//             inputs  [N, W, 1]  (one feature per time step)
//             targets [N, 1]
//
//   All windows are flattened into one Vec, then reshaped:
//   [s1_t1, ..., s1_tW, s2_t1, ..., sN_tW] → [N, W, 1]
//
// Every window from the windower has the same width, so no
// padding is needed.
//
// Reference: Burn Book §4 (Batcher)

use burn::{
    data::dataloader::batcher::Batcher,
    prelude::*,
};

use crate::data::dataset::WindowSample;

// ─── WindowBatch ──────────────────────────────────────────────────────────────
#[derive(Debug, Clone)]
pub struct WindowBatch<B: Backend> {
    /// Normalised windows — shape: [batch_size, time_step, 1]
    pub inputs: Tensor<B, 3>,

    /// Normalised next values — shape: [batch_size, 1]
    pub targets: Tensor<B, 2>,
}

// ─── WindowBatcher ────────────────────────────────────────────────────────────
/// Holds the target device so tensors are created on the right
/// backend device.
#[derive(Clone, Debug)]
pub struct WindowBatcher<B: Backend> {
    pub device: B::Device,
}

impl<B: Backend> WindowBatcher<B> {
    pub fn new(device: B::Device) -> Self {
        Self { device }
    }
}

/// Stack raw f32 windows into a [N, W, 1] tensor.
pub fn windows_to_tensor<B: Backend>(
    windows: &[Vec<f32>],
    device:  &B::Device,
) -> Tensor<B, 3> {
    let batch_size = windows.len();
    let time_step  = windows.first().map(|w| w.len()).unwrap_or(0);

    let flat: Vec<f32> = windows.iter().flatten().copied().collect();

    Tensor::<B, 1>::from_floats(flat.as_slice(), device)
        .reshape([batch_size, time_step, 1])
}

impl<B: Backend> Batcher<WindowSample, WindowBatch<B>> for WindowBatcher<B> {
    fn batch(&self, items: Vec<WindowSample>) -> WindowBatch<B> {
        let batch_size = items.len();

        let windows: Vec<Vec<f32>> = items.iter().map(|s| s.window.clone()).collect();
        let labels:  Vec<f32>      = items.iter().map(|s| s.label).collect();

        let inputs  = windows_to_tensor::<B>(&windows, &self.device);
        let targets = Tensor::<B, 1>::from_floats(labels.as_slice(), &self.device)
            .reshape([batch_size, 1]);

        WindowBatch { inputs, targets }
    }
}
