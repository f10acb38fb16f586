// ============================================================
// Layer 5 — ML / Model Layer (Burn)
// ============================================================
// All Burn model code lives here (the data layer only touches
// Burn's Dataset/Batcher traits).
//
//   model.rs      — stacked LSTM → dropout → dense → dense(1)
//                   maps [batch, time_step, 1] to [batch, 1]
//
//   trainer.rs    — Adam + MSE training loop with a per-epoch
//                   validation pass and checkpointing
//
//   inferencer.rs — wraps a trained model behind the domain
//                   Forecaster trait
//
// Everything runs on the CPU NdArray backend; training wraps it
// in Autodiff for gradients.
//
// Reference: Burn Book §3 (Building Blocks), §5 (Training)
//            Hochreiter & Schmidhuber (1997) LSTM

/// Backend used while training (gradients enabled)
pub type TrainBackend = burn::backend::Autodiff<burn::backend::NdArray>;

/// Backend used for validation and inference
pub type InferBackend = burn::backend::NdArray;

/// Stacked-LSTM regression model
pub mod model;

/// Training loop with validation monitoring and checkpointing
pub mod trainer;

/// Forecaster implementation over a trained model
pub mod inferencer;
