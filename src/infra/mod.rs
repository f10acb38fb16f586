// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Cross-cutting file output that no single business layer owns:
//
//   checkpoint.rs — model weights (Burn CompactRecorder), plus
//                   train_config.json and scaler.json so a later
//                   run can rebuild and invert exactly
//
//   metrics.rs    — per-epoch loss CSV and the MSE/RMSE/MAE
//                   error report in original units
//
//   report.rs     — yearly_totals.csv and predictions.csv
//
// Reference: Rust Book §9 (Error Handling with anyhow)
//            Burn Book §5 (Checkpointing)

/// Model checkpoint, config and scaler persistence
pub mod checkpoint;

/// Epoch loss logging and regression error metrics
pub mod metrics;

/// CSV exports of yearly totals and predictions
pub mod report;
