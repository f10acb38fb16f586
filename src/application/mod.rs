// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// This layer orchestrates all the other layers to accomplish
// a specific goal (training, forecasting or a trend report).
//
// Rules for this layer:
//   - No ML math or model code here
//   - No direct file parsing (that's Layer 4 and 6)
//   - Only workflow coordination
//
// Reference: Clean Architecture pattern
//            Rust Book §7 (Module System)

// Load → filter → records → series, shared by every workflow
pub mod prepare;

// The training workflow
pub mod train_use_case;

// Multi-step forecasting from a saved checkpoint
pub mod forecast_use_case;

// Yearly totals without a model
pub mod trend_use_case;
