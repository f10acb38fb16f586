// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The two seams of the pipeline:
//
//   TableSource — anything that can produce the raw Table
//                 (CsvLoader today; an in-memory table in tests)
//   Forecaster  — anything that maps windows of normalised values
//                 to one normalised prediction each
//
// The application layer only talks to these traits, so the LSTM
// can be swapped for any other regression model that honours the
// [examples, time_step, 1] → [examples] contract.

use anyhow::Result;

use crate::domain::table::Table;
use crate::domain::window::WindowSet;

// ─── TableSource ──────────────────────────────────────────────────────────────
pub trait TableSource {
    /// Load the full, unfiltered table.
    fn load_table(&self) -> Result<Table>;
}

// ─── Forecaster ───────────────────────────────────────────────────────────────
pub trait Forecaster {
    /// Predict the value following each window.
    /// The returned Vec is index-aligned with `windows`.
    fn predict(&self, windows: &WindowSet) -> Result<Vec<f64>>;
}
