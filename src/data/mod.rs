// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Everything from the raw CSV to tensor batches.
//
//   CSV file
//       │
//       ▼
//   CsvLoader         → reads the file into a Table
//       │
//       ▼
//   filter / drop     → year range, unused identifier columns
//       │
//       ├──────────────► Aggregator → yearly totals (report only)
//       ▼
//   Series            → chronological check, count column
//       │
//       ▼
//   Splitter          → training / validation / test ranges
//       │
//       ▼
//   Windower          → (window, next value) pairs per segment
//       │
//       ▼
//   MinMaxScaler      → fit on training, transform everything
//       │
//       ▼
//   WindowDataset     → implements Burn's Dataset trait
//       │
//       ▼
//   WindowBatcher     → [batch, time_step, 1] tensors
//
// Reference: Burn Book §4 (Datasets and Dataloaders)

/// Reads the CSV, filters by year, drops columns, parses Records
pub mod loader;

/// Sums the stunting count per year
pub mod aggregator;

/// Chronological check and series extraction
pub mod series;

/// Splits the series into contiguous train/validation/test ranges
pub mod splitter;

/// Sliding (window, label) pairs
pub mod windower;

/// Fit-once min-max normalisation
pub mod scaler;

/// Implements Burn's Dataset trait for window samples
pub mod dataset;

/// Implements Burn's Batcher trait to create tensor batches
pub mod batcher;
