// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Plain structs, enums and traits describing what the pipeline
// works on. No burn types, no file I/O.
//
// Rules for this layer:
//   - NO Burn framework types allowed here
//   - NO file I/O
//   - Only plain Rust structs, enums, and traits

// Raw header + string cells as read from disk
pub mod table;

// One parsed stunting row and the column names used to parse it
pub mod record;

// Index-aligned (window, label) pairs, the Forecaster input
pub mod window;

// DataError / ShapeError / ScalerError
pub mod errors;

// TableSource and Forecaster abstractions
pub mod traits;
