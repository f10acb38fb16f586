// ============================================================
// Layer 4 — Sliding Windower
// ============================================================
// Turns one segment of the series into supervised examples:
//
//   segment: [a b c d e f g]   width W = 3
//
//   i = 0:  window [a b c] → label d
//   i = 1:  window [b c d] → label e
//   i = 2:  window [c d e] → label f
//
// i runs over [0, L - W - 1), so a segment of length L gives
// max(0, L - W - 1) examples. The example labelled with the final
// element of the segment is never produced.
//
// A segment that is too short yields an EMPTY WindowSet, never an
// error, for any positive width.

use crate::domain::errors::ShapeError;
use crate::domain::window::WindowSet;

/// Default number of past values the model sees per example.
pub const DEFAULT_TIME_STEP: usize = 30;

/// Number of examples a segment of length `len` yields for `width`.
pub fn window_count(len: usize, width: usize) -> usize {
    len.saturating_sub(width).saturating_sub(1)
}

/// Slide a window of `width` over `segment`.
///
/// # Errors
/// `ShapeError::ZeroWidth` if `width == 0`. A short segment is not
/// an error; it returns an empty set.
pub fn make_windows(segment: &[f64], width: usize) -> Result<WindowSet, ShapeError> {
    if width == 0 {
        return Err(ShapeError::ZeroWidth);
    }

    let n = window_count(segment.len(), width);
    let mut windows = Vec::with_capacity(n);
    let mut labels  = Vec::with_capacity(n);

    for i in 0..n {
        windows.push(segment[i..i + width].to_vec());
        labels.push(segment[i + width]);
    }

    if n == 0 {
        tracing::debug!(
            "Segment of length {} is too short for width {}; no windows",
            segment.len(),
            width
        );
    }

    WindowSet::from_parts(width, windows, labels)
}
