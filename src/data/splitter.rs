// ============================================================
// Layer 4 — Train/Validation/Test Splitter
// ============================================================
// Partitions a time series by POSITION into three contiguous,
// non-overlapping segments:
//
//   [0 ............ t) [t ...... t+v) [t+v ...... len)
//      training          validation       test
//
//   t = floor(len * training_pct)
//   v = floor(len * validation_pct)
//
// Unlike a shuffled split, the order is never touched: the
// validation segment is strictly later than the training one,
// so the model is always evaluated on the "future".
//
// The test segment is every remaining element. With the default
// 80/20 split and a length that does not divide evenly, it holds
// the rounding remainder (often a single element, often empty).

use std::ops::Range;

use crate::domain::errors::ShapeError;

/// Index ranges of the three segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentBounds {
    pub training:   Range<usize>,
    pub validation: Range<usize>,
    pub test:       Range<usize>,
}

/// Borrowed views of the three segments.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segments<'a> {
    pub training:   &'a [f64],
    pub validation: &'a [f64],
    pub test:       &'a [f64],
}

impl SegmentBounds {
    pub fn slice<'a>(&self, series: &'a [f64]) -> Segments<'a> {
        Segments {
            training:   &series[self.training.clone()],
            validation: &series[self.validation.clone()],
            test:       &series[self.test.clone()],
        }
    }
}

/// Compute the segment ranges for a series of length `len`.
///
/// # Errors
/// `ShapeError::InvalidSplit` if a percentage is outside [0, 1],
/// not finite, or the two sum to more than 1.
///
/// # Example
/// ```ignore
/// let b = split_segments(10, 0.8, 0.2)?;
/// assert_eq!(b.training, 0..8);
/// assert_eq!(b.validation, 8..10);
/// assert_eq!(b.test, 10..10);
/// ```
pub fn split_segments(
    len:            usize,
    training_pct:   f64,
    validation_pct: f64,
) -> Result<SegmentBounds, ShapeError> {
    let valid = |p: f64| p.is_finite() && (0.0..=1.0).contains(&p);
    // Small tolerance so 0.8 + 0.2 is not rejected for float noise
    if !valid(training_pct) || !valid(validation_pct) || training_pct + validation_pct > 1.0 + 1e-9 {
        return Err(ShapeError::InvalidSplit {
            training:   training_pct,
            validation: validation_pct,
        });
    }

    // Truncating conversion, matching int(len * pct)
    let training_size   = ((len as f64) * training_pct) as usize;
    let validation_size = ((len as f64) * validation_pct) as usize;

    let t_end = training_size.min(len);
    let v_end = (t_end + validation_size).min(len);

    let bounds = SegmentBounds {
        training:   0..t_end,
        validation: t_end..v_end,
        test:       v_end..len,
    };

    tracing::debug!(
        "Series split: {} training, {} validation, {} test",
        bounds.training.len(),
        bounds.validation.len(),
        bounds.test.len(),
    );

    Ok(bounds)
}
