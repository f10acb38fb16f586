// ============================================================
// Layer 4 — Series Builder
// ============================================================
// Turns parsed Records into the univariate series the windower
// slides over. The series keeps the original row order; it is
// NOT silently re-sorted.
//
// Chronological order is a precondition of windowing, so it is
// checked here: each record's year must be >= the previous one.
// When the source file is ordered some other way (for example by
// region first), the caller can opt in to a stable sort by year
// before the check, which keeps the within-year row order.

use crate::domain::errors::DataError;
use crate::domain::record::Record;

/// Stable sort by year; rows in the same year keep their order.
pub fn sort_by_year(records: &mut [Record]) {
    records.sort_by_key(|r| r.year);
}

/// Fail with `NotChronological` at the first row whose year is
/// earlier than the row before it.
pub fn ensure_chronological(records: &[Record]) -> Result<(), DataError> {
    for (i, pair) in records.windows(2).enumerate() {
        if pair[1].year < pair[0].year {
            return Err(DataError::NotChronological {
                row:      i + 2,
                previous: pair[0].year,
                current:  pair[1].year,
            });
        }
    }
    Ok(())
}

/// Extract the count column as an ordered series.
pub fn to_series(records: &[Record]) -> Vec<f64> {
    records.iter().map(|r| r.count).collect()
}
