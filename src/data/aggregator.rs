// ============================================================
// Layer 4 — Yearly Aggregator
// ============================================================
// Sums the stunting count per year for the trend report.
// A BTreeMap keeps the years sorted, so iterating the result
// always walks the trend from the earliest year to the latest.
//
// This is a side branch of the pipeline: the windower never
// sees these totals.

use std::collections::BTreeMap;

use crate::domain::record::Record;

/// Group records by year and sum their counts.
pub fn totals_by_year(records: &[Record]) -> BTreeMap<i32, f64> {
    records.iter().fold(BTreeMap::new(), |mut acc, r| {
        *acc.entry(r.year).or_insert(0.0) += r.count;
        acc
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sums_per_year() {
        let records = vec![
            Record::new(2018, None, 5.0),
            Record::new(2019, None, 3.0),
            Record::new(2018, None, 7.0),
        ];
        let totals = totals_by_year(&records);
        assert_eq!(totals.len(), 2);
        assert_eq!(totals[&2018], 12.0);
        assert_eq!(totals[&2019], 3.0);
    }

    #[test]
    fn test_ordered_by_year() {
        let records = vec![
            Record::new(2023, None, 1.0),
            Record::new(2018, None, 1.0),
            Record::new(2020, None, 1.0),
        ];
        let years: Vec<i32> = totals_by_year(&records).into_keys().collect();
        assert_eq!(years, vec![2018, 2020, 2023]);
    }

    #[test]
    fn test_empty_input() {
        assert!(totals_by_year(&[]).is_empty());
    }
}
