// ============================================================
// Layer 6 — Report Writer
// ============================================================
// Writes the run's tabular outputs as CSV so they can be charted
// with whatever tool the reader prefers:
//
//   yearly_totals.csv — year,total          (trend of the filtered data)
//   predictions.csv   — segment,index,actual,predicted
//                       (original units, one row per window)

use anyhow::{Context, Result};
use serde::Serialize;
use std::{collections::BTreeMap, path::{Path, PathBuf}};

#[derive(Debug, Clone, Serialize)]
struct YearTotal {
    year:  i32,
    total: f64,
}

/// One predicted value next to the value that actually followed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionRow {
    pub segment:   String,
    pub index:     usize,
    pub actual:    f64,
    pub predicted: f64,
}

impl PredictionRow {
    /// Zip index-aligned actual/predicted values for one segment.
    pub fn for_segment(segment: &str, actual: &[f64], predicted: &[f64]) -> Vec<Self> {
        actual
            .iter()
            .zip(predicted)
            .enumerate()
            .map(|(index, (&actual, &predicted))| Self {
                segment: segment.to_string(),
                index,
                actual,
                predicted,
            })
            .collect()
    }
}

pub fn write_yearly_totals(dir: &Path, totals: &BTreeMap<i32, f64>) -> Result<PathBuf> {
    let rows = totals.iter().map(|(&year, &total)| YearTotal { year, total });
    write_csv(&dir.join("yearly_totals.csv"), rows)
}

pub fn write_predictions(dir: &Path, rows: &[PredictionRow]) -> Result<PathBuf> {
    write_csv(&dir.join("predictions.csv"), rows.iter())
}

fn write_csv<T: Serialize>(path: &Path, rows: impl Iterator<Item = T>) -> Result<PathBuf> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Cannot create '{}'", path.display()))?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    tracing::debug!("Wrote '{}'", path.display());
    Ok(path.to_path_buf())
}

/// Render yearly totals as an aligned two-column text table.
pub fn format_totals(totals: &BTreeMap<i32, f64>) -> String {
    let mut out = String::from("Year | Stunted children\n-----+-----------------\n");
    for (year, total) in totals {
        out.push_str(&format!("{year} | {total:>16.0}\n"));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yearly_totals_csv() {
        let dir = tempfile::tempdir().unwrap();
        let totals = BTreeMap::from([(2018, 12.0), (2019, 3.0)]);
        let path = write_yearly_totals(dir.path(), &totals).unwrap();
        let text = std::fs::read_to_string(path).unwrap();
        assert_eq!(text, "year,total\n2018,12.0\n2019,3.0\n");
    }

    #[test]
    fn test_predictions_csv() {
        let dir  = tempfile::tempdir().unwrap();
        let rows = PredictionRow::for_segment("validation", &[10.0, 20.0], &[11.5, 19.0]);
        assert_eq!(rows[1].index, 1);

        let path = write_predictions(dir.path(), &rows).unwrap();
        let text = std::fs::read_to_string(path).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("segment,index,actual,predicted"));
        assert_eq!(lines.next(), Some("validation,0,10.0,11.5"));
    }

    #[test]
    fn test_format_totals() {
        let totals = BTreeMap::from([(2018, 12.0)]);
        let text = format_totals(&totals);
        assert!(text.contains("2018 |"));
        assert!(text.trim_end().ends_with("12"));
    }
}
