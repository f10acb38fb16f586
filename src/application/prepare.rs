// ============================================================
// Layer 2 — Shared Data Preparation
// ============================================================
// The first half of every workflow (train, forecast, trend):
//
//   Step 1: Load the table              (Layer 4 - loader)
//   Step 2: Filter years, drop columns  (Layer 4 - loader)
//   Step 3: Parse Records               (Layer 4 - loader)
//   Step 4: Enforce chronological order (Layer 4 - series)
//   Step 5: Extract the count series    (Layer 4 - series)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::data::{
    loader::{filter_and_trim, records, FilterReport},
    series::{ensure_chronological, sort_by_year, to_series},
};
use crate::domain::errors::DataError;
use crate::domain::record::{ColumnMap, Record};
use crate::domain::traits::TableSource;

/// Where the data comes from and which slice of it to use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataConfig {
    pub data_path:    String,
    pub columns:      ColumnMap,
    pub drop_columns: Vec<String>,
    pub year_from:    i32,
    pub year_to:      i32,
    pub sort_by_year: bool,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_path:    "Data.csv".to_string(),
            columns:      ColumnMap::default(),
            drop_columns: vec![
                "kode_provinsi".to_string(),
                "nama_provinsi".to_string(),
                "kode_kabupaten_kota".to_string(),
            ],
            year_from:    2018,
            year_to:      2023,
            sort_by_year: false,
        }
    }
}

/// Output of the preparation steps.
#[derive(Debug, Clone)]
pub struct PreparedSeries {
    pub report:  FilterReport,
    pub records: Vec<Record>,
    pub series:  Vec<f64>,
}

pub fn prepare_series(source: &impl TableSource, cfg: &DataConfig) -> Result<PreparedSeries> {
    // ── Step 1: Load ──────────────────────────────────────────────────────────
    let table = source.load_table()?;

    // ── Step 2: Filter + trim ─────────────────────────────────────────────────
    let (filtered, report) = filter_and_trim(
        &table,
        &cfg.columns.year,
        cfg.year_from,
        cfg.year_to,
        &cfg.drop_columns,
    )
    .context("Filtering the table by year")?;

    tracing::info!(
        "Rows: {} → {} | Columns: {} → {} (years {}..={})",
        report.rows_before, report.rows_after,
        report.columns_before, report.columns_after,
        cfg.year_from, cfg.year_to,
    );
    tracing::info!(
        "Null cells: {} | Duplicate rows: {}",
        report.null_cells, report.duplicate_rows
    );

    if filtered.is_empty() {
        return Err(DataError::NoRowsInRange { from: cfg.year_from, to: cfg.year_to }.into());
    }

    // ── Step 3: Records ───────────────────────────────────────────────────────
    let mut records = records(&filtered, &cfg.columns).context("Parsing records")?;

    // ── Step 4: Chronological order ───────────────────────────────────────────
    if cfg.sort_by_year {
        sort_by_year(&mut records);
    }
    ensure_chronological(&records)
        .context("Rows must be ordered by year before windowing (try --sort-by-year)")?;

    // ── Step 5: Series ────────────────────────────────────────────────────────
    let series = to_series(&records);
    tracing::info!("Series length: {}", series.len());

    Ok(PreparedSeries { report, records, series })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::domain::table::Table;

    /// In-memory TableSource for workflow tests.
    pub(crate) struct MemorySource(pub Table);

    impl TableSource for MemorySource {
        fn load_table(&self) -> Result<Table> {
            Ok(self.0.clone())
        }
    }

    pub(crate) fn table(rows: &[(i32, &str, f64)]) -> Table {
        Table::new(
            vec![
                "kode_provinsi".into(),
                "nama_kabupaten_kota".into(),
                "jumlah_balita_stunting".into(),
                "tahun".into(),
            ],
            rows.iter()
                .map(|(y, r, c)| vec!["32".into(), r.to_string(), c.to_string(), y.to_string()])
                .collect(),
        )
    }

    #[test]
    fn test_prepare_filters_and_extracts() {
        let source = MemorySource(table(&[
            (2017, "A", 1.0),
            (2018, "A", 2.0),
            (2019, "B", 3.0),
            (2024, "B", 4.0),
        ]));
        let p = prepare_series(&source, &DataConfig::default()).unwrap();
        assert_eq!(p.series, vec![2.0, 3.0]);
        assert_eq!(p.report.rows_before, 4);
        assert_eq!(p.report.columns_after, 3);
    }

    #[test]
    fn test_empty_range_is_data_error() {
        let source = MemorySource(table(&[(2010, "A", 1.0)]));
        let err = prepare_series(&source, &DataConfig::default()).unwrap_err();
        assert_eq!(
            err.downcast_ref::<DataError>(),
            Some(&DataError::NoRowsInRange { from: 2018, to: 2023 })
        );
    }

    #[test]
    fn test_missing_year_column_differs_from_empty_range() {
        let mut t = table(&[(2018, "A", 1.0)]);
        t.columns[3] = "year".into();
        let err = prepare_series(&MemorySource(t), &DataConfig::default()).unwrap_err();
        assert_eq!(
            err.downcast_ref::<DataError>(),
            Some(&DataError::MissingColumn("tahun".into()))
        );
    }

    #[test]
    fn test_unsorted_rows_rejected_unless_sorting() {
        let rows = [(2019, "A", 3.0), (2018, "A", 1.0)];
        let err = prepare_series(&MemorySource(table(&rows)), &DataConfig::default()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DataError>(),
            Some(DataError::NotChronological { .. })
        ));

        let cfg = DataConfig { sort_by_year: true, ..DataConfig::default() };
        let p = prepare_series(&MemorySource(table(&rows)), &cfg).unwrap();
        assert_eq!(p.series, vec![1.0, 3.0]);
    }
}
