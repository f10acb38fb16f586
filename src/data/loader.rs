// ============================================================
// Layer 4 — Table Loader / Filter
// ============================================================
// Reads the stunting CSV into a Table, then narrows it down:
//
//   1. filter_years  → keep rows whose year is in [from, to]
//   2. drop_columns  → remove identifier columns nobody uses
//   3. records       → parse the remaining rows into Records
//
// The csv crate handles quoting and header parsing. Every cell is
// kept as a String until `records` parses the handful of columns
// the pipeline needs, so an unrelated malformed column never
// stops a run.
//
// An empty filter result is NOT an error here: it is returned as
// an empty Table so the caller can tell "the range matched
// nothing" apart from "the year column does not exist".

use anyhow::{Context, Result};
use std::{fs::File, path::PathBuf};

use crate::domain::errors::DataError;
use crate::domain::record::{ColumnMap, Record};
use crate::domain::table::Table;
use crate::domain::traits::TableSource;

/// Loads a header-first CSV file from disk.
pub struct CsvLoader {
    path: PathBuf,
}

impl CsvLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TableSource for CsvLoader {
    fn load_table(&self) -> Result<Table> {
        let file = File::open(&self.path)
            .with_context(|| format!("Cannot open data file '{}'", self.path.display()))?;

        // flexible(true): short rows are padded below instead of failing the read
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(file);

        let columns: Vec<String> = reader
            .headers()
            .with_context(|| format!("Cannot read header of '{}'", self.path.display()))?
            .iter()
            .map(str::to_string)
            .collect();

        let mut rows = Vec::new();
        for (i, result) in reader.records().enumerate() {
            let record = result
                .with_context(|| format!("Malformed CSV row {} in '{}'", i + 1, self.path.display()))?;
            let mut row: Vec<String> = record.iter().map(str::to_string).collect();
            row.resize(columns.len(), String::new());
            rows.push(row);
        }

        tracing::info!(
            "Loaded '{}': {} rows, {} columns",
            self.path.display(),
            rows.len(),
            columns.len()
        );
        Ok(Table::new(columns, rows))
    }
}

// ─── Filter Report ────────────────────────────────────────────────────────────
/// Shape of the table before and after filtering, plus the
/// data-quality counts of the filtered table.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterReport {
    pub rows_before:    usize,
    pub columns_before: usize,
    pub rows_after:     usize,
    pub columns_after:  usize,
    pub null_cells:     usize,
    pub duplicate_rows: usize,
}

/// Keep only rows whose year lies in the inclusive range [from, to].
/// A row with an empty year cell is outside every range: it is
/// dropped and counted. Non-numeric year text is still an error.
pub fn filter_years(
    table:       &Table,
    year_column: &str,
    from:        i32,
    to:          i32,
) -> Result<Table, DataError> {
    if from > to {
        return Err(DataError::InvalidYearRange { from, to });
    }
    let idx = table.require_column(year_column)?;

    let mut rows = Vec::with_capacity(table.row_count());
    let mut blank_years = 0usize;
    for (i, row) in table.rows.iter().enumerate() {
        let year_cell = cell(row, idx);
        if year_cell.trim().is_empty() {
            blank_years += 1;
            continue;
        }
        let year = parse_year(year_cell, i + 1, year_column)?;
        if (from..=to).contains(&year) {
            rows.push(row.clone());
        }
    }

    if blank_years > 0 {
        tracing::warn!("Skipped {} rows with an empty '{}' cell", blank_years, year_column);
    }

    tracing::debug!("Year filter {}..={} kept {} of {} rows", from, to, rows.len(), table.row_count());
    Ok(Table::new(table.columns.clone(), rows))
}

/// Remove the named columns. Names not present in the table are
/// skipped with a warning.
pub fn drop_columns(table: Table, names: &[String]) -> Table {
    let mut drop_idx = Vec::new();
    for name in names {
        match table.column_index(name) {
            Some(i) => drop_idx.push(i),
            None    => tracing::warn!("Column '{}' not found; nothing to drop", name),
        }
    }

    let keep = |i: &usize| !drop_idx.contains(i);
    let columns = table
        .columns
        .iter()
        .enumerate()
        .filter(|(i, _)| keep(i))
        .map(|(_, c)| c.clone())
        .collect();
    let rows = table
        .rows
        .into_iter()
        .map(|row| {
            row.into_iter()
                .enumerate()
                .filter(|(i, _)| keep(i))
                .map(|(_, c)| c)
                .collect()
        })
        .collect();

    Table::new(columns, rows)
}

/// Filter by year, then drop identifier columns, reporting the
/// shape at both ends.
pub fn filter_and_trim(
    table:        &Table,
    year_column:  &str,
    from:         i32,
    to:           i32,
    drop:         &[String],
) -> Result<(Table, FilterReport), DataError> {
    let filtered = filter_years(table, year_column, from, to)?;
    let trimmed  = drop_columns(filtered, drop);

    let report = FilterReport {
        rows_before:    table.row_count(),
        columns_before: table.column_count(),
        rows_after:     trimmed.row_count(),
        columns_after:  trimmed.column_count(),
        null_cells:     trimmed.null_cells(),
        duplicate_rows: trimmed.duplicate_rows(),
    };
    Ok((trimmed, report))
}

/// Parse every row of `table` into a Record using the configured
/// column names. The region column is optional.
pub fn records(table: &Table, map: &ColumnMap) -> Result<Vec<Record>, DataError> {
    let year_idx   = table.require_column(&map.year)?;
    let count_idx  = table.require_column(&map.count)?;
    let region_idx = map.region.as_deref().and_then(|r| table.column_index(r));

    table
        .rows
        .iter()
        .enumerate()
        .map(|(i, row)| -> Result<Record, DataError> {
            let line  = i + 1;
            let year  = parse_year(cell(row, year_idx), line, &map.year)?;
            let count = parse_count(cell(row, count_idx), line, &map.count)?;
            let region = region_idx
                .map(|r| cell(row, r).to_string())
                .filter(|r| !r.is_empty());
            Ok(Record::new(year, region, count))
        })
        .collect()
}

/// A ragged row reads as empty past its last cell.
fn cell(row: &[String], idx: usize) -> &str {
    row.get(idx).map_or("", String::as_str)
}

fn parse_year(cell: &str, row: usize, column: &str) -> Result<i32, DataError> {
    let cell = cell.trim();
    if cell.is_empty() {
        return Err(DataError::MissingValue { row, column: column.to_string() });
    }
    // Some exports write years as "2018.0"
    cell.parse::<i32>()
        .ok()
        .or_else(|| {
            cell.parse::<f64>()
                .ok()
                .filter(|f| f.fract() == 0.0)
                .map(|f| f as i32)
        })
        .ok_or_else(|| DataError::InvalidValue {
            row,
            column: column.to_string(),
            value:  cell.to_string(),
        })
}

fn parse_count(cell: &str, row: usize, column: &str) -> Result<f64, DataError> {
    let cell = cell.trim();
    if cell.is_empty() {
        return Err(DataError::MissingValue { row, column: column.to_string() });
    }
    match cell.parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => Ok(v),
        _ => Err(DataError::InvalidValue {
            row,
            column: column.to_string(),
            value:  cell.to_string(),
        }),
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn table() -> Table {
        let cols = ["id", "kode_provinsi", "nama_kabupaten_kota", "jumlah_balita_stunting", "tahun"];
        let rows = [
            ["1", "32", "BOGOR",   "100", "2017"],
            ["2", "32", "BOGOR",   "120", "2018"],
            ["3", "32", "BANDUNG", "90",  "2019"],
            ["4", "32", "BANDUNG", "80",  "2024"],
        ];
        Table::new(
            cols.iter().map(|s| s.to_string()).collect(),
            rows.iter().map(|r| r.iter().map(|s| s.to_string()).collect()).collect(),
        )
    }

    #[test]
    fn test_filter_inclusive_range() {
        let t = filter_years(&table(), "tahun", 2018, 2023).unwrap();
        assert_eq!(t.row_count(), 2);
        assert_eq!(t.rows[0][4], "2018");
        assert_eq!(t.rows[1][4], "2019");
    }

    #[test]
    fn test_blank_year_rows_are_dropped_not_fatal() {
        let t = Table::new(
            vec!["tahun".into(), "jumlah_balita_stunting".into()],
            vec![
                vec!["".into(), "5".into()],
                vec!["2018".into(), "7".into()],
                vec!["  ".into(), "9".into()],
            ],
        );
        let kept = filter_years(&t, "tahun", 2018, 2023).unwrap();
        assert_eq!(kept.rows, vec![vec!["2018".to_string(), "7".to_string()]]);
    }

    #[test]
    fn test_non_numeric_year_still_rejected() {
        let mut t = table();
        t.rows[0][4] = "unknown".into();
        let err = filter_years(&t, "tahun", 2018, 2023).unwrap_err();
        assert!(matches!(err, DataError::InvalidValue { row: 1, .. }));
    }

    #[test]
    fn test_ragged_rows_read_as_empty_cells() {
        let t = Table::new(
            vec!["tahun".into(), "jumlah_balita_stunting".into(), "nama_kabupaten_kota".into()],
            vec![
                vec!["2018".into(), "4".into()],
                vec!["2019".into()],
            ],
        );
        let kept = filter_years(&t, "tahun", 2018, 2023).unwrap();
        assert_eq!(kept.row_count(), 2);

        let err = records(&t, &ColumnMap::default()).unwrap_err();
        assert_eq!(
            err,
            DataError::MissingValue { row: 2, column: "jumlah_balita_stunting".into() }
        );

        let first = records(&Table::new(t.columns.clone(), vec![t.rows[0].clone()]), &ColumnMap::default())
            .unwrap();
        assert_eq!(first, vec![Record::new(2018, None, 4.0)]);
    }

    #[test]
    fn test_missing_year_column() {
        let err = filter_years(&table(), "year", 2018, 2023).unwrap_err();
        assert_eq!(err, DataError::MissingColumn("year".into()));
    }

    #[test]
    fn test_empty_range_is_not_an_error() {
        let t = filter_years(&table(), "tahun", 2000, 2005).unwrap();
        assert!(t.is_empty());
        assert_eq!(t.column_count(), 5);
    }

    #[test]
    fn test_drop_columns_and_report() {
        let drop = vec!["kode_provinsi".to_string(), "not_there".to_string()];
        let (t, report) = filter_and_trim(&table(), "tahun", 2018, 2023, &drop).unwrap();
        assert_eq!(t.columns, vec!["id", "nama_kabupaten_kota", "jumlah_balita_stunting", "tahun"]);
        assert_eq!(t.rows[0], vec!["2", "BOGOR", "120", "2018"]);
        assert_eq!(report.rows_before, 4);
        assert_eq!(report.columns_before, 5);
        assert_eq!(report.rows_after, 2);
        assert_eq!(report.columns_after, 4);
    }

    #[test]
    fn test_records_parse() {
        let recs = records(&table(), &ColumnMap::default()).unwrap();
        assert_eq!(recs.len(), 4);
        assert_eq!(recs[1], Record::new(2018, Some("BOGOR".into()), 120.0));
    }

    #[test]
    fn test_records_reject_negative_count() {
        let mut t = table();
        t.rows[2][3] = "-4".into();
        let err = records(&t, &ColumnMap::default()).unwrap_err();
        assert!(matches!(err, DataError::InvalidValue { row: 3, .. }));
    }

    #[test]
    fn test_records_reject_empty_count() {
        let mut t = table();
        t.rows[0][3] = "".into();
        let err = records(&t, &ColumnMap::default()).unwrap_err();
        assert!(matches!(err, DataError::MissingValue { row: 1, .. }));
    }

    #[test]
    fn test_float_formatted_year() {
        assert_eq!(parse_year("2018.0", 1, "tahun"), Ok(2018));
        assert!(parse_year("2018.5", 1, "tahun").is_err());
    }

    #[test]
    fn test_csv_loader_reads_file() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.csv");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(f, "tahun,jumlah_balita_stunting,nama_kabupaten_kota").unwrap();
        writeln!(f, "2018, 10 ,\"KOTA BANDUNG\"").unwrap();
        writeln!(f, "2019,12").unwrap();
        drop(f);

        let t = CsvLoader::new(&path).load_table().unwrap();
        assert_eq!(t.column_count(), 3);
        assert_eq!(t.rows[0], vec!["2018", "10", "KOTA BANDUNG"]);
        // Short row padded with an empty cell
        assert_eq!(t.rows[1], vec!["2019", "12", ""]);
    }

    #[test]
    fn test_csv_loader_missing_file() {
        assert!(CsvLoader::new("definitely/not/here.csv").load_table().is_err());
    }
}
