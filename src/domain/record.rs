// ============================================================
// Layer 3 — Record Domain Type
// ============================================================
// One parsed row of the stunting table. Only the three
// attributes the pipeline cares about survive parsing:
//   - year   → used for filtering, ordering and aggregation
//   - region → kept for traceability, never used numerically
//   - count  → the number of stunted children, the series value

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub year:   i32,
    pub region: Option<String>,
    pub count:  f64,
}

impl Record {
    pub fn new(year: i32, region: Option<String>, count: f64) -> Self {
        Self { year, region, count }
    }
}

/// Header names used to pull Records out of a Table.
/// Column names are configuration, not protocol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnMap {
    pub year:   String,
    pub count:  String,
    pub region: Option<String>,
}

impl Default for ColumnMap {
    fn default() -> Self {
        Self {
            year:   "tahun".to_string(),
            count:  "jumlah_balita_stunting".to_string(),
            region: Some("nama_kabupaten_kota".to_string()),
        }
    }
}
