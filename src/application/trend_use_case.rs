// ============================================================
// Layer 2 — Trend Use Case
// ============================================================
// The reporting side branch on its own: filtered rows summed
// per year, no model involved.

use anyhow::Result;
use std::{collections::BTreeMap, path::Path};

use crate::application::prepare::{prepare_series, DataConfig};
use crate::data::aggregator::totals_by_year;
use crate::domain::traits::TableSource;
use crate::infra::report::write_yearly_totals;

pub struct TrendUseCase {
    config: DataConfig,
}

impl TrendUseCase {
    pub fn new(config: DataConfig) -> Self {
        Self { config }
    }

    /// Yearly totals of the filtered data. Also written as
    /// `yearly_totals.csv` when `out_dir` is given.
    pub fn execute(
        &self,
        source:  &impl TableSource,
        out_dir: Option<&Path>,
    ) -> Result<BTreeMap<i32, f64>> {
        let prepared = prepare_series(source, &self.config)?;
        let totals   = totals_by_year(&prepared.records);

        if let Some(dir) = out_dir {
            std::fs::create_dir_all(dir)?;
            let path = write_yearly_totals(dir, &totals)?;
            tracing::info!("Yearly totals written to '{}'", path.display());
        }
        Ok(totals)
    }
}
