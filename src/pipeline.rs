// src/pipeline.rs
use anyhow::{Context, Result};
use chrono::Utc;
use reqwest::Client;
use std::fs;
use tracing::{info, instrument};

use crate::{
    config::PipelineConfig,
    fetch::PageCache,
    output::{self, Diagnostics},
    process::{normalize_unit, parse_unit_table, reconcile, NormalizedRow, RawTable, Reconciliation},
};

/// Everything derived from one set of unit pages.
#[derive(Debug)]
pub struct Dataset {
    pub units: usize,
    pub rows: Vec<NormalizedRow>,
    pub reconciliation: Reconciliation,
}

/// Normalize every unit in order, then reconcile the concatenated rows.
///
/// Any layout violation aborts the whole build; the error names the unit.
pub fn build_dataset(tables: &[(String, RawTable)], config: &PipelineConfig) -> Result<Dataset> {
    let mut rows = Vec::new();
    for (campus, table) in tables {
        let unit_rows = normalize_unit(table, campus)
            .with_context(|| format!("normalizing unit {} ({campus})", table.unit))?;
        rows.extend(unit_rows);
    }
    info!(units = tables.len(), rows = rows.len(), "normalized all units");

    let reconciliation = reconcile(&rows, config.discrepancy_tolerance, config.debug)
        .context("reconciling employee records")?;

    Ok(Dataset {
        units: tables.len(),
        rows,
        reconciliation,
    })
}

/// Scrape every configured unit through the page cache.
async fn scrape(cache: &PageCache, config: &PipelineConfig) -> Result<Vec<(String, RawTable)>> {
    let mut tables = Vec::new();
    for (campus, unit) in config.units() {
        let html = cache.page(unit).await?;
        let table = parse_unit_table(unit, &html)
            .with_context(|| format!("parsing page for unit {unit}"))?;
        tables.push((campus.to_string(), table));
    }
    Ok(tables)
}

/// Write the row dump, the canonical dataset and the diagnostics into
/// `output_dir`.
pub fn write_outputs(dataset: &Dataset, config: &PipelineConfig) -> Result<()> {
    fs::create_dir_all(&config.output_dir)
        .with_context(|| format!("creating {}", config.output_dir.display()))?;
    let records = &dataset.reconciliation.records;

    output::write_rows(config.rows_csv(), &dataset.rows)?;
    output::write_salaries(config.salaries_csv(), records)?;
    if config.write_parquet {
        output::write_salaries_parquet(config.salaries_parquet(), records)?;
    }

    let diagnostics = Diagnostics {
        generated_at: Utc::now(),
        units: dataset.units,
        rows: dataset.rows.len(),
        records: records.len(),
        reconciliation: &dataset.reconciliation.report,
    };
    output::write_diagnostics(config.diagnostics_json(), &diagnostics)?;
    info!(
        records = records.len(),
        dir = %config.output_dir.display(),
        "wrote outputs"
    );
    Ok(())
}

/// Fetch (or read cached) pages, build the dataset and persist it.
#[instrument(level = "info", skip(config))]
pub async fn run(config: &PipelineConfig, offline: bool) -> Result<Dataset> {
    let cache = if offline {
        PageCache::offline(config)?
    } else {
        let client = Client::builder()
            .cookie_store(true)
            .gzip(true)
            .build()
            .context("building HTTP client")?;
        PageCache::new(client, config)?
    };

    let tables = scrape(&cache, config).await?;
    let dataset = build_dataset(&tables, config)?;
    write_outputs(&dataset, config)?;
    Ok(dataset)
}
