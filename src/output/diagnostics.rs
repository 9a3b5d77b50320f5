// src/output/diagnostics.rs
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::{fs, io::Write, path::Path};

use crate::process::ReconciliationReport;

/// What a run produced, plus the totals that did not add up.
#[derive(Debug, Serialize)]
pub struct Diagnostics<'a> {
    pub generated_at: DateTime<Utc>,
    pub units: usize,
    pub rows: usize,
    pub records: usize,
    #[serde(flatten)]
    pub reconciliation: &'a ReconciliationReport,
}

/// Pretty JSON, written to a temp file and renamed over `path`.
pub fn write_diagnostics(path: impl AsRef<Path>, diagnostics: &Diagnostics<'_>) -> Result<()> {
    let path = path.as_ref();
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("diagnostics.json");
    let tmp_path = dir.join(format!(".{file_name}.tmp"));

    let mut tmp =
        fs::File::create(&tmp_path).with_context(|| format!("creating {}", tmp_path.display()))?;
    serde_json::to_writer_pretty(&mut tmp, diagnostics).context("serializing diagnostics")?;
    tmp.write_all(b"\n")?;
    fs::rename(&tmp_path, path)
        .with_context(|| format!("renaming {} -> {}", tmp_path.display(), path.display()))?;
    Ok(())
}
