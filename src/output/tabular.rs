// src/output/tabular.rs
use anyhow::{Context, Result};
use csv::WriterBuilder;
use serde::Serialize;
use std::{fs, path::Path};
use tracing::info;

use crate::process::{EmployeeRecord, NormalizedRow};

/// Header of `salaries.csv`; consumers read these names.
pub const SALARY_COLUMNS: [&str; 11] = [
    "empname",
    "empdepttitle",
    "curfte",
    "newfte",
    "cursalary",
    "newsalary",
    "campus",
    "college",
    "dept",
    "cursalaryperfte",
    "newsalaryperfte",
];

/// Header of `uiData.csv`, one line per normalized row.
pub const ROW_COLUMNS: [&str; 12] = [
    "empname",
    "empdepttitle",
    "tenure",
    "emplclass",
    "curfte",
    "newfte",
    "cursalary",
    "newsalary",
    "campus",
    "college",
    "dept",
    "unit",
];

/// Write `items` under an explicit header so an empty file still carries it.
fn write_csv<T: Serialize>(path: &Path, header: &[&str], items: &[T]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).with_context(|| format!("creating {}", parent.display()))?;
    }
    let mut wtr = WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;
    wtr.write_record(header)?;
    for item in items {
        wtr.serialize(item)
            .with_context(|| format!("writing {}", path.display()))?;
    }
    wtr.flush()?;
    info!(path = %path.display(), rows = items.len(), "wrote csv");
    Ok(())
}

pub fn write_salaries(path: impl AsRef<Path>, records: &[EmployeeRecord]) -> Result<()> {
    write_csv(path.as_ref(), &SALARY_COLUMNS, records)
}

pub fn write_rows(path: impl AsRef<Path>, rows: &[NormalizedRow]) -> Result<()> {
    write_csv(path.as_ref(), &ROW_COLUMNS, rows)
}

/// Load a `salaries.csv` written by [`write_salaries`].
pub fn read_salaries(path: impl AsRef<Path>) -> Result<Vec<EmployeeRecord>> {
    let path = path.as_ref();
    let mut rdr = csv::Reader::from_path(path).with_context(|| format!("opening {}", path.display()))?;
    let mut records = Vec::new();
    for (idx, result) in rdr.deserialize().enumerate() {
        let record: EmployeeRecord =
            result.with_context(|| format!("{}: record {}", path.display(), idx))?;
        records.push(record);
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::TOTAL_SENTINEL;
    use tempfile::tempdir;

    fn record(name: &str, fte: f64) -> EmployeeRecord {
        EmployeeRecord {
            empname: name.into(),
            empdepttitle: "Professor; Director, \"Center\"".into(),
            curfte: Some(fte),
            newfte: Some(fte),
            cursalary: Some(100_000.0),
            newsalary: None,
            campus: "Chicago".into(),
            college: "FY - School of Public Health".into(),
            dept: "Epidemiology".into(),
            cursalaryperfte: crate::process::per_fte(Some(100_000.0), Some(fte)),
            newsalaryperfte: None,
        }
    }

    #[test]
    fn salaries_round_trip_with_contract_header() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("out").join("salaries.csv");
        let records = vec![record("Doe, John", 0.5), record("Roe, Ann", 0.0)];

        write_salaries(&path, &records)?;
        let text = fs::read_to_string(&path)?;
        assert_eq!(text.lines().next(), Some(SALARY_COLUMNS.join(",").as_str()));

        assert_eq!(read_salaries(&path)?, records);
        Ok(())
    }

    #[test]
    fn empty_outputs_keep_headers() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("uiData.csv");
        write_rows(&path, &[])?;
        assert_eq!(fs::read_to_string(&path)?.trim_end(), ROW_COLUMNS.join(","));
        Ok(())
    }

    #[test]
    fn rows_keep_the_total_sentinel() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("uiData.csv");
        let row = NormalizedRow {
            empname: "Doe, John".into(),
            job_title: TOTAL_SENTINEL.into(),
            tenure: None,
            empl_class: None,
            curfte: Some(0.75),
            newfte: Some(0.75),
            cursalary: Some(60_000.0),
            newsalary: Some(61_500.0),
            campus: "Chicago".into(),
            college: "FY".into(),
            dept: "CHS".into(),
            unit: "FY".into(),
        };
        write_rows(&path, &[row])?;
        let text = fs::read_to_string(&path)?;
        assert_eq!(
            text.lines().nth(1),
            Some("\"Doe, John\",Employee Total for All Jobs...,,,0.75,0.75,60000.0,61500.0,Chicago,FY,CHS,FY")
        );
        Ok(())
    }
}
