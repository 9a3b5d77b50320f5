// src/process/normalize.rs
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::raw_table::*;
use super::utils::parse_amount;
use crate::error::GrayBookError;

/// A scraped line with its columns realigned, its organizational context
/// resolved and its amounts parsed. Total rows are kept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedRow {
    pub empname: String,
    /// This row's own job title, or [`TOTAL_SENTINEL`] on total rows.
    #[serde(rename = "empdepttitle")]
    pub job_title: String,
    pub tenure: Option<String>,
    #[serde(rename = "emplclass")]
    pub empl_class: Option<String>,
    pub curfte: Option<f64>,
    pub newfte: Option<f64>,
    pub cursalary: Option<f64>,
    pub newsalary: Option<f64>,
    pub campus: String,
    pub college: String,
    pub dept: String,
    pub unit: String,
}

impl NormalizedRow {
    pub fn is_total(&self) -> bool {
        self.job_title == TOTAL_SENTINEL
    }
}

fn check_headers(table: &RawTable) -> Result<(), GrayBookError> {
    if table.headers.len() != RAW_COLUMNS {
        return Err(GrayBookError::ColumnCount {
            unit: table.unit.clone(),
            expected: RAW_COLUMNS,
            found: table.headers.len(),
        });
    }
    for index in [COL_NAME, COL_TITLE, COL_PROPOSED_SALARY] {
        if table.headers[index] != RAW_HEADERS[index] {
            return Err(GrayBookError::UnexpectedHeader {
                unit: table.unit.clone(),
                index,
                expected: RAW_HEADERS[index],
                found: table.headers[index].clone(),
            });
        }
    }
    Ok(())
}

/// Move a total row's four amounts from Job Title..Present FTE into
/// Present FTE..Proposed Salary, then make the sentinel its job title.
fn shift_total_row(row: &mut RawRow) {
    for k in 0..4 {
        row[COL_PROPOSED_SALARY - k] = row[COL_PRESENT_FTE - k].take();
    }
    row[COL_TITLE] = Some(TOTAL_SENTINEL.to_string());
    row[COL_NAME] = None;
}

/// An additional-title row lost its leading (name) cell; push everything one right.
fn shift_additional_title_row(row: &mut RawRow) {
    for col in (1..RAW_COLUMNS).rev() {
        row[col] = row[col - 1].take();
    }
}

/// Repair the column-shift defects of one row in place.
fn realign(unit: &str, index: usize, row: &mut RawRow) -> Result<(), GrayBookError> {
    if row[COL_NAME].as_deref() == Some(TOTAL_SENTINEL) {
        if row[COL_PROPOSED_FTE..].iter().any(Option::is_some) {
            return Err(GrayBookError::TotalRowTrailingColumns {
                unit: unit.to_string(),
                row: index,
            });
        }
        shift_total_row(row);
    }
    if row[COL_PROPOSED_SALARY].is_none() && row[COL_PRESENT_SALARY].is_some() {
        shift_additional_title_row(row);
    }
    Ok(())
}

fn amount(
    unit: &str,
    index: usize,
    row: &RawRow,
    col: usize,
) -> Result<Option<f64>, GrayBookError> {
    match &row[col] {
        None => Ok(None),
        Some(text) => parse_amount(text).map_err(|_| GrayBookError::UnparseableNumber {
            unit: unit.to_string(),
            row: index,
            column: RAW_HEADERS[col],
            value: text.clone(),
        }),
    }
}

/// Clean one unit's scraped table.
///
/// Rows are realigned first, then scanned top to bottom carrying the last
/// employee name and the last department subheader. Subheader rows (no job
/// title) only donate their label and are dropped. The college comes from the
/// first cell of the table.
#[instrument(level = "info", skip(table), fields(unit = %table.unit, rows = table.rows.len()))]
pub fn normalize_unit(table: &RawTable, campus: &str) -> Result<Vec<NormalizedRow>, GrayBookError> {
    check_headers(table)?;
    let unit = table.unit.as_str();

    let mut rows = table.rows.clone();
    for (index, row) in rows.iter_mut().enumerate() {
        realign(unit, index, row)?;
    }

    let college = rows
        .first()
        .and_then(|r| r[COL_NAME].clone())
        .ok_or_else(|| GrayBookError::MissingCollege {
            unit: unit.to_string(),
        })?;

    let mut out = Vec::with_capacity(rows.len());
    let mut last_name: Option<String> = None;
    let mut dept: Option<String> = None;

    for (index, row) in rows.iter().enumerate() {
        let name = match &row[COL_NAME] {
            Some(n) => {
                last_name = Some(n.clone());
                n.clone()
            }
            None => last_name.clone().ok_or_else(|| GrayBookError::MissingEmployeeName {
                unit: unit.to_string(),
                row: index,
            })?,
        };

        let Some(title) = row[COL_TITLE].clone() else {
            dept = Some(name);
            continue;
        };
        let dept = dept.clone().ok_or_else(|| GrayBookError::MissingDepartment {
            unit: unit.to_string(),
            row: index,
        })?;

        out.push(NormalizedRow {
            empname: name,
            job_title: title,
            tenure: row[COL_TENURE].clone(),
            empl_class: row[COL_CLASS].clone(),
            curfte: amount(unit, index, row, COL_PRESENT_FTE)?,
            newfte: amount(unit, index, row, COL_PROPOSED_FTE)?,
            cursalary: amount(unit, index, row, COL_PRESENT_SALARY)?,
            newsalary: amount(unit, index, row, COL_PROPOSED_SALARY)?,
            campus: campus.to_string(),
            college: college.clone(),
            dept,
            unit: unit.to_string(),
        });
    }

    debug!(kept = out.len(), %college, "normalized unit");
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A college banner, two departments, one employee with two titles
    /// (total row + additional-title row) and one with a single title.
    fn sample() -> RawTable {
        RawTable::from_cells(
            "FY",
            &[
                &["FY - School of Public Health"],
                &["Community Health Sciences"],
                &["Doe, John", "Professor", "T", "FA", "0.50", "0.50", "$50,000.00", "$51,000.00"],
                &["Lecturer", "", "AA", "0.25", "0.25", "$10,000.00", "$10,500.00"],
                &["Employee Total for All Jobs...", "0.75", "0.75", "$60,000.00", "$61,500.00"],
                &["Epidemiology"],
                &["Roe, Ann", "Asst Prof", "P", "FA", "1.00", "1.00", "$80,000.00", "$82,000.00"],
            ],
        )
    }

    #[test]
    fn repairs_shifted_rows_and_fills_context() {
        let rows = normalize_unit(&sample(), "Chicago").unwrap();
        assert_eq!(rows.len(), 4);

        assert!(rows.iter().all(|r| !r.job_title.is_empty()));
        assert!(rows.iter().all(|r| r.college == "FY - School of Public Health"));
        assert!(rows.iter().all(|r| r.campus == "Chicago" && r.unit == "FY"));

        let extra = &rows[1];
        assert_eq!(extra.empname, "Doe, John");
        assert_eq!(extra.job_title, "Lecturer");
        assert_eq!(extra.tenure, None);
        assert_eq!(extra.empl_class.as_deref(), Some("AA"));
        assert_eq!(extra.curfte, Some(0.25));
        assert_eq!(extra.newsalary, Some(10_500.0));

        let total = &rows[2];
        assert!(total.is_total());
        assert_eq!(total.empname, "Doe, John");
        assert_eq!(total.curfte, Some(0.75));
        assert_eq!(total.newfte, Some(0.75));
        assert_eq!(total.cursalary, Some(60_000.0));
        assert_eq!(total.newsalary, Some(61_500.0));
        assert_eq!(total.tenure, None);
        assert_eq!(total.dept, "Community Health Sciences");

        assert_eq!(rows[3].empname, "Roe, Ann");
        assert_eq!(rows[3].dept, "Epidemiology");
    }

    #[test]
    fn total_row_with_trailing_data_is_fatal() {
        let mut table = sample();
        table.rows[4][COL_PROPOSED_SALARY] = Some("$1.00".into());
        assert_eq!(
            normalize_unit(&table, "Chicago"),
            Err(GrayBookError::TotalRowTrailingColumns {
                unit: "FY".into(),
                row: 4
            })
        );
    }

    #[test]
    fn unparseable_amount_is_fatal() {
        let mut table = sample();
        table.rows[6][COL_PRESENT_FTE] = Some("full".into());
        assert!(matches!(
            normalize_unit(&table, "Chicago"),
            Err(GrayBookError::UnparseableNumber {
                row: 6,
                column: "Present FTE",
                ..
            })
        ));
    }

    #[test]
    fn unexpected_headers_are_fatal() {
        let mut table = sample();
        table.headers[COL_PROPOSED_SALARY] = "Salary".into();
        assert!(matches!(
            normalize_unit(&table, "Chicago"),
            Err(GrayBookError::UnexpectedHeader { index: 7, .. })
        ));

        table.headers.pop();
        assert!(matches!(
            normalize_unit(&table, "Chicago"),
            Err(GrayBookError::ColumnCount { found: 7, .. })
        ));
    }

    #[test]
    fn first_cell_supplies_college_and_first_name() {
        let table = RawTable::from_cells(
            "GF",
            &[
                &["GF - Nursing"],
                &["Lecturer", "", "AA", "0.25", "0.25", "$10,000.00", "$10,500.00"],
            ],
        );
        // the college banner is the only name above the orphaned title row
        let rows = normalize_unit(&table, "Chicago").unwrap();
        assert_eq!(rows[0].empname, "GF - Nursing");
        assert_eq!(rows[0].dept, "GF - Nursing");

        let table = RawTable::from_cells(
            "GF",
            &[&["", "Lecturer", "", "AA", "0.25", "0.25", "$1.00", "$1.00"]],
        );
        assert!(matches!(
            normalize_unit(&table, "Chicago"),
            Err(GrayBookError::MissingCollege { .. })
        ));
    }
}
