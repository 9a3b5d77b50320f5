// src/report/dept.rs
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::instrument;

use super::SalaryVariable;
use crate::process::EmployeeRecord;
use crate::stats::{gini, quantile, rank_descending};

/// Exact (campus, college, dept) a department report is drawn for.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeptKey {
    pub campus: String,
    pub college: String,
    pub dept: String,
}

impl DeptKey {
    pub fn new(campus: impl Into<String>, college: impl Into<String>, dept: impl Into<String>) -> Self {
        Self {
            campus: campus.into(),
            college: college.into(),
            dept: dept.into(),
        }
    }

    fn matches(&self, record: &EmployeeRecord) -> bool {
        record.campus == self.campus && record.college == self.college && record.dept == self.dept
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeptReportRow {
    pub campus: String,
    pub college: String,
    pub dept: String,
    pub empname: String,
    pub empdepttitle: String,
    /// The selected salary variable.
    pub value: Option<f64>,
    /// 1 = highest value; ties share the average position.
    #[serde(rename = "Rank")]
    pub rank: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeptReport {
    pub key: DeptKey,
    pub variable: SalaryVariable,
    /// Ascending by value, missing values first, top earners excluded.
    pub rows: Vec<DeptReportRow>,
    /// Employees in the department before exclusion.
    pub employees: usize,
    pub excluded: usize,
    /// Over every employee in the department, exclusions included.
    pub median: Option<f64>,
    /// Over every employee in the department, exclusions included.
    pub gini: Option<f64>,
}

impl DeptReport {
    /// The `limit` highest listed rows, still in ascending order.
    pub fn highest(&self, limit: usize) -> &[DeptReportRow] {
        &self.rows[self.rows.len().saturating_sub(limit)..]
    }
}

fn nulls_first(a: &Option<f64>, b: &Option<f64>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(x), Some(y)) => x.total_cmp(y),
    }
}

/// Rank one department's employees on `variable` and drop the `exclude_top`
/// highest rows from the listing. The median and Gini describe the whole
/// department so the figures do not move when exclusions hide the top.
#[instrument(level = "debug", skip(records))]
pub fn department_report(
    records: &[EmployeeRecord],
    key: &DeptKey,
    variable: SalaryVariable,
    exclude_top: usize,
) -> DeptReport {
    let members: Vec<&EmployeeRecord> = records.iter().filter(|r| key.matches(r)).collect();
    let values: Vec<Option<f64>> = members.iter().map(|r| variable.of(r)).collect();
    let ranks = rank_descending(&values);

    let mut rows: Vec<DeptReportRow> = members
        .iter()
        .zip(values.iter().zip(ranks))
        .map(|(r, (&value, rank))| DeptReportRow {
            campus: r.campus.clone(),
            college: r.college.clone(),
            dept: r.dept.clone(),
            empname: r.empname.clone(),
            empdepttitle: r.empdepttitle.clone(),
            value,
            rank,
        })
        .collect();
    rows.sort_by(|a, b| nulls_first(&a.value, &b.value));

    let employees = rows.len();
    let excluded = exclude_top.min(employees);
    rows.truncate(employees - excluded);

    DeptReport {
        key: key.clone(),
        variable,
        rows,
        employees,
        excluded,
        median: quantile(&values, 0.5),
        gini: gini(&values),
    }
}
