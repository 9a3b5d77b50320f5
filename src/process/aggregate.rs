// src/process/aggregate.rs
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, info, instrument, warn};

use super::normalize::NormalizedRow;
use crate::error::GrayBookError;

/// One employee's appointment in one department, with the totals disclosed
/// for that employee. Field names are the on-disk column names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeRecord {
    pub empname: String,
    /// The employee's titles in this department, joined with `"; "`.
    pub empdepttitle: String,
    pub curfte: Option<f64>,
    pub newfte: Option<f64>,
    pub cursalary: Option<f64>,
    pub newsalary: Option<f64>,
    pub campus: String,
    pub college: String,
    pub dept: String,
    pub cursalaryperfte: Option<f64>,
    pub newsalaryperfte: Option<f64>,
}

impl EmployeeRecord {
    pub fn key(&self) -> (&str, &str, &str, &str) {
        (&self.empname, &self.campus, &self.college, &self.dept)
    }
}

/// The four amounts reconciled per employee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AmountField {
    CurFte,
    NewFte,
    CurSalary,
    NewSalary,
}

impl AmountField {
    pub const ALL: [AmountField; 4] = [
        AmountField::CurFte,
        AmountField::NewFte,
        AmountField::CurSalary,
        AmountField::NewSalary,
    ];

    fn index(self) -> usize {
        self as usize
    }

    pub fn of(self, row: &NormalizedRow) -> Option<f64> {
        match self {
            AmountField::CurFte => row.curfte,
            AmountField::NewFte => row.newfte,
            AmountField::CurSalary => row.cursalary,
            AmountField::NewSalary => row.newsalary,
        }
    }
}

/// A disclosed total that does not match the sum of the employee's rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TotalDiscrepancy {
    pub empname: String,
    pub field: AmountField,
    /// Sum over the employee's non-total rows.
    pub computed: f64,
    /// Total used for the employee's records.
    pub shown: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReconciliationReport {
    pub single_appointment: usize,
    pub multi_appointment: usize,
    pub tolerance: f64,
    pub discrepancies: Vec<TotalDiscrepancy>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Reconciliation {
    pub records: Vec<EmployeeRecord>,
    pub report: ReconciliationReport,
}

type Totals = [Option<f64>; 4];

fn max_opt(acc: Option<f64>, v: Option<f64>) -> Option<f64> {
    match (acc, v) {
        (Some(a), Some(b)) => Some(a.max(b)),
        (a, b) => a.or(b),
    }
}

/// Largest value of each field over the employee's total rows.
fn disclosed_totals(rows: &[NormalizedRow]) -> HashMap<&str, Totals> {
    let mut totals: HashMap<&str, Totals> = HashMap::new();
    for row in rows.iter().filter(|r| r.is_total()) {
        let entry = totals.entry(row.empname.as_str()).or_default();
        for field in AmountField::ALL {
            entry[field.index()] = max_opt(entry[field.index()], field.of(row));
        }
    }
    totals
}

/// Salary per 1.0 FTE; undefined when the FTE is zero or either side is missing.
pub fn per_fte(salary: Option<f64>, fte: Option<f64>) -> Option<f64> {
    match (salary, fte) {
        (Some(s), Some(f)) if f != 0.0 => Some(s / f),
        _ => None,
    }
}

/// Collapse per-row candidates to one record per (empname, campus, college, dept).
///
/// Identical candidates fold into the first one; two different records under
/// the same key mean reconciliation went wrong and are rejected.
pub fn collapse(candidates: Vec<EmployeeRecord>) -> Result<Vec<EmployeeRecord>, GrayBookError> {
    let mut seen: HashMap<(String, String, String, String), usize> = HashMap::new();
    let mut out: Vec<EmployeeRecord> = Vec::new();

    for record in candidates {
        let key = (
            record.empname.clone(),
            record.campus.clone(),
            record.college.clone(),
            record.dept.clone(),
        );
        match seen.get(&key) {
            Some(&idx) if out[idx] == record => continue,
            Some(_) => {
                return Err(GrayBookError::DuplicateEmployee {
                    empname: key.0,
                    campus: key.1,
                    college: key.2,
                    dept: key.3,
                })
            }
            None => {
                seen.insert(key, out.len());
                out.push(record);
            }
        }
    }
    Ok(out)
}

/// Compare each employee's disclosed totals against the sum of their rows.
fn cross_check(
    rows: &[NormalizedRow],
    shown: &HashMap<&str, Totals>,
    tolerance: f64,
) -> Vec<TotalDiscrepancy> {
    let mut order: Vec<&str> = Vec::new();
    let mut sums: HashMap<&str, [f64; 4]> = HashMap::new();
    for row in rows.iter().filter(|r| !r.is_total()) {
        let name = row.empname.as_str();
        let entry = sums.entry(name).or_insert_with(|| {
            order.push(name);
            [0.0; 4]
        });
        for field in AmountField::ALL {
            entry[field.index()] += field.of(row).unwrap_or(0.0);
        }
    }

    let mut out = Vec::new();
    for name in order {
        let (Some(totals), Some(sum)) = (shown.get(name), sums.get(name)) else {
            continue;
        };
        for field in AmountField::ALL {
            if let Some(shown) = totals[field.index()] {
                let computed = sum[field.index()];
                if (computed - shown).abs() > tolerance {
                    out.push(TotalDiscrepancy {
                        empname: name.to_string(),
                        field,
                        computed,
                        shown,
                    });
                }
            }
        }
    }
    out
}

/// Reconcile the normalized rows of every unit into one record per employee
/// and department.
///
/// An employee with a single row keeps that row's amounts. Otherwise the
/// employee's total rows are authoritative: each amount is the maximum over
/// all of them, across units, and applies to every department the employee
/// appears in. Discrepancies between those totals and the row sums are
/// reported, never corrected.
#[instrument(level = "info", skip(rows), fields(rows = rows.len()))]
pub fn reconcile(
    rows: &[NormalizedRow],
    tolerance: f64,
    surface_discrepancies: bool,
) -> Result<Reconciliation, GrayBookError> {
    let mut row_counts: HashMap<&str, usize> = HashMap::new();
    for row in rows {
        *row_counts.entry(row.empname.as_str()).or_default() += 1;
    }

    let disclosed = disclosed_totals(rows);
    let mut shown: HashMap<&str, Totals> = HashMap::with_capacity(row_counts.len());
    for row in rows {
        let name = row.empname.as_str();
        let totals = if row_counts[name] == 1 {
            AmountField::ALL.map(|f| f.of(row))
        } else {
            disclosed.get(name).copied().unwrap_or_default()
        };
        shown.insert(name, totals);
    }

    let discrepancies = cross_check(rows, &shown, tolerance);
    for d in &discrepancies {
        if surface_discrepancies {
            warn!(empname = %d.empname, field = ?d.field, computed = d.computed, shown = d.shown, "total does not add up");
        } else {
            debug!(empname = %d.empname, field = ?d.field, computed = d.computed, shown = d.shown, "total does not add up");
        }
    }

    let mut titles: HashMap<(&str, &str, &str, &str), Vec<&str>> = HashMap::new();
    for row in rows {
        let group = titles
            .entry((
                row.empname.as_str(),
                row.campus.as_str(),
                row.college.as_str(),
                row.dept.as_str(),
            ))
            .or_default();
        if !row.is_total() {
            group.push(row.job_title.as_str());
        }
    }

    let candidates = rows
        .iter()
        .map(|row| {
            let totals = shown[row.empname.as_str()];
            let [curfte, newfte, cursalary, newsalary] = totals;
            EmployeeRecord {
                empname: row.empname.clone(),
                empdepttitle: titles[&(
                    row.empname.as_str(),
                    row.campus.as_str(),
                    row.college.as_str(),
                    row.dept.as_str(),
                )]
                    .join("; "),
                curfte,
                newfte,
                cursalary,
                newsalary,
                campus: row.campus.clone(),
                college: row.college.clone(),
                dept: row.dept.clone(),
                cursalaryperfte: per_fte(cursalary, curfte),
                newsalaryperfte: per_fte(newsalary, newfte),
            }
        })
        .collect();
    let records = collapse(candidates)?;

    let single = row_counts.values().filter(|&&n| n == 1).count();
    let report = ReconciliationReport {
        single_appointment: single,
        multi_appointment: row_counts.len() - single,
        tolerance,
        discrepancies,
    };
    info!(
        records = records.len(),
        employees = row_counts.len(),
        discrepancies = report.discrepancies.len(),
        "reconciled"
    );
    Ok(Reconciliation { records, report })
}
