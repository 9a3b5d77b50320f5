// src/report/mod.rs
//! Read-only reports over the reconciled dataset.

pub mod catalog;
pub mod cross_dept;
pub mod dept;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::process::EmployeeRecord;

pub use catalog::{campuses, check_hierarchy, colleges, departments};
pub use cross_dept::{cross_department_report, CrossDeptRow, Selection};
pub use dept::{department_report, DeptKey, DeptReport, DeptReportRow};

/// Which salary-per-FTE column a report is computed over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SalaryVariable {
    /// Present salary per FTE (`cursalaryperfte`).
    Current,
    /// Proposed salary per FTE (`newsalaryperfte`).
    Proposed,
}

impl SalaryVariable {
    pub fn column(self) -> &'static str {
        match self {
            SalaryVariable::Current => "cursalaryperfte",
            SalaryVariable::Proposed => "newsalaryperfte",
        }
    }

    pub fn of(self, record: &EmployeeRecord) -> Option<f64> {
        match self {
            SalaryVariable::Current => record.cursalaryperfte,
            SalaryVariable::Proposed => record.newsalaryperfte,
        }
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::process::EmployeeRecord;

    pub fn record(campus: &str, college: &str, dept: &str, name: &str, salary: Option<f64>) -> EmployeeRecord {
        EmployeeRecord {
            empname: name.into(),
            empdepttitle: "Professor".into(),
            curfte: Some(1.0),
            newfte: Some(1.0),
            cursalary: salary,
            newsalary: salary.map(|s| s * 1.02),
            campus: campus.into(),
            college: college.into(),
            dept: dept.into(),
            cursalaryperfte: salary,
            newsalaryperfte: salary.map(|s| s * 1.02),
        }
    }

    /// Two departments, six employees, one of them without a salary.
    pub fn two_departments() -> Vec<EmployeeRecord> {
        vec![
            record("Chicago", "FY - Public Health", "EPI", "A", Some(90_000.0)),
            record("Chicago", "FY - Public Health", "EPI", "B", Some(60_000.0)),
            record("Chicago", "FY - Public Health", "EPI", "C", None),
            record("Chicago", "FY - Public Health", "CHS", "D", Some(100_000.0)),
            record("Chicago", "FY - Public Health", "CHS", "E", Some(100_000.0)),
            record("Chicago", "FY - Public Health", "CHS", "F", Some(50_000.0)),
        ]
    }
}
