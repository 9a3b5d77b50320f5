// src/report/cross_dept.rs
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::instrument;

use super::SalaryVariable;
use crate::process::EmployeeRecord;
use crate::stats::{gini, quantile_sorted};

/// Exact-match filters; `None` keeps everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub campus: Option<String>,
    pub college: Option<String>,
}

impl Selection {
    fn matches(&self, record: &EmployeeRecord) -> bool {
        self.campus.as_deref().map_or(true, |c| c == record.campus)
            && self.college.as_deref().map_or(true, |c| c == record.college)
    }
}

/// Summary of one department's salary distribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrossDeptRow {
    pub campus: String,
    pub college: String,
    pub dept: String,
    /// Employees in the department.
    pub size: usize,
    /// Employees with a value for the variable.
    pub count: usize,
    pub min: Option<f64>,
    pub p25: Option<f64>,
    pub median: Option<f64>,
    pub p75: Option<f64>,
    pub max: Option<f64>,
    pub gini: Option<f64>,
}

fn summarize(key: (&str, &str, &str), values: &[Option<f64>]) -> CrossDeptRow {
    let mut sorted: Vec<f64> = values.iter().flatten().copied().collect();
    sorted.sort_by(f64::total_cmp);
    CrossDeptRow {
        campus: key.0.to_string(),
        college: key.1.to_string(),
        dept: key.2.to_string(),
        size: values.len(),
        count: sorted.len(),
        min: sorted.first().copied(),
        p25: quantile_sorted(&sorted, 0.25),
        median: quantile_sorted(&sorted, 0.5),
        p75: quantile_sorted(&sorted, 0.75),
        max: sorted.last().copied(),
        gini: gini(values),
    }
}

/// One row per (campus, college, dept) in the selection, in key order.
#[instrument(level = "debug", skip(records))]
pub fn cross_department_report(
    records: &[EmployeeRecord],
    selection: &Selection,
    variable: SalaryVariable,
) -> Vec<CrossDeptRow> {
    let mut groups: BTreeMap<(&str, &str, &str), Vec<Option<f64>>> = BTreeMap::new();
    for record in records.iter().filter(|r| selection.matches(r)) {
        groups
            .entry((
                record.campus.as_str(),
                record.college.as_str(),
                record.dept.as_str(),
            ))
            .or_default()
            .push(variable.of(record));
    }

    let groups: Vec<_> = groups.into_iter().collect();
    groups
        .par_iter()
        .map(|(key, values)| summarize(*key, values))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::fixtures::{record, two_departments};

    #[test]
    fn summarizes_each_department() {
        let rows = cross_department_report(&two_departments(), &Selection::default(), SalaryVariable::Current);
        assert_eq!(rows.len(), 2);

        let chs = &rows[0];
        assert_eq!(chs.dept, "CHS");
        assert_eq!((chs.size, chs.count), (3, 3));
        assert_eq!(chs.min, Some(50_000.0));
        assert_eq!(chs.p25, Some(75_000.0));
        assert_eq!(chs.median, Some(100_000.0));
        assert_eq!(chs.max, Some(100_000.0));

        let epi = &rows[1];
        assert_eq!((epi.size, epi.count), (3, 2));
        assert_eq!(epi.median, Some(75_000.0));
        assert!((epi.gini.unwrap() - 0.1).abs() < 1e-12);

        for row in &rows {
            assert!(row.count <= row.size);
            let chain = [row.min, row.p25, row.median, row.p75, row.max].map(Option::unwrap);
            assert!(chain.windows(2).all(|w| w[0] <= w[1]), "{row:?}");
        }
    }

    #[test]
    fn filters_by_campus_and_college() {
        let mut records = two_departments();
        records.push(record("Springfield", "SC - Business", "ACC", "G", Some(70_000.0)));

        let all = cross_department_report(&records, &Selection::default(), SalaryVariable::Proposed);
        assert_eq!(all.len(), 3);

        let only = Selection {
            campus: Some("Springfield".into()),
            college: None,
        };
        let rows = cross_department_report(&records, &only, SalaryVariable::Current);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].max, Some(70_000.0));

        let none = Selection {
            campus: Some("Chicago".into()),
            college: Some("SC - Business".into()),
        };
        assert!(cross_department_report(&records, &none, SalaryVariable::Current).is_empty());
    }

    #[test]
    fn department_without_values_has_no_stats() {
        let records = vec![record("System", "AA - Admin", "Audit", "H", None)];
        let rows = cross_department_report(&records, &Selection::default(), SalaryVariable::Current);
        assert_eq!((rows[0].size, rows[0].count), (1, 0));
        assert_eq!(rows[0].median, None);
        assert_eq!(rows[0].gini, None);
    }
}
