// src/report/catalog.rs
use std::collections::{BTreeMap, BTreeSet};

use crate::error::GrayBookError;
use crate::process::EmployeeRecord;

/// Distinct campuses, sorted.
pub fn campuses(records: &[EmployeeRecord]) -> Vec<String> {
    distinct(records.iter().map(|r| r.campus.as_str()))
}

/// Distinct colleges of `campus`, sorted.
pub fn colleges(records: &[EmployeeRecord], campus: &str) -> Vec<String> {
    distinct(
        records
            .iter()
            .filter(|r| r.campus == campus)
            .map(|r| r.college.as_str()),
    )
}

/// Distinct departments of (`campus`, `college`), sorted.
pub fn departments(records: &[EmployeeRecord], campus: &str, college: &str) -> Vec<String> {
    distinct(
        records
            .iter()
            .filter(|r| r.campus == campus && r.college == college)
            .map(|r| r.dept.as_str()),
    )
}

fn distinct<'a>(names: impl Iterator<Item = &'a str>) -> Vec<String> {
    names
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Every department must sit in one college and every college in one campus,
/// otherwise a department name alone is ambiguous in the selectors.
pub fn check_hierarchy(records: &[EmployeeRecord]) -> Result<(), GrayBookError> {
    let mut dept_parents: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();
    let mut college_parents: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();
    for r in records {
        dept_parents
            .entry(r.dept.as_str())
            .or_default()
            .insert(r.college.as_str());
        college_parents
            .entry(r.college.as_str())
            .or_default()
            .insert(r.campus.as_str());
    }

    let mut problems: Vec<String> = Vec::new();
    for (kind, parents) in [("department", &dept_parents), ("college", &college_parents)] {
        for (name, set) in parents.iter().filter(|(_, set)| set.len() > 1) {
            let listed: Vec<&str> = set.iter().copied().collect();
            problems.push(format!("{kind} `{name}` appears under {}", listed.join(", ")));
        }
    }

    if problems.is_empty() {
        Ok(())
    } else {
        Err(GrayBookError::HierarchyViolation(problems.join("; ")))
    }
}
