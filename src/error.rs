// src/error.rs
use thiserror::Error;

/// Violations of the fixed Gray Book table layout and of the reconciled
/// dataset's invariants. Every variant is fatal for the run.
#[derive(Debug, Error, PartialEq)]
pub enum GrayBookError {
    #[error("unit {unit}: expected exactly one <table>, found {found}")]
    TableCount { unit: String, found: usize },

    #[error("unit {unit}: expected {expected} columns, found {found}")]
    ColumnCount {
        unit: String,
        expected: usize,
        found: usize,
    },

    #[error("unit {unit}: column {index} is `{found}`, expected `{expected}`")]
    UnexpectedHeader {
        unit: String,
        index: usize,
        expected: &'static str,
        found: String,
    },

    #[error("unit {unit}: row {row} has {found} cells, more than {max}")]
    RowTooWide {
        unit: String,
        row: usize,
        found: usize,
        max: usize,
    },

    #[error("unit {unit}: total row {row} has data in its trailing columns")]
    TotalRowTrailingColumns { unit: String, row: usize },

    #[error("unit {unit}: no college name in the first cell")]
    MissingCollege { unit: String },

    #[error("unit {unit}: row {row} appears before any department subheader")]
    MissingDepartment { unit: String, row: usize },

    #[error("unit {unit}: row {row} has no employee name to fill down from")]
    MissingEmployeeName { unit: String, row: usize },

    #[error("unit {unit}: row {row}, column `{column}`: cannot parse `{value}` as a number")]
    UnparseableNumber {
        unit: String,
        row: usize,
        column: &'static str,
        value: String,
    },

    #[error("duplicate employee record for `{empname}` in {campus} / {college} / {dept}")]
    DuplicateEmployee {
        empname: String,
        campus: String,
        college: String,
        dept: String,
    },

    #[error("organizational hierarchy does not nest: {0}")]
    HierarchyViolation(String),
}
