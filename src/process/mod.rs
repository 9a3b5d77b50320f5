// src/process/mod.rs
//! Turning scraped unit pages into the reconciled employee dataset:
//! HTML → [`RawTable`] → [`NormalizedRow`]s per unit → [`EmployeeRecord`]s.

pub mod aggregate;
pub mod html;
pub mod normalize;
pub mod raw_table;
pub mod utils;

pub use aggregate::{
    collapse, per_fte, reconcile, AmountField, EmployeeRecord, Reconciliation,
    ReconciliationReport, TotalDiscrepancy,
};
pub use html::parse_unit_table;
pub use normalize::{normalize_unit, NormalizedRow};
pub use raw_table::{RawRow, RawTable, RAW_COLUMNS, RAW_HEADERS, TOTAL_SENTINEL};
