// src/output/mod.rs
//! On-disk forms of the pipeline's results.

pub mod columnar;
pub mod diagnostics;
pub mod tabular;

pub use diagnostics::{write_diagnostics, Diagnostics};
pub use columnar::write_salaries_parquet;
pub use tabular::{read_salaries, write_rows, write_salaries, ROW_COLUMNS, SALARY_COLUMNS};
