// src/output/columnar.rs
use anyhow::{Context, Result};
use arrow::{
    array::{ArrayRef, Float64Array, StringArray},
    datatypes::{DataType, Field, Schema},
    record_batch::RecordBatch,
};
use parquet::{arrow::ArrowWriter, basic::Compression, file::properties::WriterProperties};
use std::{fs::File, path::Path, sync::Arc};
use tracing::info;

use super::tabular::SALARY_COLUMNS;
use crate::process::EmployeeRecord;

fn salary_schema() -> Schema {
    Schema::new(
        SALARY_COLUMNS
            .iter()
            .map(|name| {
                match *name {
                    "empname" | "empdepttitle" | "campus" | "college" | "dept" => {
                        Field::new(*name, DataType::Utf8, false)
                    }
                    _ => Field::new(*name, DataType::Float64, true),
                }
            })
            .collect::<Vec<_>>(),
    )
}

fn text(records: &[EmployeeRecord], f: impl Fn(&EmployeeRecord) -> &str) -> ArrayRef {
    Arc::new(StringArray::from(records.iter().map(f).collect::<Vec<_>>()))
}

fn number(records: &[EmployeeRecord], f: impl Fn(&EmployeeRecord) -> Option<f64>) -> ArrayRef {
    Arc::new(Float64Array::from(records.iter().map(f).collect::<Vec<_>>()))
}

/// Columnar copy of `salaries.csv`, same column names and order.
pub fn write_salaries_parquet(path: impl AsRef<Path>, records: &[EmployeeRecord]) -> Result<()> {
    let path = path.as_ref();
    let schema = Arc::new(salary_schema());
    let columns = vec![
        text(records, |r| r.empname.as_str()),
        text(records, |r| r.empdepttitle.as_str()),
        number(records, |r| r.curfte),
        number(records, |r| r.newfte),
        number(records, |r| r.cursalary),
        number(records, |r| r.newsalary),
        text(records, |r| r.campus.as_str()),
        text(records, |r| r.college.as_str()),
        text(records, |r| r.dept.as_str()),
        number(records, |r| r.cursalaryperfte),
        number(records, |r| r.newsalaryperfte),
    ];
    let batch = RecordBatch::try_new(schema.clone(), columns).context("building salaries batch")?;

    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let props = WriterProperties::builder()
        .set_compression(Compression::SNAPPY)
        .build();
    let mut writer =
        ArrowWriter::try_new(file, schema, Some(props)).context("creating parquet writer")?;
    writer.write(&batch).context("writing salaries batch")?;
    writer.close().context("closing parquet writer")?;
    info!(path = %path.display(), rows = records.len(), "wrote parquet");
    Ok(())
}
