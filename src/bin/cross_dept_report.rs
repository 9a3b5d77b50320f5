use anyhow::{Context, Result};
use clap::Parser;
use graybook::{
    output::read_salaries,
    report::{cross_department_report, CrossDeptRow, SalaryVariable, Selection},
    PipelineConfig,
};
use prettytable::{format, Cell, Row, Table};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Salary-per-FTE distribution of every department, side by side"
)]
struct Args {
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Reconciled dataset; defaults to `salaries.csv` in the configured output dir
    #[arg(long)]
    salaries: Option<PathBuf>,
    #[arg(long)]
    campus: Option<String>,
    #[arg(long)]
    college: Option<String>,
    #[arg(long, value_enum, default_value_t = SalaryVariable::Current)]
    variable: SalaryVariable,
    /// Write CSV to stdout instead of a table
    #[arg(long)]
    csv: bool,
    /// Max rows shown; overrides `display_row_limit`
    #[arg(long)]
    limit: Option<usize>,
}

const CSV_COLUMNS: [&str; 11] = [
    "campus", "college", "dept", "size", "count", "min", "p25", "median", "p75", "max", "gini",
];

/// Header first, so an empty selection still yields a valid CSV.
fn write_csv<W: std::io::Write>(out: W, rows: &[CrossDeptRow]) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new().has_headers(false).from_writer(out);
    wtr.write_record(CSV_COLUMNS)?;
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

fn amount(v: Option<f64>) -> String {
    v.map(|x| format!("{x:.0}")).unwrap_or_default()
}

fn print_table(rows: &[CrossDeptRow]) {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BOX_CHARS);
    table.add_row(Row::new(
        [
            "Campus", "College", "Dept", "Size", "Count", "Min", "P25", "Median", "P75", "Max",
            "Gini",
        ]
        .iter()
        .map(|h| Cell::new(h).style_spec("bFg"))
        .collect(),
    ));

    for r in rows {
        table.add_row(Row::new(vec![
            Cell::new(&r.campus),
            Cell::new(&r.college),
            Cell::new(&r.dept),
            Cell::new(&r.size.to_string()).style_spec("r"),
            Cell::new(&r.count.to_string()).style_spec("r"),
            Cell::new(&amount(r.min)).style_spec("r"),
            Cell::new(&amount(r.p25)).style_spec("r"),
            Cell::new(&amount(r.median)).style_spec("r"),
            Cell::new(&amount(r.p75)).style_spec("r"),
            Cell::new(&amount(r.max)).style_spec("r"),
            Cell::new(&r.gini.map(|g| format!("{g:.3}")).unwrap_or_default()).style_spec("r"),
        ]));
    }
    table.printstd();
}

fn main() -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = PipelineConfig::load(args.config.as_deref())?;
    let path = args.salaries.unwrap_or_else(|| config.salaries_csv());
    let records = read_salaries(&path)
        .with_context(|| format!("loading dataset; run `graybook` first to create {}", path.display()))?;
    info!(records = records.len(), path = %path.display(), "loaded dataset");

    let selection = Selection {
        campus: args.campus,
        college: args.college,
    };
    let mut rows = cross_department_report(&records, &selection, args.variable);
    info!(departments = rows.len(), variable = args.variable.column(), "report ready");

    if let Some(limit) = args.limit.or(config.display_row_limit) {
        rows.truncate(limit);
    }

    if args.csv {
        write_csv(std::io::stdout(), &rows)?;
    } else if rows.is_empty() {
        println!("No departments match the selection.");
    } else {
        println!("\n--- Departments by {} ---", args.variable.column());
        print_table(&rows);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn csv_text(rows: &[CrossDeptRow]) -> Result<String> {
        let mut buf = Vec::new();
        write_csv(&mut buf, rows)?;
        Ok(String::from_utf8(buf)?)
    }

    #[test]
    fn empty_selection_is_header_only() -> Result<()> {
        assert_eq!(csv_text(&[])?, format!("{}\n", CSV_COLUMNS.join(",")));
        Ok(())
    }

    #[test]
    fn rows_follow_the_header() -> Result<()> {
        let row = CrossDeptRow {
            campus: "Chicago".into(),
            college: "FY - Public Health".into(),
            dept: "EPI".into(),
            size: 3,
            count: 0,
            min: None,
            p25: None,
            median: None,
            p75: None,
            max: None,
            gini: None,
        };
        let text = csv_text(&[row])?;
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], CSV_COLUMNS.join(","));
        assert_eq!(lines[1], "Chicago,FY - Public Health,EPI,3,0,,,,,,");
        Ok(())
    }
}
