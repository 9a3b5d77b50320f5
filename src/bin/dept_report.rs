use anyhow::{Context, Result};
use clap::Parser;
use graybook::{
    output::read_salaries,
    report::{check_hierarchy, department_report, DeptKey, DeptReport, SalaryVariable},
    PipelineConfig,
};
use prettytable::{format, Cell, Row, Table};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Ranked salary-per-FTE listing of one department"
)]
struct Args {
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Reconciled dataset; defaults to `salaries.csv` in the configured output dir
    #[arg(long)]
    salaries: Option<PathBuf>,
    #[arg(long)]
    campus: String,
    #[arg(long)]
    college: String,
    #[arg(long)]
    dept: String,
    #[arg(long, value_enum, default_value_t = SalaryVariable::Current)]
    variable: SalaryVariable,
    /// Hide this many of the highest values from the listing
    #[arg(long, default_value_t = 0)]
    exclude_top: usize,
    /// Write CSV to stdout instead of a table
    #[arg(long)]
    csv: bool,
    /// Max rows shown, counted from the highest; overrides `display_row_limit`
    #[arg(long)]
    limit: Option<usize>,
}

fn fmt_opt(v: Option<f64>, precision: usize) -> String {
    v.map(|x| format!("{x:.precision$}")).unwrap_or_default()
}

fn write_csv(report: &DeptReport, limit: usize) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(std::io::stdout());
    wtr.write_record([
        "campus",
        "college",
        "dept",
        "empname",
        "empdepttitle",
        report.variable.column(),
        "Rank",
    ])?;
    for r in report.highest(limit) {
        let value = r.value.map(|v| v.to_string()).unwrap_or_default();
        let rank = r.rank.map(|v| v.to_string()).unwrap_or_default();
        wtr.write_record([
            r.campus.as_str(),
            r.college.as_str(),
            r.dept.as_str(),
            r.empname.as_str(),
            r.empdepttitle.as_str(),
            value.as_str(),
            rank.as_str(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

fn print_table(report: &DeptReport, limit: usize) {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BOX_CHARS);
    table.add_row(Row::new(
        ["Employee", "Title(s)", report.variable.column(), "Rank"]
            .iter()
            .map(|h| Cell::new(h).style_spec("bFg"))
            .collect(),
    ));
    let shown = report.highest(limit);
    for r in shown {
        table.add_row(Row::new(vec![
            Cell::new(&r.empname),
            Cell::new(&r.empdepttitle),
            Cell::new(&fmt_opt(r.value, 0)).style_spec("r"),
            Cell::new(&fmt_opt(r.rank, 1)).style_spec("r"),
        ]));
    }

    println!(
        "\n--- {} / {} / {} ---",
        report.key.campus, report.key.college, report.key.dept
    );
    table.printstd();
    println!("Median (no exclusions): {}", fmt_opt(report.median, 0));
    println!("Gini (no exclusions): {}", fmt_opt(report.gini, 3));
    if shown.len() < report.rows.len() {
        println!(
            "Row limit: showing the {} highest of {} listed rows",
            shown.len(),
            report.rows.len()
        );
    }
    if report.excluded > 0 {
        println!(
            "{} of {} employees hidden from the listing",
            report.excluded, report.employees
        );
    }
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

    // selection names all three levels; a shared name is reported, not fatal
    if let Err(e) = check_hierarchy(&records) {
        warn!("{}", e);
    }

    let key = DeptKey::new(args.campus, args.college, args.dept);
    let report = department_report(&records, &key, args.variable, args.exclude_top);
    if report.employees == 0 {
        warn!(?key, "no employees in the selected department");
        println!("No employees match the selection.");
        return Ok(());
    }

    let limit = args
        .limit
        .or(config.display_row_limit)
        .unwrap_or(usize::MAX);
    if limit < report.rows.len() {
        info!(limit, listed = report.rows.len(), "row limit keeps only the highest rows");
    }
    if args.csv {
        write_csv(&report, limit)?;
    } else {
        print_table(&report, limit);
    }
    Ok(())
}
