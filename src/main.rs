use anyhow::Result;
use clap::Parser;
use graybook::{pipeline, PipelineConfig};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Scrape the Gray Book unit pages and build the reconciled salary dataset"
)]
struct Args {
    /// YAML config; built-in defaults when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Only read cached pages, never touch the network
    #[arg(long)]
    offline: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_span_events(fmt::format::FmtSpan::CLOSE)
        .init();
    info!("startup");

    // ─── 2) config ───────────────────────────────────────────────────
    let args = Args::parse();
    let config = PipelineConfig::load(args.config.as_deref())?;
    info!(
        units = config.units().count(),
        cache = %config.cache_dir.display(),
        out = %config.output_dir.display(),
        offline = args.offline,
        "configured"
    );

    // ─── 3) fetch, reconcile, write ──────────────────────────────────
    let dataset = pipeline::run(&config, args.offline).await?;

    let report = &dataset.reconciliation.report;
    info!(
        rows = dataset.rows.len(),
        records = dataset.reconciliation.records.len(),
        single = report.single_appointment,
        multi = report.multi_appointment,
        discrepancies = report.discrepancies.len(),
        "all done"
    );
    Ok(())
}
