use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use shared::config::{parse_keyword_list, HotlistConfig};

#[derive(Parser)]
#[command(name = "hotlist")]
#[command(about = "Collect and rank recent AI news, papers, and open-source releases into a digest")]
struct Args {
    /// Collection window in days
    #[arg(short, long, default_value = "30")]
    days: i64,

    /// Comma-separated keyword allowlist; empty means no filtering
    #[arg(long)]
    allow: Option<String>,

    /// Comma-separated keyword denylist
    #[arg(long)]
    deny: Option<String>,

    /// Maximum items kept per report section
    #[arg(long, default_value = "100")]
    max_per_section: usize,

    /// Directory for the JSON artifacts
    #[arg(long)]
    output_data: Option<PathBuf>,

    /// Directory for the rendered report
    #[arg(long)]
    output_reports: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    HotlistConfig::try_load_dotenv();

    let base = HotlistConfig::default();
    let config = HotlistConfig {
        days: args.days,
        allowlist: parse_keyword_list(args.allow.as_deref()),
        denylist: parse_keyword_list(args.deny.as_deref()),
        max_items_per_section: args.max_per_section,
        output_dir_data: args.output_data.unwrap_or_else(|| base.output_dir_data.clone()),
        output_dir_reports: args
            .output_reports
            .unwrap_or_else(|| base.output_dir_reports.clone()),
        ..base
    };

    println!(
        "📡 Collecting AI activity from the last {} days...",
        config.days
    );

    let summary = shared::pipeline::run(&config).await?;

    println!("\n✅ Digest complete: {} items total", summary.counts.total);
    println!("  News: {}", summary.counts.news);
    println!("  Papers: {}", summary.counts.papers);
    println!(
        "  Open source & models: {}",
        summary.counts.open_source_and_models
    );
    println!("\n  Raw data:   {}", summary.raw_path.display());
    println!("  Aggregated: {}", summary.aggregated_path.display());
    println!("  Report:     {}", summary.report_path.display());

    Ok(())
}
