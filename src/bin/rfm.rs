//! RFM Binary
//!
//! Registers an RFM run for the configured date window and loads its
//! customer segment labels.
use clap::Parser;
use order_mgmt::config::*;
use order_mgmt::pg::db;
use order_mgmt::*;
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about = "Load RFM segment labels", long_about = None)]
struct Args {
    #[command(flatten)]
    database: Database,
    /// JSON file with start_date and end_date
    #[arg(long, default_value = "config/rfm_dates.json")]
    window: PathBuf,
    /// Label CSV with header customer_name,recency,frequency,monetary,r_score,f_score,m_score,segment
    #[arg(long, default_value = "data/derived/rfm_labels.csv")]
    csv: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    log()?;
    let args = Args::parse();
    let mut client = db(&args.database.config()?).await?;
    let labelled = load::rfm(&mut client, &args.window, &args.csv).await?;
    log::info!(
        "run {} ({} to {}) has {} labels",
        labelled.run_id,
        labelled.window.start_date,
        labelled.window.end_date,
        labelled.labels
    );
    Ok(())
}
