//! Load Binary
//!
//! Bulk-loads the sales CSV through a staging table, optionally the ISO
//! country codes, and promotes the raw rows into the core tables.
use clap::Parser;
use order_mgmt::config::*;
use order_mgmt::pg::db;
use order_mgmt::*;
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about = "Load the sales CSV into the order database", long_about = None)]
struct Args {
    #[command(flatten)]
    database: Database,
    /// Sales CSV, Latin-1, header on the first line
    #[arg(long, default_value = "data/sales_data_sample.csv")]
    csv: PathBuf,
    /// ISO country code CSV with header alpha2,alpha3,name
    #[arg(long)]
    iso: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    log()?;
    let args = Args::parse();
    let mut client = db(&args.database.config()?).await?;
    load::sales(&mut client, &args.csv, args.iso.as_deref())
        .await?
        .report();
    Ok(())
}
