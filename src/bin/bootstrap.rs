//! Bootstrap Binary
//!
//! Creates the target database if it does not exist, then applies every
//! table and seeds the watermark rows. Safe to re-run.
use clap::Parser;
use order_mgmt::config::*;
use order_mgmt::*;

#[derive(Parser)]
#[command(author, version, about = "Create the order database and apply its schema", long_about = None)]
struct Args {
    #[command(flatten)]
    database: Database,
    #[command(flatten)]
    maintenance: Maintenance,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    log()?;
    let args = Args::parse();
    bootstrap::bootstrap(&args.database, &args.maintenance).await?;
    Ok(())
}
