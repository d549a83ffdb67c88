//! Phones Binary
//!
//! Validates and reformats every pending customer phone above the
//! watermark.
//!
//! Options: --status
use clap::Parser;
use order_mgmt::config::*;
use order_mgmt::enrich::*;
use order_mgmt::pg::db;
use order_mgmt::*;

#[derive(Parser)]
#[command(author, version, about = "Validate pending customer phone numbers", long_about = None)]
struct Args {
    #[command(flatten)]
    database: Database,
    /// Print the watermark and backlog without processing
    #[arg(long)]
    status: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    log()?;
    let args = Args::parse();
    let mut client = db(&args.database.config()?).await?;
    if args.status {
        return Ok(client.status(Target::PhoneVal).await?);
    }
    phone::run(&mut client).await?.report();
    Ok(())
}
