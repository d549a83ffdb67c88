//! Geocode Binary
//!
//! Corrects known Swedish street names, then geocodes every pending
//! address above the watermark.
//!
//! Options: --status
use clap::Parser;
use order_mgmt::config::*;
use order_mgmt::enrich::geocode::Geocoder;
use order_mgmt::enrich::*;
use order_mgmt::pg::db;
use order_mgmt::*;

#[derive(Parser)]
#[command(author, version, about = "Geocode pending addresses", long_about = None)]
struct Args {
    #[command(flatten)]
    database: Database,
    #[command(flatten)]
    geocoding: Geocoding,
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
        return Ok(client.status(Target::AddrGeocode).await?);
    }
    let geocoder = Geocoder::new(&args.geocoding)?;
    geocode::run(&mut client, &geocoder).await?.report();
    Ok(())
}
