//! Bulk loading of the source files.
//!
//! The sales CSV is copied into a temporary stage in the column order of
//! its header, merged into [`RAW_ORDERS`](crate::pg::RAW_ORDERS) without
//! duplicating order lines, and then promoted into the core tables. The
//! whole load is one transaction.
//!
//! ## Core Types
//!
//! - [`Loaded`] — Row counts of one sales load
//! - [`Promotion`] — Raw to core table population steps
//! - [`Window`] — Date window of an RFM label file
mod file;
mod promote;
mod rfm;

pub use file::*;
pub use promote::*;
pub use rfm::*;

use crate::pg::*;
use crate::tables::*;
use crate::*;
use std::path::Path;
use tokio_postgres::Client;

/// Rows newly inserted by one sales load, per table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Loaded {
    pub raw: u64,
    pub countries: Option<u64>,
    pub promoted: Vec<(&'static str, u64)>,
}

impl Loaded {
    pub fn report(&self) {
        log::info!("┌───────────────────┬──────────┐");
        log::info!("│ {:<17} │ {:>8} │", "table", "new rows");
        log::info!("├───────────────────┼──────────┤");
        if let Some(countries) = self.countries {
            log::info!("│ {:<17} │ {:>8} │", COUNTRIES, countries);
        }
        log::info!("│ {:<17} │ {:>8} │", RAW_ORDERS, self.raw);
        for (table, n) in self.promoted.iter() {
            log::info!("│ {:<17} │ {:>8} │", table, n);
        }
        log::info!("└───────────────────┴──────────┘");
    }
}

/// Loads the sales CSV, optionally the ISO country codes first, and
/// promotes the raw rows into the core tables.
///
/// Any failure rolls the whole load back.
pub async fn sales(client: &mut Client, csv: &Path, iso: Option<&Path>) -> Result<Loaded> {
    let (header, body) = split(read(csv).await?)?;
    log::info!("sales file has {} columns", header.columns().len());
    let countries = match iso {
        Some(path) => Some(read(path).await?),
        None => None,
    };
    let tx = client.transaction().await?;
    let mut loaded = Loaded::default();
    if let Some(countries) = countries {
        let n = Countries::stream(&tx, countries, &[]).await?;
        log::info!("merged {} new country codes into {}", n, COUNTRIES);
        loaded.countries = Some(n);
    } else {
        log::info!("no country code file given, skipping");
    }
    loaded.raw = RawOrders::stream_with(&tx, &header.copy(), body, &[]).await?;
    log::info!("merged {} new order lines into {}", loaded.raw, RAW_ORDERS);
    for step in Promotion::all() {
        let n = tx.execute(step.sql(), &[]).await?;
        log::info!("promoted {} new rows into {}", n, step.table());
        loaded.promoted.push((step.table(), n));
    }
    tx.commit().await?;
    Ok(loaded)
}
