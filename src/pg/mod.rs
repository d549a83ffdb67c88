//! PostgreSQL connectivity and bulk transfer.
//!
//! ## Connectivity
//!
//! - [`db()`] — Establishes a database connection from a parsed config
//!
//! ## Tables
//!
//! - [`Schema`] — Table metadata and DDL
//! - [`Staged`] — Temp staging table, COPY and conflict-free merge
//! - [`Streamable`] — CSV upload via COPY
//!
//! ## Table Names
//!
//! Constants for every persistent entity of the order database.
mod schema;
mod stream;

pub use schema::*;
pub use stream::*;

use crate::Result;
use tokio_postgres::Client;
use tokio_postgres::Config;
use tokio_postgres::NoTls;

/// Establishes a database connection.
///
/// The connection future is driven on a spawned task; its failure is
/// logged and observed by the client as a closed connection.
pub async fn db(config: &Config) -> Result<Client> {
    log::info!(
        "connecting to database ({})",
        config.get_dbname().unwrap_or("default")
    );
    let (client, connection) = config.connect(NoTls).await?;
    tokio::spawn(async move {
        if let Err(e) = connection.await {
            log::error!("database connection lost: {}", e);
        }
    });
    client
        .execute("SET client_min_messages TO WARNING", &[])
        .await?;
    Ok(client)
}

/// Table for geocodable addresses.
#[rustfmt::skip]
pub const ADDRESSES:   &str = "addresses";
/// Table for ISO 3166 country codes (alpha-2, alpha-3, name).
#[rustfmt::skip]
pub const COUNTRIES:   &str = "iso_country_codes";
/// Table for customers and their phone numbers.
#[rustfmt::skip]
pub const CUSTOMERS:   &str = "customers";
/// Table for order lines.
#[rustfmt::skip]
pub const ORDERS:      &str = "orders";
/// Table for the product catalogue.
#[rustfmt::skip]
pub const PRODUCTS:    &str = "products";
/// Table for the sales CSV as delivered.
#[rustfmt::skip]
pub const RAW_ORDERS:  &str = "raw_orders_csv";
/// Table for RFM segment labels per run.
#[rustfmt::skip]
pub const RFM_LABELS:  &str = "rfm_labels";
/// Table for RFM run registrations.
#[rustfmt::skip]
pub const RFM_RUNS:    &str = "rfm_runs";
/// Table for per-target enrichment cursors.
#[rustfmt::skip]
pub const WATERMARK:   &str = "etl_watermark";
