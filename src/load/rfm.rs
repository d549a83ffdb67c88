use super::*;
use crate::pg::*;
use crate::tables::*;
use crate::*;
use bytes::Bytes;
use chrono::NaiveDate;
use const_format::concatcp;
use serde::Deserialize;
use std::path::Path;
use tokio_postgres::Client;

/// Date window the RFM labels were computed over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Window {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl Window {
    pub fn parse(json: &str) -> Result<Self> {
        let window = serde_json::from_str::<Self>(json)?;
        match window.start_date <= window.end_date {
            true => Ok(window),
            false => Err(Error::Malformed(format!(
                "RFM window starts {} after it ends {}",
                window.start_date, window.end_date
            ))),
        }
    }
    pub async fn read(path: &Path) -> Result<Self> {
        Self::parse(&tokio::fs::read_to_string(path).await?)
    }
}

/// Registered run and the labels it received.
#[derive(Debug, Clone, PartialEq)]
pub struct Labelled {
    pub run_id: Id,
    pub window: Window,
    pub labels: u64,
}

/// Registers a run for `window` and loads the label CSV `body` into it, all in one
/// transaction. Labels for unknown customer names are dropped.
pub async fn labels(client: &mut Client, window: Window, body: Bytes) -> Result<Labelled> {
    #[rustfmt::skip]
    const REGISTER: &str = concatcp!(
        "INSERT INTO ", RFM_RUNS, " (start_date, end_date) ",
        "VALUES      ($1, $2) ",
        "RETURNING   run_id"
    );
    let tx = client.transaction().await?;
    let run_id = tx
        .query_one(REGISTER, &[&window.start_date, &window.end_date])
        .await?
        .get::<_, i64>(0);
    log::info!(
        "registered RFM run {} for {} to {}",
        run_id,
        window.start_date,
        window.end_date
    );
    let labels = RfmLabels::stream(&tx, body, &[&run_id]).await?;
    tx.commit().await?;
    log::info!("loaded {} RFM labels into run {}", labels, run_id);
    Ok(Labelled { run_id, window, labels })
}

/// Reads the window and label files, then loads them.
pub async fn rfm(client: &mut Client, window: &Path, csv: &Path) -> Result<Labelled> {
    let window = Window::read(window).await?;
    let body = read(csv).await?;
    labels(client, window, body).await
}
