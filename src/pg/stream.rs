use super::*;
use bytes::Bytes;
use futures::SinkExt;
use tokio_postgres::Transaction;
use tokio_postgres::types::ToSql;

/// Bulk data upload via PostgreSQL's text COPY protocol.
///
/// Pushes a CSV body into the table's stage, then merges the stage into
/// the table. Everything runs inside the caller's transaction, so a
/// failure at any point leaves the table untouched once rolled back.
#[async_trait::async_trait]
pub trait Streamable: Staged {
    /// Stages `body` with the default COPY command and merges it.
    /// Returns the number of rows newly inserted into the table.
    async fn stream(
        tx: &Transaction<'_>,
        body: Bytes,
        params: &[&(dyn ToSql + Sync)],
    ) -> Result<u64> {
        Self::stream_with(tx, Self::copy(), body, params).await
    }
    /// Stages `body` with an explicit COPY command and merges it.
    async fn stream_with(
        tx: &Transaction<'_>,
        copy: &str,
        body: Bytes,
        params: &[&(dyn ToSql + Sync)],
    ) -> Result<u64> {
        log::debug!("staging table ({})", Self::name());
        tx.batch_execute(Self::stages()).await?;
        let sink = tx.copy_in::<_, Bytes>(copy).await?;
        futures::pin_mut!(sink);
        sink.send(body).await?;
        let staged = sink.finish().await?;
        log::debug!("staged {} rows for {}", staged, Self::name());
        let merged = tx.execute(Self::merges(), params).await?;
        log::debug!("merged {} new rows into {}", merged, Self::name());
        Ok(merged)
    }
}

impl<T: Staged> Streamable for T {}
