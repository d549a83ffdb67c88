use super::*;
use crate::pg::*;
use crate::*;
use chrono::DateTime;
use chrono::Utc;
use const_format::concatcp;
use tokio_postgres::Client;

/// Last primary key attempted for a target.
#[derive(Debug, Clone, PartialEq)]
pub struct Watermark {
    pub target: Target,
    pub last_id: Id,
    pub updated_at: DateTime<Utc>,
}

/// Persisted cursor per enrichment target.
///
/// The row must already exist; a missing row is a configuration error.
#[async_trait::async_trait]
pub trait Watermarks: Send + Sync {
    /// Reads the cursor for `target`.
    async fn get(&self, target: Target) -> Result<Watermark>;
    /// Overwrites the cursor for `target`.
    ///
    /// Callers only pass values greater than the current one, once per run.
    async fn advance(&self, target: Target, last_id: Id) -> Result<()>;
}

#[async_trait::async_trait]
impl Watermarks for Client {
    async fn get(&self, target: Target) -> Result<Watermark> {
        #[rustfmt::skip]
        const SQL: &str = concatcp!(
            "SELECT last_id, ",
                   "updated_at ",
            "FROM   ", WATERMARK, " ",
            "WHERE  target = $1"
        );
        self.query_opt(SQL, &[&target.as_str()])
            .await?
            .map(|row| Watermark {
                target,
                last_id: row.get::<_, i64>(0),
                updated_at: row.get::<_, DateTime<Utc>>(1),
            })
            .ok_or_else(|| {
                Error::Configuration(format!("no watermark row for target {}", target))
            })
    }
    async fn advance(&self, target: Target, last_id: Id) -> Result<()> {
        #[rustfmt::skip]
        const SQL: &str = concatcp!(
            "UPDATE ", WATERMARK, " ",
            "SET    last_id    = $2, ",
                   "updated_at = NOW() ",
            "WHERE  target     = $1"
        );
        match self.execute(SQL, &[&target.as_str(), &last_id]).await? {
            0 => Err(Error::Configuration(format!(
                "no watermark row for target {}",
                target
            ))),
            _ => Ok(()),
        }
    }
}
