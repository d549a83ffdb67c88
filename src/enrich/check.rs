use super::*;
use crate::pg::*;
use crate::*;
use const_format::concatcp;
use tokio_postgres::Client;

/// Pending records of a target relative to its watermark.
#[derive(Debug, Clone, PartialEq)]
pub struct Backlog {
    pub watermark: Watermark,
    /// Pending records above the watermark; the next pass fetches these.
    pub ahead: i64,
    /// Pending records at or below the watermark; no pass will fetch these.
    pub behind: i64,
}

/// Check defines status queries for enrichment targets.
#[async_trait::async_trait]
pub trait Check: Watermarks {
    async fn backlog(&self, target: Target) -> Result<Backlog>;
    async fn status(&self, target: Target) -> Result<()> {
        let backlog = self.backlog(target).await?;
        let updated = backlog.watermark.updated_at.format("%Y-%m-%d %H:%M").to_string();
        log::info!("┌─────────────┬──────────────────┐");
        log::info!("│ {:<11} │ {:>16} │", "target", target.as_str());
        log::info!("├─────────────┼──────────────────┤");
        log::info!("│ {:<11} │ {:>16} │", "watermark", backlog.watermark.last_id);
        log::info!("│ {:<11} │ {:>16} │", "updated", updated);
        log::info!("│ {:<11} │ {:>16} │", "pending", backlog.ahead);
        log::info!("│ {:<11} │ {:>16} │", "passed over", backlog.behind);
        log::info!("└─────────────┴──────────────────┘");
        Ok(())
    }
}

/// Pending counts above and at-or-below the watermark bound as `$1`.
#[rustfmt::skip]
pub fn pending(target: Target) -> &'static str {
    match target {
        Target::AddrGeocode => concatcp!(
            "SELECT COUNT(*) FILTER (WHERE address_id >  $1), ",
                   "COUNT(*) FILTER (WHERE address_id <= $1) ",
            "FROM   ", ADDRESSES, " ",
            "WHERE  score IS NULL"
        ),
        Target::PhoneVal => concatcp!(
            "SELECT COUNT(*) FILTER (WHERE customer_id >  $1), ",
                   "COUNT(*) FILTER (WHERE customer_id <= $1) ",
            "FROM   ", CUSTOMERS, " ",
            "WHERE  phone_valid IS NULL"
        ),
    }
}

#[async_trait::async_trait]
impl Check for Client {
    async fn backlog(&self, target: Target) -> Result<Backlog> {
        let watermark = self.get(target).await?;
        let row = self.query_one(pending(target), &[&watermark.last_id]).await?;
        Ok(Backlog {
            ahead: row.get::<_, i64>(0),
            behind: row.get::<_, i64>(1),
            watermark,
        })
    }
}
