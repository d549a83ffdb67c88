use super::*;
use crate::*;
use std::time::Duration;

/// A row identified by an integer primary key whose enrichment result is
/// still NULL.
pub trait Record: Clone + Send + Sync + 'static {
    /// Fields written when the record is accepted.
    type Patch: Send + Sync;
    /// Watermark row that tracks this record type.
    const TARGET: Target;
    /// Whether a rejection writes a definite negative result.
    ///
    /// When false, a rejected record keeps its NULL result and is fetched
    /// again on a later run unless the watermark has moved past it.
    const MARKS_REJECTED: bool;
    fn id(&self) -> Id;
}

/// Store side of one enrichment target.
///
/// `fetch` is read-only. `apply` and `attempt` each run under their own
/// transaction and only touch the record while its result is still NULL.
#[async_trait::async_trait]
pub trait Store<R: Record>: Watermarks {
    /// Records above `after` with a NULL result, ascending by key.
    async fn fetch(&self, after: Id) -> Result<Vec<R>>;
    /// Writes an accepted patch. Returns rows changed (0 if already enriched).
    async fn apply(&mut self, record: &R, patch: &R::Patch) -> Result<u64>;
    /// Marks a rejected record as attempted. Returns rows changed.
    ///
    /// Only called when [`Record::MARKS_REJECTED`] holds.
    async fn attempt(&mut self, record: &R) -> Result<u64>;
}

/// Per-target enrichment logic.
#[async_trait::async_trait]
pub trait Enricher: Send + Sync {
    type Record: Record;
    async fn enrich(&self, record: &Self::Record) -> Outcome<<Self::Record as Record>::Patch>;
    /// Delay after each call.
    fn pause(&self) -> Duration {
        Duration::ZERO
    }
}
