use super::*;
use crate::*;
use std::collections::BTreeMap;

/// Row-level committer for one enrichment target.
///
/// One pass reads the watermark, fetches every pending record above it,
/// enriches and commits each record on its own, then advances the
/// watermark to the highest key fetched. A record that fails only costs
/// itself; a fatal error aborts the pass before the watermark is written.
pub struct Driver<'a, S, E> {
    store: &'a mut S,
    enricher: &'a E,
}

impl<'a, S, E> Driver<'a, S, E>
where
    E: Enricher,
    S: Store<E::Record>,
{
    pub fn new(store: &'a mut S, enricher: &'a E) -> Self {
        Self { store, enricher }
    }

    pub async fn run(mut self) -> Result<Summary> {
        let target = <E::Record as Record>::TARGET;
        let start = self.store.get(target).await?.last_id;
        let records = self.store.fetch(start).await?;
        let n = records.len();
        let mut summary = Summary::new(target, start, n);
        if records.is_empty() {
            log::info!("nothing to enrich for {} above {}, skipping", target, start);
            return Ok(summary);
        }
        log::info!("enriching {} records for {} above {}", n, target, start);
        let mut high = start;
        for (i, record) in records.iter().enumerate() {
            high = high.max(record.id());
            let disposition = self.commit(record).await?;
            log::info!("[{}/{}] {} #{} {}", i + 1, n, target, record.id(), disposition);
            summary.tally(disposition);
        }
        if high > start {
            self.store.advance(target, high).await?;
            summary.end = high;
            log::info!("advanced {} watermark {} → {}", target, start, high);
        }
        Ok(summary)
    }

    /// Enriches one record and writes its outcome.
    async fn commit(&mut self, record: &E::Record) -> Result<Disposition> {
        let outcome = self.enricher.enrich(record).await;
        let pause = self.enricher.pause();
        if !pause.is_zero() {
            tokio::time::sleep(pause).await;
        }
        let written = match outcome {
            Outcome::Accepted(ref patch) => self
                .store
                .apply(record, patch)
                .await
                .map(|n| if n > 0 { Disposition::Updated } else { Disposition::Raced }),
            Outcome::Rejected(reason) if <E::Record as Record>::MARKS_REJECTED => {
                log::debug!("#{} rejected: {}", record.id(), reason);
                self.store
                    .attempt(record)
                    .await
                    .map(|n| if n > 0 { Disposition::Marked } else { Disposition::Raced })
            }
            Outcome::Rejected(reason) => {
                log::debug!("#{} rejected: {}", record.id(), reason);
                return Ok(Disposition::Skipped);
            }
            Outcome::ServiceUnavailable(reason) => {
                log::warn!("#{} service unavailable: {}", record.id(), reason);
                return Ok(Disposition::Unavailable);
            }
        };
        match written {
            Ok(disposition) => Ok(disposition),
            Err(e) if e.is_fatal() => Err(e),
            Err(e) => {
                log::warn!("#{} rolled back: {}", record.id(), e);
                Ok(Disposition::Failed)
            }
        }
    }
}

/// Tally of one enrichment pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub target: Target,
    /// Watermark before the pass.
    pub start: Id,
    /// Watermark after the pass.
    pub end: Id,
    pub fetched: usize,
    counts: BTreeMap<Disposition, usize>,
}

impl Summary {
    fn new(target: Target, start: Id, fetched: usize) -> Self {
        Self {
            target,
            start,
            end: start,
            fetched,
            counts: BTreeMap::new(),
        }
    }
    fn tally(&mut self, disposition: Disposition) {
        *self.counts.entry(disposition).or_default() += 1;
    }
    pub fn count(&self, disposition: Disposition) -> usize {
        self.counts.get(&disposition).copied().unwrap_or(0)
    }
    pub fn advanced(&self) -> bool {
        self.end > self.start
    }
    pub fn report(&self) {
        log::info!("┌─────────────┬───────────────┐");
        log::info!("│ {:<11} │ {:>13} │", "target", self.target.as_str());
        log::info!("├─────────────┼───────────────┤");
        log::info!("│ {:<11} │ {:>13} │", "fetched", self.fetched);
        for disposition in Disposition::all() {
            log::info!("│ {:<11} │ {:>13} │", disposition, self.count(disposition));
        }
        log::info!("├─────────────┼───────────────┤");
        log::info!("│ {:<11} │ {:>13} │", "watermark", format!("{} → {}", self.start, self.end));
        log::info!("└─────────────┴───────────────┘");
    }
}
