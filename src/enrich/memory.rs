//! In-memory store with the same contract as the database, for tests.
use super::*;
use crate::*;
use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::sync::Mutex;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;

/// Rows of one target plus its watermark table.
pub struct Memory<R: Record> {
    marks: Mutex<BTreeMap<Target, Id>>,
    advances: Mutex<Vec<Id>>,
    fetches: AtomicUsize,
    rows: Vec<R>,
    /// Rows whose result is no longer NULL.
    pub done: BTreeSet<Id>,
    /// Statements touching these rows fail with a recoverable error.
    pub broken: BTreeSet<Id>,
    /// Rows another writer enriches between fetch and update.
    pub racing: BTreeSet<Id>,
    /// Touching this row drops the connection.
    pub severed: Option<Id>,
    pub patched: Vec<(Id, R::Patch)>,
    pub marked: Vec<Id>,
}

impl<R: Record> Memory<R> {
    pub fn new(target: Target, last_id: Id, mut rows: Vec<R>) -> Self {
        rows.sort_by_key(R::id);
        Self {
            marks: Mutex::new(BTreeMap::from([(target, last_id)])),
            advances: Mutex::new(Vec::new()),
            fetches: AtomicUsize::new(0),
            rows,
            done: BTreeSet::new(),
            broken: BTreeSet::new(),
            racing: BTreeSet::new(),
            severed: None,
            patched: Vec::new(),
            marked: Vec::new(),
        }
    }
    pub fn mark(&self, target: Target) -> Option<Id> {
        self.marks.lock().unwrap().get(&target).copied()
    }
    pub fn advances(&self) -> Vec<Id> {
        self.advances.lock().unwrap().clone()
    }
    pub fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
    fn touch(&mut self, id: Id) -> Result<bool> {
        if self.severed == Some(id) {
            let lost = std::io::Error::from(std::io::ErrorKind::ConnectionReset);
            return Err(Error::Io(lost));
        }
        if self.broken.contains(&id) {
            return Err(Error::Malformed(format!("value too long for row {}", id)));
        }
        if self.racing.contains(&id) {
            self.done.insert(id);
        }
        Ok(self.done.insert(id))
    }
}

#[async_trait::async_trait]
impl<R: Record> Watermarks for Memory<R> {
    async fn get(&self, target: Target) -> Result<Watermark> {
        self.mark(target)
            .map(|last_id| Watermark {
                target,
                last_id,
                updated_at: chrono::Utc::now(),
            })
            .ok_or_else(|| Error::Configuration(format!("no watermark row for target {}", target)))
    }
    async fn advance(&self, target: Target, last_id: Id) -> Result<()> {
        self.marks.lock().unwrap().insert(target, last_id);
        self.advances.lock().unwrap().push(last_id);
        Ok(())
    }
}

#[async_trait::async_trait]
impl<R> Store<R> for Memory<R>
where
    R: Record,
    R::Patch: Clone,
{
    async fn fetch(&self, after: Id) -> Result<Vec<R>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .rows
            .iter()
            .filter(|r| r.id() > after)
            .filter(|r| !self.done.contains(&r.id()))
            .cloned()
            .collect())
    }
    async fn apply(&mut self, record: &R, patch: &R::Patch) -> Result<u64> {
        match self.touch(record.id())? {
            true => {
                self.patched.push((record.id(), patch.clone()));
                Ok(1)
            }
            false => Ok(0),
        }
    }
    async fn attempt(&mut self, record: &R) -> Result<u64> {
        match self.touch(record.id())? {
            true => {
                self.marked.push(record.id());
                Ok(1)
            }
            false => Ok(0),
        }
    }
}

/// Record that keeps its NULL result when rejected.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Probe(pub Id);

impl Record for Probe {
    type Patch = &'static str;
    const TARGET: Target = Target::AddrGeocode;
    const MARKS_REJECTED: bool = false;
    fn id(&self) -> Id {
        self.0
    }
}

/// Record that is marked attempted when rejected.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Flagged(pub Id);

impl Record for Flagged {
    type Patch = &'static str;
    const TARGET: Target = Target::PhoneVal;
    const MARKS_REJECTED: bool = true;
    fn id(&self) -> Id {
        self.0
    }
}

/// Enricher answering from a fixed table of outcomes.
pub struct Script<R: Record>(BTreeMap<Id, Outcome<R::Patch>>);

impl<R: Record> Script<R> {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }
    pub fn with(mut self, id: Id, outcome: Outcome<R::Patch>) -> Self {
        self.0.insert(id, outcome);
        self
    }
}

#[async_trait::async_trait]
impl<R> Enricher for Script<R>
where
    R: Record,
    R::Patch: Clone,
{
    type Record = R;
    async fn enrich(&self, record: &R) -> Outcome<R::Patch> {
        self.0
            .get(&record.id())
            .cloned()
            .unwrap_or_else(|| Outcome::Rejected("unscripted".into()))
    }
}
