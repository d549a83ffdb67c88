/// Result of enriching one record against an external service or library.
///
/// Expected failure modes never surface as errors: invalid input and
/// no-match become `Rejected`, network failures become `ServiceUnavailable`.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<P> {
    /// The service produced an acceptable result; apply the patch.
    Accepted(P),
    /// The service answered but the answer fails the acceptance policy.
    Rejected(String),
    /// The service could not be reached or answered garbage.
    ServiceUnavailable(String),
}

impl<P> Outcome<P> {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted(_))
    }
}

/// What happened to a fetched record during a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Disposition {
    /// Accepted and written.
    Updated,
    /// Rejected and marked as attempted.
    Marked,
    /// Rejected with nothing written; still eligible while above the watermark.
    Skipped,
    /// The service was unavailable; nothing written.
    Unavailable,
    /// The null guard matched nothing; another writer got there first.
    Raced,
    /// The record's own statement failed and was rolled back.
    Failed,
}

impl Disposition {
    pub const fn all() -> [Self; 6] {
        [
            Self::Updated,
            Self::Marked,
            Self::Skipped,
            Self::Unavailable,
            Self::Raced,
            Self::Failed,
        ]
    }
}

impl std::fmt::Display for Disposition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Updated => "updated",
            Self::Marked => "marked",
            Self::Skipped => "skipped",
            Self::Unavailable => "unavailable",
            Self::Raced => "raced",
            Self::Failed => "failed",
        };
        f.write_str(label)
    }
}
