/// Failures that can stop a batch step.
///
/// Service-side failures of a single record (timeouts, no match, bad
/// phone numbers) are not errors: they are reported through
/// [`Outcome`](crate::enrich::Outcome) so one record never aborts a run.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Missing watermark row, bad connection settings, missing credentials.
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("database error: {0}")]
    Database(#[from] tokio_postgres::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    /// Input files whose shape does not match the fixed table layout.
    #[error("malformed input: {0}")]
    Malformed(String),
}

impl Error {
    /// Whether the run must abort rather than skip the current record.
    ///
    /// A lost connection is fatal; any other database error is scoped to
    /// the statement that raised it.
    pub fn is_fatal(&self) -> bool {
        match self {
            Self::Database(e) => e.is_closed(),
            Self::Configuration(_) | Self::Io(_) => true,
            Self::Json(_) | Self::Malformed(_) => false,
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
