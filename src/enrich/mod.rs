//! Watermark-driven incremental enrichment.
//!
//! Each target keeps a high watermark: the largest primary key already
//! attempted. A pass fetches pending records above it, asks an
//! [`Enricher`] for each one, commits every record on its own, and moves
//! the watermark once at the end.
//!
//! ## Core Types
//!
//! - [`Watermarks`] — Persisted cursor per target
//! - [`Store`] — Fetch, apply and mark records of one target
//! - [`Enricher`] — Per-target service call and acceptance policy
//! - [`Outcome`] — Accepted, rejected or service unavailable
//! - [`Driver`] — Row-level committer for one pass
//! - [`Check`] — Watermark and backlog status
//!
//! ## Targets
//!
//! - [`geocode`] — Address geocoding (rejections stay eligible)
//! - [`phone`] — Phone validation (rejections are marked)
pub mod geocode;
pub mod phone;

mod check;
mod driver;
mod outcome;
mod record;
mod target;
mod watermark;

#[cfg(test)]
pub(crate) mod memory;

pub use check::*;
pub use driver::*;
pub use outcome::*;
pub use record::*;
pub use target::*;
pub use watermark::*;
