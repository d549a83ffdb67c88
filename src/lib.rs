//! Batch pipeline for the order management database.
//!
//! Bootstraps the relational schema, bulk-loads the sales CSV through
//! staging tables, and enriches customer and address records with
//! third-party services behind a per-target high watermark.
//!
//! ## Modules
//!
//! - [`pg`] — Connectivity, table names, schema and COPY plumbing
//! - [`tables`] — Fixed table shapes and their DDL
//! - [`load`] — CSV staging, upsert and core table population
//! - [`bootstrap`] — Database creation and schema application
//! - [`enrich`] — Watermark-driven incremental enrichment
pub mod bootstrap;
pub mod config;
pub mod enrich;
pub mod load;
pub mod pg;
pub mod tables;

mod error;

pub use error::*;

// ============================================================================
// TYPE ALIASES
// ============================================================================
/// Primary key of an enrichable row.
pub type Id = i64;
/// Geocoder match confidence on a 0–100 scale.
pub type Score = f64;
/// Normalized string similarity in [0, 1].
pub type Similarity = f64;

// ============================================================================
// GEOCODING
// ============================================================================
/// Default ArcGIS World geocoding endpoint.
pub const GEOCODE_URL: &str =
    "https://geocode-api.arcgis.com/arcgis/rest/services/World/GeocodeServer/findAddressCandidates";
/// Minimum candidate score accepted as a match.
pub const GEOCODE_THRESHOLD: Score = 80.0;
/// Per-request timeout (seconds).
pub const GEOCODE_TIMEOUT: u64 = 10;
/// Fixed delay after every geocoding request (milliseconds).
pub const GEOCODE_PAUSE: u64 = 100;
/// Attribute fields requested from the geocoder.
pub const GEOCODE_FIELDS: &str = "StAddr,SubAddr,City,Region,Postal,CountryCode,Status";

// ============================================================================
// STREET CORRECTIONS
// ============================================================================
/// Country whose street names get the correction pass.
pub const CORRECTION_COUNTRY: &str = "SWE";
/// Minimum similarity between a matched street and its canonical name.
pub const CORRECTION_SIMILARITY: Similarity = 0.8;

// ============================================================================
// RUNTIME UTILITIES
// ============================================================================
/// Initialize dual logging (terminal + file) with timestamped log files.
/// Creates `logs/` directory and writes DEBUG level to file, INFO to terminal.
pub fn log() -> anyhow::Result<()> {
    std::fs::create_dir_all("logs")?;
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let time = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)?
        .as_secs();
    let file = simplelog::WriteLogger::new(
        log::LevelFilter::Debug,
        config.clone(),
        std::fs::File::create(format!("logs/{}.log", time))?,
    );
    let term = simplelog::TermLogger::new(
        log::LevelFilter::Info,
        config.clone(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    );
    simplelog::CombinedLogger::init(vec![term, file])?;
    Ok(())
}
