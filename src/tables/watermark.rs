use crate::pg::*;
use const_format::concatcp;

/// One cursor row per enrichment target.
///
/// Rows are seeded here at bootstrap; the enrichment loop only reads and
/// advances them, and treats a missing row as a configuration error.
pub struct WatermarkMeta;

impl Schema for WatermarkMeta {
    fn name() -> &'static str {
        WATERMARK
    }
    fn creates() -> &'static str {
        concatcp!(
            "CREATE TABLE IF NOT EXISTS ",
            WATERMARK,
            " (
                target     TEXT PRIMARY KEY,
                last_id    BIGINT NOT NULL DEFAULT 0,
                updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            );
            INSERT INTO ",
            WATERMARK,
            " (target)
            VALUES ('addr_geocode'), ('phone_val')
            ON CONFLICT (target) DO NOTHING;"
        )
    }
}
