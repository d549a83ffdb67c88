use crate::pg::*;
use const_format::concatcp;

/// Stage for [`COUNTRIES`].
#[rustfmt::skip]
pub const COUNTRY_STAGE: &str = "iso_country_codes_stage";

/// ISO 3166 country codes. Loaded from a CSV with header `alpha2,alpha3,name`.
pub struct Countries;

impl Schema for Countries {
    fn name() -> &'static str {
        COUNTRIES
    }
    fn creates() -> &'static str {
        concatcp!(
            "CREATE TABLE IF NOT EXISTS ",
            COUNTRIES,
            " (
                alpha3 CHAR(3) PRIMARY KEY,
                alpha2 CHAR(2) UNIQUE,
                name   TEXT NOT NULL
            );"
        )
    }
}

impl Staged for Countries {
    fn stages() -> &'static str {
        concatcp!(
            "CREATE TEMP TABLE ",
            COUNTRY_STAGE,
            " (LIKE ",
            COUNTRIES,
            ") ON COMMIT DROP;"
        )
    }
    fn copy() -> &'static str {
        concatcp!(
            "COPY ",
            COUNTRY_STAGE,
            " (alpha2, alpha3, name) FROM STDIN WITH (FORMAT csv, HEADER true)"
        )
    }
    fn merges() -> &'static str {
        concatcp!(
            "INSERT INTO ",
            COUNTRIES,
            " (alpha3, alpha2, name) ",
            "SELECT upper(alpha3), upper(alpha2), name FROM ",
            COUNTRY_STAGE,
            " ON CONFLICT DO NOTHING"
        )
    }
}
