use crate::pg::*;
use const_format::concatcp;

/// Stage for [`RFM_LABELS`].
#[rustfmt::skip]
pub const RFM_STAGE: &str = "rfm_labels_stage";

/// One registration per RFM label load, with the analysed date window.
pub struct RfmRuns;

impl Schema for RfmRuns {
    fn name() -> &'static str {
        RFM_RUNS
    }
    fn creates() -> &'static str {
        concatcp!(
            "CREATE TABLE IF NOT EXISTS ",
            RFM_RUNS,
            " (
                run_id     BIGSERIAL PRIMARY KEY,
                start_date DATE NOT NULL,
                end_date   DATE NOT NULL,
                loaded_at  TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                CHECK (start_date <= end_date)
            );"
        )
    }
}

/// Recency/frequency/monetary scores and segment per customer and run.
///
/// The merge binds the run id as `$1`.
pub struct RfmLabels;

impl Schema for RfmLabels {
    fn name() -> &'static str {
        RFM_LABELS
    }
    fn creates() -> &'static str {
        concatcp!(
            "CREATE TABLE IF NOT EXISTS ",
            RFM_LABELS,
            " (
                run_id      BIGINT NOT NULL REFERENCES ",
            RFM_RUNS,
            " (run_id),
                customer_id BIGINT NOT NULL REFERENCES ",
            CUSTOMERS,
            " (customer_id),
                recency     INTEGER,
                frequency   INTEGER,
                monetary    NUMERIC(12, 2),
                r_score     SMALLINT,
                f_score     SMALLINT,
                m_score     SMALLINT,
                segment     TEXT,
                PRIMARY KEY (run_id, customer_id)
            );"
        )
    }
}

impl Staged for RfmLabels {
    fn stages() -> &'static str {
        concatcp!(
            "CREATE TEMP TABLE ",
            RFM_STAGE,
            " (
                customer_name TEXT,
                recency       INTEGER,
                frequency     INTEGER,
                monetary      NUMERIC(12, 2),
                r_score       SMALLINT,
                f_score       SMALLINT,
                m_score       SMALLINT,
                segment       TEXT
            ) ON COMMIT DROP;"
        )
    }
    fn copy() -> &'static str {
        concatcp!(
            "COPY ",
            RFM_STAGE,
            " (customer_name, recency, frequency, monetary, r_score, f_score, m_score, segment) ",
            "FROM STDIN WITH (FORMAT csv, HEADER true)"
        )
    }
    #[rustfmt::skip]
    fn merges() -> &'static str {
        concatcp!(
            "INSERT INTO ", RFM_LABELS, " (run_id, customer_id, recency, frequency, monetary, r_score, f_score, m_score, segment) ",
            "SELECT      $1::BIGINT, c.customer_id, s.recency, s.frequency, s.monetary, s.r_score, s.f_score, s.m_score, s.segment ",
            "FROM        ", RFM_STAGE, " s ",
            "JOIN        ", CUSTOMERS, " c ON c.customer_name = s.customer_name ",
            "ON CONFLICT (run_id, customer_id) DO NOTHING"
        )
    }
}
