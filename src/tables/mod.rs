//! Fixed table shapes of the order database.
//!
//! Each table is a marker type implementing [`Schema`](crate::pg::Schema),
//! and [`Staged`](crate::pg::Staged) where it is bulk-loaded. Statements
//! are built only from these fixed shapes.
mod country;
mod raw;
mod rfm;
mod sales;
mod watermark;

pub use country::*;
pub use raw::*;
pub use rfm::*;
pub use sales::*;
pub use watermark::*;

/// DDL for every table, in foreign-key dependency order.
pub fn ddl() -> Vec<&'static str> {
    use crate::pg::Schema;
    vec![
        Countries::creates(),
        RawOrders::creates(),
        Addresses::creates(),
        Customers::creates(),
        Products::creates(),
        Orders::creates(),
        WatermarkMeta::creates(),
        RfmRuns::creates(),
        RfmLabels::creates(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn ddl_is_idempotent() {
        for statement in ddl() {
            assert!(statement.contains("IF NOT EXISTS"), "{}", statement);
        }
    }
    #[test]
    fn referenced_tables_come_first() {
        let ddl = ddl();
        let position = |table: &str| {
            ddl.iter()
                .position(|s| s.contains(&format!("CREATE TABLE IF NOT EXISTS {} ", table)))
                .unwrap()
        };
        assert!(position(crate::pg::ADDRESSES) < position(crate::pg::CUSTOMERS));
        assert!(position(crate::pg::CUSTOMERS) < position(crate::pg::ORDERS));
        assert!(position(crate::pg::PRODUCTS) < position(crate::pg::ORDERS));
        assert!(position(crate::pg::RFM_RUNS) < position(crate::pg::RFM_LABELS));
    }
}
