use crate::pg::*;
use const_format::concatcp;

/// Postal addresses, one per customer. `score` is the geocoding result
/// and stays NULL until a candidate is accepted.
pub struct Addresses;

impl Schema for Addresses {
    fn name() -> &'static str {
        ADDRESSES
    }
    fn creates() -> &'static str {
        concatcp!(
            "CREATE TABLE IF NOT EXISTS ",
            ADDRESSES,
            " (
                address_id   BIGSERIAL PRIMARY KEY,
                source_key   TEXT UNIQUE NOT NULL,
                st_addr      TEXT,
                sub_addr     TEXT,
                city         TEXT,
                region       TEXT,
                postal_code  TEXT,
                country_code CHAR(3),
                score        DOUBLE PRECISION
            );
            CREATE INDEX IF NOT EXISTS idx_addresses_pending ON ",
            ADDRESSES,
            " (address_id) WHERE score IS NULL;"
        )
    }
}

/// Customers. `phone_valid` is the phone validation result and stays
/// NULL until the number has been checked once.
pub struct Customers;

impl Schema for Customers {
    fn name() -> &'static str {
        CUSTOMERS
    }
    fn creates() -> &'static str {
        concatcp!(
            "CREATE TABLE IF NOT EXISTS ",
            CUSTOMERS,
            " (
                customer_id   BIGSERIAL PRIMARY KEY,
                customer_name TEXT UNIQUE NOT NULL,
                contact_first TEXT,
                contact_last  TEXT,
                phone         TEXT,
                phone_valid   BOOLEAN,
                address_id    BIGINT REFERENCES ",
            ADDRESSES,
            " (address_id)
            );
            CREATE INDEX IF NOT EXISTS idx_customers_pending ON ",
            CUSTOMERS,
            " (customer_id) WHERE phone_valid IS NULL;"
        )
    }
}

/// Product catalogue.
pub struct Products;

impl Schema for Products {
    fn name() -> &'static str {
        PRODUCTS
    }
    fn creates() -> &'static str {
        concatcp!(
            "CREATE TABLE IF NOT EXISTS ",
            PRODUCTS,
            " (
                product_code TEXT PRIMARY KEY,
                product_line TEXT,
                msrp         NUMERIC(10, 2)
            );"
        )
    }
}

/// Order lines.
pub struct Orders;

impl Schema for Orders {
    fn name() -> &'static str {
        ORDERS
    }
    fn creates() -> &'static str {
        concatcp!(
            "CREATE TABLE IF NOT EXISTS ",
            ORDERS,
            " (
                order_number INTEGER NOT NULL,
                line_number  INTEGER NOT NULL,
                customer_id  BIGINT NOT NULL REFERENCES ",
            CUSTOMERS,
            " (customer_id),
                product_code TEXT NOT NULL REFERENCES ",
            PRODUCTS,
            " (product_code),
                quantity     INTEGER,
                price_each   NUMERIC(10, 2),
                sales        NUMERIC(12, 2),
                order_date   TIMESTAMP,
                status       TEXT,
                deal_size    TEXT,
                PRIMARY KEY (order_number, line_number)
            );"
        )
    }
}
