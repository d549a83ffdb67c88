use crate::pg::*;
use const_format::concatcp;

/// Population of one core table from [`RAW_ORDERS`].
///
/// Every step inserts with `ON CONFLICT DO NOTHING` and leaves the
/// enrichment results NULL, so promotion can be repeated after each load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Promotion {
    Products,
    Addresses,
    Customers,
    Orders,
}

impl Promotion {
    /// Steps in foreign-key dependency order.
    pub const fn all() -> [Self; 4] {
        [Self::Products, Self::Addresses, Self::Customers, Self::Orders]
    }
    pub const fn table(&self) -> &'static str {
        match self {
            Self::Products => PRODUCTS,
            Self::Addresses => ADDRESSES,
            Self::Customers => CUSTOMERS,
            Self::Orders => ORDERS,
        }
    }
    #[rustfmt::skip]
    pub fn sql(&self) -> &'static str {
        match self {
            Self::Products => concatcp!(
                "INSERT INTO ", PRODUCTS, " (product_code, product_line, msrp) ",
                "SELECT DISTINCT ON (r.productcode) ",
                       "r.productcode, ",
                       "r.productline, ",
                       "NULLIF(r.msrp, '')::NUMERIC ",
                "FROM     ", RAW_ORDERS, " r ",
                "WHERE    r.productcode IS NOT NULL ",
                "ORDER BY r.productcode, r.ordernumber ",
                "ON CONFLICT (product_code) DO NOTHING"
            ),
            Self::Addresses => concatcp!(
                "INSERT INTO ", ADDRESSES, " (source_key, st_addr, sub_addr, city, region, postal_code, country_code) ",
                "SELECT DISTINCT ON (r.customername) ",
                       "r.customername, ",
                       "NULLIF(r.addressline1, ''), ",
                       "NULLIF(r.addressline2, ''), ",
                       "NULLIF(r.city, ''), ",
                       "NULLIF(r.state, ''), ",
                       "NULLIF(r.postalcode, ''), ",
                       "i.alpha3 ",
                "FROM      ", RAW_ORDERS, " r ",
                "LEFT JOIN ", COUNTRIES, " i ",
                       "ON upper(i.name) = upper(trim(r.country)) ",
                       "OR i.alpha3      = upper(trim(r.country)) ",
                       "OR i.alpha2      = upper(trim(r.country)) ",
                "WHERE     r.customername IS NOT NULL ",
                "ORDER BY  r.customername, r.ordernumber, i.alpha3 ",
                "ON CONFLICT (source_key) DO NOTHING"
            ),
            Self::Customers => concatcp!(
                "INSERT INTO ", CUSTOMERS, " (customer_name, contact_first, contact_last, phone, address_id) ",
                "SELECT DISTINCT ON (r.customername) ",
                       "r.customername, ",
                       "r.contactfirstname, ",
                       "r.contactlastname, ",
                       "NULLIF(r.phone, ''), ",
                       "a.address_id ",
                "FROM     ", RAW_ORDERS, " r ",
                "JOIN     ", ADDRESSES, " a ON a.source_key = r.customername ",
                "ORDER BY r.customername, r.ordernumber ",
                "ON CONFLICT (customer_name) DO NOTHING"
            ),
            Self::Orders => concatcp!(
                "INSERT INTO ", ORDERS, " (order_number, line_number, customer_id, product_code, quantity, price_each, sales, order_date, status, deal_size) ",
                "SELECT r.ordernumber, ",
                       "r.orderlinenumber, ",
                       "c.customer_id, ",
                       "r.productcode, ",
                       "NULLIF(r.quantityordered, '')::INTEGER, ",
                       "NULLIF(r.priceeach, '')::NUMERIC, ",
                       "NULLIF(r.sales, '')::NUMERIC, ",
                       "to_timestamp(r.orderdate, 'MM/DD/YYYY HH24:MI')::TIMESTAMP, ",
                       "r.status, ",
                       "r.dealsize ",
                "FROM   ", RAW_ORDERS, " r ",
                "JOIN   ", CUSTOMERS, " c ON c.customer_name = r.customername ",
                "JOIN   ", PRODUCTS, " p ON p.product_code = r.productcode ",
                "ON CONFLICT (order_number, line_number) DO NOTHING"
            ),
        }
    }
}
