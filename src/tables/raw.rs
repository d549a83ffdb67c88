use crate::pg::*;
use crate::*;
use const_format::concatcp;

/// Columns of the sales CSV, as stored in [`RAW_ORDERS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RawColumn {
    OrderNumber,
    QuantityOrdered,
    PriceEach,
    OrderLineNumber,
    Sales,
    OrderDate,
    Status,
    QtrId,
    MonthId,
    YearId,
    ProductLine,
    Msrp,
    ProductCode,
    CustomerName,
    Phone,
    AddressLine1,
    AddressLine2,
    City,
    State,
    PostalCode,
    Country,
    Territory,
    ContactLastName,
    ContactFirstName,
    DealSize,
}

impl RawColumn {
    #[rustfmt::skip]
    pub const fn all() -> [Self; 25] {
        use RawColumn::*;
        [
            OrderNumber, QuantityOrdered, PriceEach, OrderLineNumber, Sales,
            OrderDate, Status, QtrId, MonthId, YearId,
            ProductLine, Msrp, ProductCode, CustomerName, Phone,
            AddressLine1, AddressLine2, City, State, PostalCode,
            Country, Territory, ContactLastName, ContactFirstName, DealSize,
        ]
    }
    /// Column identifier in the database.
    #[rustfmt::skip]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::OrderNumber      => "ordernumber",
            Self::QuantityOrdered  => "quantityordered",
            Self::PriceEach        => "priceeach",
            Self::OrderLineNumber  => "orderlinenumber",
            Self::Sales            => "sales",
            Self::OrderDate        => "orderdate",
            Self::Status           => "status",
            Self::QtrId            => "qtr_id",
            Self::MonthId          => "month_id",
            Self::YearId           => "year_id",
            Self::ProductLine      => "productline",
            Self::Msrp             => "msrp",
            Self::ProductCode      => "productcode",
            Self::CustomerName     => "customername",
            Self::Phone            => "phone",
            Self::AddressLine1     => "addressline1",
            Self::AddressLine2     => "addressline2",
            Self::City             => "city",
            Self::State            => "state",
            Self::PostalCode       => "postalcode",
            Self::Country          => "country",
            Self::Territory        => "territory",
            Self::ContactLastName  => "contactlastname",
            Self::ContactFirstName => "contactfirstname",
            Self::DealSize         => "dealsize",
        }
    }
}

impl std::str::FromStr for RawColumn {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self> {
        let name = s
            .trim()
            .trim_start_matches('\u{feff}')
            .trim_matches('"')
            .to_lowercase();
        Self::all()
            .into_iter()
            .find(|c| c.name() == name)
            .ok_or_else(|| Error::Malformed(format!("unknown sales column {:?}", s)))
    }
}

/// Column order of a sales CSV file, taken from its header line.
#[derive(Debug, Clone, PartialEq)]
pub struct Header(Vec<RawColumn>);

impl Header {
    pub fn columns(&self) -> &[RawColumn] {
        &self.0
    }
    /// COPY command loading the file body into the stage in header order.
    pub fn copy(&self) -> String {
        format!(
            "COPY {} ({}) FROM STDIN WITH (FORMAT csv, ENCODING 'LATIN1')",
            RAW_STAGE,
            self.0
                .iter()
                .map(RawColumn::name)
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}

impl TryFrom<&str> for Header {
    type Error = Error;
    fn try_from(line: &str) -> Result<Self> {
        let columns = line
            .trim_end_matches(['\r', '\n'])
            .split(',')
            .map(str::parse::<RawColumn>)
            .collect::<Result<Vec<_>>>()?;
        let mut seen = columns.clone();
        seen.sort();
        if let Some(w) = seen.windows(2).find(|w| w[0] == w[1]) {
            return Err(Error::Malformed(format!(
                "duplicated sales column {}",
                w[0].name()
            )));
        }
        for key in [RawColumn::OrderNumber, RawColumn::OrderLineNumber] {
            if !columns.contains(&key) {
                return Err(Error::Malformed(format!(
                    "sales header lacks key column {}",
                    key.name()
                )));
            }
        }
        Ok(Self(columns))
    }
}

/// Stage for [`RAW_ORDERS`].
#[rustfmt::skip]
pub const RAW_STAGE: &str = "raw_orders_stage";

#[rustfmt::skip]
const RAW_COLUMNS: &str = concatcp!(
    "ordernumber, quantityordered, priceeach, orderlinenumber, sales, ",
    "orderdate, status, qtr_id, month_id, year_id, ",
    "productline, msrp, productcode, customername, phone, ",
    "addressline1, addressline2, city, state, postalcode, ",
    "country, territory, contactlastname, contactfirstname, dealsize"
);

/// The sales CSV as delivered, one row per order line.
pub struct RawOrders;

impl Schema for RawOrders {
    fn name() -> &'static str {
        RAW_ORDERS
    }
    fn creates() -> &'static str {
        concatcp!(
            "CREATE TABLE IF NOT EXISTS ",
            RAW_ORDERS,
            " (
                ordernumber      INTEGER NOT NULL,
                quantityordered  TEXT,
                priceeach        TEXT,
                orderlinenumber  INTEGER NOT NULL,
                sales            TEXT,
                orderdate        TEXT,
                status           TEXT,
                qtr_id           TEXT,
                month_id         TEXT,
                year_id          TEXT,
                productline      TEXT,
                msrp             TEXT,
                productcode      TEXT,
                customername     TEXT,
                phone            TEXT,
                addressline1     TEXT,
                addressline2     TEXT,
                city             TEXT,
                state            TEXT,
                postalcode       TEXT,
                country          TEXT,
                territory        TEXT,
                contactlastname  TEXT,
                contactfirstname TEXT,
                dealsize         TEXT,
                PRIMARY KEY (ordernumber, orderlinenumber)
            );"
        )
    }
}

impl Staged for RawOrders {
    fn stages() -> &'static str {
        concatcp!(
            "CREATE TEMP TABLE ",
            RAW_STAGE,
            " (LIKE ",
            RAW_ORDERS,
            ") ON COMMIT DROP;"
        )
    }
    fn copy() -> &'static str {
        concatcp!(
            "COPY ",
            RAW_STAGE,
            " (",
            RAW_COLUMNS,
            ") FROM STDIN WITH (FORMAT csv, ENCODING 'LATIN1')"
        )
    }
    fn merges() -> &'static str {
        concatcp!(
            "INSERT INTO ",
            RAW_ORDERS,
            " (",
            RAW_COLUMNS,
            ") SELECT ",
            RAW_COLUMNS,
            " FROM ",
            RAW_STAGE,
            " ON CONFLICT (ordernumber, orderlinenumber) DO NOTHING"
        )
    }
}
