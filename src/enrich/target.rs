use crate::pg::*;

/// Enrichment targets, each with its own watermark row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Target {
    /// Address geocoding, result in `addresses.score`.
    AddrGeocode,
    /// Phone validation, result in `customers.phone_valid`.
    PhoneVal,
}

impl Target {
    pub const fn all() -> [Self; 2] {
        [Self::AddrGeocode, Self::PhoneVal]
    }
    /// Key of the watermark row.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::AddrGeocode => "addr_geocode",
            Self::PhoneVal => "phone_val",
        }
    }
    /// Table holding the enrichable records.
    pub const fn table(&self) -> &'static str {
        match self {
            Self::AddrGeocode => ADDRESSES,
            Self::PhoneVal => CUSTOMERS,
        }
    }
    /// Primary key column of [`Self::table`].
    pub const fn key(&self) -> &'static str {
        match self {
            Self::AddrGeocode => "address_id",
            Self::PhoneVal => "customer_id",
        }
    }
    /// Result column; NULL means the record still needs processing.
    pub const fn result(&self) -> &'static str {
        match self {
            Self::AddrGeocode => "score",
            Self::PhoneVal => "phone_valid",
        }
    }
}

impl std::fmt::Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn targets_name_their_rows() {
        assert_eq!(Target::AddrGeocode.to_string(), "addr_geocode");
        assert_eq!(Target::PhoneVal.to_string(), "phone_val");
    }
    #[test]
    fn targets_point_at_result_columns() {
        assert_eq!(Target::AddrGeocode.table(), "addresses");
        assert_eq!(Target::PhoneVal.result(), "phone_valid");
    }
}
