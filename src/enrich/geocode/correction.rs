use crate::pg::*;
use crate::*;
use const_format::concatcp;
use regex::Regex;
use tokio_postgres::Client;

/// Known-bad spellings of one street and the name they stand for.
#[derive(Debug, Clone)]
pub struct Correction {
    pattern: Regex,
    canonical: &'static str,
}

impl Correction {
    pub fn new(pattern: &str, canonical: &'static str) -> Result<Self> {
        Regex::new(pattern)
            .map(|pattern| Self { pattern, canonical })
            .map_err(|e| Error::Configuration(format!("street pattern {}: {}", pattern, e)))
    }
    pub fn canonical(&self) -> &'static str {
        self.canonical
    }
    /// Canonical name for `street`, if the pattern matches and the two
    /// are close enough to be the same street.
    pub fn apply(&self, street: &str, floor: Similarity) -> Option<&'static str> {
        let street = street.trim();
        if street == self.canonical || !self.pattern.is_match(street) {
            return None;
        }
        let similarity = strsim::normalized_levenshtein(
            &street.to_lowercase(),
            &self.canonical.to_lowercase(),
        );
        (similarity >= floor).then_some(self.canonical)
    }
}

/// Street name fixups for one country's mis-encoded source strings.
#[derive(Debug, Clone)]
pub struct Corrections {
    country: &'static str,
    floor: Similarity,
    fixes: Vec<Correction>,
}

impl Corrections {
    /// The Swedish streets whose characters were lost in the CSV.
    pub fn swedish() -> Result<Self> {
        Ok(Self {
            country: CORRECTION_COUNTRY,
            floor: CORRECTION_SIMILARITY,
            fixes: vec![
                Correction::new(
                    r"(?i)^(?:Å|Ã…|A|\?|\x{FFFD})?kergatan\s+24$",
                    "Åkergatan 24",
                )?,
                Correction::new(
                    r"(?i)^Berguvsv(?:ä|Ã¤|a|\?|\x{FFFD}|„)gen\s+8$",
                    "Berguvsvägen 8",
                )?,
            ],
        })
    }
    pub fn country(&self) -> &'static str {
        self.country
    }
    /// Replacement for `street`, if any fix claims it.
    pub fn fix(&self, street: &str) -> Option<&'static str> {
        self.fixes.iter().find_map(|c| c.apply(street, self.floor))
    }
    /// Updates due for `streets`, restricted to this country.
    pub fn plan(&self, streets: &[Street]) -> Vec<(Id, &'static str)> {
        streets
            .iter()
            .filter(|s| s.country_code.as_deref().map(str::trim) == Some(self.country))
            .filter_map(|s| s.st_addr.as_deref().and_then(|st| self.fix(st)).map(|c| (s.address_id, c)))
            .collect()
    }
}

/// Street line of a stored address.
#[derive(Debug, Clone, PartialEq)]
pub struct Street {
    pub address_id: Id,
    pub country_code: Option<String>,
    pub st_addr: Option<String>,
}

/// Correct applies street corrections to stored addresses.
///
/// Every address of the country is considered on every run, whatever the
/// geocoding watermark says.
#[async_trait::async_trait]
pub trait Correct {
    async fn correct(&self, corrections: &Corrections) -> Result<u64>;
}

#[async_trait::async_trait]
impl Correct for Client {
    async fn correct(&self, corrections: &Corrections) -> Result<u64> {
        #[rustfmt::skip]
        const SELECT: &str = concatcp!(
            "SELECT   address_id, country_code, st_addr ",
            "FROM     ", ADDRESSES, " ",
            "WHERE    country_code = $1 ",
            "AND      st_addr IS NOT NULL ",
            "ORDER BY address_id"
        );
        #[rustfmt::skip]
        const UPDATE: &str = concatcp!(
            "UPDATE ", ADDRESSES, " ",
            "SET    st_addr    = $2 ",
            "WHERE  address_id = $1"
        );
        let streets = self
            .query(SELECT, &[&corrections.country()])
            .await?
            .iter()
            .map(|row| Street {
                address_id: row.get::<_, Id>(0),
                country_code: row.get(1),
                st_addr: row.get(2),
            })
            .collect::<Vec<_>>();
        let mut n = 0;
        for (id, canonical) in corrections.plan(&streets) {
            n += self.execute(UPDATE, &[&id, &canonical]).await?;
            log::info!("corrected street #{} to {:?}", id, canonical);
        }
        match n {
            0 => log::info!("no {} street names to correct", corrections.country()),
            n => log::info!("corrected {} {} street names", n, corrections.country()),
        }
        Ok(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mangled_streets_are_restored() {
        let fixes = Corrections::swedish().unwrap();
        assert_eq!(fixes.fix("Ã…kergatan 24"), Some("Åkergatan 24"));
        assert_eq!(fixes.fix("?kergatan 24"), Some("Åkergatan 24"));
        assert_eq!(fixes.fix("kergatan 24"), Some("Åkergatan 24"));
        assert_eq!(fixes.fix("Berguvsv\u{FFFD}gen 8"), Some("Berguvsvägen 8"));
        assert_eq!(fixes.fix("Berguvsv„gen  8"), Some("Berguvsvägen 8"));
    }
    #[test]
    fn canonical_streets_are_left_alone() {
        let fixes = Corrections::swedish().unwrap();
        assert_eq!(fixes.fix("Åkergatan 24"), None);
        assert_eq!(fixes.fix("Berguvsvägen 8"), None);
    }
    #[test]
    fn other_streets_do_not_match() {
        let fixes = Corrections::swedish().unwrap();
        assert_eq!(fixes.fix("Åkergatan 25"), None);
        assert_eq!(fixes.fix("Berguvsvägen 18"), None);
        assert_eq!(fixes.fix("Fauntleroy Circus"), None);
    }
    #[test]
    fn similarity_floor_bounds_matches() {
        let fix = Correction::new(r"^.*kergatan 24$", "Åkergatan 24").unwrap();
        assert_eq!(fix.apply("xxxxxkergatan 24", 0.8), None);
        assert_eq!(fix.apply("Akergatan 24", 0.8), Some("Åkergatan 24"));
    }
    fn street(id: Id, country: &str, st_addr: &str) -> Street {
        Street {
            address_id: id,
            country_code: Some(country.into()),
            st_addr: Some(st_addr.into()),
        }
    }

    #[test]
    fn plan_is_scoped_to_the_country() {
        let fixes = Corrections::swedish().unwrap();
        let streets = vec![
            street(3, "SWE", "Ã…kergatan 24"),
            street(4, "NOR", "Ã…kergatan 24"),
            street(5, "SWE", "Berguvsvägen 8"),
            street(9, "SWE", "Berguvsv?gen 8"),
        ];
        assert_eq!(fixes.plan(&streets), vec![(3, "Åkergatan 24"), (9, "Berguvsvägen 8")]);
    }
    #[test]
    fn plan_covers_every_row_regardless_of_key() {
        let fixes = Corrections::swedish().unwrap();
        let streets = vec![street(1, "SWE ", "?kergatan 24"), street(1_000_000, "SWE", "kergatan 24")];
        assert_eq!(fixes.plan(&streets).len(), 2);
    }
    #[test]
    fn plan_skips_missing_streets() {
        let fixes = Corrections::swedish().unwrap();
        let blank = Street { address_id: 2, country_code: Some("SWE".into()), st_addr: None };
        assert!(fixes.plan(&[blank]).is_empty());
    }
    #[test]
    fn corrections_target_sweden() {
        assert_eq!(Corrections::swedish().unwrap().country(), "SWE");
    }
}
