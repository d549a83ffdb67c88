use crate::enrich::*;
use crate::pg::*;
use crate::*;
use const_format::concatcp;
use tokio_postgres::Client;

/// Address awaiting geocoding.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Address {
    pub address_id: Id,
    pub st_addr: Option<String>,
    pub sub_addr: Option<String>,
    pub city: Option<String>,
    pub region: Option<String>,
    pub postal_code: Option<String>,
    pub country_code: Option<String>,
}

/// Normalized address from an accepted candidate. Empty subfields are unset.
#[derive(Debug, Clone, PartialEq)]
pub struct AddressPatch {
    pub st_addr: String,
    pub sub_addr: Option<String>,
    pub city: Option<String>,
    pub region: Option<String>,
    pub postal_code: Option<String>,
    pub country_code: Option<String>,
    pub score: Score,
}

impl Record for Address {
    type Patch = AddressPatch;
    const TARGET: Target = Target::AddrGeocode;
    const MARKS_REJECTED: bool = false;
    fn id(&self) -> Id {
        self.address_id
    }
}

#[async_trait::async_trait]
impl Store<Address> for Client {
    async fn fetch(&self, after: Id) -> Result<Vec<Address>> {
        #[rustfmt::skip]
        const SQL: &str = concatcp!(
            "SELECT   address_id, ",
                     "st_addr, ",
                     "sub_addr, ",
                     "city, ",
                     "region, ",
                     "postal_code, ",
                     "country_code ",
            "FROM     ", ADDRESSES, " ",
            "WHERE    address_id > $1 ",
            "AND      score IS NULL ",
            "ORDER BY address_id"
        );
        Ok(self
            .query(SQL, &[&after])
            .await?
            .iter()
            .map(|row| Address {
                address_id: row.get::<_, i64>(0),
                st_addr: row.get(1),
                sub_addr: row.get(2),
                city: row.get(3),
                region: row.get(4),
                postal_code: row.get(5),
                country_code: row.get::<_, Option<String>>(6).map(|c| c.trim().to_string()),
            })
            .collect())
    }
    async fn apply(&mut self, record: &Address, patch: &AddressPatch) -> Result<u64> {
        #[rustfmt::skip]
        const SQL: &str = concatcp!(
            "UPDATE ", ADDRESSES, " ",
            "SET    st_addr      = $2, ",
                   "sub_addr     = $3, ",
                   "city         = $4, ",
                   "region       = $5, ",
                   "postal_code  = $6, ",
                   "country_code = $7, ",
                   "score        = $8 ",
            "WHERE  address_id   = $1 ",
            "AND    score IS NULL"
        );
        let tx = self.transaction().await?;
        let n = tx
            .execute(
                SQL,
                &[
                    &record.address_id,
                    &patch.st_addr,
                    &patch.sub_addr,
                    &patch.city,
                    &patch.region,
                    &patch.postal_code,
                    &patch.country_code,
                    &patch.score,
                ],
            )
            .await?;
        tx.commit().await?;
        Ok(n)
    }
    async fn attempt(&mut self, _: &Address) -> Result<u64> {
        Ok(0)
    }
}
