use crate::enrich::*;
use crate::pg::*;
use crate::*;
use const_format::concatcp;
use tokio_postgres::Client;

/// Customer phone awaiting validation, with the region of its address.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Contact {
    pub customer_id: Id,
    pub phone: Option<String>,
    /// ISO 3166 alpha-2 code of the customer's country, when known.
    pub region: Option<String>,
}

/// Phone number in international format.
#[derive(Debug, Clone, PartialEq)]
pub struct PhonePatch {
    pub phone: String,
}

impl Record for Contact {
    type Patch = PhonePatch;
    const TARGET: Target = Target::PhoneVal;
    const MARKS_REJECTED: bool = true;
    fn id(&self) -> Id {
        self.customer_id
    }
}

#[async_trait::async_trait]
impl Store<Contact> for Client {
    async fn fetch(&self, after: Id) -> Result<Vec<Contact>> {
        #[rustfmt::skip]
        const SQL: &str = concatcp!(
            "SELECT    c.customer_id, ",
                      "c.phone, ",
                      "i.alpha2 ",
            "FROM      ", CUSTOMERS, " c ",
            "LEFT JOIN ", ADDRESSES, " a ON a.address_id = c.address_id ",
            "LEFT JOIN ", COUNTRIES, " i ON i.alpha3     = a.country_code ",
            "WHERE     c.customer_id > $1 ",
            "AND       c.phone_valid IS NULL ",
            "ORDER BY  c.customer_id"
        );
        Ok(self
            .query(SQL, &[&after])
            .await?
            .iter()
            .map(|row| Contact {
                customer_id: row.get::<_, i64>(0),
                phone: row.get(1),
                region: row.get::<_, Option<String>>(2).map(|c| c.trim().to_string()),
            })
            .collect())
    }
    async fn apply(&mut self, record: &Contact, patch: &PhonePatch) -> Result<u64> {
        #[rustfmt::skip]
        const SQL: &str = concatcp!(
            "UPDATE ", CUSTOMERS, " ",
            "SET    phone       = $2, ",
                   "phone_valid = TRUE ",
            "WHERE  customer_id = $1 ",
            "AND    phone_valid IS NULL"
        );
        let tx = self.transaction().await?;
        let n = tx.execute(SQL, &[&record.customer_id, &patch.phone]).await?;
        tx.commit().await?;
        Ok(n)
    }
    async fn attempt(&mut self, record: &Contact) -> Result<u64> {
        #[rustfmt::skip]
        const SQL: &str = concatcp!(
            "UPDATE ", CUSTOMERS, " ",
            "SET    phone_valid = FALSE ",
            "WHERE  customer_id = $1 ",
            "AND    phone_valid IS NULL"
        );
        let tx = self.transaction().await?;
        let n = tx.execute(SQL, &[&record.customer_id]).await?;
        tx.commit().await?;
        Ok(n)
    }
}
