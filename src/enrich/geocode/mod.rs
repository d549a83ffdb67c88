//! Address geocoding.
//!
//! Pending addresses are sent to the ArcGIS `findAddressCandidates`
//! endpoint one at a time. The best candidate is accepted when its score
//! reaches the threshold and it names a street; the normalized fields
//! then overwrite the stored ones along with the score. Rejected and
//! unreachable addresses keep a NULL score.
//!
//! Before each pass the Swedish street fixups in [`Corrections`] are
//! applied to every matching address.
//!
//! ## Core Types
//!
//! - [`Address`] — Record keyed by `address_id`, result in `score`
//! - [`Geocoder`] — HTTP enricher
//! - [`judge`] — Pure acceptance policy
//! - [`Corrections`] — Pattern plus similarity street fixups
mod address;
mod arcgis;
mod correction;

pub use address::*;
pub use arcgis::*;
pub use correction::*;

use super::*;
use crate::*;
use tokio_postgres::Client;

/// Corrects Swedish street names, then runs one geocoding pass.
pub async fn run(client: &mut Client, geocoder: &Geocoder) -> Result<Summary> {
    client.correct(&Corrections::swedish()?).await?;
    Driver::new(client, geocoder).run().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enrich::memory::*;

    fn address(id: Id) -> Address {
        Address {
            address_id: id,
            st_addr: Some(format!("{} Market St", id)),
            city: Some("San Francisco".into()),
            country_code: Some("USA".into()),
            ..Default::default()
        }
    }
    fn scored(score: Option<Score>, st_addr: &str) -> Candidate {
        Candidate {
            address: st_addr.into(),
            score,
            attributes: Attributes {
                st_addr: Some(st_addr.into()),
                city: Some("San Francisco".into()),
                region: Some("California".into()),
                country_code: Some("USA".into()),
                score,
                ..Default::default()
            },
        }
    }

    #[tokio::test]
    async fn accepted_addresses_are_patched_and_the_rest_wait() {
        let mut store = Memory::new(Target::AddrGeocode, 10, vec![address(11), address(12), address(13)]);
        let script = Script::<Address>::new()
            .with(11, judge(Some(scored(Some(95.0), "11 Market St")), GEOCODE_THRESHOLD))
            .with(12, judge(None, GEOCODE_THRESHOLD))
            .with(13, judge(Some(scored(Some(82.0), "13 Market St")), GEOCODE_THRESHOLD));
        let summary = Driver::new(&mut store, &script).run().await.unwrap();
        let patched = store.patched.iter().map(|(id, p)| (*id, p.score)).collect::<Vec<_>>();
        assert_eq!(patched, vec![(11, 95.0), (13, 82.0)]);
        assert_eq!(summary.count(Disposition::Skipped), 1);
        assert!(store.marked.is_empty());
        assert_eq!(store.mark(Target::AddrGeocode), Some(13));
        assert_eq!(store.fetch(0).await.unwrap(), vec![address(12)]);
        assert!(store.fetch(13).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn low_scores_never_touch_the_address() {
        let mut store = Memory::new(Target::AddrGeocode, 0, vec![address(1)]);
        let script = Script::<Address>::new()
            .with(1, judge(Some(scored(Some(79.0), "1 Market St")), GEOCODE_THRESHOLD));
        let summary = Driver::new(&mut store, &script).run().await.unwrap();
        assert!(store.patched.is_empty());
        assert_eq!(summary.count(Disposition::Skipped), 1);
        assert_eq!(summary.end, 1);
    }
}
