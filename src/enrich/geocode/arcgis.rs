use super::*;
use crate::config::Geocoding;
use crate::enrich::*;
use crate::*;
use serde::Deserialize;
use serde::Serialize;
use std::time::Duration;

/// Query parameters of a `findAddressCandidates` request.
/// Blank address fields are left out of the request.
#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Query<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address2: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country_code: Option<&'a str>,
    pub f: &'static str,
    pub token: &'a str,
    pub max_locations: u8,
    pub for_storage: &'static str,
    pub lang_code: &'static str,
    pub out_fields: &'static str,
}

impl<'a> Query<'a> {
    pub fn new(address: &'a Address, token: &'a str) -> Self {
        fn filled(field: &Option<String>) -> Option<&str> {
            field.as_deref().map(str::trim).filter(|s| !s.is_empty())
        }
        Self {
            address: filled(&address.st_addr),
            address2: filled(&address.sub_addr),
            city: filled(&address.city),
            region: filled(&address.region),
            postal: filled(&address.postal_code),
            country_code: filled(&address.country_code),
            f: "pjson",
            token,
            max_locations: 1,
            for_storage: "false",
            lang_code: "ENG",
            out_fields: GEOCODE_FIELDS,
        }
    }
}

/// Body of a geocoding response. Service faults arrive as `error` with
/// HTTP status 200.
#[derive(Debug, Deserialize)]
pub struct Response {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    pub error: Option<Fault>,
}

#[derive(Debug, Deserialize)]
pub struct Fault {
    #[serde(default)]
    pub code: i64,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub address: String,
    pub score: Option<Score>,
    #[serde(default)]
    pub attributes: Attributes,
}

/// Normalized address fields of a candidate.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Attributes {
    #[serde(rename = "StAddr")]
    pub st_addr: Option<String>,
    #[serde(rename = "SubAddr")]
    pub sub_addr: Option<String>,
    #[serde(rename = "City")]
    pub city: Option<String>,
    #[serde(rename = "Region")]
    pub region: Option<String>,
    #[serde(rename = "Postal")]
    pub postal: Option<String>,
    #[serde(rename = "CountryCode")]
    pub country_code: Option<String>,
    #[serde(rename = "Status")]
    pub status: Option<String>,
    #[serde(rename = "Score")]
    pub score: Option<Score>,
}

/// Acceptance policy for the best candidate.
///
/// Accepts when the score is at or above `threshold` and the candidate
/// carries a street address. Every returned subfield overwrites the
/// stored one; empty strings become unset.
pub fn judge(candidate: Option<Candidate>, threshold: Score) -> Outcome<AddressPatch> {
    fn unset(field: Option<String>) -> Option<String> {
        field
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    }
    let Some(candidate) = candidate else {
        return Outcome::Rejected("no candidate".into());
    };
    let Some(score) = candidate.attributes.score.or(candidate.score) else {
        return Outcome::Rejected("candidate without score".into());
    };
    if score < threshold {
        return Outcome::Rejected(format!("score {} below {}", score, threshold));
    }
    let attributes = candidate.attributes;
    match unset(attributes.st_addr) {
        None => Outcome::Rejected("candidate without street address".into()),
        Some(st_addr) => Outcome::Accepted(AddressPatch {
            st_addr,
            sub_addr: unset(attributes.sub_addr),
            city: unset(attributes.city),
            region: unset(attributes.region),
            postal_code: unset(attributes.postal),
            country_code: unset(attributes.country_code),
            score,
        }),
    }
}

/// ArcGIS `findAddressCandidates` client.
pub struct Geocoder {
    http: reqwest::Client,
    url: String,
    token: String,
    threshold: Score,
    pause: Duration,
}

impl Geocoder {
    pub fn new(settings: &Geocoding) -> Result<Self> {
        let token = settings.token()?.to_string();
        let http = reqwest::ClientBuilder::new()
            .timeout(settings.timeout())
            .build()
            .map_err(|e| Error::Configuration(format!("http client: {}", e)))?;
        Ok(Self {
            http,
            url: settings.url.clone(),
            token,
            threshold: settings.threshold,
            pause: settings.pause(),
        })
    }

    /// Best candidate for `address`, or why the service gave none.
    async fn candidate(&self, address: &Address) -> Result<Option<Candidate>, String> {
        let query = Query::new(address, &self.token);
        log::debug!(
            "geocoding #{}: {:?}",
            address.address_id,
            Query::new(address, "***")
        );
        let response = self
            .http
            .get(&self.url)
            .query(&query)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| format!("request failed: {}", e.without_url()))?
            .json::<Response>()
            .await
            .map_err(|e| format!("malformed response: {}", e.without_url()))?;
        match response.error {
            Some(fault) => Err(format!("geocoder fault {}: {}", fault.code, fault.message)),
            None => Ok(response.candidates.into_iter().next()),
        }
    }
}

#[async_trait::async_trait]
impl Enricher for Geocoder {
    type Record = Address;
    async fn enrich(&self, address: &Address) -> Outcome<AddressPatch> {
        match self.candidate(address).await {
            Ok(candidate) => judge(candidate, self.threshold),
            Err(reason) => Outcome::ServiceUnavailable(reason),
        }
    }
    fn pause(&self) -> Duration {
        self.pause
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::AsyncReadExt;
    use tokio::io::AsyncWriteExt;
    use tokio::net::TcpListener;

    const TOKEN: &str = "SUPERSECRET";

    /// Serves one connection with `reply`, or holds it open unanswered.
    async fn serve(reply: Option<String>) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}/findAddressCandidates", listener.local_addr().unwrap());
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = vec![0u8; 8192];
            let _ = socket.read(&mut request).await;
            match reply {
                Some(reply) => {
                    let _ = socket.write_all(reply.as_bytes()).await;
                    let _ = socket.shutdown().await;
                }
                None => tokio::time::sleep(Duration::from_secs(10)).await,
            }
        });
        url
    }
    fn http(status: &str, body: &str) -> Option<String> {
        Some(format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        ))
    }
    fn geocoder(url: String) -> Geocoder {
        Geocoder::new(&Geocoding {
            token: Some(TOKEN.into()),
            url,
            threshold: GEOCODE_THRESHOLD,
            timeout_secs: 1,
            pause_ms: 0,
        })
        .unwrap()
    }
    fn main_street() -> Address {
        Address {
            address_id: 14,
            st_addr: Some("1 Main".into()),
            city: Some("Springfield".into()),
            ..Default::default()
        }
    }
    async fn unavailable(reply: Option<String>) -> String {
        let outcome = geocoder(serve(reply).await).enrich(&main_street()).await;
        match outcome {
            Outcome::ServiceUnavailable(reason) => reason,
            other => panic!("expected service unavailable, got {:?}", other),
        }
    }

    fn candidate(score: Option<Score>, st_addr: &str) -> Candidate {
        serde_json::from_value(serde_json::json!({
            "address": "1 Main St, Springfield",
            "score": score,
            "attributes": {
                "StAddr": st_addr,
                "SubAddr": "",
                "City": "Springfield",
                "Region": "Illinois",
                "Postal": "62701",
                "CountryCode": "USA",
                "Status": "M",
                "Score": score,
            }
        }))
        .unwrap()
    }

    #[test]
    fn query_drops_blank_fields() {
        let address = Address {
            address_id: 11,
            st_addr: Some("54, rue Royale".into()),
            sub_addr: Some("  ".into()),
            city: Some("Nantes".into()),
            postal_code: Some("44000".into()),
            country_code: Some("FRA".into()),
            ..Default::default()
        };
        let json = serde_json::to_value(Query::new(&address, "secret")).unwrap();
        let object = json.as_object().unwrap();
        assert_eq!(object["address"], "54, rue Royale");
        assert_eq!(object["countryCode"], "FRA");
        assert_eq!(object["maxLocations"], 1);
        assert_eq!(object["forStorage"], "false");
        assert_eq!(object["langCode"], "ENG");
        assert_eq!(object["f"], "pjson");
        assert_eq!(object["outFields"], GEOCODE_FIELDS);
        assert!(!object.contains_key("address2"));
        assert!(!object.contains_key("region"));
    }
    #[test]
    fn high_score_is_accepted() {
        let outcome = judge(Some(candidate(Some(95.0), "1 Main St")), GEOCODE_THRESHOLD);
        let Outcome::Accepted(patch) = outcome else {
            panic!("expected acceptance, got {:?}", outcome);
        };
        assert_eq!(patch.st_addr, "1 Main St");
        assert_eq!(patch.score, 95.0);
        assert_eq!(patch.country_code.as_deref(), Some("USA"));
    }
    #[test]
    fn empty_subfields_become_unset() {
        let Outcome::Accepted(patch) = judge(Some(candidate(Some(90.0), "1 Main St")), 80.0) else {
            panic!("expected acceptance");
        };
        assert_eq!(patch.sub_addr, None);
    }
    #[test]
    fn threshold_is_inclusive() {
        assert!(judge(Some(candidate(Some(80.0), "1 Main St")), 80.0).is_accepted());
        assert!(!judge(Some(candidate(Some(79.9), "1 Main St")), 80.0).is_accepted());
    }
    #[test]
    fn missing_street_is_rejected() {
        let outcome = judge(Some(candidate(Some(99.0), "")), 80.0);
        assert!(matches!(outcome, Outcome::Rejected(_)));
    }
    #[test]
    fn no_candidate_is_rejected() {
        assert_eq!(judge(None, 80.0), Outcome::Rejected("no candidate".into()));
    }
    #[test]
    fn missing_score_is_rejected() {
        assert!(matches!(
            judge(Some(candidate(None, "1 Main St")), 80.0),
            Outcome::Rejected(_)
        ));
    }
    #[test]
    fn responses_parse_candidates_and_faults() {
        let found: Response = serde_json::from_str(
            r#"{"spatialReference":{"wkid":4326},"candidates":[{"address":"x","location":{"x":1,"y":2},"score":82,"attributes":{"StAddr":"Berguvsvägen 8","City":"Luleå","CountryCode":"SWE","Score":82}}]}"#,
        )
        .unwrap();
        assert_eq!(found.candidates.len(), 1);
        assert_eq!(found.candidates[0].attributes.score, Some(82.0));
        let empty: Response = serde_json::from_str(r#"{"candidates":[]}"#).unwrap();
        assert!(empty.candidates.is_empty());
        let fault: Response =
            serde_json::from_str(r#"{"error":{"code":498,"message":"Invalid Token","details":[]}}"#)
                .unwrap();
        assert_eq!(fault.error.unwrap().code, 498);
    }
    #[tokio::test]
    async fn timeout_is_unavailable_and_hides_token() {
        let reason = unavailable(None).await;
        assert!(!reason.contains(TOKEN), "{}", reason);
    }
    #[tokio::test]
    async fn server_error_is_unavailable_and_hides_token() {
        let reason = unavailable(http("500 Internal Server Error", "{}")).await;
        assert!(reason.starts_with("request failed"), "{}", reason);
        assert!(!reason.contains(TOKEN), "{}", reason);
    }
    #[tokio::test]
    async fn non_json_body_is_unavailable() {
        let reason = unavailable(http("200 OK", "<html>busy</html>")).await;
        assert!(reason.starts_with("malformed response"), "{}", reason);
        assert!(!reason.contains(TOKEN), "{}", reason);
    }
    #[tokio::test]
    async fn fault_body_is_unavailable() {
        let reason = unavailable(http(
            "200 OK",
            r#"{"error":{"code":498,"message":"Invalid Token","details":[]}}"#,
        ))
        .await;
        assert_eq!(reason, "geocoder fault 498: Invalid Token");
    }
    #[tokio::test]
    async fn empty_candidates_are_rejected() {
        let outcome = geocoder(serve(http("200 OK", r#"{"candidates":[]}"#)).await)
            .enrich(&main_street())
            .await;
        assert_eq!(outcome, Outcome::Rejected("no candidate".into()));
    }
    #[tokio::test]
    async fn good_candidate_is_accepted() {
        let body = r#"{"candidates":[{"address":"1 Main St","score":96,"attributes":{"StAddr":"1 Main St","City":"Springfield","CountryCode":"USA","Score":96}}]}"#;
        let outcome = geocoder(serve(http("200 OK", body)).await)
            .enrich(&main_street())
            .await;
        let Outcome::Accepted(patch) = outcome else {
            panic!("expected acceptance, got {:?}", outcome);
        };
        assert_eq!(patch.st_addr, "1 Main St");
        assert_eq!(patch.score, 96.0);
    }
}
