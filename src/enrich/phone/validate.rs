use super::*;
use crate::enrich::*;
use phonenumber::Mode;
use phonenumber::country;

/// International form of `raw` if it parses as a valid number.
///
/// `region` is the alpha-2 code used for numbers without a country
/// prefix. Unknown regions parse as if none were given.
pub fn validate(raw: &str, region: Option<&str>) -> Option<String> {
    let region = region
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .and_then(|r| r.to_uppercase().parse::<country::Id>().ok());
    let number = phonenumber::parse(region, raw.trim()).ok()?;
    phonenumber::is_valid(&number).then(|| number.format().mode(Mode::International).to_string())
}

/// Offline validator; every answer is definite.
#[derive(Debug, Default, Clone, Copy)]
pub struct PhoneValidator;

#[async_trait::async_trait]
impl Enricher for PhoneValidator {
    type Record = Contact;
    async fn enrich(&self, contact: &Contact) -> Outcome<PhonePatch> {
        let Some(raw) = contact.phone.as_deref().filter(|p| !p.trim().is_empty()) else {
            return Outcome::Rejected("no phone number".into());
        };
        match validate(raw, contact.region.as_deref()) {
            Some(phone) => Outcome::Accepted(PhonePatch { phone }),
            None => Outcome::Rejected(format!(
                "{:?} is not a valid number for {}",
                raw,
                contact.region.as_deref().unwrap_or("unknown region")
            )),
        }
    }
}
