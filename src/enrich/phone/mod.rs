//! Phone validation.
//!
//! Each pending customer phone is parsed against the region of the
//! customer's address. Valid numbers are rewritten in international
//! format and flagged valid; anything else is flagged invalid, so a
//! rejected phone is never fetched again.
mod contact;
mod validate;

pub use contact::*;
pub use validate::*;

use super::*;
use crate::*;
use tokio_postgres::Client;

/// Runs one phone validation pass.
pub async fn run(client: &mut Client) -> Result<Summary> {
    Driver::new(client, &PhoneValidator).run().await
}
