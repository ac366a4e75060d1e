//! Locator page pipeline: HTML → `__NEXT_DATA__` payload → location records.

mod decode;
mod extract;
pub mod fetch;

pub use decode::decode_locations;
pub use extract::extract_next_data_payload;

use std::collections::HashSet;

use scraper::Html;
use whi_core::{LocationCollection, LocationRecord};

use crate::error::LocatorError;

/// Parse `html` and return the `__NEXT_DATA__` JSON payload text.
///
/// # Errors
///
/// Returns [`LocatorError::NoPayload`] if the script is missing or holds no
/// brace-delimited text.
pub fn extract_payload(html: &str) -> Result<String, LocatorError> {
    let document = Html::parse_document(html);
    extract_next_data_payload(&document).ok_or(LocatorError::NoPayload)
}

/// Parse `html` and decode the store records embedded in its
/// `__NEXT_DATA__` script.
///
/// # Errors
///
/// - [`LocatorError::NoPayload`] if no payload can be extracted.
/// - [`LocatorError::Decode`] if the payload is not the expected JSON shape.
pub fn extract_locations(html: &str) -> Result<LocationCollection, LocatorError> {
    let payload = extract_payload(html)?;
    tracing::debug!(bytes = payload.len(), "extracted __NEXT_DATA__ payload");

    let locations = decode_locations(&payload)?;
    warn_on_duplicate_store_codes(&locations);
    tracing::debug!(locations = locations.len(), "decoded locator payload");

    Ok(locations)
}

fn warn_on_duplicate_store_codes(locations: &[LocationRecord]) {
    let mut seen = HashSet::new();
    for loc in locations {
        if !loc.store_code.is_empty() && !seen.insert(loc.store_code.as_str()) {
            tracing::warn!(store_code = %loc.store_code, "duplicate store code in locator payload");
        }
    }
}
