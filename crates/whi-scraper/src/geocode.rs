//! ZIP code geocoding against a Zippopotam.us-compatible endpoint.

use reqwest::Client;
use serde::Deserialize;
use whi_core::GeoPoint;

use crate::error::LocatorError;

#[derive(Debug, Deserialize)]
struct ZipResponse {
    #[serde(default)]
    places: Vec<ZipPlace>,
}

/// Coordinates arrive as decimal strings.
#[derive(Debug, Deserialize)]
struct ZipPlace {
    latitude: String,
    longitude: String,
}

/// Resolve a five-digit US ZIP code to the coordinates of its first place.
///
/// The ZIP is validated before any request is made.
///
/// # Errors
///
/// - [`LocatorError::Geocode`] for a malformed ZIP, an empty `places` list,
///   or unparseable / out-of-range coordinates.
/// - [`LocatorError::HttpStatus`] on a non-2xx response.
/// - [`LocatorError::Http`] on network failure or an undecodable body.
pub async fn geocode_zip(
    client: &Client,
    base_url: &str,
    zip: &str,
    user_agent: &str,
) -> Result<GeoPoint, LocatorError> {
    let geocode_error = |reason: String| LocatorError::Geocode {
        zip: zip.to_owned(),
        reason,
    };

    if zip.len() != 5 || !zip.bytes().all(|b| b.is_ascii_digit()) {
        return Err(geocode_error("ZIP code must be exactly 5 digits".to_string()));
    }

    let url = format!("{}/{zip}", base_url.trim_end_matches('/'));
    let response = client
        .get(&url)
        .header(reqwest::header::USER_AGENT, user_agent)
        .send()
        .await?;
    if !response.status().is_success() {
        return Err(LocatorError::HttpStatus {
            status: response.status().as_u16(),
            url,
        });
    }

    let body = response.json::<ZipResponse>().await?;
    let place = body
        .places
        .first()
        .ok_or_else(|| geocode_error("no places returned".to_string()))?;

    let parse = |raw: &str| {
        raw.trim()
            .parse::<f64>()
            .map_err(|e| geocode_error(format!("invalid coordinate {raw:?}: {e}")))
    };
    let point = GeoPoint::new(parse(&place.latitude)?, parse(&place.longitude)?)
        .map_err(|e| geocode_error(e.to_string()))?;

    tracing::debug!(
        zip,
        latitude = point.latitude(),
        longitude = point.longitude(),
        "geocoded ZIP"
    );
    Ok(point)
}
