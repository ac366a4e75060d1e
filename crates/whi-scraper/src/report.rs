//! End-to-end index computation over a locator page.

use chrono::NaiveDate;
use reqwest::Client;
use serde::Serialize;
use whi_core::{
    classify, infer_closures, tally, within_radius, GeoPoint, LocationRecord, SeverityBand,
    SeverityIndex, SeverityThresholds,
};

use crate::error::LocatorError;
use crate::locator::{extract_locations, fetch::fetch_html};

/// Result of one index run.
#[derive(Debug, Clone, Serialize)]
pub struct WhiReport {
    pub reference_date: NaiveDate,
    pub total: usize,
    pub open: usize,
    pub closed: usize,
    /// Stores whose upstream `_status` is not active. Informational only.
    pub upstream_inactive: usize,
    pub index: SeverityIndex,
    pub band: SeverityBand,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<RegionSummary>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegionSummary {
    pub center: GeoPoint,
    pub radius_miles: f64,
    pub stores: Vec<NearbyStore>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NearbyStore {
    pub store_code: String,
    pub business_name: String,
    pub city: String,
    pub state: String,
    pub closed: bool,
    pub distance_miles: f64,
}

impl WhiReport {
    fn summarize<'a, I>(
        reference_date: NaiveDate,
        locations: I,
        thresholds: &SeverityThresholds,
        region: Option<RegionSummary>,
    ) -> Self
    where
        I: IntoIterator<Item = &'a LocationRecord> + Clone,
    {
        let counts = tally(locations.clone());
        let upstream_inactive = locations
            .into_iter()
            .filter(|loc| !loc.is_upstream_active())
            .count();
        let index = counts.to_index();
        let band = classify(&index, thresholds);

        tracing::debug!(
            reference_date = %reference_date,
            total = counts.total(),
            closed = counts.closed,
            band = %band,
            "computed index"
        );

        Self {
            reference_date,
            total: counts.total(),
            open: counts.open,
            closed: counts.closed,
            upstream_inactive,
            index,
            band,
            region,
        }
    }
}

/// Compute the nationwide index from raw locator HTML.
///
/// # Errors
///
/// Propagates [`LocatorError::NoPayload`] and [`LocatorError::Decode`]; no
/// report is produced unless the whole payload decodes.
pub fn build_report(
    html: &str,
    reference_date: NaiveDate,
    thresholds: &SeverityThresholds,
) -> Result<WhiReport, LocatorError> {
    let mut locations = extract_locations(html)?;
    infer_closures(&mut locations, reference_date);
    Ok(WhiReport::summarize(
        reference_date,
        &locations,
        thresholds,
        None,
    ))
}

/// Compute the index over stores within `radius_miles` of `center`.
///
/// Closure inference runs over every store before the radius filter.
///
/// # Errors
///
/// Propagates extraction and decode errors; an invalid radius surfaces as
/// [`LocatorError::InvalidRegion`].
pub fn build_regional_report(
    html: &str,
    reference_date: NaiveDate,
    thresholds: &SeverityThresholds,
    center: GeoPoint,
    radius_miles: f64,
) -> Result<WhiReport, LocatorError> {
    let mut locations = extract_locations(html)?;
    infer_closures(&mut locations, reference_date);

    let nearby = within_radius(locations, center, radius_miles)?;
    tracing::debug!(
        latitude = center.latitude(),
        longitude = center.longitude(),
        radius_miles,
        stores = nearby.len(),
        "applied radius filter"
    );

    let stores = nearby
        .iter()
        .map(|n| NearbyStore {
            store_code: n.location.store_code.clone(),
            business_name: n.location.business_name.clone(),
            city: n.location.city.clone(),
            state: n.location.state.clone(),
            closed: n.location.closed,
            distance_miles: n.distance_miles,
        })
        .collect();
    let region = RegionSummary {
        center,
        radius_miles,
        stores,
    };

    Ok(WhiReport::summarize(
        reference_date,
        nearby.iter().map(|n| &n.location),
        thresholds,
        Some(region),
    ))
}

/// Fetch the locator page and compute the nationwide index.
///
/// # Errors
///
/// Any fetch, extraction, or decode failure; see [`fetch_html`] and
/// [`build_report`].
pub async fn fetch_report(
    client: &Client,
    url: &str,
    user_agent: &str,
    reference_date: NaiveDate,
    thresholds: &SeverityThresholds,
) -> Result<WhiReport, LocatorError> {
    let html = fetch_html(client, url, user_agent).await?;
    build_report(&html, reference_date, thresholds)
}
