//! Command handlers: fetch the locator page, compute, and print.

use std::path::Path;

use anyhow::Context;
use whi_core::{AppConfig, GeoPoint, SeverityThresholds};
use whi_scraper::{
    build_client, build_regional_report, extract_payload, fetch_html, fetch_report, geocode_zip,
};

use crate::output::print_report;
use crate::SourceArgs;

/// Where a regional index is centered.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Center {
    Point { lat: f64, lon: f64 },
    Zip(String),
}

pub(crate) async fn run_index(config: &AppConfig, source: &SourceArgs) -> anyhow::Result<()> {
    let url = source.url.as_deref().unwrap_or(&config.locator_url);
    let reference_date = source.reference_date();
    tracing::info!(url, %reference_date, "computing nationwide index");

    let client = build_client(config.request_timeout_secs)?;
    let report = fetch_report(
        &client,
        url,
        &config.user_agent,
        reference_date,
        &config.thresholds,
    )
    .await
    .with_context(|| format!("failed to compute index from {url}"))?;

    print_report(&report, source.json)
}

pub(crate) async fn run_region(
    config: &AppConfig,
    source: &SourceArgs,
    center: Center,
    radius_miles: f64,
) -> anyhow::Result<()> {
    let url = source.url.as_deref().unwrap_or(&config.locator_url);
    let reference_date = source.reference_date();
    let client = build_client(config.request_timeout_secs)?;

    let point = match center {
        Center::Point { lat, lon } => GeoPoint::new(lat, lon)?,
        Center::Zip(zip) => geocode_zip(
            &client,
            &config.geocode_base_url,
            &zip,
            &config.user_agent,
        )
        .await
        .with_context(|| format!("failed to geocode ZIP {zip}"))?,
    };
    tracing::info!(
        url,
        %reference_date,
        latitude = point.latitude(),
        longitude = point.longitude(),
        radius_miles,
        "computing regional index"
    );

    let html = fetch_html(&client, url, &config.user_agent)
        .await
        .with_context(|| format!("failed to fetch {url}"))?;
    let report = build_regional_report(
        &html,
        reference_date,
        &config.thresholds,
        point,
        radius_miles,
    )
    .with_context(|| format!("failed to compute regional index from {url}"))?;

    print_report(&report, source.json)
}

pub(crate) async fn run_extract(
    config: &AppConfig,
    file: Option<&Path>,
    url: Option<&str>,
) -> anyhow::Result<()> {
    let html = if let Some(path) = file {
        std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?
    } else {
        let url = url.unwrap_or(&config.locator_url);
        let client = build_client(config.request_timeout_secs)?;
        fetch_html(&client, url, &config.user_agent)
            .await
            .with_context(|| format!("failed to fetch {url}"))?
    };

    let payload = extract_payload(&html)?;
    println!("{payload}");
    Ok(())
}

pub(crate) fn run_classify(thresholds: &SeverityThresholds, fraction: f64) -> anyhow::Result<()> {
    anyhow::ensure!(
        (0.0..=1.0).contains(&fraction),
        "closed fraction must be between 0 and 1, got {fraction}"
    );
    println!("{}", thresholds.band_for(fraction));
    Ok(())
}
