//! HTTP helpers for retrieving the locator page.

use std::time::Duration;

use reqwest::Client;

use crate::error::LocatorError;

/// Build the shared HTTP client with the configured request timeout.
///
/// # Errors
///
/// Returns [`LocatorError::Http`] if the underlying `reqwest::Client`
/// cannot be constructed.
pub fn build_client(timeout_secs: u64) -> Result<Client, LocatorError> {
    let client = Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .build()?;
    Ok(client)
}

/// Fetch the HTML body of `url` with a browser-like request.
///
/// A single attempt is made; any transport failure or non-2xx status fails
/// the run.
///
/// # Errors
///
/// - [`LocatorError::Http`] on network or TLS failure.
/// - [`LocatorError::HttpStatus`] on a non-2xx response.
/// - [`LocatorError::BotChallenge`] when an anti-bot interstitial is served
///   in place of the page.
pub async fn fetch_html(
    client: &Client,
    url: &str,
    user_agent: &str,
) -> Result<String, LocatorError> {
    let response = client
        .get(url)
        .header(reqwest::header::USER_AGENT, user_agent)
        .header(
            reqwest::header::ACCEPT,
            "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
        )
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        return Err(LocatorError::HttpStatus {
            status: status.as_u16(),
            url: url.to_owned(),
        });
    }

    let body = response.text().await?;
    if looks_like_bot_challenge(&body) {
        return Err(LocatorError::BotChallenge {
            url: url.to_owned(),
        });
    }

    tracing::debug!(url, bytes = body.len(), "fetched locator page");
    Ok(body)
}

fn looks_like_bot_challenge(body: &str) -> bool {
    // A real locator page always carries its payload script.
    if body.contains(super::extract::NEXT_DATA_SCRIPT_ID) {
        return false;
    }

    let lowered = body.to_ascii_lowercase();
    let has_cloudflare_banner = lowered.contains("attention required! | cloudflare");
    let has_challenge_platform = lowered.contains("/cdn-cgi/challenge-platform/");
    let has_just_a_moment = lowered.contains("just a moment...");
    let has_cookie_gate = lowered.contains("please enable cookies");
    let has_cf_chl = lowered.contains("cf-chl-");

    has_cloudflare_banner
        || has_challenge_platform
        || (has_just_a_moment && has_cookie_gate)
        || (has_just_a_moment && has_cf_chl)
}
