use thiserror::Error;

/// Errors raised while fetching a locator page or turning it into an index.
#[derive(Debug, Error)]
pub enum LocatorError {
    #[error("HTTP error fetching locator page: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    HttpStatus { status: u16, url: String },

    #[error("anti-bot challenge served instead of the locator page at {url}")]
    BotChallenge { url: String },

    #[error("no payload found: missing __NEXT_DATA__ script or brace-delimited JSON")]
    NoPayload,

    #[error("failed to decode location payload near `{context}`: {source}")]
    Decode {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid region: {0}")]
    InvalidRegion(#[from] whi_core::GeoError),

    #[error("geocoding failed for ZIP {zip}: {reason}")]
    Geocode { zip: String, reason: String },
}
