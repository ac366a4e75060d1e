pub mod error;
pub mod geocode;
pub mod locator;
pub mod report;

pub use error::LocatorError;
pub use geocode::geocode_zip;
pub use locator::fetch::{build_client, fetch_html};
pub use locator::{
    decode_locations, extract_locations, extract_next_data_payload, extract_payload,
};
pub use report::{
    build_regional_report, build_report, fetch_report, NearbyStore, RegionSummary, WhiReport,
};
