pub mod app_config;
pub mod closure;
pub mod config;
pub mod geo;
pub mod index;
pub mod location;
pub mod severity;

pub use app_config::AppConfig;
pub use closure::{infer_closures, REFERENCE_DATE_FORMAT};
pub use config::{load_app_config, load_app_config_from_env, load_thresholds_from_env};
pub use geo::{
    distance_miles, within_radius, GeoError, GeoPoint, NearbyLocation, DEFAULT_RADIUS_MILES,
};
pub use index::{compute_index, tally, SeverityIndex, StatusTally, CLOSED_LABEL, OPEN_LABEL};
pub use location::{LocationCollection, LocationRecord};
pub use severity::{classify, SeverityBand, SeverityThresholds};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("invalid severity thresholds (red={red}, yellow={yellow}): {reason}")]
    InvalidThresholds { red: f64, yellow: f64, reason: String },
}
