//! Severity band classification of the closed fraction.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::index::SeverityIndex;
use crate::ConfigError;

pub const DEFAULT_RED_THRESHOLD: f64 = 0.66;
pub const DEFAULT_YELLOW_THRESHOLD: f64 = 0.33;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeverityBand {
    Red,
    Yellow,
    Green,
}

impl fmt::Display for SeverityBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeverityBand::Red => write!(f, "Red"),
            SeverityBand::Yellow => write!(f, "Yellow"),
            SeverityBand::Green => write!(f, "Green"),
        }
    }
}

/// Closed-fraction thresholds, both on the `[0, 1]` scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeverityThresholds {
    red: f64,
    yellow: f64,
}

impl Default for SeverityThresholds {
    fn default() -> Self {
        Self {
            red: DEFAULT_RED_THRESHOLD,
            yellow: DEFAULT_YELLOW_THRESHOLD,
        }
    }
}

impl SeverityThresholds {
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidThresholds`] if either value is not a
    /// finite fraction in `[0, 1]` or if `yellow` exceeds `red`.
    pub fn new(red: f64, yellow: f64) -> Result<Self, ConfigError> {
        let invalid = |reason: &str| ConfigError::InvalidThresholds {
            red,
            yellow,
            reason: reason.to_string(),
        };

        if !(0.0..=1.0).contains(&red) || !(0.0..=1.0).contains(&yellow) {
            return Err(invalid("thresholds are fractions and must lie in [0, 1]"));
        }
        if yellow > red {
            return Err(invalid("yellow threshold must not exceed red threshold"));
        }

        Ok(Self { red, yellow })
    }

    #[must_use]
    pub fn red(&self) -> f64 {
        self.red
    }

    #[must_use]
    pub fn yellow(&self) -> f64 {
        self.yellow
    }

    /// Strict `>` on both thresholds: a value exactly on a threshold falls
    /// into the lower band.
    #[must_use]
    pub fn band_for(&self, closed_fraction: f64) -> SeverityBand {
        if closed_fraction > self.red {
            SeverityBand::Red
        } else if closed_fraction > self.yellow {
            SeverityBand::Yellow
        } else {
            SeverityBand::Green
        }
    }
}

/// Classify an index by its closed fraction. A missing `Closed` key counts as `0`.
#[must_use]
pub fn classify(index: &SeverityIndex, thresholds: &SeverityThresholds) -> SeverityBand {
    thresholds.band_for(index.closed_fraction())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::CLOSED_LABEL;

    fn closed(fraction: f64) -> SeverityIndex {
        [(CLOSED_LABEL.to_string(), fraction)].into_iter().collect()
    }

    #[test]
    fn bands_by_closed_fraction() {
        let t = SeverityThresholds::default();
        assert_eq!(classify(&closed(0.70), &t), SeverityBand::Red);
        assert_eq!(classify(&closed(0.40), &t), SeverityBand::Yellow);
        assert_eq!(classify(&closed(0.10), &t), SeverityBand::Green);
    }

    #[test]
    fn boundaries_fall_into_lower_band() {
        let t = SeverityThresholds::default();
        assert_eq!(classify(&closed(0.66), &t), SeverityBand::Yellow);
        assert_eq!(classify(&closed(0.33), &t), SeverityBand::Green);
    }

    #[test]
    fn missing_closed_key_is_green() {
        let t = SeverityThresholds::default();
        assert_eq!(classify(&SeverityIndex::default(), &t), SeverityBand::Green);
    }

    #[test]
    fn full_closure_is_red() {
        assert_eq!(
            classify(&closed(1.0), &SeverityThresholds::default()),
            SeverityBand::Red
        );
    }

    #[test]
    fn percentage_scale_thresholds_are_rejected() {
        let result = SeverityThresholds::new(66.0, 33.0);
        assert!(
            matches!(result, Err(ConfigError::InvalidThresholds { .. })),
            "got {result:?}"
        );
    }

    #[test]
    fn inverted_thresholds_are_rejected() {
        assert!(SeverityThresholds::new(0.2, 0.5).is_err());
    }

    #[test]
    fn nan_threshold_is_rejected() {
        assert!(SeverityThresholds::new(f64::NAN, 0.3).is_err());
    }

    #[test]
    fn custom_thresholds_apply() {
        let t = SeverityThresholds::new(0.5, 0.1).unwrap();
        assert_eq!(t.band_for(0.5), SeverityBand::Yellow);
        assert_eq!(t.band_for(0.51), SeverityBand::Red);
        assert_eq!(t.band_for(0.1), SeverityBand::Green);
    }

    #[test]
    fn band_display_matches_label() {
        assert_eq!(SeverityBand::Yellow.to_string(), "Yellow");
    }
}
