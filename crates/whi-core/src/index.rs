//! Open/closed aggregation into the closed-fraction index.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::location::LocationRecord;

pub const OPEN_LABEL: &str = "Open";
pub const CLOSED_LABEL: &str = "Closed";

/// Fraction of stores per status label.
///
/// Empty when computed over zero stores; otherwise both [`OPEN_LABEL`] and
/// [`CLOSED_LABEL`] are present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeverityIndex(BTreeMap<String, f64>);

impl SeverityIndex {
    #[must_use]
    pub fn get(&self, label: &str) -> Option<f64> {
        self.0.get(label).copied()
    }

    /// Closed fraction, treating a missing key as `0.0`.
    #[must_use]
    pub fn closed_fraction(&self) -> f64 {
        self.get(CLOSED_LABEL).unwrap_or(0.0)
    }

    #[must_use]
    pub fn open_fraction(&self) -> f64 {
        self.get(OPEN_LABEL).unwrap_or(0.0)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(label, fraction)| (label.as_str(), *fraction))
    }
}

impl FromIterator<(String, f64)> for SeverityIndex {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for SeverityIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "(no stores)");
        }
        let parts: Vec<String> = self
            .iter()
            .map(|(label, fraction)| format!("{label}: {fraction:.4}"))
            .collect();
        write!(f, "{}", parts.join(", "))
    }
}

/// Store counts per status bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusTally {
    pub open: usize,
    pub closed: usize,
}

impl StatusTally {
    #[must_use]
    pub fn total(&self) -> usize {
        self.open + self.closed
    }

    /// Divide each bucket by the total store count.
    #[must_use]
    pub fn to_index(&self) -> SeverityIndex {
        let total = self.total();
        if total == 0 {
            return SeverityIndex::default();
        }

        // Store counts stay far below f64's 52-bit mantissa.
        #[allow(clippy::cast_precision_loss)]
        let fraction = |count: usize| count as f64 / total as f64;

        [
            (OPEN_LABEL.to_string(), fraction(self.open)),
            (CLOSED_LABEL.to_string(), fraction(self.closed)),
        ]
        .into_iter()
        .collect()
    }
}

/// Partition locations by their computed `closed` flag and count each side.
#[must_use]
pub fn tally<'a, I>(locations: I) -> StatusTally
where
    I: IntoIterator<Item = &'a LocationRecord>,
{
    let (closed, open): (Vec<&LocationRecord>, Vec<&LocationRecord>) =
        locations.into_iter().partition(|loc| loc.closed);
    StatusTally {
        open: open.len(),
        closed: closed.len(),
    }
}

/// Closed-fraction index over `locations`; empty for an empty slice.
#[must_use]
pub fn compute_index(locations: &[LocationRecord]) -> SeverityIndex {
    tally(locations).to_index()
}
