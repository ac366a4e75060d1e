//! Date-based closure inference from special-hours entries.

use chrono::NaiveDate;

use crate::location::LocationRecord;

/// Date format used by special-hours entries and reference dates.
pub const REFERENCE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Recompute `closed` for every location against `reference_date`.
///
/// A location is closed when any of its special-hours entries starts or ends
/// on the reference date. Only the first two fields of an entry are compared,
/// as plain strings. Locations with no special hours, or whose first entry
/// has fewer than two fields, are open. Standing business hours are not
/// consulted.
///
/// Returns the number of locations marked closed.
pub fn infer_closures(locations: &mut [LocationRecord], reference_date: NaiveDate) -> usize {
    let date = reference_date.format(REFERENCE_DATE_FORMAT).to_string();
    let mut closed = 0;

    for location in locations.iter_mut() {
        location.closed = has_special_closure_on(location, &date);
        if location.closed {
            closed += 1;
            tracing::debug!(
                store_code = %location.store_code,
                reference_date = %date,
                "special hours mark store closed"
            );
        }
    }

    closed
}

fn has_special_closure_on(location: &LocationRecord, date: &str) -> bool {
    let Some(first) = location.special_hours.first() else {
        return false;
    };
    if first.len() < 2 {
        return false;
    }

    // First match wins. Entries shorter than two fields only compare what
    // they carry.
    location
        .special_hours
        .iter()
        .any(|entry| entry.iter().take(2).any(|boundary| boundary == date))
}
