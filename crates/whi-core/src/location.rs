//! Store location records as published in the locator page payload.

use serde::{Deserialize, Deserializer, Serialize};

/// One physical store as described by the locator page.
///
/// Every known field tolerates an explicit JSON `null` and falls back to its
/// empty value, and so does every string inside the list fields, matching how the locator omits data for stores that have not
/// published it. Unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LocationRecord {
    /// Upstream store code; unique per store.
    #[serde(deserialize_with = "null_as_default")]
    pub store_code: String,
    #[serde(deserialize_with = "null_as_default")]
    pub business_name: String,
    #[serde(deserialize_with = "null_strings_as_empty")]
    pub address_lines: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub city: String,
    #[serde(deserialize_with = "null_as_default")]
    pub state: String,
    #[serde(deserialize_with = "null_as_default")]
    pub postal_code: String,
    #[serde(deserialize_with = "null_as_default")]
    pub country: String,
    /// `0.0` when unknown.
    #[serde(deserialize_with = "null_as_default")]
    pub latitude: f64,
    /// `0.0` when unknown.
    #[serde(deserialize_with = "null_as_default")]
    pub longitude: f64,
    #[serde(deserialize_with = "null_strings_as_empty")]
    pub phone_numbers: Vec<String>,
    /// Standing weekly hours, one entry per day.
    #[serde(deserialize_with = "null_string_rows_as_empty")]
    pub business_hours: Vec<Vec<String>>,
    /// Holiday and exception entries: `[start_date, end_date, metadata...]`.
    #[serde(deserialize_with = "null_string_rows_as_empty")]
    pub special_hours: Vec<Vec<String>>,
    #[serde(deserialize_with = "null_strings_as_empty")]
    pub formatted_business_hours: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub slug: String,
    #[serde(deserialize_with = "null_as_default")]
    pub local_page_url: String,
    /// Raw upstream operational status (`"A"` for active).
    #[serde(rename = "_status", deserialize_with = "null_as_default")]
    pub status: String,
    /// Computed by [`crate::infer_closures`]; never read from the payload.
    #[serde(skip_deserializing)]
    pub closed: bool,
}

/// Ordered store records produced by a single pipeline run.
pub type LocationCollection = Vec<LocationRecord>;

impl LocationRecord {
    /// Whether the upstream marks this store as active.
    ///
    /// Informational only: closure for the reference date is decided by
    /// [`crate::infer_closures`], not by this flag.
    #[must_use]
    pub fn is_upstream_active(&self) -> bool {
        self.status == "A"
    }

    /// Whether the record carries usable coordinates. The locator publishes
    /// `0.0, 0.0` for stores it has not geocoded.
    #[must_use]
    pub fn has_coordinates(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (self.latitude.abs() > f64::EPSILON || self.longitude.abs() > f64::EPSILON)
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn null_strings_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let items = Option::<Vec<Option<String>>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(items.into_iter().map(Option::unwrap_or_default).collect())
}

/// Same as [`null_strings_as_empty`] one level down; a `null` row becomes an
/// empty row.
fn null_string_rows_as_empty<'de, D>(deserializer: D) -> Result<Vec<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let rows =
        Option::<Vec<Option<Vec<Option<String>>>>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(rows
        .into_iter()
        .map(|row| {
            row.unwrap_or_default()
                .into_iter()
                .map(Option::unwrap_or_default)
                .collect()
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_json() -> serde_json::Value {
        serde_json::json!({
            "storeCode": "1234",
            "businessName": "Waffle House #1234",
            "addressLines": ["100 Peachtree St"],
            "city": "Atlanta",
            "state": "GA",
            "postalCode": "30303",
            "country": "US",
            "latitude": 33.7537,
            "longitude": -84.3863,
            "phoneNumbers": ["(404) 555-0100"],
            "businessHours": [["MONDAY", "00:00", "23:59"]],
            "specialHours": [["2024-07-04", "2024-07-04", "closed"]],
            "formattedBusinessHours": ["Mon 24 hours"],
            "slug": "1234-atlanta",
            "localPageUrl": "https://locations.wafflehouse.com/1234-atlanta",
            "_status": "A"
        })
    }

    #[test]
    fn decodes_camel_case_fields() {
        let loc: LocationRecord = serde_json::from_value(sample_json()).unwrap();
        assert_eq!(loc.store_code, "1234");
        assert_eq!(loc.address_lines, vec!["100 Peachtree St"]);
        assert_eq!(loc.postal_code, "30303");
        assert_eq!(loc.special_hours[0][2], "closed");
        assert_eq!(loc.status, "A");
        assert!(loc.is_upstream_active());
        assert!(!loc.closed);
    }

    #[test]
    fn upstream_closed_flag_is_ignored() {
        let mut value = sample_json();
        value["closed"] = serde_json::Value::Bool(true);
        let loc: LocationRecord = serde_json::from_value(value).unwrap();
        assert!(!loc.closed, "closed must only be computed locally");
    }

    #[test]
    fn null_and_missing_fields_fall_back_to_defaults() {
        let loc: LocationRecord = serde_json::from_value(serde_json::json!({
            "storeCode": "9",
            "specialHours": null,
            "phoneNumbers": null,
            "latitude": null
        }))
        .unwrap();
        assert!(loc.special_hours.is_empty());
        assert!(loc.phone_numbers.is_empty());
        assert!(loc.latitude.abs() < f64::EPSILON);
        assert!(loc.business_name.is_empty());
        assert!(!loc.has_coordinates());
    }

    #[test]
    fn null_elements_inside_lists_become_empty_strings() {
        let loc: LocationRecord = serde_json::from_value(serde_json::json!({
            "storeCode": "77",
            "addressLines": ["1 Main St", null],
            "phoneNumbers": [null],
            "businessHours": [null, ["MONDAY", null, "23:59"]],
            "specialHours": [["2024-12-25", "2024-12-25", null, null]]
        }))
        .unwrap();
        assert_eq!(loc.address_lines, vec!["1 Main St", ""]);
        assert_eq!(loc.phone_numbers, vec![""]);
        assert!(loc.business_hours[0].is_empty());
        assert_eq!(loc.business_hours[1], vec!["MONDAY", "", "23:59"]);
        assert_eq!(loc.special_hours[0], vec!["2024-12-25", "2024-12-25", "", ""]);
    }

    #[test]
    fn null_special_hours_metadata_still_marks_store_closed() {
        let loc: LocationRecord = serde_json::from_value(serde_json::json!({
            "storeCode": "78",
            "specialHours": [["2024-12-25", "2024-12-25", null, null]]
        }))
        .unwrap();
        let mut records = vec![loc];
        let christmas = chrono::NaiveDate::from_ymd_opt(2024, 12, 25).unwrap();
        assert_eq!(crate::infer_closures(&mut records, christmas), 1);
        assert!(records[0].closed);
    }

    #[test]
    fn type_mismatch_inside_list_is_an_error() {
        let result: Result<LocationRecord, _> =
            serde_json::from_value(serde_json::json!({ "specialHours": [["2024-12-25", 7]] }));
        assert!(result.is_err());
    }

    #[test]
    fn type_mismatch_on_known_field_is_an_error() {
        let result: Result<LocationRecord, _> =
            serde_json::from_value(serde_json::json!({ "storeCode": 1234 }));
        assert!(result.is_err());
    }

    #[test]
    fn reencoding_preserves_known_fields() {
        let loc: LocationRecord = serde_json::from_value(sample_json()).unwrap();
        let encoded = serde_json::to_value(&loc).unwrap();
        let round: LocationRecord = serde_json::from_value(encoded.clone()).unwrap();
        assert_eq!(round, loc);
        assert_eq!(encoded["_status"], "A");
        assert_eq!(encoded["localPageUrl"], sample_json()["localPageUrl"]);
    }
}
