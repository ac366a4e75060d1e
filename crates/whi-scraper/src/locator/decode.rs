//! Decoding of the `__NEXT_DATA__` payload into location records.

use serde::Deserialize;
use whi_core::LocationCollection;

use crate::error::LocatorError;

/// Bytes of payload kept on either side of a decode failure.
const CONTEXT_RADIUS: usize = 40;

#[derive(Debug, Deserialize)]
struct NextData {
    props: Option<Props>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Props {
    page_props: Option<PageProps>,
}

#[derive(Debug, Deserialize)]
struct PageProps {
    locations: Option<LocationCollection>,
}

/// Decode `{ props: { pageProps: { locations: [...] } } }`.
///
/// Missing or `null` containers yield an empty collection. Decoding is
/// all-or-nothing: one malformed record fails the whole payload.
///
/// # Errors
///
/// Returns [`LocatorError::Decode`] on malformed JSON, a non-object top
/// level, or a type mismatch on a known field. `context` holds the payload
/// text around the failure.
pub fn decode_locations(payload: &str) -> Result<LocationCollection, LocatorError> {
    let data: NextData = serde_json::from_str(payload).map_err(|source| LocatorError::Decode {
        context: fragment_near(payload, source.line(), source.column()),
        source,
    })?;

    Ok(data
        .props
        .and_then(|props| props.page_props)
        .and_then(|page_props| page_props.locations)
        .unwrap_or_default())
}

/// Excerpt of `payload` around a 1-based `line`/`column` position.
///
/// `serde_json` reports `column` as a byte offset into the line, so the window
/// is cut in bytes and then narrowed to the nearest char boundaries.
fn fragment_near(payload: &str, line: usize, column: usize) -> String {
    let Some(text) = payload.lines().nth(line.saturating_sub(1)) else {
        return payload.chars().take(CONTEXT_RADIUS * 2).collect();
    };
    let at = column.saturating_sub(1).min(text.len());

    let mut start = at.saturating_sub(CONTEXT_RADIUS);
    while !text.is_char_boundary(start) {
        start -= 1;
    }
    let mut end = (at + CONTEXT_RADIUS).min(text.len());
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    text[start..end].to_string()
}
