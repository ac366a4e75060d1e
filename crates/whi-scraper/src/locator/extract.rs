//! `__NEXT_DATA__` payload extraction from server-rendered HTML.

use scraper::{Html, Selector};

/// `id` of the script element Next.js renders its page props into.
pub(crate) const NEXT_DATA_SCRIPT_ID: &str = "__NEXT_DATA__";

/// Return the brace-delimited JSON text of the first `<script id="__NEXT_DATA__">`.
///
/// Later scripts with the same id are ignored. `None` means there is nothing
/// to decode: no such script, or its text has no `{ ... }` span.
#[must_use]
pub fn extract_next_data_payload(document: &Html) -> Option<String> {
    let script = Selector::parse("script").expect("valid selector");

    let element = document
        .select(&script)
        .find(|el| el.value().attr("id") == Some(NEXT_DATA_SCRIPT_ID))?;
    let text: String = element.text().collect();

    brace_span(&text).map(str::to_string)
}

/// Slice from the first `{` through the last `}`, inclusive.
pub(in crate::locator) fn brace_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if start > end {
        return None;
    }
    Some(&text[start..=end])
}
