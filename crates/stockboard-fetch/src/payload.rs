//! In-stock value extraction from availability payloads.
//!
//! Payloads are small XML fragments such as
//! `<AVAILABILITY>\n  <CODE>200</CODE>\n  <INSTOCKVALUE>OUTOFSTOCK</INSTOCKVALUE>\n</AVAILABILITY>`.
//! Only the `INSTOCKVALUE` tag is of interest, so a regex is enough; a full
//! XML parser would also have to cope with the fragments that are not
//! well-formed.

use std::sync::LazyLock;

use regex::Regex;

static IN_STOCK_VALUE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<INSTOCKVALUE>(.*)</INSTOCKVALUE>").expect("valid in-stock regex")
});

/// Returns the lower-cased text between `<INSTOCKVALUE>` and
/// `</INSTOCKVALUE>`, or `None` when the tag is missing.
///
/// The match is confined to a single line and is greedy, so a payload with
/// two tags on one line yields everything between the first opening and the
/// last closing tag.
#[must_use]
pub fn extract_in_stock_value(payload: &str) -> Option<String> {
    IN_STOCK_VALUE
        .captures(payload)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_lowercase())
}
