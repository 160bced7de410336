//! Endpoint URL construction for the catalog API.

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

/// Characters escaped inside a single path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Joins `api_root`, a fixed `resource` path, and an escaped `key` segment.
///
/// Given `("https://host/", "availability", "umpante co")`, returns
/// `"https://host/availability/umpante%20co"`.
pub(super) fn resource_url(api_root: &str, resource: &str, key: &str) -> String {
    let key = utf8_percent_encode(key, PATH_SEGMENT);
    format!("{}/{resource}/{key}", api_root.trim_end_matches('/'))
}
