//! Query string parsing
//!
//! Decodes `application/x-www-form-urlencoded` query strings. A key given
//! more than once keeps its last value.

use std::borrow::Cow;
use std::collections::HashMap;

/// Parse a raw query string (without the leading `?`)
pub fn parse_query(query: Option<&str>) -> HashMap<String, String> {
    let mut params = HashMap::new();
    let Some(query) = query else {
        return params;
    };

    for pair in query.split('&').filter(|p| !p.is_empty()) {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        params.insert(decode_component(key), decode_component(value));
    }
    params
}

/// Decode one percent-encoded component, `+` meaning space.
///
/// Invalid UTF-8 is replaced rather than rejected.
pub fn decode_component(raw: &str) -> String {
    let spaced: Cow<'_, str> = if raw.contains('+') {
        Cow::Owned(raw.replace('+', " "))
    } else {
        Cow::Borrowed(raw)
    };

    match urlencoding::decode(&spaced) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => {
            String::from_utf8_lossy(&urlencoding::decode_binary(spaced.as_bytes())).into_owned()
        }
    }
}
