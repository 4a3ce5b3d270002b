//! Query-string handling.
//!
//! Inbound query strings are decoded into ordered key/value pairs, and
//! re-encoded when building redirect locations. Keys without `=` keep
//! that shape on re-encoding. A `+` decodes as space per the
//! form-urlencoded convention.

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Percent-escape everything outside the RFC 3986 unreserved set.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// One query parameter. The value is `None` for a bare key (no `=`).
pub type QueryPair = (String, Option<String>);

/// Decode a raw query string into ordered pairs.
pub fn parse(raw: &str) -> Vec<QueryPair> {
    raw.split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| match pair.split_once('=') {
            Some((key, value)) => (decode(key), Some(decode(value))),
            None => (decode(pair), None),
        })
        .collect()
}

/// Look up the first occurrence of `name`. A bare key reads as `""`.
pub fn option<'a>(pairs: &'a [QueryPair], name: &str) -> Option<&'a str> {
    pairs
        .iter()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.as_deref().unwrap_or(""))
}

/// Re-encode pairs with each key and value independently escaped,
/// preserving order.
pub fn encode(pairs: &[QueryPair]) -> String {
    pairs
        .iter()
        .map(|(key, value)| match value {
            Some(value) => format!("{}={}", escape(key), escape(value)),
            None => escape(key),
        })
        .collect::<Vec<_>>()
        .join("&")
}

fn decode(component: &str) -> String {
    let spaced = component.replace('+', " ");
    percent_decode_str(&spaced).decode_utf8_lossy().into_owned()
}

fn escape(component: &str) -> String {
    utf8_percent_encode(component, COMPONENT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_keeps_order_and_decodes() {
        let pairs = parse("%20%25%3D%3F%26=%26%3F%25%3D&foo=bar");
        assert_eq!(
            pairs,
            vec![
                (" %=?&".to_string(), Some("&?%=".to_string())),
                ("foo".to_string(), Some("bar".to_string())),
            ]
        );
    }

    #[test]
    fn round_trip_reencodes_reserved_characters() {
        let pairs = parse("%20%25%3D%3F%26=%26%3F%25%3D&foo=bar");
        assert_eq!(encode(&pairs), "%20%25%3D%3F%26=%26%3F%25%3D&foo=bar");
    }

    #[test]
    fn plus_decodes_as_space() {
        let pairs = parse("a+b=c+d");
        assert_eq!(pairs, vec![("a b".to_string(), Some("c d".to_string()))]);
        assert_eq!(encode(&pairs), "a%20b=c%20d");
    }

    #[test]
    fn bare_key_stays_bare() {
        let pairs = parse("recursive&x=1");
        assert_eq!(option(&pairs, "recursive"), Some(""));
        assert_eq!(encode(&pairs), "recursive&x=1");
    }

    #[test]
    fn missing_option_is_none() {
        let pairs = parse("foo=bar");
        assert_eq!(option(&pairs, "recursive"), None);
    }

    #[test]
    fn unreserved_characters_pass_through() {
        let pairs = parse("a-b.c_d~e=ok");
        assert_eq!(encode(&pairs), "a-b.c_d~e=ok");
    }
}
