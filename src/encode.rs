//! RFC 3986 percent-encoding and RFC 5849 §3.4.1.3.2 parameter normalization.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC};

/// Everything except the unreserved set `A-Z a-z 0-9 - . _ ~`.
const OAUTH_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Percent-encode a byte sequence, escaping with uppercase hex digits.
///
/// Non-ASCII text is escaped byte by byte, and space always becomes `%20`.
pub fn percent_encode(input: &[u8]) -> String {
    percent_encoding::percent_encode(input, OAUTH_ENCODE_SET).to_string()
}

/// Shorthand for [`percent_encode`] over the UTF-8 bytes of `input`.
pub fn percent_encode_str(input: &str) -> String {
    percent_encode(input.as_bytes())
}

/// Build the normalized parameter string from unencoded key/value pairs.
///
/// Keys and values are encoded independently, pairs are ordered by the
/// *encoded* key (encoded value breaks ties) and joined as `k=v&k=v`.
pub fn normalize_parameters<I, K, V>(params: I) -> String
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut encoded = params
        .into_iter()
        .map(|(k, v)| (percent_encode_str(k.as_ref()), percent_encode_str(v.as_ref())))
        .collect::<Vec<(String, String)>>();
    encoded.sort();
    encoded
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<String>>()
        .join("&")
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn unreserved_passes_through() {
        let unreserved = "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-._~";
        assert_eq!(percent_encode_str(unreserved), unreserved);
    }

    #[test]
    fn reserved_characters_are_escaped() {
        assert_eq!(percent_encode_str("Ladies + Gentlemen"), "Ladies%20%2B%20Gentlemen");
        assert_eq!(percent_encode_str("a=b"), "a%3Db");
        assert_eq!(percent_encode_str("/?&= +%"), "%2F%3F%26%3D%20%2B%25");
        assert_eq!(percent_encode_str("*'()!"), "%2A%27%28%29%21");
    }

    #[test]
    fn multibyte_text_is_escaped_per_byte() {
        assert_eq!(percent_encode_str("少女"), "%E5%B0%91%E5%A5%B3");
        assert_eq!(percent_encode_str("☃"), "%E2%98%83");
        assert_eq!(percent_encode(&[0x00, 0x7f, 0xff]), "%00%7F%FF");
    }

    #[test]
    fn encoded_output_has_no_reserved_literals() {
        let inputs = [
            "https://api.example.com/resource?foo=bar&baz=qux",
            "100% + 50% = 150%",
            "snow ☃ man/€",
        ];
        for input in inputs.iter() {
            let encoded = percent_encode_str(input);
            for c in ['/', '?', '&', '=', ' ', '+'].iter() {
                assert!(!encoded.contains(*c), "{} left {:?}", encoded, c);
            }
            // every '%' must start a two-digit uppercase escape
            let bytes = encoded.as_bytes();
            for (i, b) in bytes.iter().enumerate() {
                if *b == b'%' {
                    let hex = &encoded[i + 1..i + 3];
                    assert!(hex
                        .chars()
                        .all(|c| c.is_ascii_digit() || ('A'..='F').contains(&c)));
                }
            }
        }
    }

    #[test]
    fn round_trips_through_percent_decoding() {
        let inputs: [&[u8]; 4] = [
            b"Hello Ladies + Gentlemen, a signed OAuth request!",
            "終末旅行".as_bytes(),
            &[0x00, 0x25, 0x80, 0xfe, 0xff],
            b"",
        ];
        for input in inputs.iter() {
            let encoded = percent_encode(input);
            let decoded: Vec<u8> = percent_encoding::percent_decode_str(&encoded).collect();
            assert_eq!(&decoded[..], *input);
        }
    }

    #[test]
    fn normalize_sorts_by_encoded_key() {
        assert_eq!(normalize_parameters(vec![("b", "2"), ("a", "1")]), "a=1&b=2");

        let map: HashMap<&str, &str> = vec![("c", "3"), ("a", "1"), ("b", "2")]
            .into_iter()
            .collect();
        assert_eq!(normalize_parameters(map), "a=1&b=2&c=3");
    }

    #[test]
    fn normalize_orders_after_encoding() {
        // ' ' encodes to "%20", which sorts before "A"; '~' stays literal and sorts last
        let normalized = normalize_parameters(vec![("~x", "1"), ("A", "2"), (" a", "3")]);
        assert_eq!(normalized, "%20a=3&A=2&~x=1");
    }

    #[test]
    fn normalize_encodes_values() {
        let normalized = normalize_parameters(vec![
            ("status", "Hello Ladies + Gentlemen, a signed OAuth request!"),
            ("include_entities", "true"),
        ]);
        assert_eq!(
            normalized,
            "include_entities=true&status=Hello%20Ladies%20%2B%20Gentlemen%2C%20a%20signed%20OAuth%20request%21"
        );
    }

    #[test]
    fn normalize_empty_set() {
        assert_eq!(normalize_parameters(Vec::<(&str, &str)>::new()), "");
    }
}
