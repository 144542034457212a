//! HMAC-SHA1 signature computation (RFC 5849 §3.4.2).

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use hmac::{Hmac, Mac};
use sha1::Sha1;

type HmacSha1 = Hmac<Sha1>;

/// `consumer_secret&token_secret`. The separator is present even when the
/// token secret is empty.
pub fn signing_key(consumer_secret: &str, token_secret: &str) -> String {
    format!("{}&{}", consumer_secret, token_secret)
}

/// Sign `base_string` and return the base64 (standard, padded) MAC.
pub fn sign(consumer_secret: &str, token_secret: &str, base_string: &str) -> String {
    let key = signing_key(consumer_secret, token_secret);
    // HMAC accepts keys of any length
    let mut mac = HmacSha1::new_from_slice(key.as_bytes()).expect("HMAC accepts any key size");
    mac.update(base_string.as_bytes());
    BASE64.encode(mac.finalize().into_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signing_key_always_has_separator() {
        assert_eq!(signing_key("cs", ""), "cs&");
        assert_eq!(signing_key("cs", "ts"), "cs&ts");
        assert_eq!(signing_key("", ""), "&");
        assert_ne!(signing_key("cs", ""), "cs");
    }

    #[test]
    fn signing_is_deterministic() {
        let first = sign("cs", "ts", "M");
        assert_eq!(first, sign("cs", "ts", "M"));
        assert_eq!(first.len(), 28);
        assert!(first.ends_with('='));
        assert_ne!(first, sign("cs", "", "M"));
    }

    #[test]
    fn signs_with_keys_of_any_length() {
        let long_secret = "k".repeat(200);
        let signatures = [
            sign("", "", "M"),
            sign(&"k".repeat(63), "", "M"),
            sign(&"k".repeat(64), "", "M"),
            sign(&long_secret, &long_secret, "M"),
        ];
        for signature in signatures.iter() {
            assert_eq!(signature.len(), 28);
            assert_eq!(BASE64.decode(signature).unwrap().len(), 20);
        }
        assert_ne!(signatures[2], signatures[3]);
    }

    #[test]
    fn rfc5849_photos_example() {
        // https://tools.ietf.org/html/rfc5849#section-1.2
        let base = "GET&http%3A%2F%2Fphotos.example.net%2Fphotos&file%3Dvacation.jpg%26oauth_consumer_key%3Ddpf43f3p2l4k3l03%26oauth_nonce%3DchapoH%26oauth_signature_method%3DHMAC-SHA1%26oauth_timestamp%3D137131202%26oauth_token%3Dnnch734d00sl2jdk%26size%3Doriginal";
        assert_eq!(
            sign("kd94hf93k423kf44", "pfkkdhi9sl3r4s00", base),
            "MdpQcU8iPSUjWoN/UDMsK2sui9I="
        );
    }
}
