//! Signature base string construction (RFC 5849 §3.4.1).

use std::collections::BTreeMap;

use http::Method;
use url::Url;

use crate::encode::{normalize_parameters, percent_encode_str};

/// Protocol parameters of a single signing call, keyed by parameter name.
/// Values are kept unencoded.
pub type OAuthParams = BTreeMap<String, String>;

/// Serialization of a parsed `url` with its query and fragment removed.
///
/// The url crate has already lowercased the host, dropped a default port and
/// resolved dot segments, so this is only verbatim for URLs already in that
/// form. Use [`verbatim_base_uri`] when the raw request URI is at hand.
pub fn base_string_uri(url: &Url) -> String {
    let mut base = url.clone();
    base.set_query(None);
    base.set_fragment(None);
    base.into()
}

/// Everything in `uri` before the first `?` (or `#`), taken as-is.
///
/// No scheme or host case normalization and no default port stripping.
pub fn verbatim_base_uri(uri: &str) -> &str {
    uri.find(|c: char| c == '?' || c == '#')
        .map_or(uri, |end| &uri[..end])
}

/// Decoded query parameters of `url`. When a key repeats, the first value wins.
pub fn query_parameters(url: &Url) -> BTreeMap<String, String> {
    let mut params = BTreeMap::new();
    for (key, value) in url.query_pairs() {
        params
            .entry(key.into_owned())
            .or_insert_with(|| value.into_owned());
    }
    params
}

/// Build `METHOD&encoded(base uri)&encoded(parameter string)`.
///
/// `oauth_params` must not contain `oauth_signature` yet. Protocol parameters
/// take precedence over query parameters of the same name. The request body
/// never contributes.
pub fn signature_base(method: &Method, url: &Url, oauth_params: &OAuthParams) -> String {
    build_signature_base(method, &base_string_uri(url), url, oauth_params)
}

/// Same as [`signature_base`], with the base string URI supplied by the
/// caller. `url` only contributes its query parameters.
pub fn build_signature_base(
    method: &Method,
    base_uri: &str,
    url: &Url,
    oauth_params: &OAuthParams,
) -> String {
    let mut params = query_parameters(url);
    for (key, value) in oauth_params {
        params.insert(key.clone(), value.clone());
    }
    let parameter_string = normalize_parameters(&params);

    format!(
        "{}&{}&{}",
        method.as_str().to_uppercase(),
        percent_encode_str(base_uri),
        percent_encode_str(&parameter_string)
    )
}
