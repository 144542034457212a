//! `Authorization` header composition (RFC 5849 §3.5.1) and attachment.

use http::header::{HeaderValue, AUTHORIZATION};
use http::Method;
use url::Url;

use crate::base_string::{base_string_uri, verbatim_base_uri, OAuthParams};
use crate::encode::percent_encode_str;
use crate::{SignError, SignResult, AUTHORIZATION_PREFIX};

/// Format protocol parameters (signature included) as `OAuth k=v, k=v`.
///
/// Keys and values are percent-encoded but not quoted. Pairs come out in
/// ascending key order; servers must not depend on it.
pub fn authorization_header(oauth_params: &OAuthParams) -> String {
    let pairs = oauth_params
        .iter()
        .map(|(k, v)| format!("{}={}", percent_encode_str(k), percent_encode_str(v)))
        .collect::<Vec<String>>();
    format!("{}{}", AUTHORIZATION_PREFIX, pairs.join(", "))
}

/// A request the signer can read the method and URL from, and write the
/// `Authorization` header onto. Nothing else on the request is touched.
pub trait SignableRequest {
    fn method(&self) -> &Method;

    /// Absolute request URL, query included.
    fn request_url(&self) -> SignResult<Url>;

    /// Base string URI of the request: the URI without its query.
    fn base_uri(&self) -> SignResult<String> {
        self.request_url().map(|url| base_string_uri(&url))
    }

    fn set_authorization(&mut self, value: HeaderValue);
}

impl SignableRequest for reqwest::Request {
    fn method(&self) -> &Method {
        reqwest::Request::method(self)
    }

    fn request_url(&self) -> SignResult<Url> {
        Ok(self.url().clone())
    }

    fn set_authorization(&mut self, value: HeaderValue) {
        self.headers_mut().insert(AUTHORIZATION, value);
    }
}

impl<B> SignableRequest for http::Request<B> {
    fn method(&self) -> &Method {
        http::Request::method(self)
    }

    fn request_url(&self) -> SignResult<Url> {
        let uri = self.uri().to_string();
        Url::parse(&uri).map_err(|_| SignError::MalformedRequestUri(uri))
    }

    // taken from the raw uri; parsing into a Url would normalize host and port
    fn base_uri(&self) -> SignResult<String> {
        self.request_url()?;
        Ok(verbatim_base_uri(&self.uri().to_string()).to_string())
    }

    fn set_authorization(&mut self, value: HeaderValue) {
        self.headers_mut().insert(AUTHORIZATION, value);
    }
}

/// Write `header` onto `request` as its `Authorization` value.
pub fn set_authorization_header<R>(request: &mut R, header: &str) -> SignResult<()>
where
    R: SignableRequest + ?Sized,
{
    let value = HeaderValue::from_str(header)
        .map_err(|e| SignError::InvalidHeaderValue(e.to_string()))?;
    request.set_authorization(value);
    Ok(())
}
