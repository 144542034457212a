use http::Method;
use tracing::{debug, trace, warn};
use url::Url;

use crate::base_string::{base_string_uri, build_signature_base, OAuthParams};
use crate::header::{authorization_header, set_authorization_header, SignableRequest};
use crate::signature::sign;
use crate::source::{ClockSource, NonceSource, OsNonce, SystemClock};
use crate::{
    Config, RequestToken, SignResult, Token, TokenSecretsProvider, HMAC_SHA1,
    OAUTH_CALLBACK_KEY, OAUTH_CONSUMER_KEY, OAUTH_NONCE_KEY, OAUTH_SIGNATURE_KEY,
    OAUTH_SIGNATURE_METHOD_KEY, OAUTH_TIMESTAMP_KEY, OAUTH_TOKEN_KEY, OAUTH_VERIFIER_KEY,
    OAUTH_VERSION, OAUTH_VERSION_KEY,
};

/// Builds OAuth1 `Authorization` headers for the three protocol flows.
///
/// A signer only holds immutable consumer credentials and its nonce/clock
/// sources, so one instance can be shared across threads and reused for any
/// number of requests. Every call builds a fresh parameter set.
#[derive(Debug, Clone)]
pub struct Signer<TNonce = OsNonce, TClock = SystemClock>
where
    TNonce: NonceSource,
    TClock: ClockSource,
{
    config: Config,
    nonce_source: TNonce,
    clock: TClock,
}

impl Signer {
    /// Signer drawing nonces from the OS CSPRNG and time from the system clock.
    pub fn new(config: Config) -> Self {
        Signer {
            config,
            nonce_source: OsNonce,
            clock: SystemClock,
        }
    }
}

impl<TNonce, TClock> Signer<TNonce, TClock>
where
    TNonce: NonceSource,
    TClock: ClockSource,
{
    /// Replace the nonce source.
    pub fn with_nonce_source<T>(self, nonce_source: T) -> Signer<T, TClock>
    where
        T: NonceSource,
    {
        Signer {
            config: self.config,
            nonce_source,
            clock: self.clock,
        }
    }

    /// Replace the clock.
    pub fn with_clock<T>(self, clock: T) -> Signer<TNonce, T>
    where
        T: ClockSource,
    {
        Signer {
            config: self.config,
            nonce_source: self.nonce_source,
            clock,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Header for the temporary credential request (RFC 5849 §2.1).
    ///
    /// Sends `oauth_callback` (the configured callback URL, or `oob`) and
    /// signs with an empty token secret.
    pub fn request_token_header(&self, method: &Method, url: &Url) -> SignResult<String> {
        self.request_token_header_for(method, &base_string_uri(url), url)
    }

    /// Header for the token credential request (RFC 5849 §2.3).
    pub fn access_token_header(
        &self,
        method: &Method,
        url: &Url,
        request_token: &RequestToken,
        verifier: &str,
    ) -> SignResult<String> {
        self.access_token_header_for(method, &base_string_uri(url), url, request_token, verifier)
    }

    /// Header for an authenticated resource request (RFC 5849 §3.1).
    pub fn request_header(
        &self,
        method: &Method,
        url: &Url,
        access_token: &Token,
    ) -> SignResult<String> {
        self.request_header_for(method, &base_string_uri(url), url, access_token)
    }

    /// Sign `request` for the temporary credential request and set its
    /// `Authorization` header.
    ///
    /// The base string URI is whatever [`SignableRequest::base_uri`] returns,
    /// so an `http::Request` is signed over its URI exactly as written.
    pub fn set_request_token_auth_header<R>(&self, request: &mut R) -> SignResult<()>
    where
        R: SignableRequest + ?Sized,
    {
        let url = request.request_url()?;
        let base_uri = request.base_uri()?;
        let header = self.request_token_header_for(request.method(), &base_uri, &url)?;
        set_authorization_header(request, &header)
    }

    /// Sign `request` for the token credential request and set its
    /// `Authorization` header.
    pub fn set_access_token_auth_header<R>(
        &self,
        request: &mut R,
        request_token: &RequestToken,
        verifier: &str,
    ) -> SignResult<()>
    where
        R: SignableRequest + ?Sized,
    {
        let url = request.request_url()?;
        let base_uri = request.base_uri()?;
        let header = self.access_token_header_for(
            request.method(),
            &base_uri,
            &url,
            request_token,
            verifier,
        )?;
        set_authorization_header(request, &header)
    }

    /// Sign `request` with the access token and set its `Authorization` header.
    pub fn set_request_auth_header<R>(&self, request: &mut R, access_token: &Token) -> SignResult<()>
    where
        R: SignableRequest + ?Sized,
    {
        let url = request.request_url()?;
        let base_uri = request.base_uri()?;
        let header = self.request_header_for(request.method(), &base_uri, &url, access_token)?;
        set_authorization_header(request, &header)
    }

    fn request_token_header_for(
        &self,
        method: &Method,
        base_uri: &str,
        url: &Url,
    ) -> SignResult<String> {
        let mut params = self.basic_oauth_params()?;
        params.insert(
            OAUTH_CALLBACK_KEY.to_string(),
            self.config.callback_or_oob().to_string(),
        );
        Ok(self.finish("request_token", method, base_uri, url, params, ""))
    }

    fn access_token_header_for(
        &self,
        method: &Method,
        base_uri: &str,
        url: &Url,
        request_token: &RequestToken,
        verifier: &str,
    ) -> SignResult<String> {
        let (token, token_secret) = request_token.get_token_pair();
        let mut params = self.basic_oauth_params()?;
        params.insert(OAUTH_TOKEN_KEY.to_string(), token.to_string());
        params.insert(OAUTH_VERIFIER_KEY.to_string(), verifier.to_string());
        Ok(self.finish("access_token", method, base_uri, url, params, token_secret))
    }

    fn request_header_for(
        &self,
        method: &Method,
        base_uri: &str,
        url: &Url,
        access_token: &Token,
    ) -> SignResult<String> {
        let (token, token_secret) = access_token.get_token_pair();
        let mut params = self.basic_oauth_params()?;
        params.insert(OAUTH_TOKEN_KEY.to_string(), token.to_string());
        Ok(self.finish("request", method, base_uri, url, params, token_secret))
    }

    // oauth_* parameters shared by every flow, oauth_signature excluded
    fn basic_oauth_params(&self) -> SignResult<OAuthParams> {
        let nonce = self.nonce_source.nonce().map_err(|e| {
            warn!(error = %e, "failed to obtain oauth_nonce");
            e
        })?;
        let timestamp = self.clock.timestamp()?;

        let mut params = OAuthParams::new();
        params.insert(OAUTH_CONSUMER_KEY.to_string(), self.config.consumer_key.clone());
        params.insert(OAUTH_SIGNATURE_METHOD_KEY.to_string(), HMAC_SHA1.to_string());
        params.insert(OAUTH_TIMESTAMP_KEY.to_string(), timestamp.to_string());
        params.insert(OAUTH_NONCE_KEY.to_string(), nonce);
        params.insert(OAUTH_VERSION_KEY.to_string(), OAUTH_VERSION.to_string());
        Ok(params)
    }

    fn finish(
        &self,
        flow: &'static str,
        method: &Method,
        base_uri: &str,
        url: &Url,
        mut params: OAuthParams,
        token_secret: &str,
    ) -> String {
        debug!(flow, %method, base_uri, "signing oauth1 request");

        // the signature must be computed over the set without oauth_signature
        let base = build_signature_base(method, base_uri, url, &params);
        trace!(base_string = %base, "computed signature base string");

        let signature = sign(&self.config.consumer_secret, token_secret, &base);
        params.insert(OAUTH_SIGNATURE_KEY.to_string(), signature);
        authorization_header(&params)
    }
}
