use std::fmt;

use serde::Deserialize;
use url::Url;

use crate::{SignError, SignResult, OAUTH_TOKEN_KEY};

/// `oauth_callback` value sent when no callback URL is configured (RFC 5849 §2.1).
pub const OUT_OF_BAND_CALLBACK: &str = "oob";

/// Provides the token half of a signing key.
pub trait TokenSecretsProvider {
    fn get_token_pair(&self) -> (&str, &str);
}

/// Consumer credentials plus the optional callback and provider endpoints.
///
/// The consumer secret is never transmitted; it only feeds the signing key.
#[derive(Clone, Deserialize)]
pub struct Config {
    pub consumer_key: String,
    pub consumer_secret: String,
    #[serde(default)]
    pub callback_url: Option<String>,
    #[serde(default)]
    pub endpoint: Option<Endpoint>,
}

/// Provider URLs of the three-legged flow.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Endpoint {
    pub request_token_url: String,
    pub authorize_url: String,
    pub access_token_url: String,
}

impl Config {
    pub fn new<TKey, TSecret>(consumer_key: TKey, consumer_secret: TSecret) -> Self
    where
        TKey: Into<String>,
        TSecret: Into<String>,
    {
        Config {
            consumer_key: consumer_key.into(),
            consumer_secret: consumer_secret.into(),
            callback_url: None,
            endpoint: None,
        }
    }

    /// set the oauth_callback value
    pub fn callback<T>(self, callback_url: T) -> Self
    where
        T: Into<String>,
    {
        Config {
            callback_url: Some(callback_url.into()),
            ..self
        }
    }

    pub fn endpoint(self, endpoint: Endpoint) -> Self {
        Config {
            endpoint: Some(endpoint),
            ..self
        }
    }

    pub(crate) fn callback_or_oob(&self) -> &str {
        self.callback_url.as_deref().unwrap_or(OUT_OF_BAND_CALLBACK)
    }

    /// URL the resource owner visits to approve `request_token` (RFC 5849 §2.2).
    ///
    /// # Errors
    ///
    /// Fails with [`SignError::MalformedRequestUri`] when no endpoint is
    /// configured or its authorize URL cannot be parsed.
    pub fn authorization_url(&self, request_token: &RequestToken) -> SignResult<Url> {
        let authorize_url = self
            .endpoint
            .as_ref()
            .map(|e| e.authorize_url.as_str())
            .unwrap_or_default();
        let mut url = Url::parse(authorize_url)
            .map_err(|_| SignError::MalformedRequestUri(authorize_url.to_string()))?;
        url.query_pairs_mut()
            .append_pair(OAUTH_TOKEN_KEY, &request_token.token);
        Ok(url)
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("consumer_key", &self.consumer_key)
            .field("consumer_secret", &"<redacted>")
            .field("callback_url", &self.callback_url)
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

/// Temporary credentials, held between the request-token and access-token steps.
#[derive(Clone, PartialEq, Eq)]
pub struct RequestToken {
    pub token: String,
    pub token_secret: String,
}

/// Token credentials used to sign ordinary authenticated requests.
#[derive(Clone, PartialEq, Eq)]
pub struct Token {
    pub token: String,
    pub token_secret: String,
}

impl RequestToken {
    pub fn new<TKey, TSecret>(token: TKey, token_secret: TSecret) -> Self
    where
        TKey: Into<String>,
        TSecret: Into<String>,
    {
        RequestToken {
            token: token.into(),
            token_secret: token_secret.into(),
        }
    }
}

impl Token {
    pub fn new<TKey, TSecret>(token: TKey, token_secret: TSecret) -> Self
    where
        TKey: Into<String>,
        TSecret: Into<String>,
    {
        Token {
            token: token.into(),
            token_secret: token_secret.into(),
        }
    }
}

impl TokenSecretsProvider for RequestToken {
    fn get_token_pair(&self) -> (&str, &str) {
        (&self.token, &self.token_secret)
    }
}

impl TokenSecretsProvider for Token {
    fn get_token_pair(&self) -> (&str, &str) {
        (&self.token, &self.token_secret)
    }
}

impl fmt::Debug for RequestToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestToken")
            .field("token", &self.token)
            .field("token_secret", &"<redacted>")
            .finish()
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Token")
            .field("token", &self.token)
            .field("token_secret", &"<redacted>")
            .finish()
    }
}
