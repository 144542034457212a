/*!
reqwest-oauth1-signer: OAuth 1.0a `Authorization` headers for reqwest and http requests.

# Overview

This library signs outgoing requests with HMAC-SHA1 as described in
[RFC 5849](https://tools.ietf.org/html/rfc5849), and writes the resulting
`Authorization: OAuth ...` header onto a [`reqwest::Request`] or an [`http::Request`].
It covers the three protocol flows:

- temporary credential (request token) acquisition, RFC 5849 §2.1
- token credential (access token) exchange, RFC 5849 §2.3
- authenticated requests, RFC 5849 §3.1

Sending the request is left to the caller.

# How to use

## Basic usecase 1 - signing an API request

```rust,no_run
use reqwest_oauth1_signer::{Config, Signer, Token};

# async fn run() -> Result<(), Box<dyn std::error::Error>> {
let config = Config::new("[CONSUMER_KEY]", "[CONSUMER_SECRET]");
let signer = Signer::new(config);
let access_token = Token::new("[ACCESS_TOKEN]", "[TOKEN_SECRET]");

let client = reqwest::Client::new();
let mut request = client
    .get("https://api.example.com/1.1/statuses/home_timeline.json?count=5")
    .build()?;
signer.set_request_auth_header(&mut request, &access_token)?;
let resp = client.execute(request).await?;
# Ok(())
# }
```

## Basic usecase 2 - acquiring token & secret

```rust,no_run
use std::io;
use reqwest_oauth1_signer::{Config, Endpoint, Signer, TokenReaderFuture};

# async fn run() -> Result<(), Box<dyn std::error::Error>> {
let config = Config::new("[CONSUMER_KEY]", "[CONSUMER_SECRET]")
    .callback("oob")
    .endpoint(Endpoint {
        request_token_url: "https://api.example.com/oauth/request_token".into(),
        authorize_url: "https://api.example.com/oauth/authorize".into(),
        access_token_url: "https://api.example.com/oauth/access_token".into(),
    });
let signer = Signer::new(config.clone());
let client = reqwest::Client::new();

// step 1: acquire request token & token secret
let mut request = client.post("https://api.example.com/oauth/request_token").build()?;
signer.set_request_token_auth_header(&mut request)?;
let request_token = client
    .execute(request)
    .parse_oauth_token()
    .await?
    .into_request_token();

// step 2: let the user authorize and read the verifier
println!("please access to: {}", config.authorization_url(&request_token)?);
let mut pin = String::new();
io::stdin().read_line(&mut pin)?;

// step 3: exchange for the access token
let mut request = client.post("https://api.example.com/oauth/access_token").build()?;
signer.set_access_token_auth_header(&mut request, &request_token, pin.trim())?;
let token = client.execute(request).parse_oauth_token().await?.into_token();
println!("your token is: {}", token.token);
# Ok(())
# }
```
*/
mod base_string;
mod encode;
mod error;
mod header;
mod secrets;
mod signature;
mod signer;
mod source;
mod token_reader;

// exposed to external program
pub use base_string::{
    base_string_uri, build_signature_base, query_parameters, signature_base, verbatim_base_uri,
    OAuthParams,
};
pub use encode::{normalize_parameters, percent_encode, percent_encode_str};
pub use error::{Error, Result, SignError, SignResult, TokenReaderError, TokenReaderResult};
pub use header::{authorization_header, set_authorization_header, SignableRequest};
pub use secrets::{Config, Endpoint, RequestToken, Token, TokenSecretsProvider, OUT_OF_BAND_CALLBACK};
pub use signature::{sign, signing_key};
pub use signer::Signer;
pub use source::{
    ClockSource, NonceSource, OsNonce, StaticClock, StaticNonce, SystemClock, NONCE_LENGTH,
};
pub use token_reader::{TokenReader, TokenReaderFuture, TokenResponse};

// exposed constant variables
/// Represents `oauth_callback`.
pub const OAUTH_CALLBACK_KEY: &str = "oauth_callback";
/// Represents `oauth_consumer_key`.
pub const OAUTH_CONSUMER_KEY: &str = "oauth_consumer_key";
/// Represents `oauth_nonce`.
pub const OAUTH_NONCE_KEY: &str = "oauth_nonce";
/// Represents `oauth_signature`.
pub const OAUTH_SIGNATURE_KEY: &str = "oauth_signature";
/// Represents `oauth_signature_method`.
pub const OAUTH_SIGNATURE_METHOD_KEY: &str = "oauth_signature_method";
/// Represents `oauth_timestamp`.
pub const OAUTH_TIMESTAMP_KEY: &str = "oauth_timestamp";
/// Represents `oauth_token`.
pub const OAUTH_TOKEN_KEY: &str = "oauth_token";
/// Represents `oauth_verifier`.
pub const OAUTH_VERIFIER_KEY: &str = "oauth_verifier";
/// Represents `oauth_version`.
pub const OAUTH_VERSION_KEY: &str = "oauth_version";

/// The only supported `oauth_signature_method`.
pub const HMAC_SHA1: &str = "HMAC-SHA1";
/// Value of `oauth_version`.
pub const OAUTH_VERSION: &str = "1.0";
/// Scheme prefix of the `Authorization` header (trailing space included).
pub const AUTHORIZATION_PREFIX: &str = "OAuth ";
