use std::{collections::HashMap, future::Future};

use async_trait::async_trait;
use reqwest::Response;
use serde::Deserialize;
use tracing::debug;

use crate::{Error, RequestToken, Result, Token, TokenReaderError, TokenReaderResult};

const OAUTH_TOKEN_KEY: &str = "oauth_token";

const OAUTH_TOKEN_SECRET_KEY: &str = "oauth_token_secret";

const OAUTH_CALLBACK_CONFIRMED_KEY: &str = "oauth_callback_confirmed";

/// Represents the form-encoded body returned by the request-token and
/// access-token endpoints.
#[derive(Deserialize, Debug)]
pub struct TokenResponse {
    /// OAuth Token
    pub oauth_token: String,
    /// OAuth Token Secret
    pub oauth_token_secret: String,
    /// Other contents
    #[serde(flatten)]
    pub remain: HashMap<String, String>,
}

impl TokenResponse {
    /// Parse a response body such as
    /// `oauth_token=...&oauth_token_secret=...&oauth_callback_confirmed=true`.
    pub fn parse(text: &str) -> TokenReaderResult<TokenResponse> {
        read_oauth_token(text.to_string())
    }

    /// Whether the provider acknowledged `oauth_callback` (RFC 5849 §2.1).
    pub fn oauth_callback_confirmed(&self) -> bool {
        self.remain
            .get(OAUTH_CALLBACK_CONFIRMED_KEY)
            .map_or(false, |v| v == "true")
    }

    /// Temporary credentials, to be exchanged in the access-token step.
    pub fn into_request_token(self) -> RequestToken {
        RequestToken::new(self.oauth_token, self.oauth_token_secret)
    }

    /// Token credentials for signing authenticated requests.
    pub fn into_token(self) -> Token {
        Token::new(self.oauth_token, self.oauth_token_secret)
    }
}

/// Add parse_oauth_token feature to reqwest::Response.
// this trait is sealed
#[async_trait(?Send)]
pub trait TokenReader: private::Sealed {
    async fn parse_oauth_token(self) -> Result<TokenResponse>;
}

#[async_trait(?Send)]
impl TokenReader for Response {
    async fn parse_oauth_token(self) -> Result<TokenResponse> {
        let text = self.error_for_status()?.text().await?;
        Ok(read_oauth_token(text)?)
    }
}

/// Add parse_oauth_token feature to Future of reqwest::Response.
// this trait is also sealed
#[async_trait(?Send)]
pub trait TokenReaderFuture: private::SealedWrapper {
    async fn parse_oauth_token(self) -> Result<TokenResponse>;
}

#[async_trait(?Send)]
impl<T, E> TokenReaderFuture for T
where
    T: Future<Output = std::result::Result<Response, E>>,
    E: Into<Error> + 'static,
{
    async fn parse_oauth_token(self) -> Result<TokenResponse> {
        match self.await {
            Ok(resp) => Ok(resp.parse_oauth_token().await?),
            Err(err) => Err(err.into()),
        }
    }
}

fn read_oauth_token(text: String) -> TokenReaderResult<TokenResponse> {
    let mut destructured = url::form_urlencoded::parse(text.as_bytes())
        .into_owned()
        .collect::<HashMap<String, String>>();
    let oauth_token = destructured.remove(OAUTH_TOKEN_KEY);
    let oauth_token_secret = destructured.remove(OAUTH_TOKEN_SECRET_KEY);
    match (oauth_token, oauth_token_secret) {
        (Some(t), Some(s)) => {
            debug!(extra_keys = destructured.len(), "parsed oauth token response");
            Ok(TokenResponse {
                oauth_token: t,
                oauth_token_secret: s,
                remain: destructured,
            })
        }
        (None, _) => Err(TokenReaderError::TokenKeyNotFound(OAUTH_TOKEN_KEY, text)),
        (_, _) => Err(TokenReaderError::TokenKeyNotFound(
            OAUTH_TOKEN_SECRET_KEY,
            text,
        )),
    }
}

mod private {
    use std::future::Future;

    use reqwest::Response;

    use crate::Error;

    pub trait Sealed {}
    impl Sealed for Response {}
    pub trait SealedWrapper {}
    impl<T, E> SealedWrapper for T
    where
        T: Future<Output = Result<Response, E>>,
        E: Into<Error>,
    {
    }
}

#[cfg(test)]
mod test {

    use super::*;

    fn response(status: u16, body: &'static str) -> Response {
        http::Response::builder()
            .status(status)
            .body(body)
            .unwrap()
            .into()
    }

    #[test]
    fn parse_response_typical() {
        let resp_str_sample = "oauth_token=Z6eEdO8MOmk394WozF5oKyuAv855l4Mlqo7hhlSLik&oauth_token_secret=Kd75W4OQfb2oJTV0vzGzeXftVAwgMnEK9MumzYcM&oauth_callback_confirmed=true";
        for parsed in &[
            TokenResponse::parse(resp_str_sample).unwrap(),
            serde_urlencoded::from_str::<TokenResponse>(resp_str_sample).unwrap(),
        ] {
            assert_eq!(
                parsed.oauth_token,
                "Z6eEdO8MOmk394WozF5oKyuAv855l4Mlqo7hhlSLik"
            );
            assert_eq!(
                parsed.oauth_token_secret,
                "Kd75W4OQfb2oJTV0vzGzeXftVAwgMnEK9MumzYcM"
            );
            assert_eq!(parsed.remain.len(), 1);
            assert!(parsed.oauth_callback_confirmed());
        }
    }

    #[test]
    fn parse_response_edge() {
        let resp_str_sample = "oauth_token==&oauth_token_secret=&keyonly=&keyonly2&=&&";
        for parsed in &[
            TokenResponse::parse(resp_str_sample).unwrap(),
            serde_urlencoded::from_str::<TokenResponse>(resp_str_sample).unwrap(),
        ] {
            assert_eq!(parsed.oauth_token, "=");
            assert_eq!(parsed.oauth_token_secret, "");
            assert_eq!(parsed.remain.len(), 3);
            let keyonly = parsed.remain.get("keyonly").unwrap();
            assert_eq!(keyonly, "");
            let keyonly2 = parsed.remain.get("keyonly2").unwrap();
            assert_eq!(keyonly2, "");
            let empty = parsed.remain.get("").unwrap();
            assert_eq!(empty, "");
            assert!(!parsed.oauth_callback_confirmed());
        }
    }

    #[test]
    fn parse_decodes_values() {
        let parsed = TokenResponse::parse("oauth_token=a%2Bb&oauth_token_secret=c+d").unwrap();
        assert_eq!(parsed.oauth_token, "a+b");
        assert_eq!(parsed.oauth_token_secret, "c d");
    }

    #[test]
    fn parse_minimal() {
        let parsed = TokenResponse::parse("oauth_token&oauth_token_secret").unwrap();
        assert_eq!(parsed.oauth_token, "");
        assert_eq!(parsed.oauth_token_secret, "");
        assert_eq!(parsed.remain.len(), 0);
    }

    #[test]
    fn parse_token_notfound() {
        let resp_str_sample = "oauth_token_secret=";
        let parsed = TokenResponse::parse(resp_str_sample);
        if let Err(TokenReaderError::TokenKeyNotFound(key, resp_str)) = parsed {
            assert_eq!(key, OAUTH_TOKEN_KEY);
            assert_eq!(resp_str, resp_str_sample)
        } else {
            panic!("expected missing oauth_token, got {:?}", parsed)
        }
    }

    #[test]
    fn parse_token_secret_notfound() {
        let resp_str_sample = "oauth_token=";
        let parsed = TokenResponse::parse(resp_str_sample);
        if let Err(TokenReaderError::TokenKeyNotFound(key, resp_str)) = parsed {
            assert_eq!(key, OAUTH_TOKEN_SECRET_KEY);
            assert_eq!(resp_str, resp_str_sample)
        } else {
            panic!("expected missing oauth_token_secret, got {:?}", parsed)
        }
    }

    #[test]
    fn converts_into_tokens() {
        let body = "oauth_token=hh5s93j4hdidpola&oauth_token_secret=hdhd0244k9j7ao03";
        let request_token = TokenResponse::parse(body).unwrap().into_request_token();
        assert_eq!(
            request_token,
            RequestToken::new("hh5s93j4hdidpola", "hdhd0244k9j7ao03")
        );
        let token = TokenResponse::parse(body).unwrap().into_token();
        assert_eq!(token, Token::new("hh5s93j4hdidpola", "hdhd0244k9j7ao03"));
    }

    #[tokio::test]
    async fn reads_response_body() {
        let resp = response(
            200,
            "oauth_token=nnch734d00sl2jdk&oauth_token_secret=pfkkdhi9sl3r4s00",
        );
        let parsed = resp.parse_oauth_token().await.unwrap();
        assert_eq!(parsed.into_token(), Token::new("nnch734d00sl2jdk", "pfkkdhi9sl3r4s00"));
    }

    #[tokio::test]
    async fn reads_response_future() {
        let fut = async {
            Ok::<_, reqwest::Error>(response(
                200,
                "oauth_token=t&oauth_token_secret=s&oauth_callback_confirmed=true",
            ))
        };
        let parsed = fut.parse_oauth_token().await.unwrap();
        assert!(parsed.oauth_callback_confirmed());
    }

    #[tokio::test]
    async fn error_status_is_not_parsed() {
        let resp = response(401, "oauth_problem=signature_invalid");
        let result = resp.parse_oauth_token().await;
        assert!(matches!(result, Err(Error::Reqwest(_))));
    }
}
