//! Sources of `oauth_nonce` and `oauth_timestamp` values.
//!
//! Both are injected into [`Signer`](crate::Signer) so signing stays
//! deterministic under test. Implementations must be shareable between
//! threads, since one signer may serve any number of concurrent callers.

use std::borrow::Cow;
use std::time::{SystemTime, UNIX_EPOCH};

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use rand::rngs::OsRng;
use rand::RngCore;

use crate::{SignError, SignResult};

/// Number of random bytes behind each generated nonce.
pub const NONCE_LENGTH: usize = 32;

/// Produces a fresh `oauth_nonce` for every signing call.
pub trait NonceSource: Send + Sync {
    fn nonce(&self) -> SignResult<String>;
}

/// Produces the `oauth_timestamp` (seconds since the unix epoch).
pub trait ClockSource: Send + Sync {
    fn timestamp(&self) -> SignResult<u64>;
}

/// Nonce source backed by the operating system's CSPRNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsNonce;

impl NonceSource for OsNonce {
    fn nonce(&self) -> SignResult<String> {
        let mut bytes = [0u8; NONCE_LENGTH];
        OsRng
            .try_fill_bytes(&mut bytes)
            .map_err(|e| SignError::RandomSource(e.to_string()))?;
        Ok(BASE64.encode(bytes))
    }
}

/// Wall clock backed by [`SystemTime`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl ClockSource for SystemClock {
    fn timestamp(&self) -> SignResult<u64> {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .map_err(|_| SignError::ClockBeforeEpoch)
    }
}

/// Always yields the same nonce. Intended for tests and reproducible fixtures.
#[derive(Debug, Clone)]
pub struct StaticNonce<'a>(pub Cow<'a, str>);

impl<'a> StaticNonce<'a> {
    pub fn new<T>(nonce: T) -> Self
    where
        T: Into<Cow<'a, str>>,
    {
        StaticNonce(nonce.into())
    }
}

impl NonceSource for StaticNonce<'_> {
    fn nonce(&self) -> SignResult<String> {
        Ok(self.0.to_string())
    }
}

/// Always yields the same timestamp.
#[derive(Debug, Clone, Copy)]
pub struct StaticClock(pub u64);

impl ClockSource for StaticClock {
    fn timestamp(&self) -> SignResult<u64> {
        Ok(self.0)
    }
}
