//! Request signing.
//!
//! The canonical message is the millisecond timestamp, the uppercase HTTP
//! method and the request path concatenated without separators, e.g.
//! `1700000000000GET/trade-api/v2/markets`. Query strings are never signed.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use chrono::Utc;
use rsa::signature::{RandomizedSigner, SignatureEncoding, Signer};
use rsa::{pkcs1v15, pss};
use serde::Deserialize;
use sha2::Sha256;

use super::key::Credential;
use crate::error::AuthError;

/// RSA padding scheme, pinned per venue.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignatureScheme {
    /// RSA-PSS, MGF1(SHA-256), salt length equal to the digest length.
    #[default]
    Pss,
    /// PKCS#1 v1.5 with SHA-256.
    Pkcs1v15,
}

/// Header names carrying the authentication tuple.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HeaderNames {
    pub key_id: String,
    pub signature: String,
    pub timestamp: String,
}

impl HeaderNames {
    /// Venue-neutral header names.
    #[must_use]
    pub fn generic() -> Self {
        Self {
            key_id: "ACCESS-KEY-ID".into(),
            signature: "ACCESS-SIGNATURE".into(),
            timestamp: "ACCESS-TIMESTAMP".into(),
        }
    }

    /// Header names expected by Kalshi.
    #[must_use]
    pub fn kalshi() -> Self {
        Self {
            key_id: "KALSHI-ACCESS-KEY".into(),
            signature: "KALSHI-ACCESS-SIGNATURE".into(),
            timestamp: "KALSHI-ACCESS-TIMESTAMP".into(),
        }
    }
}

impl Default for HeaderNames {
    fn default() -> Self {
        Self::generic()
    }
}

/// Authentication values for one outbound request. Never reused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedRequestHeaders {
    pub access_key_id: String,
    /// Base64 (standard, padded) raw signature bytes.
    pub signature: String,
    /// Milliseconds since the Unix epoch, as a decimal string.
    pub timestamp: String,
}

enum SigningKey {
    Pss(pss::BlindedSigningKey<Sha256>),
    Pkcs1v15(pkcs1v15::SigningKey<Sha256>),
}

/// Signs outbound requests for one authenticated venue.
///
/// Owns the venue's [`Credential`]; the key never leaves this type.
pub struct RequestSigner {
    key_id: String,
    scheme: SignatureScheme,
    headers: HeaderNames,
    signing_key: SigningKey,
}

impl RequestSigner {
    #[must_use]
    pub fn new(credential: Credential, scheme: SignatureScheme, headers: HeaderNames) -> Self {
        let private_key = credential.private_key().clone();
        let signing_key = match scheme {
            SignatureScheme::Pss => SigningKey::Pss(pss::BlindedSigningKey::new(private_key)),
            SignatureScheme::Pkcs1v15 => SigningKey::Pkcs1v15(pkcs1v15::SigningKey::new(private_key)),
        };
        Self {
            key_id: credential.key_id().to_string(),
            scheme,
            headers,
            signing_key,
        }
    }

    #[must_use]
    pub fn scheme(&self) -> SignatureScheme {
        self.scheme
    }

    #[must_use]
    pub fn header_names(&self) -> &HeaderNames {
        &self.headers
    }

    /// Sign a request made at `timestamp_ms`.
    pub fn sign(&self, method: &str, path: &str, timestamp_ms: i64) -> Result<SignedRequestHeaders, AuthError> {
        let message = canonical_message(timestamp_ms, method, path);
        let raw = match &self.signing_key {
            SigningKey::Pss(key) => key
                .try_sign_with_rng(&mut rand::thread_rng(), message.as_bytes())
                .map(|sig| sig.to_vec()),
            SigningKey::Pkcs1v15(key) => key.try_sign(message.as_bytes()).map(|sig| sig.to_vec()),
        }
        .map_err(|err| AuthError::Signing(err.to_string()))?;

        Ok(SignedRequestHeaders {
            access_key_id: self.key_id.clone(),
            signature: STANDARD.encode(raw),
            timestamp: timestamp_ms.to_string(),
        })
    }

    /// Sign a request made now.
    pub fn sign_now(&self, method: &str, path: &str) -> Result<SignedRequestHeaders, AuthError> {
        self.sign(method, path, Utc::now().timestamp_millis())
    }

    /// Header name/value pairs ready to attach to a request.
    #[must_use]
    pub fn header_pairs<'a>(&'a self, signed: &'a SignedRequestHeaders) -> [(&'a str, &'a str); 3] {
        [
            (self.headers.key_id.as_str(), signed.access_key_id.as_str()),
            (self.headers.signature.as_str(), signed.signature.as_str()),
            (self.headers.timestamp.as_str(), signed.timestamp.as_str()),
        ]
    }
}

impl std::fmt::Debug for RequestSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestSigner")
            .field("key_id", &self.key_id)
            .field("scheme", &self.scheme)
            .field("headers", &self.headers)
            .finish_non_exhaustive()
    }
}

/// Build the string that gets signed.
#[must_use]
pub fn canonical_message(timestamp_ms: i64, method: &str, path: &str) -> String {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    format!("{timestamp_ms}{}{path}", method.to_ascii_uppercase())
}
