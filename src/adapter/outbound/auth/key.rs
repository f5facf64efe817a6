//! Private key loading.
//!
//! Keys reach the process through environment variables and `.env` files,
//! which mangle PEM text in predictable ways. [`Credential::resolve`] is the
//! single place that repairs those artifacts; everything downstream only
//! ever sees a parsed, validated key.

use std::fmt;
use std::path::{Path, PathBuf};

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use rsa::pkcs1::DecodeRsaPrivateKey;
use rsa::pkcs8::DecodePrivateKey;
use rsa::traits::PublicKeyParts;
use rsa::RsaPrivateKey;
use tracing::debug;

use crate::error::AuthError;

const ENV_PREFIX: &str = "env:";

/// Where to find the private key, tried in field order.
#[derive(Debug, Clone, Default)]
pub struct KeySource {
    /// PEM text, or `env:NAME` to read it from a variable.
    pub inline: Option<String>,
    /// Name of an environment variable holding the PEM text.
    pub env: Option<String>,
    /// Path to a PEM or DER file.
    pub path: Option<PathBuf>,
}

impl KeySource {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inline.is_none() && self.env.is_none() && self.path.is_none()
    }
}

/// API key id plus a validated RSA private key.
#[derive(Clone)]
pub struct Credential {
    key_id: String,
    private_key: RsaPrivateKey,
}

impl Credential {
    #[must_use]
    pub fn new(key_id: impl Into<String>, private_key: RsaPrivateKey) -> Self {
        Self {
            key_id: key_id.into(),
            private_key,
        }
    }

    /// Parse a credential from PEM (or base64 DER) text.
    pub fn from_pem(key_id: impl Into<String>, text: &str) -> Result<Self, AuthError> {
        Ok(Self::new(key_id, parse_private_key(text)?))
    }

    /// Resolve a credential from the first configured key source.
    ///
    /// `lookup` reads environment variables; it is injected so callers can
    /// supply values loaded from `.env` files or fixed test values.
    pub fn resolve<F>(key_id: impl Into<String>, source: &KeySource, lookup: F) -> Result<Self, AuthError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let key_id = key_id.into();
        if key_id.trim().is_empty() {
            return Err(AuthError::KeyFormat {
                reason: "key id is empty".into(),
            });
        }

        if let Some(inline) = source.inline.as_deref() {
            let text = match strip_quotes(inline.trim()).strip_prefix(ENV_PREFIX) {
                Some(name) => lookup_env(name.trim(), &lookup)?,
                None => inline.to_string(),
            };
            debug!(key_id = %key_id, source = "inline", "Loading private key");
            return Self::from_pem(key_id, &text);
        }

        if let Some(name) = source.env.as_deref() {
            let text = lookup_env(name, &lookup)?;
            debug!(key_id = %key_id, source = "env", var = name, "Loading private key");
            return Self::from_pem(key_id, &text);
        }

        if let Some(path) = source.path.as_deref() {
            debug!(key_id = %key_id, source = "file", path = %path.display(), "Loading private key");
            return Ok(Self::new(key_id, read_key_file(path)?));
        }

        Err(AuthError::KeyFormat {
            reason: "no private key source configured".into(),
        })
    }

    /// Get the API key id.
    #[must_use]
    pub fn key_id(&self) -> &str {
        &self.key_id
    }

    #[must_use]
    pub fn private_key(&self) -> &RsaPrivateKey {
        &self.private_key
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("key_id", &self.key_id)
            .field("private_key", &format_args!("<{}-bit RSA key>", self.private_key.size() * 8))
            .finish()
    }
}

/// Look up `name`, falling back to the `env:NAME` spelling some hosts use.
fn lookup_env<F>(name: &str, lookup: &F) -> Result<String, AuthError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name)
        .or_else(|| lookup(&format!("{ENV_PREFIX}{name}")))
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| AuthError::KeyFormat {
            reason: format!("environment variable {name} is not set"),
        })
}

fn read_key_file(path: &Path) -> Result<RsaPrivateKey, AuthError> {
    let bytes = std::fs::read(path).map_err(|err| AuthError::KeyFormat {
        reason: format!("cannot read {}: {err}", path.display()),
    })?;
    match std::str::from_utf8(&bytes) {
        Ok(text) => parse_private_key(text),
        Err(_) => parse_der(&bytes, None),
    }
}

/// Parse PEM or base64 DER text, repairing transport artifacts first.
pub fn parse_private_key(text: &str) -> Result<RsaPrivateKey, AuthError> {
    let text = strip_quotes(text.trim())
        .replace("\\r", "")
        .replace("\\n", "\n")
        .replace("\r\n", "\n");

    let (label, body) = match split_pem(&text) {
        Some((label, body)) => (Some(label), body),
        None => (None, text.as_str()),
    };

    let compact: String = body.chars().filter(|c| !c.is_whitespace()).collect();
    if compact.is_empty() {
        return Err(AuthError::KeyFormat {
            reason: "key is empty".into(),
        });
    }
    let der = STANDARD.decode(compact.as_bytes()).map_err(|err| AuthError::KeyFormat {
        reason: format!("key body is not valid base64: {err}"),
    })?;

    parse_der(&der, label)
}

fn parse_der(der: &[u8], label: Option<&str>) -> Result<RsaPrivateKey, AuthError> {
    if let Some(label) = label {
        if label.contains("ENCRYPTED") {
            return Err(AuthError::KeyFormat {
                reason: "encrypted private keys are not supported".into(),
            });
        }
        if !label.contains("PRIVATE KEY") {
            return Err(AuthError::KeyFormat {
                reason: format!("expected a private key, found {label}"),
            });
        }
    }

    let pkcs1_first = label == Some("RSA PRIVATE KEY");
    let parsed = if pkcs1_first {
        RsaPrivateKey::from_pkcs1_der(der)
            .ok()
            .or_else(|| RsaPrivateKey::from_pkcs8_der(der).ok())
    } else {
        RsaPrivateKey::from_pkcs8_der(der)
            .ok()
            .or_else(|| RsaPrivateKey::from_pkcs1_der(der).ok())
    };

    let key = parsed.ok_or_else(|| AuthError::KeyFormat {
        reason: "not an RSA private key in PKCS#1 or PKCS#8 form".into(),
    })?;
    key.validate().map_err(|err| AuthError::KeyFormat {
        reason: format!("key failed validation: {err}"),
    })?;
    Ok(key)
}

/// Split `-----BEGIN X-----body-----END X-----` into label and body.
///
/// Works on single-line PEM where newlines were collapsed into spaces.
fn split_pem(text: &str) -> Option<(&str, &str)> {
    let after_begin = &text[text.find("-----BEGIN ")? + "-----BEGIN ".len()..];
    let label_end = after_begin.find("-----")?;
    let label = after_begin[..label_end].trim();
    let rest = &after_begin[label_end + "-----".len()..];
    let body_end = rest.find("-----END").unwrap_or(rest.len());
    Some((label, &rest[..body_end]))
}

fn strip_quotes(mut text: &str) -> &str {
    loop {
        let trimmed = text.trim();
        let stripped = trimmed
            .strip_prefix('"')
            .and_then(|t| t.strip_suffix('"'))
            .or_else(|| trimmed.strip_prefix('\'').and_then(|t| t.strip_suffix('\'')));
        match stripped {
            Some(inner) => text = inner,
            None => return trimmed,
        }
    }
}
