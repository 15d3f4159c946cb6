//! Email token derivation.
//!
//! A token is the base64 encoding of a digest over the salt followed by the
//! resource path. It binds a render request to the path it asks for and is
//! recomputed for every request.
//!
//! The default digest is MD5, which is fast and not collision resistant: the
//! token is only suitable as an internal correlation value. Deployments that
//! rely on it as a credential should switch to [`TokenDigest::HmacSha256`],
//! which keeps the same header and token shape.

use std::fmt;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;

/// Name of the request header carrying the token.
pub const EMAIL_TOKEN_HEADER: &str = "email-token";

type HmacSha256 = Hmac<Sha256>;

/// Digest used to derive tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TokenDigest {
    /// `base64(md5(salt + path))`.
    #[default]
    Md5,
    /// `base64(hmac_sha256(key = salt, msg = path))`.
    HmacSha256,
}

/// Opaque, path-bound token value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailToken(String);

impl EmailToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for EmailToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for EmailToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Computes `base64(md5(salt + path))` over the UTF-8 bytes of the concatenation.
///
/// An empty salt is valid.
pub fn derive(salt: &str, path: &str) -> EmailToken {
    let mut input = String::with_capacity(salt.len() + path.len());
    input.push_str(salt);
    input.push_str(path);
    let digest = md5::compute(input.as_bytes());
    EmailToken(STANDARD.encode(digest.0))
}

/// Computes `base64(hmac_sha256(salt, path))`.
pub fn derive_hmac_sha256(salt: &str, path: &str) -> EmailToken {
    let mut mac = HmacSha256::new_from_slice(salt.as_bytes())
        .expect("HMAC accepts keys of any length");
    mac.update(path.as_bytes());
    EmailToken(STANDARD.encode(mac.finalize().into_bytes()))
}

/// Formats a secret as `<redacted>`, or `<empty>` when it is unset.
pub(crate) struct Redacted<'a>(pub(crate) &'a str);

impl fmt::Debug for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            f.write_str("<empty>")
        } else {
            f.write_str("<redacted>")
        }
    }
}

/// Process-wide token settings: the salt and the digest to apply.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct TokenDeriver {
    salt: String,
    digest: TokenDigest,
}

impl fmt::Debug for TokenDeriver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenDeriver")
            .field("salt", &Redacted(&self.salt))
            .field("digest", &self.digest)
            .finish()
    }
}

impl TokenDeriver {
    pub fn new(salt: impl Into<String>, digest: TokenDigest) -> Self {
        Self {
            salt: salt.into(),
            digest,
        }
    }

    pub fn digest(&self) -> TokenDigest {
        self.digest
    }

    pub fn derive(&self, path: &str) -> EmailToken {
        match self.digest {
            TokenDigest::Md5 => derive(&self.salt, path),
            TokenDigest::HmacSha256 => derive_hmac_sha256(&self.salt, path),
        }
    }
}
