//! Authorization header construction

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use reqwest::header::HeaderValue;

use crate::error::{ClientError, Result};

/// Pre-computed `Authorization` header value
///
/// Computed once from the credential and reused read-only for every request.
/// The value is marked sensitive so it never shows up in debug output.
#[derive(Clone)]
pub struct AuthHeader {
    value: HeaderValue,
}

impl AuthHeader {
    /// Build a Basic header from a personal access token
    ///
    /// The service expects an empty user name, so the encoded pair is `:<pat>`.
    pub fn from_pat(pat: &str) -> Result<Self> {
        let pat = pat.trim();
        if pat.is_empty() {
            return Err(ClientError::InvalidRequest(
                "personal access token is empty".to_string(),
            ));
        }
        let encoded = STANDARD.encode(format!(":{}", pat));
        Self::pre_encoded(format!("Basic {}", encoded))
    }

    /// Use an already encoded header value (e.g. `Basic ...` or `Bearer ...`)
    pub fn pre_encoded(value: impl AsRef<str>) -> Result<Self> {
        let mut value = HeaderValue::from_str(value.as_ref())
            .map_err(|e| ClientError::InvalidRequest(format!("invalid auth header: {}", e)))?;
        value.set_sensitive(true);
        Ok(Self { value })
    }

    pub(crate) fn header_value(&self) -> &HeaderValue {
        &self.value
    }
}

impl std::fmt::Debug for AuthHeader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AuthHeader(<redacted>)")
    }
}
