use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD as BASE64_URL};
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::domain::errors::DomainError;
use crate::domain::models::session::SessionClaims;

type HmacSha256 = Hmac<Sha256>;

/// Name of the cookie carrying the admin session token
pub const SESSION_COOKIE: &str = "session";

/// Signs and verifies `payload.signature` session tokens.
///
/// Both halves are unpadded URL-safe base64; the payload is the JSON encoding
/// of `SessionClaims` and the signature is HMAC-SHA256 over the encoded payload.
pub struct SessionSigner {
    key: Vec<u8>,
}

impl SessionSigner {
    pub fn new(secret: &str) -> Self {
        Self {
            key: secret.as_bytes().to_vec(),
        }
    }

    fn mac(&self) -> Result<HmacSha256, DomainError> {
        HmacSha256::new_from_slice(&self.key)
            .map_err(|e| DomainError::InternalError(format!("Invalid session key: {}", e)))
    }

    /// Sign claims into a cookie value
    pub fn issue(&self, claims: &SessionClaims) -> Result<String, DomainError> {
        let payload = serde_json::to_vec(claims)
            .map_err(|e| DomainError::InternalError(format!("Failed to encode session: {}", e)))?;
        let encoded = BASE64_URL.encode(payload);

        let mut mac = self.mac()?;
        mac.update(encoded.as_bytes());
        let signature = BASE64_URL.encode(mac.finalize().into_bytes());

        Ok(format!("{}.{}", encoded, signature))
    }

    /// Check the signature and expiry of a cookie value
    pub fn verify(&self, token: &str, now: DateTime<Utc>) -> Result<SessionClaims, DomainError> {
        let rejected = |reason: &str| DomainError::AuthenticationError(reason.to_string());

        let (encoded, signature) = token
            .trim()
            .split_once('.')
            .ok_or_else(|| rejected("Malformed session token"))?;
        let signature = BASE64_URL
            .decode(signature)
            .map_err(|_| rejected("Malformed session signature"))?;

        let mut mac = self.mac()?;
        mac.update(encoded.as_bytes());
        mac.verify_slice(&signature)
            .map_err(|_| rejected("Invalid session signature"))?;

        let payload = BASE64_URL
            .decode(encoded)
            .map_err(|_| rejected("Malformed session payload"))?;
        let claims: SessionClaims =
            serde_json::from_slice(&payload).map_err(|_| rejected("Malformed session payload"))?;

        if claims.is_expired_at(now) {
            return Err(rejected("Session expired"));
        }

        Ok(claims)
    }
}
