//! Token Service
//!
//! Issues and verifies the signed bearer tokens (JWT, RS512) that stand in
//! for a password on subsequent requests. Tokens are stateless: the claims
//! exist only inside the token string and are reconstructed by verification.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::error::{IdentityError, Result};

/// Issuer claim stamped into every token.
pub const DEFAULT_ISSUER: &str = "tasktrack";

/// Audience claim stamped into every token.
pub const DEFAULT_AUDIENCE: &str = "users";

/// Default token lifetime in seconds (2 hours).
pub const DEFAULT_LIFETIME_SECS: i64 = 2 * 60 * 60;

/// Decoded payload of a bearer token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessTokenClaims {
    /// Subject: the account id the token vouches for.
    pub sub: i64,
    /// Issuer.
    pub iss: String,
    /// Audience.
    pub aud: String,
    /// Issued at (Unix timestamp).
    pub iat: i64,
    /// Expiration time (Unix timestamp).
    pub exp: i64,
}

/// Token issuance parameters.
#[derive(Debug, Clone)]
pub struct TokenConfig {
    pub issuer: String,
    pub audience: String,
    pub lifetime: Duration,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            issuer: DEFAULT_ISSUER.to_string(),
            audience: DEFAULT_AUDIENCE.to_string(),
            lifetime: Duration::seconds(DEFAULT_LIFETIME_SECS),
        }
    }
}

impl TokenConfig {
    pub fn with_lifetime(mut self, lifetime: Duration) -> Self {
        self.lifetime = lifetime;
        self
    }
}

/// Signs and verifies access tokens with a fixed RSA key pair.
///
/// The key pair is injected at construction, held for the life of the
/// process, and never mutated - concurrent use needs no locking.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    config: TokenConfig,
}

impl TokenService {
    /// Build a token service from PEM-encoded RSA keys.
    pub fn new(private_key_pem: &[u8], public_key_pem: &[u8], config: TokenConfig) -> Result<Self> {
        let encoding_key = EncodingKey::from_rsa_pem(private_key_pem)
            .map_err(|e| IdentityError::configuration(format!("invalid private key: {}", e)))?;
        let decoding_key = DecodingKey::from_rsa_pem(public_key_pem)
            .map_err(|e| IdentityError::configuration(format!("invalid public key: {}", e)))?;

        // Only RS512 is accepted; a token whose header declares any other
        // algorithm (including "none") fails verification outright.
        let mut validation = Validation::new(Algorithm::RS512);
        validation.leeway = 0;
        validation.set_issuer(&[&config.issuer]);
        validation.set_audience(&[&config.audience]);

        Ok(Self {
            encoding_key,
            decoding_key,
            validation,
            config,
        })
    }

    /// Issue a signed token vouching for the given account id.
    pub fn issue(&self, subject_id: i64) -> Result<String> {
        let now = Utc::now().timestamp();
        let claims = AccessTokenClaims {
            sub: subject_id,
            iss: self.config.issuer.clone(),
            aud: self.config.audience.clone(),
            iat: now,
            exp: now + self.config.lifetime.num_seconds(),
        };

        encode(&Header::new(Algorithm::RS512), &claims, &self.encoding_key).map_err(|e| {
            error!(error = %e, "signing access token failed");
            IdentityError::SigningFailed
        })
    }

    /// Verify a token string and reconstruct its claims.
    ///
    /// Structural parse failures, algorithm mismatches, and bad signatures
    /// all yield `InvalidToken`; a well-formed but expired token yields the
    /// distinct `TokenInvalidated` so callers can tell "re-authenticate"
    /// from "malformed request".
    pub fn verify(&self, token: &str) -> Result<AccessTokenClaims> {
        match decode::<AccessTokenClaims>(token, &self.decoding_key, &self.validation) {
            Ok(data) => Ok(data.claims),
            Err(e) => match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    debug!("access token expired");
                    Err(IdentityError::TokenInvalidated)
                }
                _ => {
                    debug!(error = %e, "access token rejected");
                    Err(IdentityError::invalid_token(e.to_string()))
                }
            },
        }
    }

    pub fn lifetime(&self) -> Duration {
        self.config.lifetime
    }
}

/// Extract the token from an `Authorization: Bearer <token>` header value.
pub fn extract_bearer_token(header: &str) -> Option<&str> {
    header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}
