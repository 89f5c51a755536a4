//! Identity Configuration
//!
//! Process-boundary configuration for the subsystem: the RSA signing key
//! pair, token parameters, and the bcrypt cost factor. Built explicitly or
//! from environment variables; the resulting services hold the keys for the
//! life of the process.

use std::fs;

use chrono::Duration;

use crate::error::{IdentityError, Result};
use crate::service::password::{PasswordService, DEFAULT_COST};
use crate::service::token::{
    TokenConfig, TokenService, DEFAULT_AUDIENCE, DEFAULT_ISSUER, DEFAULT_LIFETIME_SECS,
};

#[derive(Debug, Clone)]
pub struct IdentityConfig {
    /// PEM-encoded RSA private key used for signing.
    pub private_key_pem: String,
    /// PEM-encoded RSA public key used for verification.
    pub public_key_pem: String,
    pub token_issuer: String,
    pub token_audience: String,
    pub token_lifetime_secs: i64,
    pub bcrypt_cost: u32,
}

impl IdentityConfig {
    pub fn new(private_key_pem: impl Into<String>, public_key_pem: impl Into<String>) -> Self {
        Self {
            private_key_pem: private_key_pem.into(),
            public_key_pem: public_key_pem.into(),
            token_issuer: DEFAULT_ISSUER.to_string(),
            token_audience: DEFAULT_AUDIENCE.to_string(),
            token_lifetime_secs: DEFAULT_LIFETIME_SECS,
            bcrypt_cost: DEFAULT_COST,
        }
    }

    /// Read configuration from environment variables.
    ///
    /// `IDENTITY_PRIVATE_KEY_FILE` / `IDENTITY_PUBLIC_KEY_FILE` name PEM
    /// files on disk; optional overrides: `IDENTITY_TOKEN_ISSUER`,
    /// `IDENTITY_TOKEN_AUDIENCE`, `IDENTITY_TOKEN_LIFETIME_SECS`,
    /// `IDENTITY_BCRYPT_COST`.
    pub fn from_env() -> Result<Self> {
        let private_path = std::env::var("IDENTITY_PRIVATE_KEY_FILE").map_err(|_| {
            IdentityError::configuration("IDENTITY_PRIVATE_KEY_FILE is not set")
        })?;
        let public_path = std::env::var("IDENTITY_PUBLIC_KEY_FILE").map_err(|_| {
            IdentityError::configuration("IDENTITY_PUBLIC_KEY_FILE is not set")
        })?;

        let private_key_pem = fs::read_to_string(&private_path).map_err(|e| {
            IdentityError::configuration(format!("cannot read {}: {}", private_path, e))
        })?;
        let public_key_pem = fs::read_to_string(&public_path).map_err(|e| {
            IdentityError::configuration(format!("cannot read {}: {}", public_path, e))
        })?;

        let mut config = Self::new(private_key_pem, public_key_pem);

        if let Ok(issuer) = std::env::var("IDENTITY_TOKEN_ISSUER") {
            config.token_issuer = issuer;
        }
        if let Ok(audience) = std::env::var("IDENTITY_TOKEN_AUDIENCE") {
            config.token_audience = audience;
        }
        if let Ok(lifetime) = std::env::var("IDENTITY_TOKEN_LIFETIME_SECS") {
            config.token_lifetime_secs = lifetime.parse().map_err(|_| {
                IdentityError::configuration("IDENTITY_TOKEN_LIFETIME_SECS must be an integer")
            })?;
        }
        if let Ok(cost) = std::env::var("IDENTITY_BCRYPT_COST") {
            config.bcrypt_cost = cost.parse().map_err(|_| {
                IdentityError::configuration("IDENTITY_BCRYPT_COST must be an integer")
            })?;
        }

        Ok(config)
    }

    pub fn token_config(&self) -> TokenConfig {
        TokenConfig {
            issuer: self.token_issuer.clone(),
            audience: self.token_audience.clone(),
            lifetime: Duration::seconds(self.token_lifetime_secs),
        }
    }

    /// Build the token service; fails on malformed key material.
    pub fn token_service(&self) -> Result<TokenService> {
        TokenService::new(
            self.private_key_pem.as_bytes(),
            self.public_key_pem.as_bytes(),
            self.token_config(),
        )
    }

    pub fn password_service(&self) -> PasswordService {
        PasswordService::with_cost(self.bcrypt_cost)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = IdentityConfig::new("pk", "pub");
        assert_eq!(config.token_issuer, DEFAULT_ISSUER);
        assert_eq!(config.token_audience, DEFAULT_AUDIENCE);
        assert_eq!(config.token_lifetime_secs, DEFAULT_LIFETIME_SECS);
        assert_eq!(config.bcrypt_cost, DEFAULT_COST);
    }

    #[test]
    fn test_bad_key_material_fails_construction() {
        let config = IdentityConfig::new("not-a-pem", "not-a-pem");
        assert!(matches!(
            config.token_service(),
            Err(IdentityError::Configuration { .. })
        ));
    }

    #[test]
    fn test_from_env_requires_key_paths() {
        // Keys not set in the test environment.
        std::env::remove_var("IDENTITY_PRIVATE_KEY_FILE");
        assert!(matches!(
            IdentityConfig::from_env(),
            Err(IdentityError::Configuration { .. })
        ));
    }
}
