//! Password Service
//!
//! One-way salted password hashing and verification on top of bcrypt. The
//! salt and cost factor are embedded in the output, so hashes produced at
//! older cost factors keep verifying after the cost is raised.

use tracing::error;

use crate::error::{IdentityError, Result};

/// Length of a bcrypt hash string.
pub const HASH_LEN: usize = 60;

/// Default bcrypt cost factor.
///
/// Deliberately above bcrypt's default: brute-force resistance is worth the
/// per-request latency here.
pub const DEFAULT_COST: u32 = 12;

#[derive(Debug, Clone)]
pub struct PasswordService {
    cost: u32,
}

impl Default for PasswordService {
    fn default() -> Self {
        Self::with_cost(DEFAULT_COST)
    }
}

impl PasswordService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cost(cost: u32) -> Self {
        Self { cost }
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Hash a plaintext password into a self-contained 60-character digest.
    ///
    /// Failure here (e.g. the entropy source is unavailable) is fatal to the
    /// enclosing call and propagated, not retried.
    pub fn hash(&self, plaintext: &str) -> Result<String> {
        bcrypt::hash(plaintext, self.cost).map_err(|e| {
            error!(error = %e, "password hashing failed");
            IdentityError::HashingFailed
        })
    }

    /// Check a plaintext password against a stored hash.
    ///
    /// Never errors: a malformed stored hash counts as a mismatch.
    pub fn verify(&self, plaintext: &str, hash: &str) -> bool {
        bcrypt::verify(plaintext, hash).unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> PasswordService {
        PasswordService::with_cost(4)
    }

    #[test]
    fn test_hash_output_shape() {
        let hash = service().hash("Password1").unwrap();
        assert_eq!(hash.len(), HASH_LEN);
        assert_ne!(hash, "Password1");
    }

    #[test]
    fn test_verify_roundtrip() {
        let svc = service();
        let hash = svc.hash("Password1").unwrap();

        assert!(svc.verify("Password1", &hash));
        assert!(!svc.verify("Password2", &hash));
    }

    #[test]
    fn test_hashes_are_salted() {
        let svc = service();
        let a = svc.hash("Password1").unwrap();
        let b = svc.hash("Password1").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_verify_malformed_hash_is_false() {
        assert!(!service().verify("Password1", "not-a-bcrypt-hash"));
        assert!(!service().verify("Password1", ""));
    }

    #[test]
    fn test_old_cost_hashes_still_verify() {
        // The cost factor is embedded in the hash, so raising the service
        // cost must not break verification of existing hashes.
        let old = PasswordService::with_cost(4).hash("Password1").unwrap();
        assert!(PasswordService::with_cost(5).verify("Password1", &old));
    }
}
