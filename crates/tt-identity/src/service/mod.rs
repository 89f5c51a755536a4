//! Service Layer
//!
//! Password hashing, token issuance/verification, and the identity
//! orchestrator that ties them to the storage collaborator.

pub mod identity;
pub mod password;
pub mod token;

pub use identity::IdentityService;
pub use password::{PasswordService, DEFAULT_COST, HASH_LEN};
pub use token::{
    extract_bearer_token, AccessTokenClaims, TokenConfig, TokenService, DEFAULT_AUDIENCE,
    DEFAULT_ISSUER, DEFAULT_LIFETIME_SECS,
};
