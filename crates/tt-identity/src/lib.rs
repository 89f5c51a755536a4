//! TaskTrack Identity
//!
//! Identity and access subsystem for the TaskTrack service:
//! - Credential policy (email syntax, password strength)
//! - Salted one-way password hashing (bcrypt)
//! - Account entity and lifecycle
//! - Signed bearer tokens (JWT, RS512)
//! - Identity service orchestrating registration, authentication,
//!   and authorization against a pluggable storage collaborator

pub mod config;
pub mod domain;
pub mod error;
pub mod repository;
pub mod service;

pub use config::IdentityConfig;
pub use domain::{Account, AccountUpdate};
pub use error::{IdentityError, Result};
pub use repository::{AccountRepository, InMemoryAccountRepository};
pub use service::{IdentityService, PasswordService, TokenConfig, TokenService};
