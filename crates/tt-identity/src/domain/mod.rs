//! Domain Models
//!
//! The account entity and the pure credential rules it is validated under.

pub mod account;
pub mod credentials;

pub use account::{Account, AccountUpdate};
pub use credentials::{validate_email, validate_full_name, validate_password};
