//! Credential Policy
//!
//! Pure validation rules for the fields a caller supplies when registering
//! or updating an account. No I/O, no side effects.

use std::sync::OnceLock;

use regex::Regex;

use crate::error::{IdentityError, Result};

/// Minimum accepted password length.
pub const MIN_PASSWORD_LEN: usize = 8;

/// Minimum accepted full name length after trimming.
pub const MIN_FULL_NAME_LEN: usize = 4;

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    // Mail-address grammar at the level we care about: a non-empty local
    // part, exactly one '@', a non-empty domain, no whitespace anywhere.
    EMAIL.get_or_init(|| Regex::new(r"^[^@\s]+@[^@\s]+$").expect("email regex"))
}

/// Validate email syntax.
///
/// Rejects the empty string, a missing '@', and a missing local part or
/// domain.
pub fn validate_email(candidate: &str) -> Result<()> {
    if email_regex().is_match(candidate) {
        Ok(())
    } else {
        Err(IdentityError::InvalidEmail)
    }
}

/// Validate password strength.
///
/// The checks are independent; the first failing one determines the error.
pub fn validate_password(candidate: &str) -> Result<()> {
    if candidate.len() < MIN_PASSWORD_LEN {
        return Err(IdentityError::InvalidPassword);
    }

    // No uppercase character: lower-casing yields an identical string.
    if candidate.to_lowercase() == candidate {
        return Err(IdentityError::InvalidPassword);
    }

    if !candidate.chars().any(|c| c.is_ascii_digit()) {
        return Err(IdentityError::InvalidPassword);
    }

    Ok(())
}

/// Validate a display name.
pub fn validate_full_name(candidate: &str) -> Result<()> {
    if candidate.trim().len() < MIN_FULL_NAME_LEN {
        return Err(IdentityError::InvalidFullName);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_emails() {
        assert!(validate_email("a@b.com").is_ok());
        assert!(validate_email("first.last+tag@sub.example.org").is_ok());
        assert!(validate_email("a@b").is_ok());
    }

    #[test]
    fn test_invalid_emails() {
        assert!(validate_email("").is_err());
        assert!(validate_email("not-an-email").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("user@").is_err());
        assert!(validate_email("user name@example.com").is_err());
        assert!(validate_email("user@exam ple.com").is_err());
    }

    #[test]
    fn test_valid_passwords() {
        assert!(validate_password("Password1").is_ok());
        assert!(validate_password("aB3aB3aB").is_ok());
    }

    #[test]
    fn test_password_too_short() {
        assert!(matches!(
            validate_password("Pw1"),
            Err(IdentityError::InvalidPassword)
        ));
    }

    #[test]
    fn test_password_needs_uppercase() {
        assert!(validate_password("password1").is_err());
    }

    #[test]
    fn test_password_needs_digit() {
        assert!(validate_password("Passwords").is_err());
    }

    #[test]
    fn test_full_name_rules() {
        assert!(validate_full_name("A B C").is_ok());
        assert!(validate_full_name("").is_err());
        assert!(validate_full_name("  ab  ").is_err());
    }
}
