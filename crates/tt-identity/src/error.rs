//! Identity Error Types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum IdentityError {
    #[error("invalid email format")]
    InvalidEmail,

    #[error("invalid password format")]
    InvalidPassword,

    #[error("invalid full name")]
    InvalidFullName,

    #[error("account with such email not found")]
    UserNotFoundEmail,

    #[error("account with such id not found")]
    UserNotFoundId,

    #[error("given credentials are not valid")]
    InvalidCredentials,

    #[error("supplied authorization token is invalid: {message}")]
    InvalidToken { message: String },

    #[error("this token is not valid anymore - expired")]
    TokenInvalidated,

    #[error("password hashing failed")]
    HashingFailed,

    #[error("signing access token failed")]
    SigningFailed,

    #[error("duplicate account: {field} already taken")]
    Duplicate { field: String },

    #[error("storage error: {message}")]
    Storage { message: String },

    #[error("configuration error: {message}")]
    Configuration { message: String },
}

impl IdentityError {
    pub fn invalid_token(message: impl Into<String>) -> Self {
        Self::InvalidToken { message: message.into() }
    }

    pub fn duplicate(field: impl Into<String>) -> Self {
        Self::Duplicate { field: field.into() }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage { message: message.into() }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration { message: message.into() }
    }

    /// True for errors raised by input validation before any I/O happens.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidEmail | Self::InvalidPassword | Self::InvalidFullName
        )
    }
}

pub type Result<T> = std::result::Result<T, IdentityError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_classification() {
        assert!(IdentityError::InvalidEmail.is_validation());
        assert!(IdentityError::InvalidPassword.is_validation());
        assert!(IdentityError::InvalidFullName.is_validation());
        assert!(!IdentityError::InvalidCredentials.is_validation());
        assert!(!IdentityError::UserNotFoundEmail.is_validation());
    }

    #[test]
    fn test_display_messages() {
        let err = IdentityError::invalid_token("bad signature");
        assert!(err.to_string().contains("bad signature"));

        let err = IdentityError::duplicate("email");
        assert!(err.to_string().contains("email"));
    }
}
