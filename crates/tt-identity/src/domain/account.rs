//! Account Entity
//!
//! The data model for a registered user. `verified_at` stays unset until a
//! separate verification flow sets it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::credentials::{validate_email, validate_full_name, validate_password};
use crate::error::Result;
use crate::service::password::{PasswordService, HASH_LEN};

/// A persisted user identity.
///
/// An `id` of zero means "not yet persisted" - storage assigns the real id
/// on insert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: i64,

    /// Unique address used for lookup; immutable identity key.
    pub email: String,

    /// Display name.
    pub full_name: String,

    /// bcrypt output, salt embedded; never the plaintext.
    pub password_hash: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub verified_at: Option<DateTime<Utc>>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// Build a new account from caller-supplied credentials.
    ///
    /// The password is hashed and the timestamps assigned before the
    /// validity checks run, so a caller must not assume hashing was skipped
    /// on invalid input. The first failing check (hashing, email, password,
    /// full name - in that order) determines the reported error.
    pub fn new(
        email: impl Into<String>,
        full_name: impl Into<String>,
        password: &str,
        hasher: &PasswordService,
    ) -> Result<Self> {
        let password_hash = hasher.hash(password)?;
        let now = Utc::now();

        let account = Self {
            id: 0,
            email: email.into(),
            full_name: full_name.into(),
            password_hash,
            verified_at: None,
            created_at: now,
            updated_at: now,
        };

        // Both credential checks run; the email result is reported first.
        let email_check = validate_email(&account.email);
        let password_check = validate_password(password);
        email_check?;
        password_check?;
        validate_full_name(&account.full_name)?;

        Ok(account)
    }

    /// Read-only re-validation, usable as a sanity probe after a storage
    /// round trip.
    pub fn is_valid(&self) -> bool {
        validate_email(&self.email).is_ok()
            && self.password_hash.len() == HASH_LEN
            && !self.full_name.is_empty()
            && self.created_at.timestamp() != 0
            && self.created_at <= self.updated_at
    }
}

/// Sparse update request for the mutable account fields.
///
/// Only supplied fields change; password changes go through a separate
/// flow and are not part of this structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
}

impl AccountUpdate {
    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn full_name(mut self, full_name: impl Into<String>) -> Self {
        self.full_name = Some(full_name.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.email.is_none() && self.full_name.is_none()
    }

    /// Apply the supplied fields to an account, bumping `updated_at`.
    pub fn apply_to(&self, account: &mut Account) {
        if let Some(email) = &self.email {
            account.email = email.clone();
        }
        if let Some(full_name) = &self.full_name {
            account.full_name = full_name.clone();
        }
        account.updated_at = Utc::now();
    }
}
