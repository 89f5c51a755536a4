//! Identity Service
//!
//! Orchestrates registration, account maintenance, authentication, and
//! authorization. Stateless across calls apart from the signing key pair
//! held inside the token service, so a single instance is shared freely
//! between concurrent callers.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::{validate_email, validate_full_name, Account, AccountUpdate};
use crate::error::{IdentityError, Result};
use crate::repository::AccountRepository;
use crate::service::password::PasswordService;
use crate::service::token::TokenService;

pub struct IdentityService {
    repo: Arc<dyn AccountRepository>,
    passwords: PasswordService,
    tokens: TokenService,
}

impl IdentityService {
    pub fn new(
        repo: Arc<dyn AccountRepository>,
        passwords: PasswordService,
        tokens: TokenService,
    ) -> Self {
        Self {
            repo,
            passwords,
            tokens,
        }
    }

    /// Register a new account.
    ///
    /// Validation and hashing failures are returned before storage is
    /// touched; on success the returned account carries the
    /// storage-assigned id.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        full_name: &str,
    ) -> Result<Account> {
        let account = Account::new(email, full_name, password, &self.passwords)?;

        let created = self.repo.create(account).await?;
        info!(account_id = created.id, "account registered");
        Ok(created)
    }

    /// Apply the supplied field changes to an account.
    ///
    /// A supplied email (or full name) is re-validated before anything is
    /// persisted; on failure the stored record is untouched. On success the
    /// canonical record is re-read from storage - storage is authoritative,
    /// not the in-memory mutation.
    pub async fn update(&self, account: &Account, changes: &AccountUpdate) -> Result<Account> {
        if let Some(email) = &changes.email {
            validate_email(email)?;
        }
        if let Some(full_name) = &changes.full_name {
            validate_full_name(full_name)?;
        }

        self.repo.update(account, changes).await?;
        debug!(account_id = account.id, "account updated");

        self.get_by_id(account.id).await
    }

    /// Delete an account. Pass-through to storage.
    pub async fn delete(&self, account: &Account) -> Result<()> {
        self.repo.delete(account).await?;
        info!(account_id = account.id, "account deleted");
        Ok(())
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Account> {
        self.repo
            .get_by_id(id)
            .await?
            .ok_or(IdentityError::UserNotFoundId)
    }

    pub async fn get_by_email(&self, email: &str) -> Result<Account> {
        self.repo
            .get_by_email(email)
            .await?
            .ok_or(IdentityError::UserNotFoundEmail)
    }

    /// Exchange an email/password pair for a signed access token.
    ///
    /// The plaintext password is never logged. Unknown email and password
    /// mismatch stay distinguishable here; whether to collapse them into one
    /// opaque response is the transport layer's call.
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<String> {
        let account = match self.repo.get_by_email(email).await? {
            Some(account) => account,
            None => {
                warn!(email = %email, "authentication failed: unknown email");
                return Err(IdentityError::UserNotFoundEmail);
            }
        };

        if !self.passwords.verify(password, &account.password_hash) {
            warn!(account_id = account.id, "authentication failed: password mismatch");
            return Err(IdentityError::InvalidCredentials);
        }

        let token = self.tokens.issue(account.id)?;
        info!(account_id = account.id, "access token issued");
        Ok(token)
    }

    /// Resolve a bearer token into the live account it vouches for.
    ///
    /// The token's embedded subject id is not trusted as proof of live
    /// existence: an account deleted after issuance yields `UserNotFoundId`.
    pub async fn authorize(&self, token: &str) -> Result<Account> {
        let claims = self.tokens.verify(token)?;

        self.repo
            .get_by_id(claims.sub)
            .await?
            .ok_or(IdentityError::UserNotFoundId)
    }
}
