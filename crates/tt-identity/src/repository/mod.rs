//! Repository Layer
//!
//! The storage contract the identity service depends on. The wire format
//! and storage technology live behind this trait; "not found" is the
//! `Ok(None)` arm, infrastructure failures are `Storage` errors and are
//! never retried inside this subsystem.

use async_trait::async_trait;

use crate::domain::{Account, AccountUpdate};
use crate::error::Result;

pub mod memory;

pub use memory::InMemoryAccountRepository;

#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Insert a new account; returns it with the storage-assigned id.
    async fn create(&self, account: Account) -> Result<Account>;

    /// Persist the supplied field changes for an existing account.
    async fn update(&self, account: &Account, changes: &AccountUpdate) -> Result<()>;

    async fn delete(&self, account: &Account) -> Result<()>;

    async fn get_by_id(&self, id: i64) -> Result<Option<Account>>;

    async fn get_by_email(&self, email: &str) -> Result<Option<Account>>;
}
