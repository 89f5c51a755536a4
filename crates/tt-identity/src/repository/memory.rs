//! In-Memory Account Repository
//!
//! A substitutable storage double backing tests and local development.
//! Enforces the same unique-email constraint a real store would.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::{Account, AccountUpdate};
use crate::error::{IdentityError, Result};
use crate::repository::AccountRepository;

pub struct InMemoryAccountRepository {
    accounts: RwLock<HashMap<i64, Account>>,
    next_id: AtomicI64,
}

impl InMemoryAccountRepository {
    pub fn new() -> Self {
        Self {
            accounts: RwLock::new(HashMap::new()),
            next_id: AtomicI64::new(1),
        }
    }

    /// Number of stored accounts. Test probe.
    pub async fn count(&self) -> usize {
        self.accounts.read().await.len()
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn create(&self, mut account: Account) -> Result<Account> {
        let mut accounts = self.accounts.write().await;

        if accounts.values().any(|a| a.email == account.email) {
            return Err(IdentityError::duplicate("email"));
        }

        account.id = self.next_id.fetch_add(1, Ordering::SeqCst);
        accounts.insert(account.id, account.clone());
        Ok(account)
    }

    async fn update(&self, account: &Account, changes: &AccountUpdate) -> Result<()> {
        let mut accounts = self.accounts.write().await;

        if let Some(email) = &changes.email {
            if accounts
                .values()
                .any(|a| a.id != account.id && &a.email == email)
            {
                return Err(IdentityError::duplicate("email"));
            }
        }

        match accounts.get_mut(&account.id) {
            Some(stored) => {
                changes.apply_to(stored);
                Ok(())
            }
            None => Err(IdentityError::storage(format!(
                "no stored account with id {}",
                account.id
            ))),
        }
    }

    async fn delete(&self, account: &Account) -> Result<()> {
        self.accounts.write().await.remove(&account.id);
        Ok(())
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Account>> {
        Ok(self.accounts.read().await.get(&id).cloned())
    }

    async fn get_by_email(&self, email: &str) -> Result<Option<Account>> {
        Ok(self
            .accounts
            .read()
            .await
            .values()
            .find(|a| a.email == email)
            .cloned())
    }
}
