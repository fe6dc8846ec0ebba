//! In-memory account store, used when no database is configured and in tests

use super::AccountStore;
use crate::{error::AppError, models::account::Account};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::RwLock;

#[derive(Default)]
pub struct MemoryAccountStore {
    accounts: RwLock<HashMap<String, Account>>,
}

impl MemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.accounts.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.accounts.read().await.is_empty()
    }
}

#[async_trait]
impl AccountStore for MemoryAccountStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AppError> {
        Ok(self.accounts.read().await.get(email).cloned())
    }

    async fn create(&self, email: &str, password_hash: &str) -> Result<Account, AppError> {
        // check and insert under one write lock
        let mut accounts = self.accounts.write().await;
        if accounts.contains_key(email) {
            return Err(AppError::DuplicateEmail);
        }

        let account = Account {
            id: accounts.len() as i64 + 1,
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            created_at: Utc::now(),
        };
        accounts.insert(email.to_string(), account.clone());

        Ok(account)
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}
