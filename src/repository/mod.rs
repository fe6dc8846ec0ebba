//! Database repository layer

pub mod account_repo;
pub mod memory;

pub use account_repo::*;
pub use memory::*;

use crate::{error::AppError, models::account::Account};
use async_trait::async_trait;

/// Storage for accounts; at most one account per email.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// 根据邮箱查找账户（大小写敏感）
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AppError>;

    /// 创建账户
    ///
    /// Fails with `DuplicateEmail` both when the email is already present and
    /// when the storage layer rejects the insert on its uniqueness constraint.
    async fn create(&self, email: &str, password_hash: &str) -> Result<Account, AppError>;

    /// 存储健康检查
    async fn ping(&self) -> Result<(), AppError>;
}
