//! Account repository (PostgreSQL)

use super::AccountStore;
use crate::{config::DatabaseConfig, error::AppError, models::account::Account};
use async_trait::async_trait;
use secrecy::{ExposeSecret, Secret};
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;

pub struct PgAccountStore {
    db: PgPool,
}

impl PgAccountStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// 建立连接池并执行 `migrations/` 下的迁移
    pub async fn connect(config: &DatabaseConfig, url: &Secret<String>) -> Result<Self, AppError> {
        let db = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
            .idle_timeout(Duration::from_secs(config.idle_timeout_secs))
            .max_lifetime(Duration::from_secs(config.max_lifetime_secs))
            .connect(url.expose_secret())
            .await?;

        sqlx::migrate!("./migrations")
            .run(&db)
            .await
            .map_err(sqlx::Error::from)?;

        tracing::info!(max_connections = config.max_connections, "Account database ready");
        Ok(Self::new(db))
    }

    pub fn pool(&self) -> &PgPool {
        &self.db
    }

    /// 直接插入，不做应用层查重；重复邮箱只能由唯一约束拦截
    pub async fn insert(&self, email: &str, password_hash: &str) -> Result<Account, AppError> {
        let mut conn = self.db.acquire().await?;

        let account = sqlx::query_as::<_, Account>(
            r#"
            INSERT INTO accounts (email, password_hash)
            VALUES ($1, $2)
            RETURNING id, email, password_hash, created_at
            "#,
        )
        .bind(email)
        .bind(password_hash)
        .fetch_one(&mut *conn)
        .await
        .map_err(map_insert_error)?;

        Ok(account)
    }
}

/// 唯一约束冲突（并发注册同一邮箱时由数据库兜底）
fn map_insert_error(e: sqlx::Error) -> AppError {
    match &e {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            tracing::debug!("Account insert hit unique constraint: {}", db_err);
            AppError::DuplicateEmail
        }
        _ => AppError::Database(e),
    }
}

#[async_trait]
impl AccountStore for PgAccountStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AppError> {
        // 每次操作从连接池借出连接，作用域结束时自动归还
        let mut conn = self.db.acquire().await?;

        let account = sqlx::query_as::<_, Account>(
            "SELECT id, email, password_hash, created_at FROM accounts WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&mut *conn)
        .await?;

        Ok(account)
    }

    async fn create(&self, email: &str, password_hash: &str) -> Result<Account, AppError> {
        if self.find_by_email(email).await?.is_some() {
            return Err(AppError::DuplicateEmail);
        }

        self.insert(email, password_hash).await
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.db).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::error::{DatabaseError, ErrorKind};
    use std::{error::Error as StdError, fmt};

    /// 模拟驱动返回的数据库错误
    #[derive(Debug)]
    struct FakeDbError {
        unique: bool,
    }

    impl fmt::Display for FakeDbError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("fake database error")
        }
    }

    impl StdError for FakeDbError {}

    impl DatabaseError for FakeDbError {
        fn message(&self) -> &str {
            "fake database error"
        }

        fn as_error(&self) -> &(dyn StdError + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn StdError + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn StdError + Send + Sync + 'static> {
            self
        }

        fn kind(&self) -> ErrorKind {
            if self.unique {
                ErrorKind::UniqueViolation
            } else {
                ErrorKind::ForeignKeyViolation
            }
        }
    }

    #[test]
    fn test_unique_violation_maps_to_duplicate_email() {
        let err = sqlx::Error::Database(Box::new(FakeDbError { unique: true }));
        assert!(matches!(map_insert_error(err), AppError::DuplicateEmail));
    }

    #[test]
    fn test_other_database_errors_pass_through() {
        let err = sqlx::Error::Database(Box::new(FakeDbError { unique: false }));
        assert!(matches!(map_insert_error(err), AppError::Database(_)));

        assert!(matches!(
            map_insert_error(sqlx::Error::RowNotFound),
            AppError::Database(_)
        ));
    }
}
