//! 认证服务：注册、登录

use crate::{
    auth::{jwt::JwtService, password::PasswordHasher},
    error::AppError,
    models::auth::*,
    repository::AccountStore,
};
use std::sync::Arc;
use validator::Validate;

pub struct AuthService {
    accounts: Arc<dyn AccountStore>,
    jwt_service: Arc<JwtService>,
    hasher: PasswordHasher,
    /// 账户不存在时也做一次校验，使两种失败耗时一致
    dummy_hash: String,
}

impl AuthService {
    pub fn new(
        accounts: Arc<dyn AccountStore>,
        jwt_service: Arc<JwtService>,
        hasher: PasswordHasher,
    ) -> Result<Self, AppError> {
        let dummy_hash = hasher.hash("account-gate-dummy-password")?;

        Ok(Self {
            accounts,
            jwt_service,
            hasher,
            dummy_hash,
        })
    }

    pub fn accounts(&self) -> &Arc<dyn AccountStore> {
        &self.accounts
    }

    /// 注册新账户并签发令牌
    pub async fn register(&self, req: RegisterRequest) -> Result<AuthResponse, AppError> {
        req.validate().map_err(|e| AppError::validation(&e))?;

        if self.accounts.find_by_email(&req.email).await?.is_some() {
            tracing::debug!(email = %req.email, "Registration rejected: email taken");
            return Err(AppError::DuplicateEmail);
        }

        let password_hash = self.hash_password(req.password).await?;

        // 并发注册时 create 仍可能返回 DuplicateEmail
        let account = self.accounts.create(&req.email, &password_hash).await?;

        let token = self.jwt_service.issue(&account.email)?;

        tracing::info!(account_id = account.id, "Account registered");
        metrics::counter!("auth_register_total").increment(1);

        Ok(AuthResponse::bearer("User registered successfully", token))
    }

    /// 用户登录
    ///
    /// 账户不存在与密码错误返回同一个 `InvalidCredentials`。
    pub async fn login(&self, req: LoginRequest) -> Result<AuthResponse, AppError> {
        let account = self.accounts.find_by_email(&req.email).await?;

        let stored_hash = account
            .as_ref()
            .map_or_else(|| self.dummy_hash.clone(), |a| a.password_hash.clone());
        let verified = self.verify_password(req.password, stored_hash).await?;

        let account = match account {
            Some(account) if verified => account,
            _ => {
                tracing::debug!("Login rejected: invalid credentials");
                metrics::counter!("auth_login_total", "outcome" => "failure").increment(1);
                return Err(AppError::InvalidCredentials);
            }
        };

        let token = self.jwt_service.issue(&account.email)?;

        tracing::info!(account_id = account.id, "Account logged in");
        metrics::counter!("auth_login_total", "outcome" => "success").increment(1);

        Ok(AuthResponse::bearer("User logged in successfully", token))
    }

    /// Argon2 计算密集，放到阻塞线程池执行
    async fn hash_password(&self, password: String) -> Result<String, AppError> {
        let hasher = self.hasher.clone();
        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| AppError::Internal(format!("Password hashing task failed: {}", e)))?
    }

    async fn verify_password(&self, password: String, hash: String) -> Result<bool, AppError> {
        let hasher = self.hasher.clone();
        tokio::task::spawn_blocking(move || hasher.verify(&password, &hash))
            .await
            .map_err(|e| AppError::Internal(format!("Password verification task failed: {}", e)))
    }
}
