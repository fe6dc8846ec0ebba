//! 账户注册与登录服务库
//! 密码哈希、JWT 会话、Cookie 传输

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod repository;
pub mod routes;
pub mod services;
pub mod telemetry;
