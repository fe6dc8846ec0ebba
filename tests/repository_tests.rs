//! PostgreSQL 账户仓储集成测试
//!
//! 需要 TEST_DATABASE_URL 指向可用的 PostgreSQL 实例：
//! `cargo test -- --ignored`

use account_gate::{
    error::AppError,
    repository::{AccountStore, PgAccountStore},
};
use serde_json::json;
use std::sync::Arc;

mod common;
use common::{create_test_app, create_test_app_state_with, create_test_config, post_json};

/// 连接测试数据库并清空账户表
async fn setup_test_store() -> PgAccountStore {
    let config = create_test_config();
    let url = config
        .database
        .url
        .as_ref()
        .expect("TEST_DATABASE_URL must be set for repository tests");

    let store = PgAccountStore::connect(&config.database, url)
        .await
        .expect("Failed to connect test database");

    sqlx::query("TRUNCATE TABLE accounts RESTART IDENTITY")
        .execute(store.pool())
        .await
        .expect("Failed to clean accounts table");

    store
}

#[tokio::test]
#[ignore = "requires PostgreSQL (TEST_DATABASE_URL)"]
async fn test_pg_create_and_find() {
    let store = setup_test_store().await;

    let account = store.create("a@x.com", "hash").await.unwrap();
    assert_eq!(account.email, "a@x.com");

    let found = store.find_by_email("a@x.com").await.unwrap().unwrap();
    assert_eq!(found.id, account.id);
    assert_eq!(found.password_hash, "hash");

    assert!(store.find_by_email("A@X.COM").await.unwrap().is_none());
}

#[tokio::test]
#[ignore = "requires PostgreSQL (TEST_DATABASE_URL)"]
async fn test_pg_duplicate_email() {
    let store = setup_test_store().await;

    store.create("a@x.com", "hash1").await.unwrap();
    let result = store.create("a@x.com", "hash2").await;
    assert!(matches!(result, Err(AppError::DuplicateEmail)));
}

#[tokio::test]
#[ignore = "requires PostgreSQL (TEST_DATABASE_URL)"]
async fn test_pg_insert_without_lookup_hits_unique_constraint() {
    let store = setup_test_store().await;

    store.insert("a@x.com", "hash1").await.unwrap();

    // 跳过应用层查重，第二次插入只能被唯一约束拦下
    let result = store.insert("a@x.com", "hash2").await;
    assert!(matches!(result, Err(AppError::DuplicateEmail)));

    let found = store.find_by_email("a@x.com").await.unwrap().unwrap();
    assert_eq!(found.password_hash, "hash1");
}

#[tokio::test]
#[ignore = "requires PostgreSQL (TEST_DATABASE_URL)"]
async fn test_pg_concurrent_create_single_winner() {
    let store = Arc::new(setup_test_store().await);

    // 并发注册：应用层检查可能同时通过，由唯一约束兜底
    let handles: Vec<_> = (0..8)
        .map(|i| {
            let store = store.clone();
            tokio::spawn(async move { store.create("race@x.com", &format!("h{}", i)).await })
        })
        .collect();

    let mut created = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => created += 1,
            Err(AppError::DuplicateEmail) => {}
            Err(e) => panic!("unexpected error: {}", e),
        }
    }
    assert_eq!(created, 1);
}

#[tokio::test]
#[ignore = "requires PostgreSQL (TEST_DATABASE_URL)"]
async fn test_pg_register_and_login_flow() {
    let store = setup_test_store().await;
    let state = create_test_app_state_with(create_test_config(), Arc::new(store));
    let app = create_test_app(state);

    let response = post_json(&app, "/register", json!({"email": "a@x.com", "password": "pw1"})).await;
    assert_eq!(response.status(), axum::http::StatusCode::OK);

    let response = post_json(&app, "/register", json!({"email": "a@x.com", "password": "pw2"})).await;
    assert_eq!(response.status(), axum::http::StatusCode::BAD_REQUEST);

    let response = post_json(&app, "/login", json!({"email": "a@x.com", "password": "pw1"})).await;
    assert_eq!(response.status(), axum::http::StatusCode::OK);
}
