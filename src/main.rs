//! 账户服务主入口

use account_gate::{
    config::AppConfig,
    handlers::health,
    middleware::AppState,
    repository::{AccountStore, MemoryAccountStore, PgAccountStore},
    routes, telemetry,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use std::time::Duration;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // ===== CLI 参数处理 =====
    let args: Vec<String> = std::env::args().collect();

    if args.len() > 1 {
        match args[1].as_str() {
            "--version" => {
                println!("account-gate {}", env!("CARGO_PKG_VERSION"));
                return Ok(());
            }
            "--help" => {
                print_help();
                return Ok(());
            }
            _ => {
                eprintln!("未知参数: {}", args[1]);
                print_help();
                std::process::exit(1);
            }
        }
    }

    // 加载 .env 文件（开发环境）
    // 按优先级加载：.env.local > .env.development > .env
    if let Ok(env) = std::env::var("GATE_ENV") {
        dotenv::from_filename(format!(".env.{}", env)).ok();
    } else {
        dotenv::from_filename(".env.local").ok();
        dotenv::from_filename(".env.development").ok();
        dotenv::dotenv().ok();
    }

    health::set_start_time();

    // 1. 加载配置
    let config = AppConfig::from_env().map_err(|e| {
        eprintln!("Configuration error: {}", e);
        anyhow::anyhow!("Failed to load configuration: {}", e)
    })?;

    // 2. 初始化日志
    telemetry::init_telemetry(&config.logging)?;

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Account gate starting...");

    // 3. 账户存储：配置了数据库则使用 PostgreSQL，否则退回内存存储
    let accounts: Arc<dyn AccountStore> = match &config.database.url {
        Some(url) => {
            Arc::new(PgAccountStore::connect(&config.database, url).await?)
        }
        None => {
            tracing::warn!("GATE_DATABASE__URL not set, accounts are kept in memory only");
            Arc::new(MemoryAccountStore::new())
        }
    };

    // 4. 构建应用状态与路由
    let app_state = Arc::new(AppState::new(config.clone(), accounts)?);
    let app = routes::create_router(app_state)?;

    // 5. 启动服务器
    let addr = &config.server.addr;
    let listener = TcpListener::bind(addr).await?;

    tracing::info!(
        addr = %addr,
        allowed_origin = %config.cors.allowed_origin,
        "Server listening"
    );

    // 6. 优雅关闭
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(Duration::from_secs(
            config.server.graceful_shutdown_timeout_secs,
        )))
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// 收到 SIGINT/SIGTERM 后开始排空连接，超过 `grace` 仍未结束则直接退出
async fn shutdown_signal(grace: Duration) {
    let received = wait_for_signal().await;
    tracing::info!(signal = received, grace_secs = grace.as_secs(), "Draining connections");

    tokio::spawn(async move {
        tokio::time::sleep(grace).await;
        tracing::warn!("Connections still open after grace period, exiting");
        std::process::exit(1);
    });
}

#[cfg(unix)]
async fn wait_for_signal() -> &'static str {
    use tokio::signal::unix::{signal, SignalKind};

    match signal(SignalKind::terminate()) {
        Ok(mut sigterm) => tokio::select! {
            _ = ctrl_c() => "SIGINT",
            _ = sigterm.recv() => "SIGTERM",
        },
        Err(e) => {
            tracing::warn!(error = %e, "SIGTERM handler unavailable");
            ctrl_c().await;
            "SIGINT"
        }
    }
}

#[cfg(not(unix))]
async fn wait_for_signal() -> &'static str {
    ctrl_c().await;
    "Ctrl+C"
}

/// 无法注册 Ctrl+C 时永不返回，避免误触发关闭
async fn ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Ctrl+C handler unavailable");
        std::future::pending::<()>().await;
    }
}

/// 打印帮助信息
fn print_help() {
    println!("account-gate {}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("用法: account-gate [选项]");
    println!();
    println!("选项:");
    println!("  --version     打印版本信息并退出");
    println!("  --help        打印此帮助信息并退出");
    println!();
    println!("环境变量:");
    println!("  所有配置通过 GATE_ 前缀的环境变量完成，例如:");
    println!("  GATE_DATABASE__URL, GATE_SECURITY__JWT_SECRET, GATE_CORS__ALLOWED_ORIGIN");
}
