//! 结构化日志初始化

use crate::config::LoggingConfig;
use tracing_subscriber::{
    fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt, util::TryInitError,
    EnvFilter, Layer, Registry,
};

/// 安装全局 subscriber
///
/// 过滤级别以 `RUST_LOG` 为准，未设置时取 `logging.level`。
/// `logging.format`: `json` 输出单行 JSON 并在 span 关闭时记录耗时，`pretty` 多行输出，其余为紧凑文本。
pub fn init_telemetry(config: &LoggingConfig) -> Result<(), TryInitError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    tracing_subscriber::registry()
        .with(output_layer(&config.format))
        .with(filter)
        .try_init()?;

    tracing::debug!(level = %config.level, format = %config.format, "Logging ready");
    Ok(())
}

fn output_layer(format: &str) -> Box<dyn Layer<Registry> + Send + Sync> {
    let base = tracing_subscriber::fmt::layer().with_target(false);

    if format.eq_ignore_ascii_case("json") {
        base.json().with_span_events(FmtSpan::CLOSE).boxed()
    } else if format.eq_ignore_ascii_case("pretty") {
        base.pretty().boxed()
    } else {
        base.compact().boxed()
    }
}
