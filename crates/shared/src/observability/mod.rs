//! 统一可观测性模块
//!
//! 提供日志订阅器的统一初始化和 HTTP 请求追踪中间件。
//! 所有服务通过单一入口点配置可观测性，保证一致的日志格式。

pub mod middleware;

use crate::config::ObservabilityConfig;
use anyhow::Result;
use tracing::info;
use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer,
};

/// 初始化日志订阅器
///
/// 日志级别优先使用 RUST_LOG 环境变量，其次使用配置中的 log_level。
/// log_format 为 "json" 时输出结构化日志，否则输出人类可读格式。
pub fn init(service_name: &str, config: &ObservabilityConfig) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = if config.log_format == "json" {
        fmt::layer()
            .json()
            .with_target(true)
            .with_thread_ids(true)
            .boxed()
    } else {
        fmt::layer()
            .with_target(true)
            .with_thread_ids(false)
            .with_ansi(true)
            .boxed()
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    info!(
        service = %service_name,
        log_format = %config.log_format,
        "Observability initialized"
    );

    Ok(())
}
