pub mod log_config;
pub mod log_level;
pub use log_config::{LogConfig, OutputFormat};
pub use log_level::LogLevel;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::errors::{PayrollError, PayrollResult};

/// 初始化日志系统
///
/// `RUST_LOG` 优先于配置中的日志级别。只能初始化一次，重复调用返回配置错误。
pub fn init_logging(config: &LogConfig) -> PayrollResult<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level.as_filter()));

    let registry = tracing_subscriber::registry().with(env_filter);

    match config.format {
        OutputFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(config.include_target),
            )
            .try_init()
            .map_err(|e| PayrollError::config_error(format!("初始化JSON日志格式失败: {e}"))),
        OutputFormat::Pretty => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .pretty()
                    .with_target(config.include_target),
            )
            .try_init()
            .map_err(|e| PayrollError::config_error(format!("初始化Pretty日志格式失败: {e}"))),
    }
}
