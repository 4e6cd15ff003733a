use std::str::FromStr;

use crate::errors::{PayrollError, PayrollResult};
use crate::logging::log_level::LogLevel;

/// 日志配置
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct LogConfig {
    /// 最低输出级别
    pub level: LogLevel,
    /// 输出格式
    pub format: OutputFormat,
    /// 是否输出事件目标（模块路径）
    pub include_target: bool,
}

/// 日志输出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Json,
    /// 多行可读格式
    Pretty,
}

impl FromStr for OutputFormat {
    type Err = PayrollError;

    fn from_str(format: &str) -> Result<Self, Self::Err> {
        match format.trim().to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "pretty" | "text" => Ok(OutputFormat::Pretty),
            _ => Err(PayrollError::config_error(format!(
                "不支持的日志格式: {format}"
            ))),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            format: OutputFormat::Pretty,
            include_target: false,
        }
    }
}

impl LogConfig {
    /// 用 `LOG_LEVEL`、`LOG_FORMAT`、`LOG_TARGET` 覆盖已有设置，无法解析的值被忽略
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(level) = lookup("LOG_LEVEL").and_then(|v| v.parse().ok()) {
            self.level = level;
        }
        if let Some(format) = lookup("LOG_FORMAT").and_then(|v| v.parse().ok()) {
            self.format = format;
        }
        if let Some(target) = lookup("LOG_TARGET") {
            self.include_target = target.trim().eq_ignore_ascii_case("true");
        }
        self
    }

    pub fn with_level(level: LogLevel) -> Self {
        Self {
            level,
            ..Self::default()
        }
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// 从字符串解析级别和格式
    pub fn from_args(level: &str, format: &str) -> PayrollResult<Self> {
        Ok(Self {
            level: level.parse()?,
            format: format.parse()?,
            include_target: false,
        })
    }
}
