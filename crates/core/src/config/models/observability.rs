use serde::{Deserialize, Serialize};

use crate::logging::{LogConfig, LogLevel, OutputFormat};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    pub log_level: String,
    pub log_format: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: "pretty".to_string(),
        }
    }
}

impl ObservabilityConfig {
    pub fn validate(&self) -> anyhow::Result<()> {
        self.log_level
            .parse::<LogLevel>()
            .map_err(|e| anyhow::anyhow!("{e}"))?;
        self.log_format
            .parse::<OutputFormat>()
            .map_err(|e| anyhow::anyhow!("{e}"))?;
        Ok(())
    }

    pub fn log_config(&self) -> anyhow::Result<LogConfig> {
        LogConfig::from_args(&self.log_level, &self.log_format).map_err(|e| anyhow::anyhow!("{e}"))
    }
}
