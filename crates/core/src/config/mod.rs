//! 配置管理
//!
//! 加载顺序:
//! 1. 结构体默认值 (`#[serde(default)]`)
//! 2. TOML 配置文件
//! 3. 环境变量覆盖 (前缀: `PAYROLL_`，层级分隔符: `__`)

pub mod models;

pub use models::{AppConfig, ObservabilityConfig, SheetsConfig, TableNames};
