pub mod app_config;
pub mod observability;
pub mod sheets;

pub use app_config::AppConfig;
pub use observability::ObservabilityConfig;
pub use sheets::{SheetsConfig, TableNames};
