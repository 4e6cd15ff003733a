use thiserror::Error;

/// 计酬系统错误类型定义
///
/// 计价引擎本身不会返回错误，这里只覆盖行存储、配置和命令行层。
#[derive(Debug, Error)]
pub enum PayrollError {
    #[error("配置错误: {0}")]
    Configuration(String),

    #[error("网络错误: {0}")]
    Network(String),

    #[error("表格API错误 (HTTP {status}): {message}")]
    SheetsApi { status: u16, message: String },

    #[error("序列化错误: {0}")]
    Serialization(String),

    #[error("IO错误: {0}")]
    Io(String),

    #[error("数据表不存在: {name}")]
    TableNotFound { name: String },

    #[error("数据行不存在: 表 {table} 第 {row} 行")]
    RowNotFound { table: String, row: usize },

    #[error("数据列不存在: 表 {table} 列 {column}")]
    ColumnNotFound { table: String, column: String },

    #[error("数据验证失败: {0}")]
    ValidationError(String),

    #[error("内部错误: {0}")]
    Internal(String),
}

/// 统一的Result类型
pub type PayrollResult<T> = std::result::Result<T, PayrollError>;

impl PayrollError {
    pub fn config_error<S: Into<String>>(msg: S) -> Self {
        Self::Configuration(msg.into())
    }
    pub fn network_error<S: Into<String>>(msg: S) -> Self {
        Self::Network(msg.into())
    }
    pub fn validation_error<S: Into<String>>(msg: S) -> Self {
        Self::ValidationError(msg.into())
    }
    pub fn table_not_found<S: Into<String>>(name: S) -> Self {
        Self::TableNotFound { name: name.into() }
    }
    pub fn row_not_found<S: Into<String>>(table: S, row: usize) -> Self {
        Self::RowNotFound {
            table: table.into(),
            row,
        }
    }
    pub fn column_not_found<S: Into<String>, C: Into<String>>(table: S, column: C) -> Self {
        Self::ColumnNotFound {
            table: table.into(),
            column: column.into(),
        }
    }
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            PayrollError::Internal(_) | PayrollError::Configuration(_)
        )
    }
    /// 远端可能恢复的错误，由调用方决定是否重试
    pub fn is_transient(&self) -> bool {
        match self {
            PayrollError::Network(_) => true,
            PayrollError::SheetsApi { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
    pub fn user_message(&self) -> &str {
        match self {
            PayrollError::TableNotFound { .. } => "请求的数据表不存在",
            PayrollError::RowNotFound { .. } => "请求的数据行不存在",
            PayrollError::ColumnNotFound { .. } => "请求的数据列不存在",
            PayrollError::ValidationError(_) => "输入数据验证失败",
            PayrollError::SheetsApi { status: 401, .. } | PayrollError::SheetsApi { status: 403, .. } => {
                "访问令牌无效或权限不足"
            }
            PayrollError::Configuration(_) => "配置有误，请检查配置文件",
            _ => "系统繁忙，请稍后重试",
        }
    }
}

impl From<serde_json::Error> for PayrollError {
    fn from(err: serde_json::Error) -> Self {
        PayrollError::Serialization(err.to_string())
    }
}

impl From<std::io::Error> for PayrollError {
    fn from(err: std::io::Error) -> Self {
        PayrollError::Io(err.to_string())
    }
}

impl From<anyhow::Error> for PayrollError {
    fn from(err: anyhow::Error) -> Self {
        PayrollError::Internal(err.to_string())
    }
}
