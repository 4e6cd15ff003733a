use anyhow::Context;
use serde::{Deserialize, Serialize};

/// 表格标签页名称
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableNames {
    pub jobs: String,
    pub members: String,
    pub series: String,
    pub pricing: String,
}

impl Default for TableNames {
    fn default() -> Self {
        Self {
            jobs: "İşler".to_string(),
            members: "Üyeler".to_string(),
            series: "Seriler".to_string(),
            pricing: "Fiyatlandırma".to_string(),
        }
    }
}

/// 远端表格API配置
///
/// 访问令牌由外部获取后原样传入，这里不负责刷新。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetsConfig {
    pub spreadsheet_id: String,
    pub access_token: Option<String>,
    pub api_base_url: String,
    /// 每张表读取的最大行数（含表头）
    pub max_rows: u32,
    pub request_timeout_seconds: u64,
    pub tables: TableNames,
}

impl Default for SheetsConfig {
    fn default() -> Self {
        Self {
            spreadsheet_id: String::new(),
            access_token: None,
            api_base_url: "https://sheets.googleapis.com/v4".to_string(),
            max_rows: 10000,
            request_timeout_seconds: 30,
            tables: TableNames::default(),
        }
    }
}

impl SheetsConfig {
    pub fn validate(&self) -> anyhow::Result<()> {
        if !self.api_base_url.starts_with("https://") && !self.api_base_url.starts_with("http://") {
            return Err(anyhow::anyhow!(
                "API地址必须以 http:// 或 https:// 开头: {}",
                self.api_base_url
            ));
        }

        if self.max_rows < 2 {
            return Err(anyhow::anyhow!("最大行数必须至少为2（表头加一行数据）"));
        }

        if self.request_timeout_seconds == 0 {
            return Err(anyhow::anyhow!("请求超时时间必须大于0"));
        }

        for (key, name) in [
            ("jobs", &self.tables.jobs),
            ("members", &self.tables.members),
            ("series", &self.tables.series),
            ("pricing", &self.tables.pricing),
        ] {
            if name.trim().is_empty() {
                return Err(anyhow::anyhow!("数据表名称不能为空: tables.{key}"));
            }
        }

        Ok(())
    }

    /// 远端模式需要表格ID和访问令牌
    pub fn require_remote(&self) -> anyhow::Result<(&str, &str)> {
        if self.spreadsheet_id.trim().is_empty() {
            return Err(anyhow::anyhow!("未设置 sheets.spreadsheet_id"));
        }
        let token = self
            .access_token
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .context("未设置 sheets.access_token")?;
        Ok((self.spreadsheet_id.as_str(), token))
    }
}
