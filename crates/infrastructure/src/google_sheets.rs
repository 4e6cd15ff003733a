use async_trait::async_trait;
use metrics::counter;
use payroll_core::{PayrollError, PayrollResult, SheetsConfig, TableNames};
use payroll_domain::{RowStore, SheetRecord, Table};
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::{debug, error, info, instrument};
use url::Url;

use crate::sheets::{
    cell_range, grid_from_response, header_position, header_range, parse_sheet_data, table_range,
};

/// 基于 Google Sheets values API 的行存储
///
/// 读取使用 `valueRenderOption=FORMULA`，写入使用 `valueInputOption=USER_ENTERED`，
/// 与面板手工编辑的效果一致。失败不重试，由调用方根据 [`PayrollError::is_transient`] 决定。
pub struct GoogleSheetsStore {
    http_client: reqwest::Client,
    api_base_url: String,
    spreadsheet_id: String,
    access_token: String,
    max_rows: u32,
    names: TableNames,
}

impl GoogleSheetsStore {
    pub fn new(config: &SheetsConfig) -> PayrollResult<Self> {
        let (spreadsheet_id, access_token) = config
            .require_remote()
            .map_err(|e| PayrollError::config_error(e.to_string()))?;

        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .build()
            .map_err(network_error)?;

        info!(
            "已创建表格存储: spreadsheet={}, max_rows={}",
            spreadsheet_id, config.max_rows
        );

        Ok(Self {
            http_client,
            api_base_url: config.api_base_url.trim_end_matches('/').to_string(),
            spreadsheet_id: spreadsheet_id.to_string(),
            access_token: access_token.to_string(),
            max_rows: config.max_rows,
            names: config.tables.clone(),
        })
    }

    fn values_url(&self, range: &str) -> PayrollResult<Url> {
        let mut url = Url::parse(&self.api_base_url)
            .map_err(|e| PayrollError::config_error(format!("无效的API地址: {e}")))?;
        url.path_segments_mut()
            .map_err(|_| PayrollError::config_error(format!("无效的API地址: {}", self.api_base_url)))?
            .pop_if_empty()
            .extend(["spreadsheets", self.spreadsheet_id.as_str(), "values", range]);
        Ok(url)
    }

    /// 整张表的读取地址
    pub fn read_url(&self, table: Table) -> PayrollResult<Url> {
        let range = table_range(
            table.sheet_name(&self.names),
            table.columns().len(),
            self.max_rows,
        );
        let mut url = self.values_url(&range)?;
        url.query_pairs_mut().append_pair("valueRenderOption", "FORMULA");
        Ok(url)
    }

    /// 表头行的读取地址
    pub fn header_url(&self, table: Table) -> PayrollResult<Url> {
        self.values_url(&header_range(table.sheet_name(&self.names)))
    }

    /// 单元格的写入地址，列号从1开始
    pub fn write_url(&self, table: Table, row_index: usize, column: usize) -> PayrollResult<Url> {
        let sheet = table.sheet_name(&self.names);
        if row_index < 2 {
            return Err(PayrollError::row_not_found(sheet, row_index));
        }
        let range = cell_range(sheet, column, row_index).ok_or_else(|| {
            PayrollError::validation_error(format!("列号必须从1开始: {column}"))
        })?;

        let mut url = self.values_url(&range)?;
        url.query_pairs_mut()
            .append_pair("valueInputOption", "USER_ENTERED");
        Ok(url)
    }

    /// 按表格当前的表头行定位列号（从1开始）
    async fn resolve_column(&self, table: Table, column: &str) -> PayrollResult<usize> {
        let url = self.header_url(table)?;
        let body = self.send(self.http_client.get(url)).await?;
        let grid = grid_from_response(body)?;

        grid.first()
            .and_then(|header| header_position(header, column))
            .map(|i| i + 1)
            .ok_or_else(|| PayrollError::column_not_found(table.sheet_name(&self.names), column))
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> PayrollResult<Value> {
        let response = request
            .bearer_auth(&self.access_token)
            .send()
            .await
            .map_err(network_error)?;

        let status = response.status();
        let body = response.text().await.map_err(network_error)?;
        if !status.is_success() {
            counter!("payroll_sheets_api_errors_total").increment(1);
            error!("表格API请求失败: HTTP {} - {}", status, body);
            return Err(api_error(status.as_u16(), &body));
        }

        if body.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl RowStore for GoogleSheetsStore {
    #[instrument(skip(self))]
    async fn fetch_table(&self, table: Table) -> PayrollResult<Vec<SheetRecord>> {
        let url = self.read_url(table)?;
        debug!("读取表格: {}", url);

        let body = self.send(self.http_client.get(url)).await?;
        let records = parse_sheet_data(&grid_from_response(body)?);

        counter!("payroll_sheets_reads_total").increment(1);
        debug!("读取到 {} 行: {}", records.len(), table.sheet_name(&self.names));
        Ok(records)
    }

    #[instrument(skip(self, value))]
    async fn update_cell(
        &self,
        table: Table,
        row_index: usize,
        column: &str,
        value: Value,
    ) -> PayrollResult<()> {
        if row_index < 2 {
            return Err(PayrollError::row_not_found(
                table.sheet_name(&self.names),
                row_index,
            ));
        }
        let index = self.resolve_column(table, column).await?;
        let url = self.write_url(table, row_index, index)?;
        let payload = json!({ "values": [[value]] });

        self.send(self.http_client.put(url).json(&payload)).await?;

        counter!("payroll_sheets_writes_total").increment(1);
        info!(
            "单元格已更新: {} 第 {} 行 {}",
            table.sheet_name(&self.names),
            row_index,
            column
        );
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    #[serde(default)]
    message: Option<String>,
}

/// 把非 2xx 响应转换为错误，优先使用 API 返回的 `error.message`
pub fn api_error(status: u16, body: &str) -> PayrollError {
    let message = serde_json::from_str::<ApiErrorBody>(body)
        .ok()
        .and_then(|b| b.error.message)
        .unwrap_or_else(|| {
            if body.trim().is_empty() {
                "表格API请求失败".to_string()
            } else {
                body.trim().to_string()
            }
        });
    PayrollError::SheetsApi { status, message }
}

/// 传输层错误统一映射为网络错误
pub fn network_error(err: reqwest::Error) -> PayrollError {
    if err.is_timeout() {
        PayrollError::network_error(format!("请求超时: {err}"))
    } else {
        PayrollError::network_error(err.to_string())
    }
}
