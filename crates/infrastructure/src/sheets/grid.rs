//! 原始网格与行记录之间的转换
//!
//! 网格的第一行是表头，之后每行按表头位置取值。行号与表格一致，第一条数据为第2行。

use payroll_core::PayrollResult;
use payroll_domain::cell::cell_text;
use payroll_domain::SheetRecord;
use serde::Deserialize;
use serde_json::Value;

pub type Grid = Vec<Vec<Value>>;

/// 把网格转换为行记录
///
/// 少于两行（没有数据）时返回空列表。行中缺失的单元格记为空串，空表头列被忽略。
pub fn parse_sheet_data(grid: &[Vec<Value>]) -> Vec<SheetRecord> {
    let Some((header, rows)) = grid.split_first() else {
        return Vec::new();
    };
    let headers: Vec<String> = header.iter().map(cell_text).collect();

    rows.iter()
        .enumerate()
        .map(|(idx, row)| {
            let mut record = SheetRecord::new(idx + 2);
            for (i, name) in headers.iter().enumerate() {
                if name.is_empty() {
                    continue;
                }
                let value = match row.get(i) {
                    None | Some(Value::Null) => Value::String(String::new()),
                    Some(v) => v.clone(),
                };
                record.cells.insert(name.clone(), value);
            }
            record
        })
        .collect()
}

/// values API 的响应体，缺少 `values` 字段表示空表
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValuesResponse {
    #[serde(default)]
    pub range: Option<String>,
    #[serde(default)]
    pub values: Option<Grid>,
}

/// 取出 values API 响应中的网格
pub fn grid_from_response(body: Value) -> PayrollResult<Grid> {
    if body.is_null() {
        return Ok(Grid::new());
    }
    let response: ValuesResponse = serde_json::from_value(body)?;
    Ok(response.values.unwrap_or_default())
}

/// 表头中某列的位置（从0开始），比较前去掉两端空白
pub fn header_position(header: &[Value], column: &str) -> Option<usize> {
    let column = column.trim();
    header.iter().position(|h| cell_text(h) == column)
}
