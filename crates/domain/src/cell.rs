//! 单元格取值工具
//!
//! 表格由非技术人员手工维护，单元格可能是数字、字符串、布尔值或空。
//! 这里的函数一律容错: 解析失败返回 `None` / `false` / 空串，从不报错。

use chrono::{Duration, NaiveDate};
use serde_json::Value;

/// 单元格的文本形式，数字保留原样，空值为空串
pub fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.trim().to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

/// 解析单元格中的数字
///
/// 字符串按"最长数字前缀"解析（`"20 TL"` → 20），没有小数点时接受逗号作小数点（`"0,5"` → 0.5）。
/// 非有限值视为缺失。
pub fn parse_number(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_numeric_text(s),
        _ => None,
    };
    parsed.filter(|n| n.is_finite())
}

/// 与 [`parse_number`] 相同，缺失时返回 0
pub fn number_or_zero(value: &Value) -> f64 {
    parse_number(value).unwrap_or(0.0)
}

fn parse_numeric_text(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let normalized = if trimmed.contains('.') {
        trimmed.to_string()
    } else {
        trimmed.replacen(',', ".", 1)
    };

    let bytes = normalized.as_bytes();
    let mut end = 0;
    let mut seen_digit = false;
    let mut seen_dot = false;

    if end < bytes.len() && (bytes[end] == b'+' || bytes[end] == b'-') {
        end += 1;
    }
    while end < bytes.len() {
        match bytes[end] {
            b'0'..=b'9' => seen_digit = true,
            b'.' if !seen_dot => seen_dot = true,
            _ => break,
        }
        end += 1;
    }

    if !seen_digit {
        return None;
    }
    normalized[..end].trim_end_matches('.').parse::<f64>().ok()
}

/// 判断单元格是否为"真"
///
/// 接受布尔 `true`、数字 1，以及不区分大小写的 `Yes` / `True` / `1` / `Evet`。
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64() == Some(1.0),
        Value::String(s) => matches!(
            s.trim().to_lowercase().as_str(),
            "yes" | "true" | "1" | "evet"
        ),
        _ => false,
    }
}

/// 解析单元格中的日期，统一为 `YYYY-MM-DD`
///
/// - 数字按表格序列日处理（1899-12-30 为第 0 天）
/// - `YYYY-MM-DD` 开头的字符串截取日期部分
/// - `DD.MM.YYYY` 转换为 ISO 格式
/// - 其他非空字符串原样保留，按字典序参与比较
pub fn cell_date(value: &Value) -> Option<String> {
    match value {
        Value::Number(n) => n.as_f64().and_then(serial_to_iso),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return None;
            }
            if let Some(prefix) = trimmed.get(..10) {
                if NaiveDate::parse_from_str(prefix, "%Y-%m-%d").is_ok() {
                    return Some(prefix.to_string());
                }
            }
            if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%d.%m.%Y") {
                return Some(date.format("%Y-%m-%d").to_string());
            }
            Some(trimmed.to_string())
        }
        _ => None,
    }
}

fn serial_to_iso(serial: f64) -> Option<String> {
    if !serial.is_finite() || serial < 1.0 {
        return None;
    }
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?;
    let date = epoch.checked_add_signed(Duration::days(serial.floor() as i64))?;
    Some(date.format("%Y-%m-%d").to_string())
}
