//! 行存储抽象
//!
//! 定义表格数据访问的抽象接口，领域服务只依赖这里的 trait。

use async_trait::async_trait;
use payroll_core::{PayrollError, PayrollResult, TableNames};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use crate::columns;
use crate::entities::SheetRecord;

/// 面板使用的四张数据表
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Table {
    Jobs,
    Members,
    Series,
    Pricing,
}

impl Table {
    pub const ALL: [Table; 4] = [Table::Jobs, Table::Members, Table::Series, Table::Pricing];

    /// 表格中的标签页名称
    pub fn sheet_name<'a>(&self, names: &'a TableNames) -> &'a str {
        match self {
            Table::Jobs => &names.jobs,
            Table::Members => &names.members,
            Table::Series => &names.series,
            Table::Pricing => &names.pricing,
        }
    }

    /// 按表格中的顺序排列的表头
    pub fn columns(&self) -> &'static [&'static str] {
        match self {
            Table::Jobs => &columns::job::ALL,
            Table::Members => &columns::member::ALL,
            Table::Series => &columns::series::ALL,
            Table::Pricing => &columns::pricing::ALL,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Table::Jobs => "jobs",
            Table::Members => "members",
            Table::Series => "series",
            Table::Pricing => "pricing",
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Table {
    type Err = PayrollError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            // "İ" 小写后为 "i" 加组合点
            "jobs" | "işler" | "i\u{307}şler" => Ok(Table::Jobs),
            "members" | "üyeler" => Ok(Table::Members),
            "series" | "seriler" => Ok(Table::Series),
            "pricing" | "fiyatlandırma" => Ok(Table::Pricing),
            other => Err(PayrollError::table_not_found(other)),
        }
    }
}

/// 行存储抽象
///
/// 行号与表格一致: 表头为第1行，数据从第2行开始。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RowStore: Send + Sync {
    /// 读取整张表，每行按表头转换为记录
    async fn fetch_table(&self, table: Table) -> PayrollResult<Vec<SheetRecord>>;

    /// 改写单个单元格
    ///
    /// 列按表格实际的表头行定位，表头中没有该列时返回 `ColumnNotFound`。
    /// 第1行是表头，不可改写。
    async fn update_cell(
        &self,
        table: Table,
        row_index: usize,
        column: &str,
        value: Value,
    ) -> PayrollResult<()>;

    /// 把已写入的修改落盘，远端存储每次写入即生效
    async fn flush(&self) -> PayrollResult<()> {
        Ok(())
    }
}
