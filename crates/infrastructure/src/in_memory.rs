use async_trait::async_trait;
use payroll_core::{PayrollError, PayrollResult, TableNames};
use payroll_domain::{RowStore, SheetRecord, Table};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::sheets::{header_position, parse_sheet_data, Grid};

/// 内存行存储
///
/// 每张表保存为原始网格（表头 + 数据行），读取时与远端表格走同一套解析。
/// 可以从 JSON 快照文件加载，格式为 `{ "<标签页名>": [[表头...], [行...], ...] }`，
/// 适用于离线核对和测试。从文件加载时，`flush` 会把修改写回同一文件。
#[derive(Debug, Clone)]
pub struct InMemoryRowStore {
    tables: Arc<RwLock<HashMap<Table, Grid>>>,
    names: TableNames,
    backing_file: Option<PathBuf>,
}

impl Default for InMemoryRowStore {
    fn default() -> Self {
        Self::new(TableNames::default())
    }
}

impl InMemoryRowStore {
    pub fn new(names: TableNames) -> Self {
        Self {
            tables: Arc::new(RwLock::new(HashMap::new())),
            names,
            backing_file: None,
        }
    }

    /// 从按标签页名组织的网格构建，不认识的标签页会被忽略
    pub fn from_sheets(names: TableNames, sheets: BTreeMap<String, Grid>) -> Self {
        let mut tables = HashMap::new();
        for (sheet, grid) in sheets {
            match Table::ALL
                .into_iter()
                .find(|t| t.sheet_name(&names) == sheet.trim())
            {
                Some(table) => {
                    tables.insert(table, grid);
                }
                None => warn!("忽略未知的标签页: {}", sheet),
            }
        }

        Self {
            tables: Arc::new(RwLock::new(tables)),
            names,
            backing_file: None,
        }
    }

    pub fn from_json_str(names: TableNames, json: &str) -> PayrollResult<Self> {
        let sheets: BTreeMap<String, Grid> = serde_json::from_str(json)?;
        Ok(Self::from_sheets(names, sheets))
    }

    pub async fn from_json_file<P: AsRef<Path>>(names: TableNames, path: P) -> PayrollResult<Self> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            PayrollError::Io(format!("读取快照文件失败 {}: {}", path.display(), e))
        })?;
        let mut store = Self::from_json_str(names, &content)?;
        store.backing_file = Some(path.to_path_buf());
        info!("已从快照文件加载表格数据: {}", path.display());
        Ok(store)
    }

    /// 导出为与快照文件相同的格式
    pub async fn to_json(&self) -> PayrollResult<String> {
        let tables = self.tables.read().await;
        let sheets: BTreeMap<&str, &Grid> = tables
            .iter()
            .map(|(table, grid)| (table.sheet_name(&self.names), grid))
            .collect();
        Ok(serde_json::to_string_pretty(&sheets)?)
    }

    pub async fn save_json_file<P: AsRef<Path>>(&self, path: P) -> PayrollResult<()> {
        let path = path.as_ref();
        let content = self.to_json().await?;
        tokio::fs::write(path, content).await.map_err(|e| {
            PayrollError::Io(format!("写入快照文件失败 {}: {}", path.display(), e))
        })?;
        debug!("快照已写回: {}", path.display());
        Ok(())
    }

    /// 替换整张表的网格
    pub async fn insert_grid(&self, table: Table, grid: Grid) {
        self.tables.write().await.insert(table, grid);
    }

    fn table_not_found(&self, table: Table) -> PayrollError {
        PayrollError::table_not_found(table.sheet_name(&self.names))
    }
}

#[async_trait]
impl RowStore for InMemoryRowStore {
    async fn fetch_table(&self, table: Table) -> PayrollResult<Vec<SheetRecord>> {
        let tables = self.tables.read().await;
        let grid = tables.get(&table).ok_or_else(|| self.table_not_found(table))?;
        Ok(parse_sheet_data(grid))
    }

    async fn update_cell(
        &self,
        table: Table,
        row_index: usize,
        column: &str,
        value: Value,
    ) -> PayrollResult<()> {
        let sheet = table.sheet_name(&self.names);
        let mut tables = self.tables.write().await;
        let grid = tables
            .get_mut(&table)
            .ok_or_else(|| PayrollError::table_not_found(sheet))?;

        let col = grid
            .first()
            .and_then(|header| header_position(header, column))
            .ok_or_else(|| PayrollError::column_not_found(sheet, column))?;

        // 第1行是表头，不允许改写
        if row_index < 2 || row_index > grid.len() {
            return Err(PayrollError::row_not_found(sheet, row_index));
        }
        let row = &mut grid[row_index - 1];
        if row.len() <= col {
            row.resize(col + 1, Value::String(String::new()));
        }
        row[col] = value;

        debug!("单元格已更新: {} 第 {} 行 {}", sheet, row_index, column);
        Ok(())
    }

    async fn flush(&self) -> PayrollResult<()> {
        match &self.backing_file {
            Some(path) => self.save_json_file(path).await,
            None => Ok(()),
        }
    }
}
