use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

use payroll_core::{PayrollResult, SheetsConfig};
use payroll_domain::RowStore;

use crate::{GoogleSheetsStore, InMemoryRowStore};

/// 行存储的来源
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreSource<'a> {
    /// 本地 JSON 快照文件
    Snapshot(&'a Path),
    /// 远端表格
    Remote,
}

pub struct RowStoreFactory;

impl RowStoreFactory {
    pub async fn create(
        config: &SheetsConfig,
        source: StoreSource<'_>,
    ) -> PayrollResult<Arc<dyn RowStore>> {
        debug!("Creating row store with source: {:?}", source);

        match source {
            StoreSource::Snapshot(path) => {
                info!("使用本地快照: {}", path.display());
                let store = InMemoryRowStore::from_json_file(config.tables.clone(), path).await?;
                Ok(Arc::new(store))
            }
            StoreSource::Remote => {
                info!("使用远端表格: {}", config.spreadsheet_id);
                let store = GoogleSheetsStore::new(config)?;
                Ok(Arc::new(store))
            }
        }
    }
}
