pub mod google_sheets;
pub mod in_memory;
pub mod row_store_factory;
pub mod sheets;

pub use google_sheets::GoogleSheetsStore;
pub use in_memory::InMemoryRowStore;
pub use row_store_factory::{RowStoreFactory, StoreSource};
