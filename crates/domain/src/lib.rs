//! 计酬领域层
//!
//! 包含纯计价引擎、表格记录到实体的映射、行存储抽象和领域服务。

pub mod cell;
pub mod columns;
pub mod entities;
pub mod job_query;
pub mod pricing;
pub mod repositories;
pub mod services;
pub mod value_objects;

pub use entities::*;
pub use job_query::{search_members, search_series, JobColumn, JobQuery, SortDirection};
pub use payroll_core::{PayrollError, PayrollResult};
pub use pricing::*;
pub use repositories::*;
pub use services::*;
pub use value_objects::*;
