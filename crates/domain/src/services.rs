//! # 领域服务
//!
//! 通过 [`RowStore`] 读取表格，把行记录交给纯计价引擎，并汇总面板统计。
//!
//! 服务本身不保存状态，每次调用都重新读取表格，保证使用最新的费率和成员状态。

use chrono::{Local, NaiveDate};
use futures::try_join;
use metrics::counter;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use payroll_core::PayrollResult;

use crate::cell::number_or_zero;
use crate::columns;
use crate::entities::{Job, Member, SheetRecord, TaskDescriptor, WorkerStatus};
use crate::pricing::{quote, PriceQuote, RateSchedule};
use crate::repositories::{RowStore, Table};

/// 四张表的一次完整读取
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DataSnapshot {
    pub jobs: Vec<SheetRecord>,
    pub members: Vec<SheetRecord>,
    pub series: Vec<SheetRecord>,
    pub pricing: Vec<SheetRecord>,
}

/// 并发读取四张表，任一失败则整体失败
#[instrument(skip(store))]
pub async fn load_snapshot(store: &dyn RowStore) -> PayrollResult<DataSnapshot> {
    let (jobs, members, series, pricing) = try_join!(
        store.fetch_table(Table::Jobs),
        store.fetch_table(Table::Members),
        store.fetch_table(Table::Series),
        store.fetch_table(Table::Pricing),
    )?;

    info!(
        jobs = jobs.len(),
        members = members.len(),
        series = series.len(),
        pricing = pricing.len(),
        "表格数据加载完成"
    );

    Ok(DataSnapshot {
        jobs,
        members,
        series,
        pricing,
    })
}

/// 计价所需的外部输入: 当前费率和成员请假状态
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PricingContext {
    pub schedule: Option<RateSchedule>,
    pub members: Vec<WorkerStatus>,
}

impl PricingContext {
    pub fn from_records(pricing: &[SheetRecord], members: &[SheetRecord]) -> Self {
        Self {
            schedule: RateSchedule::active(pricing),
            members: members
                .iter()
                .map(|r| Member::from_record(r).worker_status())
                .collect(),
        }
    }

    pub fn from_snapshot(snapshot: &DataSnapshot) -> Self {
        Self::from_records(&snapshot.pricing, &snapshot.members)
    }

    pub fn quote(&self, task: &TaskDescriptor, today: NaiveDate) -> PriceQuote {
        quote(task, self.schedule.as_ref(), &self.members, today)
    }
}

/// 表格记录金额与重新计价结果不一致的一行
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuditEntry {
    pub row_index: usize,
    pub series: String,
    pub chapter: String,
    pub member_name: String,
    pub role: String,
    /// 表格中的金额，无法解析时为 `None`
    pub recorded: Option<f64>,
    pub expected: u32,
    pub zero_rated: bool,
}

/// 按每条记录自身的日期重新计价，返回金额不一致的记录
pub fn audit_jobs(jobs: &[SheetRecord], context: &PricingContext, today: NaiveDate) -> Vec<AuditEntry> {
    jobs.iter()
        .map(Job::from_record)
        .filter_map(|job| {
            let quote = context.quote(&job.to_task(), today);
            let matches = job
                .amount
                .is_some_and(|recorded| (recorded - quote.amount as f64).abs() < 0.5);
            if matches {
                return None;
            }
            Some(AuditEntry {
                row_index: job.row_index,
                series: job.series,
                chapter: job.chapter,
                member_name: job.member_name,
                role: job.role,
                recorded: job.amount,
                expected: quote.amount,
                zero_rated: quote.zero_rated,
            })
        })
        .collect()
}

/// 计价服务
pub struct PricingService {
    store: Arc<dyn RowStore>,
}

impl PricingService {
    pub fn new(store: Arc<dyn RowStore>) -> Self {
        Self { store }
    }

    async fn context(&self) -> PayrollResult<PricingContext> {
        let (pricing, members) = try_join!(
            self.store.fetch_table(Table::Pricing),
            self.store.fetch_table(Table::Members),
        )?;
        Ok(PricingContext::from_records(&pricing, &members))
    }

    /// 实时估价，缺省任务日期取今天
    pub async fn estimate(&self, task: &TaskDescriptor) -> PayrollResult<PriceQuote> {
        self.estimate_on(task, Local::now().date_naive()).await
    }

    #[instrument(skip(self, task), fields(role = %task.role, size_kb = task.size_kb))]
    pub async fn estimate_on(
        &self,
        task: &TaskDescriptor,
        today: NaiveDate,
    ) -> PayrollResult<PriceQuote> {
        let context = self.context().await?;
        let quote = context.quote(task, today);

        counter!("payroll_price_calculations_total").increment(1);
        if quote.role.is_none() {
            counter!("payroll_unrecognized_roles_total").increment(1);
            warn!(role = %task.role, "无法识别的角色，计价为0");
        }
        if quote.zero_rated {
            debug!(email = %task.email, "成员处于请假期，计价为0");
        }

        Ok(quote)
    }

    /// 核对所有工作记录的金额
    #[instrument(skip(self))]
    pub async fn audit(&self, today: NaiveDate) -> PayrollResult<Vec<AuditEntry>> {
        let (jobs, context) = try_join!(self.store.fetch_table(Table::Jobs), self.context())?;
        let entries = audit_jobs(&jobs, &context, today);

        counter!("payroll_audit_mismatches_total").increment(entries.len() as u64);
        info!(checked = jobs.len(), mismatches = entries.len(), "金额核对完成");

        Ok(entries)
    }
}

/// 面板统计卡片
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DashboardStats {
    pub job_count: usize,
    pub member_count: usize,
    /// 记录金额合计，无法解析的金额按 0 计
    pub total_amount: f64,
    pub series_count: usize,
}

impl DashboardStats {
    pub fn from_snapshot(snapshot: &DataSnapshot) -> Self {
        let total_amount = snapshot
            .jobs
            .iter()
            .map(|job| number_or_zero(job.get(columns::job::AMOUNT)))
            .sum();

        Self {
            job_count: snapshot.jobs.len(),
            member_count: snapshot.members.len(),
            total_amount,
            series_count: snapshot.series.len(),
        }
    }
}
