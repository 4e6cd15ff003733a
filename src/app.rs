use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use serde_json::Value;
use tracing::{info, warn};

use payroll_core::AppConfig;
use payroll_domain::{
    load_snapshot, role_category, search_members, search_series, AuditEntry, DashboardStats, Job,
    JobColumn, JobQuery, Member, PriceQuote, PricingService, RowStore, Series, SortDirection,
    Table, TaskDescriptor,
};
use payroll_infrastructure::{RowStoreFactory, StoreSource};

use crate::cli::Commands;

/// 命令行应用，持有配置和行存储
pub struct Application {
    config: AppConfig,
    store: Arc<dyn RowStore>,
}

impl Application {
    /// 有快照文件时使用内存存储，否则连接远端表格
    pub async fn new(config: AppConfig, snapshot: Option<&Path>) -> Result<Self> {
        let source = match snapshot {
            Some(path) => StoreSource::Snapshot(path),
            None => StoreSource::Remote,
        };
        let store = RowStoreFactory::create(&config.sheets, source)
            .await
            .context("初始化行存储失败")?;
        Ok(Self::with_store(config, store))
    }

    pub fn with_store(config: AppConfig, store: Arc<dyn RowStore>) -> Self {
        Self { config, store }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// 执行命令并返回要输出的文本
    pub async fn run(&self, command: &Commands) -> Result<String> {
        match command {
            Commands::Price {
                role,
                size,
                difficulty,
                email,
                date,
            } => {
                let date = date.as_deref().map(parse_date).transpose()?;
                let task = TaskDescriptor::from_raw(
                    role,
                    &Value::String(size.clone()),
                    difficulty,
                    email,
                    date.map(|d| d.format("%Y-%m-%d").to_string()).as_deref(),
                );
                self.price(&task).await
            }
            Commands::Audit { today } => {
                let today = match today {
                    Some(raw) => parse_date(raw)?,
                    None => Local::now().date_naive(),
                };
                self.audit(today).await
            }
            Commands::Stats => self.stats().await,
            Commands::Jobs {
                search,
                role,
                sort,
                desc,
            } => {
                let mut query = JobQuery::new();
                query.search = search.clone();
                query.role_filter = role.clone();
                if let Some(column) = sort {
                    let column: JobColumn = column.parse().context("无效的排序列")?;
                    let direction = if *desc {
                        SortDirection::Desc
                    } else {
                        SortDirection::Asc
                    };
                    query = query.sorted_by(column, direction);
                }
                self.jobs(&query).await
            }
            Commands::Members { search } => self.members(search.as_deref()).await,
            Commands::Series { search } => self.series(search.as_deref()).await,
            Commands::SetCell {
                table,
                row,
                column,
                value,
            } => {
                let table: Table = table.parse().context("无效的数据表")?;
                self.set_cell(table, *row, column, value).await
            }
            Commands::Config => render_config(&self.config),
        }
    }

    async fn price(&self, task: &TaskDescriptor) -> Result<String> {
        let service = PricingService::new(self.store.clone());
        let quote = service.estimate(task).await.context("计价失败")?;
        Ok(render_quote(task, &quote))
    }

    async fn audit(&self, today: NaiveDate) -> Result<String> {
        let service = PricingService::new(self.store.clone());
        let entries = service.audit(today).await.context("核对金额失败")?;
        if !entries.is_empty() {
            warn!("发现 {} 行金额不一致", entries.len());
        }
        Ok(render_audit(&entries))
    }

    async fn stats(&self) -> Result<String> {
        let snapshot = load_snapshot(self.store.as_ref())
            .await
            .context("加载表格数据失败")?;
        Ok(render_stats(&DashboardStats::from_snapshot(&snapshot)))
    }

    async fn jobs(&self, query: &JobQuery) -> Result<String> {
        let records = self
            .store
            .fetch_table(Table::Jobs)
            .await
            .context("读取工作记录失败")?;
        let jobs: Vec<Job> = query.apply(&records).into_iter().map(Job::from_record).collect();
        Ok(render_jobs(&jobs))
    }

    async fn members(&self, search: Option<&str>) -> Result<String> {
        let records = self
            .store
            .fetch_table(Table::Members)
            .await
            .context("读取成员失败")?;
        let members: Vec<Member> = search_members(&records, search)
            .into_iter()
            .map(Member::from_record)
            .collect();
        Ok(render_members(&members))
    }

    async fn series(&self, search: Option<&str>) -> Result<String> {
        let records = self
            .store
            .fetch_table(Table::Series)
            .await
            .context("读取系列失败")?;
        let series: Vec<Series> = search_series(&records, search)
            .into_iter()
            .map(Series::from_record)
            .collect();
        Ok(render_series(&series))
    }

    async fn set_cell(&self, table: Table, row: usize, column: &str, value: &str) -> Result<String> {
        self.store
            .update_cell(table, row, column, Value::String(value.to_string()))
            .await
            .with_context(|| format!("更新单元格失败: {table} 第 {row} 行 {column}"))?;
        self.store.flush().await.context("保存修改失败")?;

        let sheet = table.sheet_name(&self.config.sheets.tables);
        info!("已更新 {} 第 {} 行 {}", sheet, row, column);
        Ok(format!("已更新 {sheet} 第 {row} 行 {column}: {value}"))
    }
}

fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .with_context(|| format!("日期格式应为 YYYY-MM-DD: {raw}"))
}

/// 输出配置，访问令牌只显示是否已设置
pub fn render_config(config: &AppConfig) -> Result<String> {
    let mut masked = config.clone();
    if masked.sheets.access_token.is_some() {
        masked.sheets.access_token = Some("******".to_string());
    }
    masked.to_toml()
}

fn render_quote(task: &TaskDescriptor, quote: &PriceQuote) -> String {
    let mut lines = vec![
        format!("角色: {}", task.role),
        format!("大小: {} KB  难度: {}", task.size_kb, task.difficulty),
    ];
    match quote.role {
        _ if quote.zero_rated => lines.push("成员处于请假期，金额为 0".to_string()),
        None => lines.push("无法识别的角色，金额为 0".to_string()),
        Some(role) => {
            let trainee = if role.trainee { "，实习" } else { "" };
            lines.push(format!("计价角色: {:?}{}", role.kind, trainee));
            lines.push(format!("单价: {}  系数: {}", quote.unit_rate, quote.multiplier));
        }
    }
    lines.push(format!("金额: {} TL", quote.amount));
    lines.join("\n")
}

fn render_audit(entries: &[AuditEntry]) -> String {
    if entries.is_empty() {
        return "所有记录金额一致".to_string();
    }

    let mut out = format!("共 {} 行金额不一致", entries.len());
    for entry in entries {
        let recorded = entry
            .recorded
            .map(|v| format!("{v} TL"))
            .unwrap_or_else(|| "空".to_string());
        let leave = if entry.zero_rated { " (请假期)" } else { "" };
        out.push_str(&format!(
            "\n第 {} 行 {} #{} {} {}: 记录 {}，应为 {} TL{}",
            entry.row_index,
            entry.series,
            entry.chapter,
            entry.member_name,
            entry.role,
            recorded,
            entry.expected,
            leave
        ));
    }
    out
}

fn render_stats(stats: &DashboardStats) -> String {
    format!(
        "工作记录: {}\n成员: {}\n总金额: {} TL\n系列: {}",
        stats.job_count, stats.member_count, stats.total_amount, stats.series_count
    )
}

fn render_jobs(jobs: &[Job]) -> String {
    if jobs.is_empty() {
        return "没有匹配的工作记录".to_string();
    }

    let mut out = String::from("行\t日期\t系列\t章节\t角色\t分类\tKB\t金额\t成员\t文件");
    for job in jobs {
        let category = role_category(&job.role).map(|c| c.as_str()).unwrap_or("-");
        let amount = job
            .amount
            .map(|v| format!("{v:.0}"))
            .unwrap_or_else(|| "0".to_string());
        out.push_str(&format!(
            "\n{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
            job.row_index,
            job.date.as_deref().unwrap_or("-"),
            job.series,
            job.chapter,
            job.role,
            category,
            job.ref_kb,
            amount,
            job.member_name,
            job.drive_file_id().unwrap_or("-"),
        ));
    }
    out
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "是"
    } else {
        "否"
    }
}

fn render_members(members: &[Member]) -> String {
    if members.is_empty() {
        return "没有匹配的成员".to_string();
    }

    let mut out = String::from("行\tID\t姓名\t邮箱\t角色\t在职\t黑名单\t请假至");
    for member in members {
        let leave = match (member.on_leave, member.leave_end.as_deref()) {
            (false, _) => "-",
            (true, Some(end)) => end,
            (true, None) => "长期",
        };
        out.push_str(&format!(
            "\n{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
            member.row_index,
            member.id,
            member.name,
            member.email,
            member.role,
            yes_no(member.active),
            yes_no(member.blacklisted),
            leave,
        ));
    }
    out
}

fn render_series(series: &[Series]) -> String {
    if series.is_empty() {
        return "没有匹配的系列".to_string();
    }

    let mut out = String::from("行\tID\t系列\t难度");
    for item in series {
        out.push_str(&format!(
            "\n{}\t{}\t{}\t{}",
            item.row_index,
            item.id,
            item.name,
            item.difficulty.sheet_label()
        ));
    }
    out
}
