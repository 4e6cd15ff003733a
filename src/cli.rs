use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// 命令行参数
#[derive(Parser, Debug)]
#[command(name = "payroll")]
#[command(version = "1.0.0")]
#[command(about = "Ekip ödeme takibi - 计件计酬命令行工具")]
#[command(long_about = "按费率表为翻译、嵌字、清理、校对等工作计价，并核对、统计和编辑表格数据")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 配置文件路径（缺省时依次尝试 config/payroll.toml 和 payroll.toml）
    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<String>,

    /// 日志级别，覆盖配置文件
    #[arg(short, long, value_name = "LEVEL", global = true,
          value_parser = ["trace", "debug", "info", "warn", "error"])]
    pub log_level: Option<String>,

    /// 日志格式，覆盖配置文件
    #[arg(long, value_name = "FORMAT", global = true, value_parser = ["json", "pretty"])]
    pub log_format: Option<String>,

    /// 使用本地 JSON 快照代替远端表格
    #[arg(long, value_name = "FILE", global = true)]
    pub snapshot: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Commands {
    /// 估算一项工作的金额
    Price {
        /// 角色，如 Translator、Trainee Typesetter、Çevirmen
        #[arg(short, long)]
        role: String,
        /// 大小 (KB)，接受 "5,4" 这样的写法
        #[arg(short, long)]
        size: String,
        /// 难度 (EASIEST / EASY / MEDIUM / HARD 或 EN KOLAY / KOLAY / ORTA / ZOR)
        #[arg(short, long, default_value = "MEDIUM")]
        difficulty: String,
        /// 成员邮箱，用于判断请假状态
        #[arg(short, long, default_value = "")]
        email: String,
        /// 工作日期 (YYYY-MM-DD)，缺省为今天
        #[arg(long)]
        date: Option<String>,
    },
    /// 按当前费率重新计价所有工作记录并列出金额不一致的行
    Audit {
        /// 视为"今天"的日期 (YYYY-MM-DD)
        #[arg(long)]
        today: Option<String>,
    },
    /// 面板统计
    Stats,
    /// 列出工作记录
    Jobs {
        /// 按系列、成员、邮箱或角色搜索
        #[arg(short, long)]
        search: Option<String>,
        /// 角色筛选（子串匹配）
        #[arg(short, long)]
        role: Option<String>,
        /// 排序列，表头原文或 ref_kb / amount / chapter 等名称
        #[arg(long)]
        sort: Option<String>,
        /// 降序
        #[arg(long)]
        desc: bool,
    },
    /// 列出成员及请假状态
    Members {
        /// 按姓名、邮箱或角色搜索
        #[arg(short, long)]
        search: Option<String>,
    },
    /// 列出系列
    Series {
        /// 按系列名搜索
        #[arg(short, long)]
        search: Option<String>,
    },
    /// 改写单个单元格
    SetCell {
        /// jobs / members / series / pricing
        #[arg(short, long)]
        table: String,
        /// 行号（表头为第1行）
        #[arg(short, long)]
        row: usize,
        /// 表头名称
        #[arg(long)]
        column: String,
        /// 新值，按手工输入的方式写入
        #[arg(short, long)]
        value: String,
    },
    /// 显示生效的配置
    Config,
}
