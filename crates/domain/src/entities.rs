use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::cell::{cell_date, cell_text, is_truthy, number_or_zero, parse_number};
use crate::columns;
use crate::value_objects::Difficulty;

static EMPTY_CELL: Value = Value::Null;

/// 表格中的一行数据，按表头取值
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SheetRecord {
    /// 表格中的行号（从1开始，表头为第1行）
    pub row_index: usize,
    pub cells: BTreeMap<String, Value>,
}

impl SheetRecord {
    pub fn new(row_index: usize) -> Self {
        Self {
            row_index,
            cells: BTreeMap::new(),
        }
    }

    pub fn with_cell(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.cells.insert(column.into(), value.into());
        self
    }

    pub fn get(&self, column: &str) -> &Value {
        self.cells.get(column).unwrap_or(&EMPTY_CELL)
    }

    /// 取第一个存在且非空的别名列
    pub fn first_of(&self, columns: &[&str]) -> &Value {
        columns
            .iter()
            .filter_map(|c| self.cells.get(*c))
            .find(|v| !cell_text(v).is_empty())
            .unwrap_or(&EMPTY_CELL)
    }

    pub fn text(&self, column: &str) -> String {
        cell_text(self.get(column))
    }

    pub fn number(&self, column: &str) -> Option<f64> {
        parse_number(self.get(column))
    }
}

/// 计价输入
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TaskDescriptor {
    /// 原始角色文本，计价前规范化
    pub role: String,
    pub size_kb: f64,
    pub difficulty: Difficulty,
    pub email: String,
    /// `YYYY-MM-DD`，缺省表示今天
    pub task_date: Option<String>,
}

impl TaskDescriptor {
    pub fn new(role: impl Into<String>, size_kb: f64) -> Self {
        Self {
            role: role.into(),
            size_kb,
            difficulty: Difficulty::default(),
            email: String::new(),
            task_date: None,
        }
    }

    /// 从表单或表格原始值构建，数值解析失败按 0 KB 处理
    pub fn from_raw(
        role: &str,
        size: &Value,
        difficulty: &str,
        email: &str,
        task_date: Option<&str>,
    ) -> Self {
        Self {
            role: role.trim().to_string(),
            size_kb: number_or_zero(size),
            difficulty: Difficulty::parse_or_default(difficulty),
            email: email.trim().to_string(),
            task_date: task_date
                .map(str::trim)
                .filter(|d| !d.is_empty())
                .map(str::to_string),
        }
    }

    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    pub fn with_date(mut self, task_date: impl Into<String>) -> Self {
        self.task_date = Some(task_date.into());
        self
    }
}

/// 成员的请假（"kamp"）状态
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct WorkerStatus {
    pub email: String,
    pub on_leave: bool,
    /// `YYYY-MM-DD`，缺省表示无限期
    pub leave_end: Option<String>,
}

impl WorkerStatus {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            on_leave: false,
            leave_end: None,
        }
    }

    pub fn on_leave(mut self, leave_end: Option<&str>) -> Self {
        self.on_leave = true;
        self.leave_end = leave_end.map(str::to_string);
        self
    }

    pub fn matches_email(&self, email: &str) -> bool {
        let email = email.trim();
        !email.is_empty() && self.email.trim().eq_ignore_ascii_case(email)
    }
}

/// 成员表中的一行
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Member {
    pub row_index: usize,
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
    pub active: bool,
    pub blacklisted: bool,
    pub on_leave: bool,
    pub leave_end: Option<String>,
}

impl Member {
    pub fn from_record(record: &SheetRecord) -> Self {
        Self {
            row_index: record.row_index,
            id: record.text(columns::member::ID),
            name: record.text(columns::member::NAME),
            email: record.text(columns::member::EMAIL),
            role: record.text(columns::member::ROLE),
            active: is_truthy(record.get(columns::member::ACTIVE)),
            blacklisted: is_truthy(record.get(columns::member::BLACKLIST)),
            on_leave: is_truthy(record.first_of(&columns::member::ON_LEAVE_ALIASES)),
            leave_end: cell_date(record.first_of(&columns::member::LEAVE_END_ALIASES)),
        }
    }

    pub fn worker_status(&self) -> WorkerStatus {
        WorkerStatus {
            email: self.email.clone(),
            on_leave: self.on_leave,
            leave_end: self.leave_end.clone(),
        }
    }
}

/// 工作记录表中的一行
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Job {
    pub row_index: usize,
    pub date: Option<String>,
    pub series: String,
    pub chapter: String,
    pub file: String,
    pub role: String,
    pub ref_kb: f64,
    /// 表格中记录的金额，无法解析时为 `None`
    pub amount: Option<f64>,
    pub member_name: String,
    pub email: String,
    pub difficulty: Difficulty,
}

impl Job {
    pub fn from_record(record: &SheetRecord) -> Self {
        Self {
            row_index: record.row_index,
            date: cell_date(record.get(columns::job::DATE)),
            series: record.text(columns::job::SERIES),
            chapter: record.text(columns::job::CHAPTER),
            file: record.text(columns::job::FILE),
            role: record.text(columns::job::ROLE),
            ref_kb: number_or_zero(record.get(columns::job::REF_KB)),
            amount: record.number(columns::job::AMOUNT),
            member_name: record.text(columns::job::MEMBER_NAME),
            email: record.text(columns::job::EMAIL),
            difficulty: Difficulty::parse_or_default(&record.text(columns::job::DIFFICULTY)),
        }
    }

    /// 按记录自身的日期重新计价，避免成员状态变化后误判历史记录
    pub fn to_task(&self) -> TaskDescriptor {
        TaskDescriptor {
            role: self.role.clone(),
            size_kb: self.ref_kb,
            difficulty: self.difficulty,
            email: self.email.clone(),
            task_date: self.date.clone(),
        }
    }

    /// 从 Drive 链接中提取文件ID (`.../d/<id>/...`)
    pub fn drive_file_id(&self) -> Option<&str> {
        let start = self.file.find("/d/")? + 3;
        let rest = &self.file[start..];
        let end = rest
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_' || c == '-'))
            .unwrap_or(rest.len());
        (end > 0).then(|| &rest[..end])
    }
}

/// 系列表中的一行
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Series {
    pub row_index: usize,
    pub id: String,
    pub name: String,
    pub difficulty: Difficulty,
}

impl Series {
    pub fn from_record(record: &SheetRecord) -> Self {
        Self {
            row_index: record.row_index,
            id: record.text(columns::series::ID),
            name: record.text(columns::series::NAME),
            difficulty: Difficulty::parse_or_default(&record.text(columns::series::DIFFICULTY)),
        }
    }
}
