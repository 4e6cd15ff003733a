use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::str::FromStr;

use payroll_core::PayrollError;

use crate::cell::{cell_text, number_or_zero};
use crate::columns::{self, job as col};
use crate::entities::SheetRecord;

/// 工作记录表中可排序的列
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum JobColumn {
    Date,
    Series,
    Chapter,
    File,
    Role,
    RefKb,
    Amount,
    MemberName,
    Email,
    Difficulty,
}

impl JobColumn {
    pub fn header(&self) -> &'static str {
        match self {
            JobColumn::Date => col::DATE,
            JobColumn::Series => col::SERIES,
            JobColumn::Chapter => col::CHAPTER,
            JobColumn::File => col::FILE,
            JobColumn::Role => col::ROLE,
            JobColumn::RefKb => col::REF_KB,
            JobColumn::Amount => col::AMOUNT,
            JobColumn::MemberName => col::MEMBER_NAME,
            JobColumn::Email => col::EMAIL,
            JobColumn::Difficulty => col::DIFFICULTY,
        }
    }

    /// 按数值排序的列
    pub fn is_numeric(&self) -> bool {
        matches!(self, JobColumn::RefKb | JobColumn::Amount | JobColumn::Chapter)
    }
}

impl FromStr for JobColumn {
    type Err = PayrollError;

    /// 接受表头原文或 snake_case 名称
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let by_header = [
            JobColumn::Date,
            JobColumn::Series,
            JobColumn::Chapter,
            JobColumn::File,
            JobColumn::Role,
            JobColumn::RefKb,
            JobColumn::Amount,
            JobColumn::MemberName,
            JobColumn::Email,
            JobColumn::Difficulty,
        ]
        .into_iter()
        .find(|c| c.header() == s);
        if let Some(column) = by_header {
            return Ok(column);
        }

        match s.to_lowercase().as_str() {
            "date" => Ok(JobColumn::Date),
            "series" => Ok(JobColumn::Series),
            "chapter" => Ok(JobColumn::Chapter),
            "file" => Ok(JobColumn::File),
            "role" => Ok(JobColumn::Role),
            "ref_kb" | "size" => Ok(JobColumn::RefKb),
            "amount" => Ok(JobColumn::Amount),
            "member_name" | "member" => Ok(JobColumn::MemberName),
            "email" => Ok(JobColumn::Email),
            "difficulty" => Ok(JobColumn::Difficulty),
            _ => Err(PayrollError::column_not_found("jobs", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// 工作记录列表的搜索、角色筛选和排序
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct JobQuery {
    pub search: Option<String>,
    pub role_filter: Option<String>,
    pub sort: Option<(JobColumn, SortDirection)>,
}

impl JobQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role_filter = Some(role.into());
        self
    }

    pub fn sorted_by(mut self, column: JobColumn, direction: SortDirection) -> Self {
        self.sort = Some((column, direction));
        self
    }

    /// 搜索不区分大小写，范围为系列、成员、邮箱和角色
    pub fn matches(&self, record: &SheetRecord) -> bool {
        if let Some(search) = non_empty(&self.search) {
            if !contains_any(record, &[col::SERIES, col::MEMBER_NAME, col::EMAIL, col::ROLE], search) {
                return false;
            }
        }

        if let Some(role) = non_empty(&self.role_filter) {
            if !record.text(col::ROLE).contains(role) {
                return false;
            }
        }

        true
    }

    /// 筛选并排序，排序稳定
    pub fn apply<'a>(&self, records: &'a [SheetRecord]) -> Vec<&'a SheetRecord> {
        let mut rows: Vec<&SheetRecord> = records.iter().filter(|r| self.matches(r)).collect();

        if let Some((column, direction)) = self.sort {
            rows.sort_by(|a, b| {
                let ordering = compare_cells(a, b, column);
                match direction {
                    SortDirection::Asc => ordering,
                    SortDirection::Desc => ordering.reverse(),
                }
            });
        }

        rows
    }
}

/// 成员列表搜索，不区分大小写，范围为姓名、邮箱和角色
pub fn search_members<'a>(records: &'a [SheetRecord], search: Option<&str>) -> Vec<&'a SheetRecord> {
    let fields = [
        columns::member::NAME,
        columns::member::EMAIL,
        columns::member::ROLE,
    ];
    search_records(records, &fields, search)
}

/// 系列列表搜索，只匹配系列名
pub fn search_series<'a>(records: &'a [SheetRecord], search: Option<&str>) -> Vec<&'a SheetRecord> {
    search_records(records, &[columns::series::NAME], search)
}

fn search_records<'a>(
    records: &'a [SheetRecord],
    fields: &[&str],
    search: Option<&str>,
) -> Vec<&'a SheetRecord> {
    match search.map(str::trim).filter(|s| !s.is_empty()) {
        Some(search) => records
            .iter()
            .filter(|r| contains_any(r, fields, search))
            .collect(),
        None => records.iter().collect(),
    }
}

fn contains_any(record: &SheetRecord, fields: &[&str], search: &str) -> bool {
    let needle = search.to_lowercase();
    fields
        .iter()
        .any(|c| record.text(c).to_lowercase().contains(&needle))
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn compare_cells(a: &SheetRecord, b: &SheetRecord, column: JobColumn) -> Ordering {
    let header = column.header();
    if column.is_numeric() {
        number_or_zero(a.get(header)).total_cmp(&number_or_zero(b.get(header)))
    } else {
        cell_text(a.get(header)).cmp(&cell_text(b.get(header)))
    }
}
