use chrono::NaiveDate;

use crate::entities::WorkerStatus;

/// 按邮箱查找成员（忽略大小写和首尾空白），重复时取第一条
pub fn find_worker<'a>(members: &'a [WorkerStatus], email: &str) -> Option<&'a WorkerStatus> {
    members.iter().find(|m| m.matches_email(email))
}

/// 请假状态判断，返回 `true` 表示本次计价为 0
///
/// - 找不到成员或未请假: `false`
/// - 请假且没有结束日期: 永久为 0
/// - 请假且有结束日期: 任务日期（缺省为 `today`）不晚于结束日期时为 0
///
/// 日期均为补零的 `YYYY-MM-DD`，按字典序比较即为按时间比较。
/// 编辑历史记录时必须传入记录本身的日期，否则成员状态变化后会误判旧记录。
pub fn is_zero_rated(
    worker: Option<&WorkerStatus>,
    task_date: Option<&str>,
    today: NaiveDate,
) -> bool {
    let Some(worker) = worker else {
        return false;
    };
    if !worker.on_leave {
        return false;
    }

    let leave_end = worker
        .leave_end
        .as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty());
    let Some(leave_end) = leave_end else {
        return true;
    };

    match task_date.map(str::trim).filter(|d| !d.is_empty()) {
        Some(date) => date <= leave_end,
        None => today.format("%Y-%m-%d").to_string().as_str() <= leave_end,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_unknown_or_active_worker() {
        let today = day("2024-01-05");
        assert!(!is_zero_rated(None, None, today));

        let worker = WorkerStatus::new("a@b.c");
        assert!(!is_zero_rated(Some(&worker), Some("2024-01-01"), today));
    }

    #[test]
    fn test_indefinite_leave() {
        let worker = WorkerStatus::new("a@b.c").on_leave(None);
        assert!(is_zero_rated(Some(&worker), None, day("2030-01-01")));
        assert!(is_zero_rated(Some(&worker), Some("1999-12-31"), day("2024-01-01")));

        let blank_end = WorkerStatus::new("a@b.c").on_leave(Some("  "));
        assert!(is_zero_rated(Some(&blank_end), Some("2024-01-01"), day("2024-01-01")));
    }

    #[test]
    fn test_leave_with_end_date() {
        let worker = WorkerStatus::new("a@b.c").on_leave(Some("2024-01-10"));
        let today = day("2024-01-05");
        assert!(is_zero_rated(Some(&worker), Some("2024-01-09"), today));
        assert!(is_zero_rated(Some(&worker), Some("2024-01-10"), today));
        assert!(!is_zero_rated(Some(&worker), Some("2024-01-11"), today));
    }

    #[test]
    fn test_missing_task_date_uses_today() {
        let worker = WorkerStatus::new("a@b.c").on_leave(Some("2024-01-10"));
        assert!(is_zero_rated(Some(&worker), None, day("2024-01-10")));
        assert!(!is_zero_rated(Some(&worker), None, day("2024-01-11")));
        assert!(!is_zero_rated(Some(&worker), Some(""), day("2024-02-01")));
    }

    #[test]
    fn test_find_worker_case_insensitive() {
        let members = vec![
            WorkerStatus::new("Deniz@Example.com").on_leave(None),
            WorkerStatus::new("deniz@example.com"),
        ];
        let found = find_worker(&members, " DENIZ@example.COM").unwrap();
        assert!(found.on_leave);
        assert!(find_worker(&members, "other@example.com").is_none());
        assert!(find_worker(&members, "").is_none());
    }
}
