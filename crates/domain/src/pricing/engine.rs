use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::entities::{TaskDescriptor, WorkerStatus};
use crate::pricing::bands::{band_rate, round_half_up};
use crate::pricing::leave::{find_worker, is_zero_rated};
use crate::pricing::rates::{resolve_rates, RateSchedule, ResolvedRates};
use crate::value_objects::{Difficulty, Role, RoleKind};

/// 一次计价的结果及其组成，用于展示和核对
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PriceQuote {
    pub amount: u32,
    /// 无法识别的角色为 `None`
    pub role: Option<Role>,
    pub zero_rated: bool,
    /// 档位单价（编辑/校对已扣除折扣），清理角色为难度单价
    pub unit_rate: f64,
    pub multiplier: f64,
}

impl PriceQuote {
    fn zero(role: Option<Role>, zero_rated: bool) -> Self {
        Self {
            amount: 0,
            role,
            zero_rated,
            unit_rate: 0.0,
            multiplier: 1.0,
        }
    }
}

fn to_amount(value: f64) -> u32 {
    let rounded = round_half_up(value);
    if rounded.is_finite() && rounded > 0.0 {
        rounded.min(u32::MAX as f64) as u32
    } else {
        0
    }
}

fn quote_role(
    role: Role,
    size_kb: f64,
    difficulty: Difficulty,
    rates: &ResolvedRates,
) -> PriceQuote {
    let (unit_rate, multiplier) = match role.kind {
        // 清理角色按难度固定计价，实习也不打折
        RoleKind::Cleaner => (rates.cleaning_rate(difficulty), 1.0),
        RoleKind::Translator => (
            band_rate(&rates.translation_bands(), size_kb),
            trainee_multiplier(role, rates),
        ),
        RoleKind::Typesetter => (
            band_rate(&rates.typesetting_bands(), size_kb),
            trainee_multiplier(role, rates),
        ),
        // 实习校对/编辑只扣编辑折扣，不乘实习系数
        RoleKind::Editor | RoleKind::Proofreader => (band_rate(&rates.editor_bands(), size_kb), 1.0),
    };

    PriceQuote {
        amount: to_amount(unit_rate * multiplier),
        role: Some(role),
        zero_rated: false,
        unit_rate,
        multiplier,
    }
}

fn trainee_multiplier(role: Role, rates: &ResolvedRates) -> f64 {
    if role.trainee {
        rates.trainee_multiplier
    } else {
        1.0
    }
}

/// 按角色、大小和难度计价（不考虑请假状态）
pub fn price_for_role(
    role: &str,
    size_kb: f64,
    difficulty: Difficulty,
    rates: &ResolvedRates,
) -> u32 {
    match Role::parse(role) {
        Some(role) => quote_role(role, size_kb, difficulty, rates).amount,
        None => 0,
    }
}

/// 完整计价并返回组成明细，`today` 用于缺省的任务日期
pub fn quote(
    task: &TaskDescriptor,
    schedule: Option<&RateSchedule>,
    members: &[WorkerStatus],
    today: NaiveDate,
) -> PriceQuote {
    let role = Role::parse(&task.role);

    let worker = find_worker(members, &task.email);
    if is_zero_rated(worker, task.task_date.as_deref(), today) {
        return PriceQuote::zero(role, true);
    }

    let rates = resolve_rates(schedule);
    match role {
        Some(role) => quote_role(role, task.size_kb, task.difficulty, &rates),
        None => PriceQuote::zero(None, false),
    }
}

/// 计价入口，纯函数版本
pub fn calculate_price_on(
    task: &TaskDescriptor,
    schedule: Option<&RateSchedule>,
    members: &[WorkerStatus],
    today: NaiveDate,
) -> u32 {
    quote(task, schedule, members, today).amount
}

/// 计价入口，缺省任务日期取本地当天
pub fn calculate_price(
    task: &TaskDescriptor,
    schedule: Option<&RateSchedule>,
    members: &[WorkerStatus],
) -> u32 {
    calculate_price_on(task, schedule, members, Local::now().date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEFAULTS: ResolvedRates = ResolvedRates::DEFAULT;

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_translator_bands() {
        let price = |s: f64| price_for_role("Translator", s, Difficulty::Medium, &DEFAULTS);
        assert_eq!(price(0.0), 0);
        assert_eq!(price(1.0), 20);
        assert_eq!(price(3.0), 20);
        assert_eq!(price(4.0), 25);
        assert_eq!(price(6.0), 25);
        assert_eq!(price(7.0), 30);
        assert_eq!(price(8.0), 30);
        assert_eq!(price(9.0), 35);
        assert_eq!(price(100.0), 35);
        assert_eq!(price(5000.0), 35);
    }

    #[test]
    fn test_typesetter_bands() {
        let price = |s: f64| price_for_role("Typesetter", s, Difficulty::Medium, &DEFAULTS);
        assert_eq!(price(2.0), 10);
        assert_eq!(price(5.0), 15);
        assert_eq!(price(7.0), 20);
        assert_eq!(price(8.0), 25);
    }

    #[test]
    fn test_trainee_translator_rounds_half_up() {
        // 25 * 0.5 = 12.5 -> 13
        assert_eq!(
            price_for_role("Trainee Translator", 5.0, Difficulty::Medium, &DEFAULTS),
            13
        );
        // 15 * 0.5 = 7.5 -> 8
        assert_eq!(
            price_for_role("Trainee Typesetter", 4.0, Difficulty::Medium, &DEFAULTS),
            8
        );
        assert_eq!(
            price_for_role("Acemi Çevirmen", 2.0, Difficulty::Medium, &DEFAULTS),
            10
        );
    }

    #[test]
    fn test_cleaner_ignores_size_and_trainee() {
        for size in [0.0, 1.0, 7.0, 2000.0] {
            assert_eq!(price_for_role("Cleaner", size, Difficulty::Hard, &DEFAULTS), 10);
            assert_eq!(
                price_for_role("Trainee Cleaner", size, Difficulty::Hard, &DEFAULTS),
                10
            );
        }
        assert_eq!(price_for_role("Cleaner", 3.0, Difficulty::Easiest, &DEFAULTS), 6);
        assert_eq!(price_for_role("Temizlikçi", 3.0, Difficulty::Easy, &DEFAULTS), 7);
        assert_eq!(price_for_role("Cleaner", 3.0, Difficulty::Medium, &DEFAULTS), 8);
    }

    #[test]
    fn test_editor_and_proofreader_discount() {
        assert_eq!(price_for_role("Editor", 2.0, Difficulty::Medium, &DEFAULTS), 17);
        assert_eq!(price_for_role("Proofreader", 5.0, Difficulty::Medium, &DEFAULTS), 22);
        // 实习校对不乘实习系数
        assert_eq!(
            price_for_role("Trainee Proofreader", 9.0, Difficulty::Medium, &DEFAULTS),
            32
        );
        assert_eq!(
            price_for_role("Trainee Editor", 2.0, Difficulty::Medium, &DEFAULTS),
            17
        );
        assert_eq!(price_for_role("Editor", 0.0, Difficulty::Medium, &DEFAULTS), 0);
    }

    #[test]
    fn test_discount_larger_than_rate_clamps_to_zero() {
        let rates = ResolvedRates {
            editor_discount: 50.0,
            ..DEFAULTS
        };
        assert_eq!(price_for_role("Editor", 2.0, Difficulty::Medium, &rates), 0);
    }

    #[test]
    fn test_unrecognized_roles_are_zero() {
        for role in ["", "Manager", "Senior Translator", "translator", "Trainee", "Trainee Manager"] {
            assert_eq!(price_for_role(role, 5.0, Difficulty::Medium, &DEFAULTS), 0);
            let task = TaskDescriptor::new(role, 5.0);
            assert_eq!(calculate_price_on(&task, None, &[], day("2024-01-01")), 0);
        }
    }

    #[test]
    fn test_indefinite_leave_zero_rates_everything() {
        let members = vec![WorkerStatus::new("camp@example.com").on_leave(None)];
        for role in ["Translator", "Cleaner", "Editor"] {
            let task = TaskDescriptor::new(role, 5.0)
                .with_email("CAMP@example.com")
                .with_date("2024-05-01");
            let quote = quote(&task, None, &members, day("2024-05-01"));
            assert_eq!(quote.amount, 0);
            assert!(quote.zero_rated);
        }
    }

    #[test]
    fn test_leave_with_end_date() {
        let members = vec![WorkerStatus::new("camp@example.com").on_leave(Some("2024-01-10"))];
        let today = day("2024-01-05");
        let task = TaskDescriptor::new("Translator", 5.0).with_email("camp@example.com");

        let on_end = task.clone().with_date("2024-01-10");
        assert_eq!(calculate_price_on(&on_end, None, &members, today), 0);

        let after_end = task.clone().with_date("2024-01-11");
        assert_eq!(calculate_price_on(&after_end, None, &members, today), 25);

        // 未给日期时按今天判断
        assert_eq!(calculate_price_on(&task, None, &members, day("2024-01-12")), 25);
        assert_eq!(calculate_price_on(&task, None, &members, day("2024-01-10")), 0);
    }

    #[test]
    fn test_schedule_overrides_defaults() {
        let schedule = RateSchedule {
            translation_3_6: Some(40.0),
            trainee_multiplier: Some(0.25),
            ..RateSchedule::default()
        };
        let task = TaskDescriptor::new("Trainee Translator", 4.0);
        assert_eq!(calculate_price_on(&task, Some(&schedule), &[], day("2024-01-01")), 10);
    }

    #[test]
    fn test_calculate_price_is_idempotent() {
        let members = vec![WorkerStatus::new("a@b.c")];
        let task = TaskDescriptor::new("Typesetter", 6.6).with_email("a@b.c");
        let first = calculate_price(&task, None, &members);
        let second = calculate_price(&task, None, &members);
        assert_eq!(first, second);
        assert_eq!(first, 20);
    }

    #[test]
    fn test_price_is_monotonic_across_bands() {
        for role in ["Translator", "Typesetter", "Editor", "Trainee Translator"] {
            let mut previous = 0;
            for size in 0..=1100 {
                let price = price_for_role(role, size as f64, Difficulty::Medium, &DEFAULTS);
                assert!(price >= previous, "{role} price dropped at {size} KB");
                previous = price;
            }
        }
    }

    #[test]
    fn test_quote_details() {
        let task = TaskDescriptor::new("Trainee Typesetter", 7.0);
        let quote = quote(&task, None, &[], day("2024-01-01"));
        assert_eq!(quote.role, Some(Role::new(RoleKind::Typesetter, true)));
        assert_eq!(quote.unit_rate, 20.0);
        assert_eq!(quote.multiplier, 0.5);
        assert_eq!(quote.amount, 10);
        assert!(!quote.zero_rated);
    }
}
