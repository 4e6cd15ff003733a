use serde::{Deserialize, Serialize};

use crate::cell::{cell_date, parse_number};
use crate::columns::pricing as col;
use crate::entities::SheetRecord;
use crate::pricing::bands::{Band, OPEN_BAND_LIMIT};
use crate::value_objects::Difficulty;

/// 费率表中的一行，每个字段都可能缺失
///
/// 费率表由非技术人员填写，可能只填了一部分，缺失的字段在 [`resolve_rates`] 中补默认值。
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RateSchedule {
    pub effective: Option<String>,
    pub translation_0_3: Option<f64>,
    pub translation_3_6: Option<f64>,
    pub translation_6_8: Option<f64>,
    pub translation_8_plus: Option<f64>,
    pub typesetting_0_3: Option<f64>,
    pub typesetting_3_6: Option<f64>,
    pub typesetting_6_7: Option<f64>,
    pub typesetting_7_plus: Option<f64>,
    pub cleaning_easiest: Option<f64>,
    pub cleaning_easy: Option<f64>,
    pub cleaning_medium: Option<f64>,
    pub cleaning_hard: Option<f64>,
    pub editor_discount: Option<f64>,
    pub trainee_multiplier: Option<f64>,
}

impl RateSchedule {
    /// 从费率表的一行读取，表头可以是表格中的土耳其语写法，也可以是字段名
    pub fn from_record(record: &SheetRecord) -> Self {
        let number = |header: &str, key: &str| parse_number(record.first_of(&[header, key]));

        Self {
            effective: cell_date(record.first_of(&[col::EFFECTIVE, "effective"])),
            translation_0_3: number(col::TRANSLATION_0_3, "translation_0_3"),
            translation_3_6: number(col::TRANSLATION_3_6, "translation_3_6"),
            translation_6_8: number(col::TRANSLATION_6_8, "translation_6_8"),
            translation_8_plus: number(col::TRANSLATION_8_PLUS, "translation_8_plus"),
            typesetting_0_3: number(col::TYPESETTING_0_3, "typesetting_0_3"),
            typesetting_3_6: number(col::TYPESETTING_3_6, "typesetting_3_6"),
            typesetting_6_7: number(col::TYPESETTING_6_7, "typesetting_6_7"),
            typesetting_7_plus: number(col::TYPESETTING_7_PLUS, "typesetting_7_plus"),
            cleaning_easiest: number(col::CLEANING_EASIEST, "cleaning_easiest"),
            cleaning_easy: number(col::CLEANING_EASY, "cleaning_easy"),
            cleaning_medium: number(col::CLEANING_MEDIUM, "cleaning_medium"),
            cleaning_hard: number(col::CLEANING_HARD, "cleaning_hard"),
            editor_discount: number(col::EDITOR_DISCOUNT, "editor_discount"),
            trainee_multiplier: number(col::TRAINEE_MULTIPLIER, "trainee_multiplier"),
        }
    }

    /// 当前生效的费率: 费率表的第一行数据
    pub fn active(records: &[SheetRecord]) -> Option<Self> {
        records.first().map(Self::from_record)
    }
}

/// 补全默认值后的费率
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ResolvedRates {
    /// 0-3 / 3-6 / 6-8 / 8+ KB
    pub translation: [f64; 4],
    /// 0-3 / 3-6 / 6-7 / 7+ KB
    pub typesetting: [f64; 4],
    /// EASIEST / EASY / MEDIUM / HARD
    pub cleaning: [f64; 4],
    pub editor_discount: f64,
    pub trainee_multiplier: f64,
}

impl ResolvedRates {
    pub const DEFAULT: ResolvedRates = ResolvedRates {
        translation: [20.0, 25.0, 30.0, 35.0],
        typesetting: [10.0, 15.0, 20.0, 25.0],
        cleaning: [6.0, 7.0, 8.0, 10.0],
        editor_discount: 3.0,
        trainee_multiplier: 0.5,
    };

    pub fn translation_bands(&self) -> [Band; 4] {
        let [a, b, c, d] = self.translation;
        [
            Band::new(0.0, 3.0, a),
            Band::new(3.0, 6.0, b),
            Band::new(6.0, 8.0, c),
            Band::new(8.0, OPEN_BAND_LIMIT, d),
        ]
    }

    pub fn typesetting_bands(&self) -> [Band; 4] {
        let [a, b, c, d] = self.typesetting;
        [
            Band::new(0.0, 3.0, a),
            Band::new(3.0, 6.0, b),
            Band::new(6.0, 7.0, c),
            Band::new(7.0, OPEN_BAND_LIMIT, d),
        ]
    }

    /// 编辑/校对: 翻译档位减去编辑折扣
    pub fn editor_bands(&self) -> [Band; 4] {
        self.translation_bands().map(|band| Band {
            rate: band.rate - self.editor_discount,
            ..band
        })
    }

    pub fn cleaning_rate(&self, difficulty: Difficulty) -> f64 {
        match difficulty {
            Difficulty::Easiest => self.cleaning[0],
            Difficulty::Easy => self.cleaning[1],
            Difficulty::Medium => self.cleaning[2],
            Difficulty::Hard => self.cleaning[3],
        }
    }
}

impl Default for ResolvedRates {
    fn default() -> Self {
        Self::DEFAULT
    }
}

fn rate_or(value: Option<f64>, default: f64) -> f64 {
    value.filter(|v| v.is_finite()).unwrap_or(default)
}

/// 解析费率，没有费率表或字段缺失时使用默认值
pub fn resolve_rates(schedule: Option<&RateSchedule>) -> ResolvedRates {
    let d = ResolvedRates::DEFAULT;
    let Some(s) = schedule else {
        return d;
    };

    ResolvedRates {
        translation: [
            rate_or(s.translation_0_3, d.translation[0]),
            rate_or(s.translation_3_6, d.translation[1]),
            rate_or(s.translation_6_8, d.translation[2]),
            rate_or(s.translation_8_plus, d.translation[3]),
        ],
        typesetting: [
            rate_or(s.typesetting_0_3, d.typesetting[0]),
            rate_or(s.typesetting_3_6, d.typesetting[1]),
            rate_or(s.typesetting_6_7, d.typesetting[2]),
            rate_or(s.typesetting_7_plus, d.typesetting[3]),
        ],
        cleaning: [
            rate_or(s.cleaning_easiest, d.cleaning[0]),
            rate_or(s.cleaning_easy, d.cleaning[1]),
            rate_or(s.cleaning_medium, d.cleaning[2]),
            rate_or(s.cleaning_hard, d.cleaning[3]),
        ],
        editor_discount: rate_or(s.editor_discount, d.editor_discount),
        trainee_multiplier: rate_or(s.trainee_multiplier, d.trainee_multiplier),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults_without_schedule() {
        let rates = resolve_rates(None);
        assert_eq!(rates.translation, [20.0, 25.0, 30.0, 35.0]);
        assert_eq!(rates.typesetting, [10.0, 15.0, 20.0, 25.0]);
        assert_eq!(rates.cleaning, [6.0, 7.0, 8.0, 10.0]);
        assert_eq!(rates.editor_discount, 3.0);
        assert_eq!(rates.trainee_multiplier, 0.5);
        assert_eq!(rates, ResolvedRates::default());
    }

    #[test]
    fn test_partial_schedule_from_record() {
        let record = SheetRecord::new(2)
            .with_cell("Geçerlilik", "2024-06-01")
            .with_cell("Çeviri 0-3 KB", 22)
            .with_cell("Çeviri 8+ KB", "40")
            .with_cell("Dizgi 6-7 KB", "yirmi")
            .with_cell("Temiz ZOR", 12.5)
            .with_cell("Acemi Çarpanı", "0,6")
            .with_cell("Editör İndirimi", "");

        let schedule = RateSchedule::from_record(&record);
        assert_eq!(schedule.effective.as_deref(), Some("2024-06-01"));
        assert_eq!(schedule.translation_0_3, Some(22.0));
        assert_eq!(schedule.typesetting_6_7, None);
        assert_eq!(schedule.editor_discount, None);

        let rates = resolve_rates(Some(&schedule));
        assert_eq!(rates.translation, [22.0, 25.0, 30.0, 40.0]);
        assert_eq!(rates.typesetting, [10.0, 15.0, 20.0, 25.0]);
        assert_eq!(rates.cleaning_rate(Difficulty::Hard), 12.5);
        assert_eq!(rates.editor_discount, 3.0);
        assert_eq!(rates.trainee_multiplier, 0.6);
    }

    #[test]
    fn test_field_name_aliases() {
        let record = SheetRecord::new(2)
            .with_cell("translation_3_6", json!(27))
            .with_cell("trainee_multiplier", json!(0.4));
        let rates = resolve_rates(Some(&RateSchedule::from_record(&record)));
        assert_eq!(rates.translation[1], 27.0);
        assert_eq!(rates.trainee_multiplier, 0.4);
    }

    #[test]
    fn test_non_finite_falls_back() {
        let schedule = RateSchedule {
            translation_0_3: Some(f64::NAN),
            cleaning_easy: Some(f64::INFINITY),
            ..RateSchedule::default()
        };
        let rates = resolve_rates(Some(&schedule));
        assert_eq!(rates.translation[0], 20.0);
        assert_eq!(rates.cleaning[1], 7.0);
    }

    #[test]
    fn test_active_is_first_row() {
        let rows = vec![
            SheetRecord::new(2).with_cell("Çeviri 0-3 KB", 21),
            SheetRecord::new(3).with_cell("Çeviri 0-3 KB", 99),
        ];
        let active = RateSchedule::active(&rows).unwrap();
        assert_eq!(active.translation_0_3, Some(21.0));
        assert!(RateSchedule::active(&[]).is_none());
    }

    #[test]
    fn test_editor_bands() {
        let bands = ResolvedRates::DEFAULT.editor_bands();
        let rates: Vec<f64> = bands.iter().map(|b| b.rate).collect();
        assert_eq!(rates, vec![17.0, 22.0, 27.0, 32.0]);
        assert_eq!(bands[3].high_inclusive, OPEN_BAND_LIMIT);
    }
}
