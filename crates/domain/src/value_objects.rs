use serde::{Deserialize, Serialize};
use std::fmt;

/// 难度等级，只影响清理(Cleaner)角色的固定单价
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "UPPERCASE")]
pub enum Difficulty {
    Easiest,
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Easiest,
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Hard,
    ];

    /// 容错解析，无法识别时回落到 MEDIUM
    ///
    /// 同时接受表格里的土耳其语写法 (`EN KOLAY` / `KOLAY` / `ORTA` / `ZOR`)。
    pub fn parse_or_default(raw: &str) -> Self {
        Self::parse(raw).unwrap_or_default()
    }

    pub fn parse(raw: &str) -> Option<Self> {
        let normalized = raw.split_whitespace().collect::<Vec<_>>().join(" ");
        match normalized.to_uppercase().as_str() {
            "EASIEST" | "EN KOLAY" => Some(Difficulty::Easiest),
            "EASY" | "KOLAY" => Some(Difficulty::Easy),
            "MEDIUM" | "ORTA" => Some(Difficulty::Medium),
            "HARD" | "ZOR" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easiest => "EASIEST",
            Difficulty::Easy => "EASY",
            Difficulty::Medium => "MEDIUM",
            Difficulty::Hard => "HARD",
        }
    }

    /// 表格中使用的写法
    pub fn sheet_label(&self) -> &'static str {
        match self {
            Difficulty::Easiest => "EN KOLAY",
            Difficulty::Easy => "KOLAY",
            Difficulty::Medium => "ORTA",
            Difficulty::Hard => "ZOR",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 基础角色
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum RoleKind {
    Translator,
    Typesetter,
    Cleaner,
    Editor,
    Proofreader,
}

impl RoleKind {
    /// 角色名词表: 英文名与表格中的土耳其语名
    fn aliases(&self) -> &'static [&'static str] {
        match self {
            RoleKind::Translator => &["Translator", "Çevirmen"],
            RoleKind::Typesetter => &["Typesetter", "Dizgici"],
            RoleKind::Cleaner => &["Cleaner", "Temizlikçi"],
            RoleKind::Editor => &["Editor", "Editör"],
            RoleKind::Proofreader => &["Proofreader", "Redaktör"],
        }
    }

    fn is_named_in(&self, text: &str) -> bool {
        self.aliases().iter().any(|alias| text.contains(alias))
    }

    fn is_exactly(&self, text: &str) -> bool {
        self.aliases().iter().any(|alias| text == *alias)
    }
}

const TRAINEE_ALIASES: [&str; 2] = ["Trainee", "Acemi"];

fn names_trainee(text: &str) -> bool {
    TRAINEE_ALIASES.iter().any(|alias| text.contains(alias))
}

/// 规范化后的角色: 基础角色 × 是否为实习
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Role {
    pub kind: RoleKind,
    pub trainee: bool,
}

impl Role {
    pub fn new(kind: RoleKind, trainee: bool) -> Self {
        Self { kind, trainee }
    }

    /// 把自由文本角色映射为封闭的角色集合
    ///
    /// 匹配顺序固定:
    /// 1. 包含 Cleaner 的一律是清理角色（保留实习标记，但计价时不使用）
    /// 2. 恰好等于 Translator / Typesetter / Editor / Proofreader
    /// 3. 带实习标记时依次匹配 Translator、Typesetter、Proofreader/Editor
    ///
    /// 其余组合返回 `None`，计价为 0。
    pub fn parse(raw: &str) -> Option<Self> {
        let text = raw.trim();
        if text.is_empty() {
            return None;
        }

        if RoleKind::Cleaner.is_named_in(text) {
            return Some(Self::new(RoleKind::Cleaner, names_trainee(text)));
        }

        for kind in [
            RoleKind::Translator,
            RoleKind::Typesetter,
            RoleKind::Editor,
            RoleKind::Proofreader,
        ] {
            if kind.is_exactly(text) {
                return Some(Self::new(kind, false));
            }
        }

        if names_trainee(text) {
            if RoleKind::Translator.is_named_in(text) {
                return Some(Self::new(RoleKind::Translator, true));
            }
            if RoleKind::Typesetter.is_named_in(text) {
                return Some(Self::new(RoleKind::Typesetter, true));
            }
            if RoleKind::Proofreader.is_named_in(text) {
                return Some(Self::new(RoleKind::Proofreader, true));
            }
            if RoleKind::Editor.is_named_in(text) {
                return Some(Self::new(RoleKind::Editor, true));
            }
        }

        None
    }
}

/// 角色徽标分类，用于列表展示和按角色汇总
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum RoleCategory {
    Translator,
    Typesetter,
    Cleaner,
    Editor,
    Trainee,
}

impl RoleCategory {
    /// 实习标记优先于基础角色
    pub fn of(role: &str) -> Option<Self> {
        if role.trim().is_empty() {
            return None;
        }
        if names_trainee(role) {
            return Some(RoleCategory::Trainee);
        }
        if RoleKind::Translator.is_named_in(role) {
            Some(RoleCategory::Translator)
        } else if RoleKind::Typesetter.is_named_in(role) {
            Some(RoleCategory::Typesetter)
        } else if RoleKind::Cleaner.is_named_in(role) {
            Some(RoleCategory::Cleaner)
        } else if RoleKind::Proofreader.is_named_in(role) || RoleKind::Editor.is_named_in(role) {
            Some(RoleCategory::Editor)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RoleCategory::Translator => "translator",
            RoleCategory::Typesetter => "typesetter",
            RoleCategory::Cleaner => "cleaner",
            RoleCategory::Editor => "editor",
            RoleCategory::Trainee => "trainee",
        }
    }
}

/// 角色文本的徽标分类
pub fn role_category(role: &str) -> Option<RoleCategory> {
    RoleCategory::of(role)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_parse() {
        assert_eq!(Difficulty::parse_or_default("HARD"), Difficulty::Hard);
        assert_eq!(Difficulty::parse_or_default("easy"), Difficulty::Easy);
        assert_eq!(Difficulty::parse_or_default("EN  KOLAY"), Difficulty::Easiest);
        assert_eq!(Difficulty::parse_or_default("zor"), Difficulty::Hard);
        assert_eq!(Difficulty::parse_or_default(""), Difficulty::Medium);
        assert_eq!(Difficulty::parse_or_default("extreme"), Difficulty::Medium);
        assert_eq!(Difficulty::default(), Difficulty::Medium);
    }

    #[test]
    fn test_role_exact_matches() {
        assert_eq!(
            Role::parse("Translator"),
            Some(Role::new(RoleKind::Translator, false))
        );
        assert_eq!(
            Role::parse(" Typesetter "),
            Some(Role::new(RoleKind::Typesetter, false))
        );
        assert_eq!(Role::parse("Editor"), Some(Role::new(RoleKind::Editor, false)));
        assert_eq!(
            Role::parse("Redaktör"),
            Some(Role::new(RoleKind::Proofreader, false))
        );
        assert_eq!(
            Role::parse("Çevirmen"),
            Some(Role::new(RoleKind::Translator, false))
        );
    }

    #[test]
    fn test_role_trainee_matches() {
        assert_eq!(
            Role::parse("Trainee Translator"),
            Some(Role::new(RoleKind::Translator, true))
        );
        assert_eq!(
            Role::parse("Acemi Dizgici"),
            Some(Role::new(RoleKind::Typesetter, true))
        );
        assert_eq!(
            Role::parse("Trainee Proofreader"),
            Some(Role::new(RoleKind::Proofreader, true))
        );
        assert_eq!(
            Role::parse("Trainee Editor"),
            Some(Role::new(RoleKind::Editor, true))
        );
    }

    #[test]
    fn test_role_cleaner_wins() {
        assert_eq!(Role::parse("Cleaner"), Some(Role::new(RoleKind::Cleaner, false)));
        assert_eq!(
            Role::parse("Trainee Cleaner"),
            Some(Role::new(RoleKind::Cleaner, true))
        );
        assert_eq!(
            Role::parse("Translator/Cleaner"),
            Some(Role::new(RoleKind::Cleaner, false))
        );
    }

    #[test]
    fn test_role_unrecognized() {
        assert_eq!(Role::parse(""), None);
        assert_eq!(Role::parse("Senior Translator"), None);
        assert_eq!(Role::parse("translator"), None);
        assert_eq!(Role::parse("Trainee"), None);
        assert_eq!(Role::parse("Manager"), None);
    }

    #[test]
    fn test_role_category() {
        assert_eq!(RoleCategory::of("Çevirmen"), Some(RoleCategory::Translator));
        assert_eq!(RoleCategory::of("Dizgici"), Some(RoleCategory::Typesetter));
        assert_eq!(RoleCategory::of("Temizlikçi"), Some(RoleCategory::Cleaner));
        assert_eq!(RoleCategory::of("Redaktör"), Some(RoleCategory::Editor));
        assert_eq!(RoleCategory::of("Acemi Çevirmen"), Some(RoleCategory::Trainee));
        assert_eq!(RoleCategory::of("Manager"), None);
        assert_eq!(RoleCategory::of(""), None);
    }
}
