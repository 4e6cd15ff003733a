//! 表头名称
//!
//! 表格表头沿用面板的土耳其语写法。请假相关列同时接受英文别名。

pub mod job {
    pub const DATE: &str = "Tarih";
    pub const SERIES: &str = "Seri";
    pub const CHAPTER: &str = "Bölüm";
    pub const FILE: &str = "Dosya";
    pub const ROLE: &str = "Rol";
    pub const REF_KB: &str = "Ref KB";
    pub const AMOUNT: &str = "Ücret (TL)";
    pub const MEMBER_NAME: &str = "Üye Adı";
    pub const EMAIL: &str = "Email";
    pub const DIFFICULTY: &str = "Zorluk";

    pub const ALL: [&str; 10] = [
        DATE,
        SERIES,
        CHAPTER,
        FILE,
        ROLE,
        REF_KB,
        AMOUNT,
        MEMBER_NAME,
        EMAIL,
        DIFFICULTY,
    ];
}

pub mod member {
    pub const ID: &str = "ID";
    pub const NAME: &str = "İsim";
    pub const EMAIL: &str = "Email";
    pub const ROLE: &str = "Rol";
    pub const ACTIVE: &str = "Aktif";
    pub const BLACKLIST: &str = "Karaliste";
    pub const ON_LEAVE: &str = "Kamp";
    pub const LEAVE_END: &str = "Kamp Bitiş";

    pub const ON_LEAVE_ALIASES: [&str; 2] = [ON_LEAVE, "On Leave"];
    pub const LEAVE_END_ALIASES: [&str; 2] = [LEAVE_END, "Leave End"];

    pub const ALL: [&str; 8] = [ID, NAME, EMAIL, ROLE, ACTIVE, BLACKLIST, ON_LEAVE, LEAVE_END];
}

pub mod series {
    pub const ID: &str = "ID";
    pub const NAME: &str = "Seri Adı";
    pub const DIFFICULTY: &str = "Zorluk";

    pub const ALL: [&str; 3] = [ID, NAME, DIFFICULTY];
}

pub mod pricing {
    pub const EFFECTIVE: &str = "Geçerlilik";
    pub const TRANSLATION_0_3: &str = "Çeviri 0-3 KB";
    pub const TRANSLATION_3_6: &str = "Çeviri 3-6 KB";
    pub const TRANSLATION_6_8: &str = "Çeviri 6-8 KB";
    pub const TRANSLATION_8_PLUS: &str = "Çeviri 8+ KB";
    pub const EDITOR_DISCOUNT: &str = "Editör İndirimi";
    pub const TYPESETTING_0_3: &str = "Dizgi 0-3 KB";
    pub const TYPESETTING_3_6: &str = "Dizgi 3-6 KB";
    pub const TYPESETTING_6_7: &str = "Dizgi 6-7 KB";
    pub const TYPESETTING_7_PLUS: &str = "Dizgi 7+ KB";
    pub const CLEANING_HARD: &str = "Temiz ZOR";
    pub const CLEANING_MEDIUM: &str = "Temiz ORTA";
    pub const CLEANING_EASY: &str = "Temiz KOLAY";
    pub const CLEANING_EASIEST: &str = "Temiz EN KOLAY";
    pub const TRAINEE_MULTIPLIER: &str = "Acemi Çarpanı";

    pub const ALL: [&str; 15] = [
        EFFECTIVE,
        TRANSLATION_0_3,
        TRANSLATION_3_6,
        TRANSLATION_6_8,
        TRANSLATION_8_PLUS,
        EDITOR_DISCOUNT,
        TYPESETTING_0_3,
        TYPESETTING_3_6,
        TYPESETTING_6_7,
        TYPESETTING_7_PLUS,
        CLEANING_HARD,
        CLEANING_MEDIUM,
        CLEANING_EASY,
        CLEANING_EASIEST,
        TRAINEE_MULTIPLIER,
    ];
}
