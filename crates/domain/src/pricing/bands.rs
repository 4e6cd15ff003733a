/// 最后一档的上限哨兵值
pub const OPEN_BAND_LIMIT: f64 = 999.0;

/// 大小档位: `(low_exclusive, high_inclusive]` 对应一个单价
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Band {
    pub low_exclusive: f64,
    pub high_inclusive: f64,
    pub rate: f64,
}

impl Band {
    pub const fn new(low_exclusive: f64, high_inclusive: f64, rate: f64) -> Self {
        Self {
            low_exclusive,
            high_inclusive,
            rate,
        }
    }

    pub fn contains(&self, size: f64) -> bool {
        self.low_exclusive < size && size <= self.high_inclusive
    }
}

/// 四舍五入到整数，.5 向远离零的方向进位（非负数即"四舍五入"）
pub fn round_half_up(value: f64) -> f64 {
    value.round()
}

/// 查找大小对应的单价
///
/// 大小先取整，再找第一个满足 `low < size <= high` 的档位。
/// 没有命中时返回 0，除非大小超过最后一档的上限，此时使用最后一档的单价。
pub fn band_rate(bands: &[Band], size_kb: f64) -> f64 {
    if !size_kb.is_finite() {
        return 0.0;
    }
    let size = round_half_up(size_kb);

    if let Some(band) = bands.iter().find(|band| band.contains(size)) {
        return band.rate;
    }

    match bands.last() {
        Some(last) if size > last.high_inclusive => last.rate,
        _ => 0.0,
    }
}
