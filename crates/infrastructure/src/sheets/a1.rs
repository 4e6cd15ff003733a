//! A1 记法

/// 列号（从1开始）转换为列字母，`27` → `AA`
pub fn column_letter(index: usize) -> Option<String> {
    if index == 0 {
        return None;
    }

    let mut n = index;
    let mut letters = Vec::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push(b'A' + rem as u8);
        n = (n - 1) / 26;
    }
    letters.reverse();
    String::from_utf8(letters).ok()
}

/// 列字母转换为列号，`AA` → `27`
pub fn column_index(letters: &str) -> Option<usize> {
    if letters.is_empty() {
        return None;
    }
    letters.chars().try_fold(0usize, |acc, c| {
        let c = c.to_ascii_uppercase();
        c.is_ascii_uppercase()
            .then(|| acc * 26 + (c as usize - 'A' as usize + 1))
    })
}

/// 标签页名加引号，内部单引号按 A1 规则写两次
fn quote_sheet(sheet: &str) -> String {
    format!("'{}'", sheet.replace('\'', "''"))
}

/// 整张表的读取范围，如 `'İşler'!A1:J10000`
pub fn table_range(sheet: &str, column_count: usize, max_rows: u32) -> String {
    let last = column_letter(column_count.max(1)).unwrap_or_else(|| "A".to_string());
    format!("{}!A1:{}{}", quote_sheet(sheet), last, max_rows)
}

/// 表头行的范围，如 `'İşler'!1:1`
pub fn header_range(sheet: &str) -> String {
    format!("{}!1:1", quote_sheet(sheet))
}

/// 单个单元格的范围，如 `'İşler'!G5`
pub fn cell_range(sheet: &str, column: usize, row: usize) -> Option<String> {
    column_letter(column).map(|letter| format!("{}!{}{}", quote_sheet(sheet), letter, row))
}
