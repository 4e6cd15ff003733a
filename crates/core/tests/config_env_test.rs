use payroll_core::config::AppConfig;
use std::fs;
use tempfile::NamedTempFile;

// 环境变量是进程级状态，单独放在一个测试二进制里
#[test]
fn test_env_overrides_file() {
    let temp_file = NamedTempFile::new().unwrap();
    fs::write(
        temp_file.path(),
        r#"
[sheets]
spreadsheet_id = "from-file"
max_rows = 100
"#,
    )
    .unwrap();

    std::env::set_var("PAYROLL_SHEETS__SPREADSHEET_ID", "from-env");
    std::env::set_var("PAYROLL_OBSERVABILITY__LOG_LEVEL", "warn");

    let path = temp_file.path().to_string_lossy().to_string();
    let config = AppConfig::load(Some(&path)).unwrap();

    std::env::remove_var("PAYROLL_SHEETS__SPREADSHEET_ID");
    std::env::remove_var("PAYROLL_OBSERVABILITY__LOG_LEVEL");

    assert_eq!(config.sheets.spreadsheet_id, "from-env");
    assert_eq!(config.sheets.max_rows, 100);
    assert_eq!(config.observability.log_level, "warn");
}
