use std::path::PathBuf;

use payroll::{Application, Commands};
use payroll_core::AppConfig;
use tempfile::TempDir;

const SNAPSHOT: &str = r#"{
    "İşler": [
        ["Tarih", "Seri", "Bölüm", "Dosya", "Rol", "Ref KB", "Ücret (TL)", "Üye Adı", "Email", "Zorluk"],
        ["2024-01-09", "Gece Yolu", 1, "https://drive.google.com/file/d/abc_123/view", "Translator", 5, 25, "Deniz", "deniz@example.com", "ORTA"],
        ["2024-01-12", "Gece Yolu", 2, "", "Translator", 9, 35, "Deniz", "deniz@example.com", "ORTA"],
        ["2024-01-12", "Ay Işığı", 3, "", "Acemi Çevirmen", "5", "12", "Ece", "ece@example.com", "ORTA"]
    ],
    "Üyeler": [
        ["ID", "İsim", "Email", "Rol", "Aktif", "Karaliste", "Kamp", "Kamp Bitiş"],
        [1, "Deniz", "deniz@example.com", "Çevirmen", "Evet", "", "Evet", "2024-01-10"],
        [2, "Ece", "ece@example.com", "Acemi Çevirmen", "Evet", ""]
    ],
    "Seriler": [
        ["ID", "Seri Adı", "Zorluk"],
        [1, "Gece Yolu", "ORTA"],
        [2, "Ay Işığı", "ZOR"]
    ],
    "Fiyatlandırma": [
        ["Geçerlilik", "Çeviri 0-3 KB", "Çeviri 3-6 KB", "Çeviri 6-8 KB", "Çeviri 8+ KB"],
        ["2024-01-01", 20, 25, 30, 35]
    ]
}"#;

fn snapshot_file() -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("snapshot.json");
    std::fs::write(&path, SNAPSHOT).unwrap();
    (dir, path)
}

async fn app(path: &PathBuf) -> Application {
    Application::new(AppConfig::default(), Some(path.as_path()))
        .await
        .unwrap()
}

#[tokio::test]
async fn test_price_command() {
    let (_dir, path) = snapshot_file();
    let app = app(&path).await;

    let output = app
        .run(&Commands::Price {
            role: "Trainee Translator".to_string(),
            size: "5".to_string(),
            difficulty: "MEDIUM".to_string(),
            email: String::new(),
            date: None,
        })
        .await
        .unwrap();
    assert!(output.ends_with("金额: 13 TL"), "{output}");

    let output = app
        .run(&Commands::Price {
            role: "Translator".to_string(),
            size: "5".to_string(),
            difficulty: "MEDIUM".to_string(),
            email: "DENIZ@example.com".to_string(),
            date: Some("2024-01-10".to_string()),
        })
        .await
        .unwrap();
    assert!(output.contains("请假期"), "{output}");
    assert!(output.ends_with("金额: 0 TL"), "{output}");
}

#[tokio::test]
async fn test_price_rejects_bad_date() {
    let (_dir, path) = snapshot_file();
    let app = app(&path).await;

    let result = app
        .run(&Commands::Price {
            role: "Translator".to_string(),
            size: "5".to_string(),
            difficulty: "MEDIUM".to_string(),
            email: String::new(),
            date: Some("10/01/2024".to_string()),
        })
        .await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_audit_command() {
    let (_dir, path) = snapshot_file();
    let app = app(&path).await;

    let output = app
        .run(&Commands::Audit {
            today: Some("2024-02-01".to_string()),
        })
        .await
        .unwrap();
    assert!(output.starts_with("共 2 行金额不一致"), "{output}");
    assert!(output.contains("第 2 行"));
    assert!(output.contains("第 4 行"));
    assert!(!output.contains("第 3 行"));
}

#[tokio::test]
async fn test_stats_command() {
    let (_dir, path) = snapshot_file();
    let app = app(&path).await;

    let output = app.run(&Commands::Stats).await.unwrap();
    assert_eq!(output, "工作记录: 3\n成员: 2\n总金额: 72 TL\n系列: 2");
}

#[tokio::test]
async fn test_jobs_command() {
    let (_dir, path) = snapshot_file();
    let app = app(&path).await;

    let output = app
        .run(&Commands::Jobs {
            search: Some("deniz".to_string()),
            role: None,
            sort: Some("Ref KB".to_string()),
            desc: true,
        })
        .await
        .unwrap();
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[1].starts_with("3\t"));
    assert!(lines[2].starts_with("2\t"));
    assert!(lines[2].ends_with("abc_123"));
    assert!(lines[2].contains("translator"));

    let result = app
        .run(&Commands::Jobs {
            search: None,
            role: None,
            sort: Some("nope".to_string()),
            desc: false,
        })
        .await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_members_and_series_commands() {
    let (_dir, path) = snapshot_file();
    let app = app(&path).await;

    let output = app
        .run(&Commands::Members {
            search: Some("DENIZ".to_string()),
        })
        .await
        .unwrap();
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[1].starts_with("2\t1\tDeniz"));
    assert!(lines[1].ends_with("\t2024-01-10"));

    let output = app
        .run(&Commands::Members {
            search: Some("acemi".to_string()),
        })
        .await
        .unwrap();
    assert!(output.lines().nth(1).unwrap().ends_with("\t-"));

    let output = app
        .run(&Commands::Series {
            search: Some("ığı".to_string()),
        })
        .await
        .unwrap();
    assert_eq!(output, "行\tID\t系列\t难度\n3\t2\tAy Işığı\tZOR");

    let output = app.run(&Commands::Series { search: Some("yok".to_string()) }).await.unwrap();
    assert_eq!(output, "没有匹配的系列");
}

#[tokio::test]
async fn test_set_cell_persists_to_snapshot() {
    let (_dir, path) = snapshot_file();
    let app = app(&path).await;

    app.run(&Commands::SetCell {
        table: "jobs".to_string(),
        row: 4,
        column: "Ücret (TL)".to_string(),
        value: "13".to_string(),
    })
    .await
    .unwrap();

    // 重新加载快照文件，修复后只剩请假期内的一行
    let reloaded = Application::new(AppConfig::default(), Some(path.as_path()))
        .await
        .unwrap();
    let output = reloaded
        .run(&Commands::Audit {
            today: Some("2024-02-01".to_string()),
        })
        .await
        .unwrap();
    assert!(output.starts_with("共 1 行金额不一致"), "{output}");

    let result = app
        .run(&Commands::SetCell {
            table: "jobs".to_string(),
            row: 99,
            column: "Rol".to_string(),
            value: "Editor".to_string(),
        })
        .await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_remote_store_requires_credentials() {
    let result = Application::new(AppConfig::default(), None).await;
    assert!(result.is_err());
}
