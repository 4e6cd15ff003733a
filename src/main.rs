use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info};

use payroll::app::render_config;
use payroll::{Application, Cli, Commands};
use payroll_core::{init_logging, AppConfig};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 加载配置
    let mut config = AppConfig::load(cli.config.as_deref()).with_context(|| match &cli.config {
        Some(path) => format!("加载配置文件失败: {path}"),
        None => "加载配置失败".to_string(),
    })?;

    // 优先级: 命令行参数 > LOG_* 环境变量 > 配置文件
    let mut log_config = config.observability.log_config()?.with_env_overrides();
    if let Some(level) = &cli.log_level {
        log_config.level = level.parse()?;
        config.observability.log_level = level.clone();
    }
    if let Some(format) = &cli.log_format {
        log_config.format = format.parse()?;
        config.observability.log_format = format.clone();
    }

    // 初始化日志系统
    init_logging(&log_config).context("初始化日志系统失败")?;

    debug!("命令: {:?}", cli.command);

    // 显示配置不需要连接表格
    if cli.command == Commands::Config {
        println!("{}", render_config(&config)?);
        return Ok(());
    }

    let app = Application::new(config, cli.snapshot.as_deref()).await?;
    let output = app.run(&cli.command).await?;
    println!("{output}");

    info!("命令执行完成");
    Ok(())
}
