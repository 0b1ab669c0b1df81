use anyhow::{Context, Result};
use question_bank_tools::utils::logging;
use question_bank_tools::{Config, ConsoleReporter, MaintenanceJob};

fn main() -> Result<()> {
    // 加载配置
    let config = Config::from_env().context("加载配置失败")?;

    // 初始化日志
    logging::init(config.verbose_logging);

    let path = config.questions_path.clone();
    MaintenanceJob::new(config, ConsoleReporter::stdout())
        .fix_duplicates()
        .with_context(|| format!("去重失败: {}", path.display()))?;

    Ok(())
}
