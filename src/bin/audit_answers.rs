use anyhow::{Context, Result};
use question_bank_tools::utils::logging;
use question_bank_tools::{Config, ConsoleReporter, MaintenanceJob};

fn main() -> Result<()> {
    let config = Config::from_env().context("加载配置失败")?;
    logging::init(config.verbose_logging);

    let path = config.questions_path.clone();
    let report = MaintenanceJob::new(config, ConsoleReporter::stdout())
        .audit_answers()
        .with_context(|| format!("答案检查失败: {}", path.display()))?;

    // 有问题时以非零状态退出，便于脚本判断
    if !report.findings.is_empty() {
        std::process::exit(2);
    }

    Ok(())
}
