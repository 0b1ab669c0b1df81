//! 日志工具模块
//!
//! 提供日志初始化和输出格式的辅助函数

use std::path::Path;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// 初始化日志（输出到 stderr，报告内容走 stdout）
///
/// `RUST_LOG` 优先；否则默认 `info`，详细模式下为 `debug`。
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// 记录程序启动信息
///
/// # 参数
/// - `tool`: 工具名称
/// - `path`: 题库文件路径
pub fn log_startup(tool: &str, path: &Path) {
    info!("{}", "=".repeat(60));
    info!("🚀 {} 启动 - {}", tool, chrono::Local::now().format("%Y-%m-%d %H:%M:%S"));
    info!("📁 题库文件: {}", path.display());
    info!("{}", "=".repeat(60));
}

/// 记录任务结束信息
pub fn log_job_finished(tool: &str, path: &Path, wrote_file: bool) {
    info!("{}", "─".repeat(60));
    if wrote_file {
        info!("✓ {} 完成，已写回 {}", tool, path.display());
    } else {
        info!("✓ {} 完成（只读，未修改文件）", tool);
    }
    info!("{}", "─".repeat(60));
}

/// 截断长文本用于显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大字符数
///
/// # 返回
/// 超长时返回前 `max_len` 个字符加 `...`
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_text_counts_chars_not_bytes() {
        let text = "ما هو ناتج ٢+٢؟";
        assert_eq!(truncate_text(text, 80), text);
        assert_eq!(truncate_text(text, 5), "ما هو...");
    }

    #[test]
    fn test_truncate_text_boundary() {
        let exact = "x".repeat(80);
        assert_eq!(truncate_text(&exact, 80), exact);

        let long = "y".repeat(81);
        assert_eq!(truncate_text(&long, 80), format!("{}...", "y".repeat(80)));
    }
}
