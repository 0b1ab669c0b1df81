//! 题库维护任务 - 编排层
//!
//! ## 职责
//!
//! 把一次维护任务串起来：加载 → 变换 → 写回 → 报告。
//!
//! ## 核心功能
//!
//! 1. **加载**：按配置读取整个题库文件
//! 2. **变换**：委托去重 / 标签迁移 / 答案检查服务
//! 3. **写回**：变换全部成功后才原子替换原文件
//! 4. **报告**：结果交给注入的 `Reporter`

use std::path::Path;

use tracing::{info, warn};

use crate::config::Config;
use crate::error::{AppResult, FileError};
use crate::models::{load_question_set, save_question_set, QuestionSet};
use crate::services::{
    AnswerAuditor, AuditReport, DedupReport, Deduplicator, LabelRemapper, RemapStats,
    ReportEvent, Reporter,
};
use crate::utils::logging::{log_job_finished, log_startup};

/// 题库维护任务
pub struct MaintenanceJob<R: Reporter> {
    config: Config,
    reporter: R,
}

impl<R: Reporter> MaintenanceJob<R> {
    pub fn new(config: Config, reporter: R) -> Self {
        Self { config, reporter }
    }

    pub fn into_reporter(self) -> R {
        self.reporter
    }

    /// 删除重复题目并重新编号，写回文件
    pub fn fix_duplicates(&mut self) -> AppResult<DedupReport> {
        const TOOL: &str = "fix_duplicates";
        log_startup(TOOL, &self.config.questions_path);

        let mut set = self.load()?;
        info!("📊 去重前题目数: {}", set.len());

        let report = Deduplicator::new(self.config.preview_len).run(&mut set)?;
        if report.removed() > 0 {
            warn!("⚠️ 发现 {} 道重复题目", report.removed());
        }
        info!("📊 去重后题目数: {}", report.total_after);

        save_question_set(&self.config.questions_path, set)?;
        self.emit(ReportEvent::Deduplicated(report.clone()))?;
        log_job_finished(TOOL, &self.config.questions_path, true);

        Ok(report)
    }

    /// 迁移选择题标签，写回文件
    pub fn migrate_labels(&mut self) -> AppResult<RemapStats> {
        const TOOL: &str = "migrate_labels";
        log_startup(TOOL, &self.config.questions_path);

        let mut set = self.load()?;
        let remapper = LabelRemapper::new(self.config.label_mapping.clone());
        info!(
            "🔤 标签映射: {}",
            remapper
                .mapping()
                .pairs()
                .iter()
                .map(|p| format!("{}→{}", p.source, p.target))
                .collect::<Vec<_>>()
                .join(", ")
        );

        let stats = remapper.run(&mut set)?;
        info!(
            "✓ 改写答案 {} 个，选项 {} 个",
            stats.answers_remapped, stats.choices_remapped
        );

        save_question_set(&self.config.questions_path, set)?;
        self.emit(ReportEvent::LabelsMigrated(stats))?;
        log_job_finished(TOOL, &self.config.questions_path, true);

        Ok(stats)
    }

    /// 检查选择题答案能否对应到选项（只读）
    pub fn audit_answers(&mut self) -> AppResult<AuditReport> {
        const TOOL: &str = "audit_answers";
        log_startup(TOOL, &self.config.questions_path);

        let set = self.load()?;
        let report = AnswerAuditor::new(&self.config.label_mapping).run(&set);
        if !report.findings.is_empty() {
            warn!("⚠️ {} 道选择题的答案有问题", report.findings.len());
        }

        self.emit(ReportEvent::AnswersAudited(report.clone()))?;
        log_job_finished(TOOL, &self.config.questions_path, false);

        Ok(report)
    }

    fn load(&self) -> AppResult<QuestionSet> {
        let path: &Path = &self.config.questions_path;
        info!("📁 正在加载题库: {}", path.display());
        load_question_set(path, &self.config.questions_key)
    }

    fn emit(&mut self, event: ReportEvent) -> AppResult<()> {
        self.reporter
            .emit(&event)
            .map_err(|source| FileError::ReportWriteFailed { source }.into())
    }
}
