//! 报告输出服务 - 业务能力层
//!
//! 只负责"把结果告诉使用者"，不关心结果是怎么算出来的

use std::io::{self, Write};

use crate::services::answer_audit::AuditReport;
use crate::services::deduplicator::DedupReport;
use crate::services::label_remapper::RemapStats;

/// 一次任务产生的报告
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportEvent {
    /// 去重完成
    Deduplicated(DedupReport),
    /// 标签迁移完成
    LabelsMigrated(RemapStats),
    /// 答案检查完成
    AnswersAudited(AuditReport),
}

/// 报告接收端
pub trait Reporter {
    fn emit(&mut self, event: &ReportEvent) -> io::Result<()>;
}

/// 以人类可读文本写入输出流（默认 stdout）
pub struct ConsoleReporter<W: Write> {
    out: W,
}

impl ConsoleReporter<io::Stdout> {
    pub fn stdout() -> Self {
        Self { out: io::stdout() }
    }
}

impl<W: Write> ConsoleReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Reporter for ConsoleReporter<W> {
    fn emit(&mut self, event: &ReportEvent) -> io::Result<()> {
        match event {
            ReportEvent::Deduplicated(report) => write!(self.out, "{}", report)?,
            ReportEvent::LabelsMigrated(stats) => write!(self.out, "{}", stats)?,
            ReportEvent::AnswersAudited(report) => write!(self.out, "{}", report)?,
        }
        self.out.flush()
    }
}

/// 在内存中收集报告，便于测试断言
#[derive(Debug, Default)]
pub struct MemoryReporter {
    pub events: Vec<ReportEvent>,
}

impl MemoryReporter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Reporter for MemoryReporter {
    fn emit(&mut self, event: &ReportEvent) -> io::Result<()> {
        self.events.push(event.clone());
        Ok(())
    }
}
