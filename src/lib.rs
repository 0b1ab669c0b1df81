//! # Question Bank Tools
//!
//! 题库 JSON 文件的维护工具
//!
//! ## 架构设计
//!
//! ### ① 数据层（Models）
//! - `models/` - 题库文档 `QuestionSet`、题目记录 `QuestionRecord`、标签映射 `LabelMapping`
//! - `models/loaders` - 整体读取 / 原子写回 JSON 文件
//!
//! ### ② 业务能力层（Services）
//! - `Deduplicator` - 按 (题干, 类型) 去重并重新编号
//! - `LabelRemapper` - 选择题答案和选项前缀的标签迁移
//! - `AnswerAuditor` - 检查选择题答案能否对应到选项
//! - `Reporter` - 报告输出
//!
//! ### ③ 编排层（Orchestration）
//! - `orchestrator/maintenance_job` - 加载 → 变换 → 写回 → 报告
//!
//! ## 模块结构

pub mod config;
pub mod error;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::{LabelMapping, LabelPair, QuestionRecord, QuestionSet};
pub use orchestrator::MaintenanceJob;
pub use services::{
    AnswerAuditor, ConsoleReporter, DedupReport, Deduplicator, LabelRemapper, MemoryReporter,
    RemapStats, ReportEvent, Reporter,
};
