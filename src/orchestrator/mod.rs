//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 把一次维护任务从头到尾串起来，是每个命令行工具的唯一入口。
//!
//! ## 层次关系
//!
//! ```text
//! bin/* (fix_duplicates / migrate_labels / audit_answers)
//!     ↓
//! orchestrator::MaintenanceJob (加载 → 变换 → 写回 → 报告)
//!     ↓
//! services (能力层：去重 / 标签迁移 / 答案检查 / 报告)
//!     ↓
//! models (题库文档、标签映射、JSON 读写)
//! ```
//!
//! 任何一步失败都不会写回文件。

pub mod maintenance_job;

pub use maintenance_job::MaintenanceJob;
