pub mod answer_audit;
pub mod deduplicator;
pub mod label_remapper;
pub mod reporter;

pub use answer_audit::{resolve_answer_text, AnswerAuditor, AnswerIssue, AuditFinding, AuditReport};
pub use deduplicator::{DedupReport, Deduplicator, DuplicateEntry};
pub use label_remapper::{LabelRemapper, RemapStats};
pub use reporter::{ConsoleReporter, MemoryReporter, ReportEvent, Reporter};
