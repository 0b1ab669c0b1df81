//! 去重服务 - 业务能力层
//!
//! 按 (去掉首尾空白的题干, 类型) 识别重复题目，保留首次出现的记录，
//! 并把保留下来的题目重新编号为 1..N。

use std::collections::HashMap;
use std::fmt;

use tracing::debug;

use crate::error::{AppError, AppResult, RecordError};
use crate::models::{QuestionRecord, QuestionSet};
use crate::utils::truncate_text;

/// 一条被删除的重复题目
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateEntry {
    /// 被删除记录原来的 id
    pub id: i64,
    /// 题干预览（超长时截断并追加 `...`）
    pub question_preview: String,
    /// 题目类型
    pub kind: String,
    /// 首次出现的记录原来的 id
    pub original_id: i64,
}

/// 去重报告
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DedupReport {
    pub total_before: usize,
    pub total_after: usize,
    pub duplicates: Vec<DuplicateEntry>,
}

impl DedupReport {
    pub fn removed(&self) -> usize {
        self.duplicates.len()
    }
}

impl fmt::Display for DedupReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total questions before: {}", self.total_before)?;
        writeln!(f, "Total questions after: {}", self.total_after)?;
        writeln!(f, "Duplicates removed: {}", self.removed())?;
        writeln!(f, "\n=== DUPLICATE REPORT ===")?;
        writeln!(f, "Total duplicates found: {}\n", self.removed())?;

        if !self.duplicates.is_empty() {
            writeln!(f, "Duplicated questions:")?;
            for (i, dup) in self.duplicates.iter().enumerate() {
                writeln!(
                    f,
                    "{}. ID {} (was duplicate of ID {})",
                    i + 1,
                    dup.id,
                    dup.original_id
                )?;
                writeln!(f, "   Question: {}", dup.question_preview)?;
                writeln!(f, "   Type: {}\n", dup.kind)?;
            }
        }
        Ok(())
    }
}

/// 去重服务
pub struct Deduplicator {
    preview_len: usize,
}

impl Deduplicator {
    /// 创建去重服务
    ///
    /// # 参数
    /// - `preview_len`: 报告中题干预览的最大字符数
    pub fn new(preview_len: usize) -> Self {
        Self { preview_len }
    }

    /// 对题库去重并重新编号
    ///
    /// 先校验全部记录；任何一条记录无法计算去重键时整体失败，题库保持不变。
    pub fn run(&self, set: &mut QuestionSet) -> AppResult<DedupReport> {
        let keyed = key_all(set.records())?;

        let total_before = set.len();
        let mut seen: HashMap<(&str, &str), i64> = HashMap::new();
        let mut keep = vec![false; keyed.len()];
        let mut duplicates = Vec::new();

        for (index, key) in keyed.iter().enumerate() {
            match seen.get(&(key.question, key.kind)) {
                Some(&original_id) => {
                    debug!("重复题目: ID {} 与 ID {} 相同", key.id, original_id);
                    duplicates.push(DuplicateEntry {
                        id: key.id,
                        question_preview: truncate_text(key.raw_question, self.preview_len),
                        kind: key.kind.to_string(),
                        original_id,
                    });
                }
                None => {
                    seen.insert((key.question, key.kind), key.id);
                    keep[index] = true;
                }
            }
        }

        let mut kept: Vec<QuestionRecord> = set
            .take_records()
            .into_iter()
            .zip(keep)
            .filter_map(|(record, keep)| keep.then_some(record))
            .collect();

        for (new_id, record) in (1..).zip(kept.iter_mut()) {
            record.set_id(new_id);
        }

        let report = DedupReport {
            total_before,
            total_after: kept.len(),
            duplicates,
        };
        set.replace_records(kept);

        Ok(report)
    }
}

/// 计算去重键所需的字段
struct RecordKey<'a> {
    id: i64,
    raw_question: &'a str,
    question: &'a str,
    kind: &'a str,
}

/// 为每条记录提取去重键，收集全部错误
fn key_all(records: &[QuestionRecord]) -> AppResult<Vec<RecordKey<'_>>> {
    let mut keys = Vec::with_capacity(records.len());
    let mut errors = Vec::new();

    for (index, record) in records.iter().enumerate() {
        match record_key(index, record) {
            Ok(key) => keys.push(key),
            Err(mut errs) => errors.append(&mut errs),
        }
    }

    if errors.is_empty() {
        Ok(keys)
    } else {
        Err(AppError::Records(errors))
    }
}

fn record_key(index: usize, record: &QuestionRecord) -> Result<RecordKey<'_>, Vec<RecordError>> {
    let mut errors = Vec::new();

    let id = require(record, index, "id", "整数", |v| v.as_i64(), &mut errors);
    let question = require(record, index, "question", "字符串", |v| v.as_str(), &mut errors);
    let kind = require(record, index, "type", "字符串", |v| v.as_str(), &mut errors);

    match (id, question, kind) {
        (Some(id), Some(raw_question), Some(kind)) => Ok(RecordKey {
            id,
            raw_question,
            question: raw_question.trim(),
            kind,
        }),
        _ => Err(errors),
    }
}

fn require<'a, T>(
    record: &'a QuestionRecord,
    index: usize,
    field: &'static str,
    expected: &'static str,
    extract: impl Fn(&'a serde_json::Value) -> Option<T>,
    errors: &mut Vec<RecordError>,
) -> Option<T> {
    match record.field(field) {
        None => {
            errors.push(RecordError::MissingField { index, field });
            None
        }
        Some(value) => {
            let extracted = extract(value);
            if extracted.is_none() {
                errors.push(RecordError::WrongFieldType {
                    index,
                    field,
                    expected,
                });
            }
            extracted
        }
    }
}
