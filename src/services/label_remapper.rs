//! 标签迁移服务 - 业务能力层
//!
//! 把选择题的答案标签和选项前缀从源字母表改写为目标字母表。

use std::fmt;

use serde_json::Value;
use tracing::debug;

use crate::error::{AppError, AppResult, RecordError};
use crate::models::{LabelMapping, QuestionRecord, QuestionSet};

/// 标签迁移统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RemapStats {
    /// 处理的选择题数量
    pub mcq_records: usize,
    /// 被改写的答案数量
    pub answers_remapped: usize,
    /// 被改写的选项数量
    pub choices_remapped: usize,
    /// 不在映射表中、原样保留的答案数量
    pub answers_unmapped: usize,
}

impl fmt::Display for RemapStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Migration complete!")?;
        writeln!(
            f,
            "MCQ records: {}, answers remapped: {}, choices remapped: {}, answers left unchanged: {}",
            self.mcq_records, self.answers_remapped, self.choices_remapped, self.answers_unmapped
        )
    }
}

/// 标签迁移服务
pub struct LabelRemapper {
    mapping: LabelMapping,
}

impl LabelRemapper {
    pub fn new(mapping: LabelMapping) -> Self {
        Self { mapping }
    }

    pub fn mapping(&self) -> &LabelMapping {
        &self.mapping
    }

    /// 改写题库中所有选择题
    ///
    /// 非选择题不做任何修改，题目顺序和 id 不变。
    /// 若有选择题的 `choices` 不是数组，则整体失败且题库保持不变。
    pub fn run(&self, set: &mut QuestionSet) -> AppResult<RemapStats> {
        let errors: Vec<RecordError> = set
            .records()
            .iter()
            .enumerate()
            .filter(|(_, r)| r.is_mcq())
            .filter(|(_, r)| r.choices_value().is_some_and(|c| !c.is_array()))
            .map(|(index, _)| RecordError::WrongFieldType {
                index,
                field: "choices",
                expected: "数组",
            })
            .collect();
        if !errors.is_empty() {
            return Err(AppError::Records(errors));
        }

        let mut stats = RemapStats::default();
        for record in set.records_mut().iter_mut().filter(|r| r.is_mcq()) {
            stats.mcq_records += 1;
            self.remap_record(record, &mut stats);
        }

        debug!(
            "标签迁移: 选择题 {} 道, 答案 {} 个, 选项 {} 个",
            stats.mcq_records, stats.answers_remapped, stats.choices_remapped
        );
        Ok(stats)
    }

    fn remap_record(&self, record: &mut QuestionRecord, stats: &mut RemapStats) {
        let mapped_answer = record
            .answer()
            .and_then(|answer| self.mapping.map_label(answer))
            .map(str::to_string);
        match mapped_answer {
            Some(target) => {
                record.set_answer(target);
                stats.answers_remapped += 1;
            }
            None => stats.answers_unmapped += 1,
        }

        if let Some(Value::Array(choices)) = record.choices_value_mut() {
            for choice in choices.iter_mut() {
                let Value::String(text) = choice else {
                    continue;
                };
                if let Some(rewritten) = self.mapping.remap_choice(text) {
                    *text = rewritten;
                    stats.choices_remapped += 1;
                }
            }
        }
    }
}
