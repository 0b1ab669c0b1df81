//! 答案检查服务 - 业务能力层
//!
//! 选择题的答案是一个标签，标签在字母表中的位置对应 `choices` 中的下标。
//! 本服务只读，找出无法对应到选项的答案。

use std::fmt;

use crate::models::{LabelMapping, QuestionRecord, QuestionSet};

/// 答案问题类型
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerIssue {
    /// 答案不是已知标签
    UnknownLabel { answer: String },
    /// 标签位置超出选项数量
    OutOfRange { answer: String, position: usize, choices: usize },
    /// 对应选项的前缀标签与答案不一致
    PrefixMismatch { answer: String, choice: String },
    /// 选择题没有选项
    MissingChoices,
}

impl fmt::Display for AnswerIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnswerIssue::UnknownLabel { answer } => write!(f, "unknown answer label '{}'", answer),
            AnswerIssue::OutOfRange {
                answer,
                position,
                choices,
            } => write!(
                f,
                "answer '{}' points to choice #{} but only {} choices exist",
                answer,
                position + 1,
                choices
            ),
            AnswerIssue::PrefixMismatch { answer, choice } => {
                write!(f, "answer '{}' does not match choice '{}'", answer, choice)
            }
            AnswerIssue::MissingChoices => write!(f, "mcq without choices"),
        }
    }
}

/// 一条有问题的题目
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditFinding {
    pub id: Option<i64>,
    pub issue: AnswerIssue,
}

/// 检查报告
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuditReport {
    pub mcq_records: usize,
    pub findings: Vec<AuditFinding>,
}

impl fmt::Display for AuditReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "MCQ records checked: {}", self.mcq_records)?;
        writeln!(f, "Problems found: {}", self.findings.len())?;
        for finding in &self.findings {
            match finding.id {
                Some(id) => writeln!(f, "- ID {}: {}", id, finding.issue)?,
                None => writeln!(f, "- ID ?: {}", finding.issue)?,
            }
        }
        Ok(())
    }
}

/// 答案检查服务
pub struct AnswerAuditor<'a> {
    mapping: &'a LabelMapping,
}

impl<'a> AnswerAuditor<'a> {
    pub fn new(mapping: &'a LabelMapping) -> Self {
        Self { mapping }
    }

    pub fn run(&self, set: &QuestionSet) -> AuditReport {
        let mut report = AuditReport::default();
        for record in set.records().iter().filter(|r| r.is_mcq()) {
            report.mcq_records += 1;
            if let Some(issue) = self.check(record) {
                report.findings.push(AuditFinding {
                    id: record.id(),
                    issue,
                });
            }
        }
        report
    }

    fn check(&self, record: &QuestionRecord) -> Option<AnswerIssue> {
        let choices = record.choice_texts();
        if choices.is_empty() {
            return Some(AnswerIssue::MissingChoices);
        }

        let answer = record.answer().unwrap_or_default().trim();
        let Some(position) = self.mapping.position(answer) else {
            return Some(AnswerIssue::UnknownLabel {
                answer: answer.to_string(),
            });
        };

        let Some(choice) = choices.get(position) else {
            return Some(AnswerIssue::OutOfRange {
                answer: answer.to_string(),
                position,
                choices: choices.len(),
            });
        };

        // 不带标签前缀的选项不做比较
        match self.mapping.leading_label(choice) {
            Some(label) if label != answer => Some(AnswerIssue::PrefixMismatch {
                answer: answer.to_string(),
                choice: choice.to_string(),
            }),
            _ => None,
        }
    }
}

/// 取答案标签对应的选项正文
///
/// 标签无法对应到选项时原样返回答案。
pub fn resolve_answer_text<'a>(
    answer: &'a str,
    choices: &[&'a str],
    mapping: &LabelMapping,
) -> &'a str {
    mapping
        .position(answer.trim())
        .and_then(|position| choices.get(position).copied())
        .unwrap_or(answer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn set_of(questions: Value) -> QuestionSet {
        QuestionSet::from_value(json!({ "questions": questions }), "questions", "mem").unwrap()
    }

    #[test]
    fn test_resolve_answer_text() {
        let mapping = LabelMapping::default();
        let choices = ["ا. 3", "ب. 4"];

        assert_eq!(resolve_answer_text("ب", &choices, &mapping), "ب. 4");
        assert_eq!(resolve_answer_text(" A ", &choices, &mapping), "ا. 3");
        assert_eq!(resolve_answer_text("ج", &choices, &mapping), "ج");
        assert_eq!(resolve_answer_text("4", &choices, &mapping), "4");
    }

    #[test]
    fn test_audit_findings() {
        let set = set_of(json!([
            {"id": 1, "type": "mcq", "answer": "ب", "choices": ["ا. 3", "ب. 4"]},
            {"id": 2, "type": "mcq", "answer": "X", "choices": ["ا. 3"]},
            {"id": 3, "type": "mcq", "answer": "ج", "choices": ["ا. 3", "ب. 4"]},
            {"id": 4, "type": "mcq", "answer": "ا", "choices": ["A. 3", "B. 4"]},
            {"id": 5, "type": "mcq", "answer": "ا"},
            {"id": 6, "type": "mcq", "answer": "B", "choices": ["yes", "no"]},
            {"id": 7, "type": "true_false", "answer": "true"}
        ]));
        let mapping = LabelMapping::default();

        let report = AnswerAuditor::new(&mapping).run(&set);

        assert_eq!(report.mcq_records, 6);
        assert_eq!(
            report.findings,
            vec![
                AuditFinding {
                    id: Some(2),
                    issue: AnswerIssue::UnknownLabel { answer: "X".to_string() },
                },
                AuditFinding {
                    id: Some(3),
                    issue: AnswerIssue::OutOfRange {
                        answer: "ج".to_string(),
                        position: 2,
                        choices: 2,
                    },
                },
                AuditFinding {
                    id: Some(4),
                    issue: AnswerIssue::PrefixMismatch {
                        answer: "ا".to_string(),
                        choice: "A. 3".to_string(),
                    },
                },
                AuditFinding {
                    id: Some(5),
                    issue: AnswerIssue::MissingChoices,
                },
            ]
        );
    }

    #[test]
    fn test_report_rendering() {
        let report = AuditReport {
            mcq_records: 2,
            findings: vec![AuditFinding {
                id: Some(9),
                issue: AnswerIssue::MissingChoices,
            }],
        };
        assert_eq!(
            report.to_string(),
            "MCQ records checked: 2\nProblems found: 1\n- ID 9: mcq without choices\n"
        );
    }
}
