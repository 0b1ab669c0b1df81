use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{AppError, AppResult, DocumentError, RecordError};

/// 选择题的类型标记
pub const MCQ_TYPE: &str = "mcq";

/// 单条题目记录
///
/// 以 JSON 对象原样保存，未知字段在读写之间保持不变；
/// 只通过访问器读写 `id` / `question` / `type` / `answer` / `choices`。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionRecord {
    fields: Map<String, Value>,
}

impl QuestionRecord {
    pub fn from_fields(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn id(&self) -> Option<i64> {
        self.fields.get("id").and_then(Value::as_i64)
    }

    /// 覆盖 `id`，字段已存在时保持原有位置
    pub fn set_id(&mut self, id: i64) {
        self.fields.insert("id".to_string(), Value::from(id));
    }

    pub fn question(&self) -> Option<&str> {
        self.fields.get("question").and_then(Value::as_str)
    }

    /// 题目类型（JSON 字段名为 `type`）
    pub fn kind(&self) -> Option<&str> {
        self.fields.get("type").and_then(Value::as_str)
    }

    pub fn is_mcq(&self) -> bool {
        self.kind() == Some(MCQ_TYPE)
    }

    pub fn answer(&self) -> Option<&str> {
        self.fields.get("answer").and_then(Value::as_str)
    }

    pub fn set_answer(&mut self, answer: impl Into<String>) {
        self.fields
            .insert("answer".to_string(), Value::String(answer.into()));
    }

    /// 原始 `choices` 字段，可能缺失
    pub fn choices_value(&self) -> Option<&Value> {
        self.fields.get("choices")
    }

    pub fn choices_value_mut(&mut self) -> Option<&mut Value> {
        self.fields.get_mut("choices")
    }

    /// 字符串形式的选项列表，非字符串项被跳过
    pub fn choice_texts(&self) -> Vec<&str> {
        match self.choices_value() {
            Some(Value::Array(items)) => items.iter().filter_map(Value::as_str).collect(),
            _ => Vec::new(),
        }
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }
}

/// 题库文档
///
/// 顶层 JSON 对象，其中一个字段保存题目列表；其余字段原样保留。
#[derive(Debug, Clone, PartialEq)]
pub struct QuestionSet {
    root: Map<String, Value>,
    list_key: String,
    records: Vec<QuestionRecord>,
}

impl QuestionSet {
    /// 从已解析的 JSON 值构造题库
    ///
    /// # 参数
    /// - `value`: 顶层 JSON 值
    /// - `list_key`: 题目列表字段名
    /// - `origin`: 来源描述（用于错误信息）
    pub fn from_value(value: Value, list_key: &str, origin: &str) -> AppResult<Self> {
        let Value::Object(mut root) = value else {
            return Err(DocumentError::NotAnObject {
                path: origin.to_string(),
            }
            .into());
        };

        // 取出列表时留下占位值，保证写回时字段位置不变
        let items = match root.get_mut(list_key).map(Value::take) {
            Some(Value::Array(items)) => items,
            Some(_) => {
                return Err(DocumentError::QuestionListNotArray {
                    path: origin.to_string(),
                    key: list_key.to_string(),
                }
                .into())
            }
            None => {
                return Err(DocumentError::MissingQuestionList {
                    path: origin.to_string(),
                    key: list_key.to_string(),
                }
                .into())
            }
        };

        let mut records = Vec::with_capacity(items.len());
        let mut errors = Vec::new();
        for (index, item) in items.into_iter().enumerate() {
            match item {
                Value::Object(fields) => records.push(QuestionRecord::from_fields(fields)),
                _ => errors.push(RecordError::NotAnObject { index }),
            }
        }

        if !errors.is_empty() {
            return Err(AppError::Records(errors));
        }

        Ok(Self {
            root,
            list_key: list_key.to_string(),
            records,
        })
    }

    /// 转换回顶层 JSON 值
    pub fn into_value(self) -> Value {
        let Self {
            mut root,
            list_key,
            records,
        } = self;
        let list = records
            .into_iter()
            .map(|r| Value::Object(r.fields))
            .collect();
        root.insert(list_key, Value::Array(list));
        Value::Object(root)
    }

    pub fn records(&self) -> &[QuestionRecord] {
        &self.records
    }

    pub fn records_mut(&mut self) -> &mut [QuestionRecord] {
        &mut self.records
    }

    pub fn replace_records(&mut self, records: Vec<QuestionRecord>) {
        self.records = records;
    }

    pub fn take_records(&mut self) -> Vec<QuestionRecord> {
        std::mem::take(&mut self.records)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// 题目列表以外的顶层字段
    pub fn metadata(&self, name: &str) -> Option<&Value> {
        if name == self.list_key {
            return None;
        }
        self.root.get(name)
    }
}
