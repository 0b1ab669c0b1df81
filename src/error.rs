use std::path::Path;

use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 文档结构错误
    #[error("文档错误: {0}")]
    Document(#[from] DocumentError),
    /// 题目记录错误（一次运行中收集到的全部错误）
    #[error("题目记录错误: 共 {} 条\n{}", .0.len(), render_record_errors(.0))]
    Records(Vec<RecordError>),
    /// 文件操作错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
}

/// 文档结构错误
#[derive(Debug, Error)]
pub enum DocumentError {
    /// 不是合法的 JSON
    #[error("JSON解析失败 ({path}): {source}")]
    InvalidJson {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    /// 顶层不是对象
    #[error("顶层必须是 JSON 对象 ({path})")]
    NotAnObject { path: String },
    /// 缺少题目列表字段
    #[error("缺少题目列表字段 '{key}' ({path})")]
    MissingQuestionList { path: String, key: String },
    /// 题目列表字段不是数组
    #[error("题目列表字段 '{key}' 必须是数组 ({path})")]
    QuestionListNotArray { path: String, key: String },
}

/// 单条题目记录错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    /// 记录不是 JSON 对象
    #[error("第 {index} 条记录不是 JSON 对象")]
    NotAnObject { index: usize },
    /// 缺少必填字段
    #[error("第 {index} 条记录缺少字段 '{field}'")]
    MissingField { index: usize, field: &'static str },
    /// 字段类型不符
    #[error("第 {index} 条记录的字段 '{field}' 应为 {expected}")]
    WrongFieldType {
        index: usize,
        field: &'static str,
        expected: &'static str,
    },
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    /// 读取文件失败
    #[error("读取文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 写入文件失败
    #[error("写入文件失败 ({path}): {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 替换原文件失败
    #[error("替换文件失败 ({from} -> {to}): {source}")]
    RenameFailed {
        from: String,
        to: String,
        #[source]
        source: std::io::Error,
    },
    /// 报告输出失败
    #[error("报告输出失败: {source}")]
    ReportWriteFailed {
        #[source]
        source: std::io::Error,
    },
    /// 序列化失败
    #[error("序列化失败 ({path}): {source}")]
    SerializeFailed {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 环境变量解析失败
    #[error("环境变量 {var_name} 解析失败: 值 '{value}' 无法转换为 {expected_type}")]
    EnvVarParseFailed {
        var_name: String,
        value: String,
        expected_type: String,
    },
    /// 标签映射非法
    #[error("标签映射非法: {reason}")]
    InvalidLabelMapping { reason: String },
    /// 标签映射文件读取失败
    #[error("无法读取标签映射文件 ({path}): {source}")]
    MappingFileReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 标签映射文件解析失败
    #[error("TOML解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

fn render_record_errors(errors: &[RecordError]) -> String {
    errors
        .iter()
        .map(|e| format!("  - {}", e))
        .collect::<Vec<_>>()
        .join("\n")
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建文件读取错误
    pub fn file_read_failed(path: &Path, source: std::io::Error) -> Self {
        AppError::File(FileError::ReadFailed {
            path: path.display().to_string(),
            source,
        })
    }

    /// 创建文件写入错误
    pub fn file_write_failed(path: &Path, source: std::io::Error) -> Self {
        AppError::File(FileError::WriteFailed {
            path: path.display().to_string(),
            source,
        })
    }

    /// 创建 JSON 解析错误
    pub fn invalid_json(path: &Path, source: serde_json::Error) -> Self {
        AppError::Document(DocumentError::InvalidJson {
            path: path.display().to_string(),
            source,
        })
    }

    /// 创建标签映射错误
    pub fn invalid_label_mapping(reason: impl Into<String>) -> Self {
        AppError::Config(ConfigError::InvalidLabelMapping {
            reason: reason.into(),
        })
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
