use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult, ConfigError};

/// 标签与选项正文之间的分隔符（如 `"A. 3"`）
pub const LABEL_DELIMITER: &str = ". ";

/// 一对标签映射：源标签 → 目标标签
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelPair {
    pub source: String,
    pub target: String,
}

impl LabelPair {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }
}

/// 标签映射文件格式
///
/// ```toml
/// [[labels]]
/// source = "A"
/// target = "ا"
/// ```
#[derive(Debug, Deserialize)]
struct LabelMappingFile {
    labels: Vec<LabelPair>,
}

/// 有序的标签映射表
///
/// 顺序即选项前缀的匹配顺序。构造时保证：
/// - 至少一对映射，标签非空
/// - 源标签不重复
/// - 目标标签不含分隔符，且 `"<目标>. "` 与任何 `"<源>. "` 互不为前缀
///   （重复迁移因此不会改写已迁移的数据）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelMapping {
    pairs: Vec<LabelPair>,
}

impl Default for LabelMapping {
    fn default() -> Self {
        Self {
            pairs: vec![
                LabelPair::new("A", "ا"),
                LabelPair::new("B", "ب"),
                LabelPair::new("C", "ج"),
            ],
        }
    }
}

impl LabelMapping {
    /// 创建并校验映射表
    pub fn new(pairs: Vec<LabelPair>) -> AppResult<Self> {
        if pairs.is_empty() {
            return Err(AppError::invalid_label_mapping("映射表为空"));
        }

        let mut sources = HashSet::new();
        for pair in &pairs {
            if pair.source.is_empty() || pair.target.is_empty() {
                return Err(AppError::invalid_label_mapping(format!(
                    "标签不能为空: '{}' -> '{}'",
                    pair.source, pair.target
                )));
            }
            if !sources.insert(pair.source.as_str()) {
                return Err(AppError::invalid_label_mapping(format!(
                    "源标签重复: '{}'",
                    pair.source
                )));
            }
        }

        if let Some(pair) = pairs.iter().find(|p| p.target.contains(LABEL_DELIMITER)) {
            return Err(AppError::invalid_label_mapping(format!(
                "目标标签 '{}' 不能包含分隔符 '{}'",
                pair.target, LABEL_DELIMITER
            )));
        }

        // 迁移后的前缀 "<目标>. " 不能再被任何 "<源>. " 匹配
        for pair in &pairs {
            let migrated = format!("{}{}", pair.target, LABEL_DELIMITER);
            if let Some(other) = pairs.iter().find(|o| {
                let source = format!("{}{}", o.source, LABEL_DELIMITER);
                migrated.starts_with(&source) || source.starts_with(&migrated)
            }) {
                return Err(AppError::invalid_label_mapping(format!(
                    "目标标签 '{}' 会被源标签 '{}' 再次匹配",
                    pair.target, other.source
                )));
            }
        }

        Ok(Self { pairs })
    }

    /// 解析内联格式：`A=ا,B=ب,C=ج`
    pub fn parse_inline(spec: &str) -> AppResult<Self> {
        let mut pairs = Vec::new();
        for entry in spec.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            let (source, target) = entry.split_once('=').ok_or_else(|| {
                AppError::invalid_label_mapping(format!("无法解析映射项 '{}'，应为 源=目标", entry))
            })?;
            pairs.push(LabelPair::new(source.trim(), target.trim()));
        }
        Self::new(pairs)
    }

    /// 从 TOML 映射文件加载
    pub fn from_toml_file(path: &Path) -> AppResult<Self> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::MappingFileReadFailed {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content, &path.display().to_string())
    }

    /// 解析 TOML 映射文件内容
    ///
    /// `origin` 仅用于错误信息。
    pub fn from_toml_str(content: &str, origin: &str) -> AppResult<Self> {
        let file: LabelMappingFile =
            toml::from_str(content).map_err(|source| ConfigError::TomlParseFailed {
                path: origin.to_string(),
                source,
            })?;
        Self::new(file.labels)
    }

    pub fn pairs(&self) -> &[LabelPair] {
        &self.pairs
    }

    /// 源标签 → 目标标签
    pub fn map_label(&self, label: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|p| p.source == label)
            .map(|p| p.target.as_str())
    }

    /// 改写选项开头的 `"<源>. "`，只应用第一个匹配的映射
    ///
    /// 没有匹配时返回 `None`。
    pub fn remap_choice(&self, choice: &str) -> Option<String> {
        self.pairs.iter().find_map(|p| {
            choice
                .strip_prefix(p.source.as_str())
                .and_then(|rest| rest.strip_prefix(LABEL_DELIMITER))
                .map(|rest| format!("{}{}{}", p.target, LABEL_DELIMITER, rest))
        })
    }

    /// 标签在字母表中的位置（源或目标字母表均可）
    pub fn position(&self, label: &str) -> Option<usize> {
        self.pairs
            .iter()
            .position(|p| p.source == label)
            .or_else(|| self.pairs.iter().position(|p| p.target == label))
    }

    /// 选项开头携带的已知标签（源或目标字母表）
    pub fn leading_label<'a>(&'a self, choice: &str) -> Option<&'a str> {
        self.pairs
            .iter()
            .flat_map(|p| [p.source.as_str(), p.target.as_str()])
            .find(|label| {
                choice
                    .strip_prefix(label)
                    .is_some_and(|rest| rest.starts_with(LABEL_DELIMITER))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remap_choice_prefix_only() {
        let mapping = LabelMapping::default();

        assert_eq!(mapping.remap_choice("A. 3").as_deref(), Some("ا. 3"));
        assert_eq!(mapping.remap_choice("B. 4").as_deref(), Some("ب. 4"));
        assert_eq!(mapping.remap_choice("Bold move"), None);
        assert_eq!(mapping.remap_choice("B.4"), None);
        assert_eq!(mapping.remap_choice("x A. 3"), None);
        assert_eq!(mapping.remap_choice("ا. 3"), None);
    }

    #[test]
    fn test_remap_choice_first_match_only() {
        // 正文里再次出现 "A. " 不受影响
        let mapping = LabelMapping::default();
        assert_eq!(
            mapping.remap_choice("A. B. see A. above").as_deref(),
            Some("ا. B. see A. above")
        );
    }

    #[test]
    fn test_enumeration_order_decides_overlapping_prefixes() {
        let first = LabelMapping::new(vec![
            LabelPair::new("A", "1"),
            LabelPair::new("A. B", "2"),
        ])
        .unwrap();
        assert_eq!(first.remap_choice("A. B. x").as_deref(), Some("1. B. x"));

        let second = LabelMapping::new(vec![
            LabelPair::new("A. B", "2"),
            LabelPair::new("A", "1"),
        ])
        .unwrap();
        assert_eq!(second.remap_choice("A. B. x").as_deref(), Some("2. x"));
    }

    #[test]
    fn test_map_label() {
        let mapping = LabelMapping::default();
        assert_eq!(mapping.map_label("C"), Some("ج"));
        assert_eq!(mapping.map_label("D"), None);
        assert_eq!(mapping.map_label("ج"), None);
    }

    #[test]
    fn test_parse_inline() {
        let mapping = LabelMapping::parse_inline("A=ا, B=ب ,C=ج,").unwrap();
        assert_eq!(mapping, LabelMapping::default());
    }

    #[test]
    fn test_parse_inline_rejects_bad_entry() {
        assert!(LabelMapping::parse_inline("A-ا").is_err());
        assert!(LabelMapping::parse_inline("").is_err());
        assert!(LabelMapping::parse_inline("A=").is_err());
    }

    #[test]
    fn test_rejects_duplicate_source() {
        let err = LabelMapping::new(vec![LabelPair::new("A", "1"), LabelPair::new("A", "2")])
            .unwrap_err();
        assert!(err.to_string().contains("源标签重复"));
    }

    #[test]
    fn test_rejects_target_that_is_also_source() {
        let err = LabelMapping::new(vec![LabelPair::new("A", "B"), LabelPair::new("B", "C")])
            .unwrap_err();
        assert!(err.to_string().contains("会被源标签 'B' 再次匹配"));
    }

    #[test]
    fn test_rejects_target_containing_delimiter() {
        let err = LabelMapping::new(vec![LabelPair::new("A", "B. Z"), LabelPair::new("B", "y")])
            .unwrap_err();
        assert!(err.to_string().contains("不能包含分隔符"));
    }

    #[test]
    fn test_rejects_target_prefix_that_completes_a_source() {
        // "1. " 之后的正文可能拼出 "1. 2. "
        let err = LabelMapping::new(vec![LabelPair::new("A", "1"), LabelPair::new("1. 2", "x")])
            .unwrap_err();
        assert!(err.to_string().contains("会被源标签 '1. 2' 再次匹配"));
    }

    #[test]
    fn test_accepted_mappings_remap_only_once() {
        let mapping = LabelMapping::new(vec![
            LabelPair::new("A", "1"),
            LabelPair::new("A. B", "2"),
            LabelPair::new("B", "ب"),
        ])
        .unwrap();
        for choice in ["A. x", "A. B. x", "B. A. x", "A. 1. 2. x"] {
            let once = mapping.remap_choice(choice).unwrap_or_else(|| choice.to_string());
            assert_eq!(mapping.remap_choice(&once), None, "choice {choice}");
        }
    }

    #[test]
    fn test_from_toml_str() {
        let content = r#"
[[labels]]
source = "A"
target = "ا"

[[labels]]
source = "B"
target = "ب"
"#;
        let mapping = LabelMapping::from_toml_str(content, "labels.toml").unwrap();
        assert_eq!(mapping.pairs().len(), 2);
        assert_eq!(mapping.pairs()[1], LabelPair::new("B", "ب"));
    }

    #[test]
    fn test_from_toml_str_reports_syntax_error() {
        let err = LabelMapping::from_toml_str("labels = [", "labels.toml").unwrap_err();
        assert!(matches!(
            err,
            AppError::Config(ConfigError::TomlParseFailed { .. })
        ));
    }

    #[test]
    fn test_position_and_leading_label() {
        let mapping = LabelMapping::default();
        assert_eq!(mapping.position("A"), Some(0));
        assert_eq!(mapping.position("ج"), Some(2));
        assert_eq!(mapping.position("D"), None);

        assert_eq!(mapping.leading_label("ب. 4"), Some("ب"));
        assert_eq!(mapping.leading_label("C. x"), Some("C"));
        assert_eq!(mapping.leading_label("Cat"), None);
    }
}
