use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::{AppResult, ConfigError};
use crate::models::LabelMapping;

/// 程序配置
#[derive(Clone, Debug)]
pub struct Config {
    /// 题库 JSON 文件路径
    pub questions_path: PathBuf,
    /// 题目列表所在的顶层字段名
    pub questions_key: String,
    /// 标签映射（有序）
    pub label_mapping: LabelMapping,
    /// 重复题报告中题干预览的最大字符数
    pub preview_len: usize,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            questions_path: PathBuf::from("data/questions.json"),
            questions_key: "questions".to_string(),
            label_mapping: LabelMapping::default(),
            preview_len: 80,
            verbose_logging: false,
        }
    }
}

impl Config {
    /// 从环境变量加载配置，未设置的项使用默认值
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// 从任意键值来源加载配置
    ///
    /// `LABEL_MAPPING_FILE` 优先于 `LABEL_MAPPING`。
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let default = Self::default();

        let label_mapping = match (lookup("LABEL_MAPPING_FILE"), lookup("LABEL_MAPPING")) {
            (Some(file), _) => LabelMapping::from_toml_file(Path::new(&file))?,
            (None, Some(inline)) => LabelMapping::parse_inline(&inline)?,
            (None, None) => default.label_mapping,
        };

        Ok(Self {
            questions_path: lookup("QUESTIONS_PATH")
                .map(PathBuf::from)
                .unwrap_or(default.questions_path),
            questions_key: lookup("QUESTIONS_KEY").unwrap_or(default.questions_key),
            label_mapping,
            preview_len: parse_var(&lookup, "PREVIEW_LEN", "usize")?
                .unwrap_or(default.preview_len),
            verbose_logging: parse_var(&lookup, "VERBOSE_LOGGING", "bool")?
                .unwrap_or(default.verbose_logging),
        })
    }
}

fn parse_var<F, T>(lookup: &F, var_name: &str, expected_type: &str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(var_name) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::EnvVarParseFailed {
                var_name: var_name.to_string(),
                value,
                expected_type: expected_type.to_string(),
            }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::models::LabelPair;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults_when_nothing_set() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.questions_path, PathBuf::from("data/questions.json"));
        assert_eq!(config.questions_key, "questions");
        assert_eq!(config.label_mapping, LabelMapping::default());
        assert_eq!(config.preview_len, 80);
        assert!(!config.verbose_logging);
    }

    #[test]
    fn test_overrides_from_lookup() {
        let config = Config::from_lookup(lookup_from(&[
            ("QUESTIONS_PATH", "/tmp/bank.json"),
            ("QUESTIONS_KEY", "items"),
            ("LABEL_MAPPING", "A=1,B=2"),
            ("PREVIEW_LEN", "20"),
            ("VERBOSE_LOGGING", "true"),
        ]))
        .unwrap();

        assert_eq!(config.questions_path, PathBuf::from("/tmp/bank.json"));
        assert_eq!(config.questions_key, "items");
        assert_eq!(
            config.label_mapping.pairs(),
            &[LabelPair::new("A", "1"), LabelPair::new("B", "2")]
        );
        assert_eq!(config.preview_len, 20);
        assert!(config.verbose_logging);
    }

    #[test]
    fn test_bad_number_is_an_error() {
        let err = Config::from_lookup(lookup_from(&[("PREVIEW_LEN", "eighty")])).unwrap_err();
        assert!(matches!(
            err,
            AppError::Config(ConfigError::EnvVarParseFailed { .. })
        ));
    }

    #[test]
    fn test_mapping_file_wins_over_inline() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("labels.toml");
        std::fs::write(
            &file,
            "[[labels]]\nsource = \"A\"\ntarget = \"α\"\n",
        )
        .unwrap();

        let config = Config::from_lookup(lookup_from(&[
            ("LABEL_MAPPING_FILE", file.to_str().unwrap()),
            ("LABEL_MAPPING", "A=1"),
        ]))
        .unwrap();

        assert_eq!(config.label_mapping.pairs(), &[LabelPair::new("A", "α")]);
    }

    #[test]
    fn test_missing_mapping_file_is_an_error() {
        let err = Config::from_lookup(lookup_from(&[(
            "LABEL_MAPPING_FILE",
            "/definitely/not/here.toml",
        )]))
        .unwrap_err();
        assert!(matches!(
            err,
            AppError::Config(ConfigError::MappingFileReadFailed { .. })
        ));
    }
}
