use crate::error::{AppError, AppResult, FileError};
use crate::models::question::QuestionSet;
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// 从 JSON 文件加载题库
///
/// # 参数
/// - `path`: 题库文件路径
/// - `list_key`: 题目列表字段名
pub fn load_question_set(path: &Path, list_key: &str) -> AppResult<QuestionSet> {
    let content = fs::read_to_string(path).map_err(|e| AppError::file_read_failed(path, e))?;

    let value: serde_json::Value =
        serde_json::from_str(&content).map_err(|e| AppError::invalid_json(path, e))?;

    let set = QuestionSet::from_value(value, list_key, &path.display().to_string())?;
    debug!("已加载 {} 道题目: {}", set.len(), path.display());

    Ok(set)
}

/// 将题库整体写回 JSON 文件
///
/// 两空格缩进、非 ASCII 字符原样输出。先写入同目录下的临时文件，
/// 全部成功后再替换原文件，失败时原文件保持不变。
pub fn save_question_set(path: &Path, set: QuestionSet) -> AppResult<()> {
    let rendered = serde_json::to_string_pretty(&set.into_value()).map_err(|source| {
        FileError::SerializeFailed {
            path: path.display().to_string(),
            source,
        }
    })?;

    let tmp_path = temp_path_for(path);
    if let Err(e) = write_synced(&tmp_path, rendered.as_bytes()) {
        let _ = fs::remove_file(&tmp_path);
        return Err(AppError::file_write_failed(&tmp_path, e));
    }

    if let Err(source) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(FileError::RenameFailed {
            from: tmp_path.display().to_string(),
            to: path.display().to_string(),
            source,
        }
        .into());
    }

    debug!("已写回: {}", path.display());
    Ok(())
}

/// 写入并落盘，rename 之前数据必须已经写到磁盘上
fn write_synced(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(bytes)?;
    file.sync_all()
}

/// `questions.json` -> `questions.json.tmp`（同目录，保证 rename 不跨文件系统）
fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| OsString::from("questions.json"));
    name.push(".tmp");
    path.with_file_name(name)
}
