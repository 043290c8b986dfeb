//! 单文件级错误（不会中断对其他文件的处理）
use std::path::PathBuf;
use thiserror::Error;

/// 单个配置文件处理失败的原因。`Display` 即写入报告的错误文本。
#[derive(Debug, Error)]
pub enum FileError {
    /// 读取失败（权限、非 UTF-8 内容等）
    #[error("[{}] Unexpected error: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// 方言文本不是合法 JSON（尾逗号、截断的字面量等）
    #[error("[{}] Failed to decode JSON: {source}", .path.display())]
    Syntax {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// 合法 JSON，但顶层不是对象
    #[error("[{}] Unexpected error: top-level value must be an object, found {found}", .path.display())]
    NotAnObject { path: PathBuf, found: &'static str },

    /// 超过 `max_file_size`
    #[error("[{}] Skipped: file size {size} exceeds limit of {limit} bytes", .path.display())]
    TooLarge { path: PathBuf, size: u64, limit: u64 },
}

impl FileError {
    pub fn path(&self) -> &std::path::Path {
        match self {
            FileError::Io { path, .. }
            | FileError::Syntax { path, .. }
            | FileError::NotAnObject { path, .. }
            | FileError::TooLarge { path, .. } => path,
        }
    }
}
