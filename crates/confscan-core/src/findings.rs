//! 发现项：错误 / 警告 / 严重安全发现
use std::fmt;
use std::path::{Path, PathBuf};

/// 文档内位置：从顶层到字段的键链，输出为 `a.b.c`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyPath(Vec<String>);

impl KeyPath {
    pub fn root(key: &str) -> Self {
        Self(vec![key.to_string()])
    }

    /// 追加一段，返回新路径（递归时各分支互不影响）
    pub fn child(&self, key: &str) -> Self {
        let mut segments = self.0.clone();
        segments.push(key.to_string());
        Self(segments)
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join("."))
    }
}

/// 规则校验产生的单条发现（错误 / 警告由所在列表区分）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub file: PathBuf,
    pub message: String,
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.file.display(), self.message)
    }
}

/// 敏感内容命中的位置
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchLocation {
    /// 整个文档序列化后命中
    WholeDocument,
    /// 某个字符串字段命中
    Field(KeyPath),
}

/// 严重安全发现
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecurityFinding {
    pub file: PathBuf,
    pub target: String,
    pub location: MatchLocation,
}

impl SecurityFinding {
    pub(crate) fn new(file: &Path, target: &str, location: MatchLocation) -> Self {
        Self { file: file.to_path_buf(), target: target.to_string(), location }
    }
}

impl fmt::Display for SecurityFinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.location {
            MatchLocation::WholeDocument => write!(
                f,
                "[CRITICAL SECURITY] [{}] Sensitive content '{}' found in configuration file.",
                self.file.display(),
                self.target
            ),
            MatchLocation::Field(path) => write!(
                f,
                "[CRITICAL SECURITY] [{}] Sensitive content found in field '{}': {}",
                self.file.display(),
                path,
                self.target
            ),
        }
    }
}
