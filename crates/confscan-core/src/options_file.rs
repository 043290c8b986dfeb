//! 选项文件加载（TOML）
use anyhow::Result;
use serde::Deserialize;
use std::path::Path;

use crate::options::ValidateOptions;

/// 选项文件结构；所有字段可选，未给出的保持原值
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OptionsFile {
    #[serde(default)]
    pub target: Option<String>,
    #[serde(default)]
    pub file_name: Option<String>,
    #[serde(default)]
    pub threads: Option<usize>,
    #[serde(default)]
    pub max_file_size: Option<u64>,
}

impl OptionsFile {
    /// 覆盖到已有选项上
    pub fn apply(self, opts: &mut ValidateOptions) {
        if let Some(t) = self.target { opts.target = Some(t); }
        if let Some(n) = self.file_name { opts.file_name = n; }
        // 0 线程无意义，按自动处理
        if let Some(n) = self.threads { opts.threads = if n >= 1 { Some(n) } else { None }; }
        if let Some(m) = self.max_file_size { opts.max_file_size = Some(m); }
    }
}

/// 从 TOML 文件读取选项
pub fn load_options_file(path: &Path) -> Result<OptionsFile> {
    let txt = std::fs::read_to_string(path)?;
    let parsed: OptionsFile = toml::from_str(&txt)?;
    Ok(parsed)
}
