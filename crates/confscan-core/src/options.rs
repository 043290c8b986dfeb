//! 校验选项与默认值

/// 默认匹配的配置文件名（精确匹配 basename）
pub const DEFAULT_FILE_NAME: &str = "config.json";

/// 校验选项
#[derive(Debug, Clone)]
pub struct ValidateOptions {
    /// 敏感内容扫描目标；None 或空串表示不扫描
    pub target: Option<String>,
    /// 需要处理的文件名
    pub file_name: String,
    /// 线程数：None 表示自动（等于 CPU 核数）；Some(1) 走串行
    pub threads: Option<usize>,
    /// 最大文件大小（字节）；超过则记为错误并跳过
    pub max_file_size: Option<u64>,
}

impl Default for ValidateOptions {
    fn default() -> Self {
        Self {
            target: None,
            file_name: DEFAULT_FILE_NAME.to_string(),
            threads: None,
            max_file_size: None,
        }
    }
}

impl ValidateOptions {
    /// 有效的扫描目标（空串视为未提供）
    pub fn target(&self) -> Option<&str> {
        self.target.as_deref().filter(|t| !t.is_empty())
    }
}
