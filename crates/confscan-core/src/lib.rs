//! 配置校验核心库
//!
//! 流水线（与依赖顺序一致）：
//! - `comments`：逐行剥离 `//` 注释，识别字符串字面量与转义；
//! - `dialect`：拼接后按标准 JSON 解析，得到配置文档；
//! - `rules`：固定规则集，输出有序的错误与警告；
//! - `sensitive`：递归扫描敏感内容，记录点分键路径；
//! - `scan`：遍历目录、逐文件执行上述步骤，并按发现顺序汇总为报告。
//!
//! 单个文件的读取 / 解析失败只记一条错误，不影响其他文件。

mod comments;
mod dialect;
mod errors;
mod findings;
mod options;
mod options_file;
mod report;
mod rules;
mod scan;
mod sensitive;
mod serialize;

pub use comments::{strip_comments, strip_line_comment};
pub use dialect::{parse_dialect, parse_document, ConfigDocument};
pub use errors::FileError;
pub use findings::{Finding, KeyPath, MatchLocation, SecurityFinding};
pub use options::{ValidateOptions, DEFAULT_FILE_NAME};
pub use options_file::{load_options_file, OptionsFile};
pub use report::{AggregateReport, FileOutcome, ReportOutput};
pub use rules::{validate_document, Diagnostics, DocumentView, RuleFn, RULES};
pub use scan::{discover_config_files, process_file, validate_tree};
pub use sensitive::scan_sensitive;
