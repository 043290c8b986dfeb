//! 固定规则集（结构 / 语义校验）
//!
//! 规则按表中顺序逐条执行，互不依赖，全部执行完毕后才返回；
//! 任何一条规则失败都不会短路后续规则。
use serde_json::{Map, Value};
use std::path::Path;
use tracing::trace;

use crate::dialect::ConfigDocument;
use crate::findings::Finding;

/// 端口“常用范围”（两端均不含）
const PORT_LOWER: i64 = 1024;
const PORT_UPPER: i64 = 65535;
/// 触发 `connectionString` 特殊校验的应用名
const DB_CONNECTOR_APP: &str = "database_connector";
/// 识别的数据库协议前缀（`sqlite:///` 按原样保留三斜杠）
const DB_PROTOCOLS: [&str; 4] = ["postgresql://", "mysql://", "mongodb://", "sqlite:///"];
const MIN_CONNECTION_STRING_LEN: usize = 10;
const MIN_NOTES_LEN: usize = 10;
/// `settings.setting_0` .. `settings.setting_9`
const NAMED_SETTINGS: usize = 10;
/// `settings.s1` .. `settings.s15`
const NUMBERED_SETTINGS: usize = 15;

/// 规则共享的只读文档视图
pub struct DocumentView<'a> {
    pub doc: &'a ConfigDocument,
    pub file: &'a Path,
}

impl<'a> DocumentView<'a> {
    pub fn new(doc: &'a ConfigDocument, file: &'a Path) -> Self {
        Self { doc, file }
    }

    fn get(&self, key: &str) -> Option<&'a Value> {
        self.doc.get(key)
    }

    /// `settings` 缺失或不是对象时视为空
    fn settings(&self) -> Option<&'a Map<String, Value>> {
        self.doc.get("settings").and_then(Value::as_object)
    }

    fn application_name(&self) -> Option<&'a str> {
        self.get("applicationName").and_then(Value::as_str)
    }
}

/// 单文件校验结果：错误与警告各自保序
#[derive(Debug, Default, Clone)]
pub struct Diagnostics {
    pub errors: Vec<Finding>,
    pub warnings: Vec<Finding>,
}

impl Diagnostics {
    fn error(&mut self, view: &DocumentView<'_>, message: String) {
        self.errors.push(Finding { file: view.file.to_path_buf(), message });
    }

    fn warning(&mut self, view: &DocumentView<'_>, message: String) {
        self.warnings.push(Finding { file: view.file.to_path_buf(), message });
    }
}

/// 单条规则：读取视图，向结果追加零到多条发现
pub type RuleFn = fn(&DocumentView<'_>, &mut Diagnostics);

/// 规则表（顺序即输出顺序）
pub const RULES: &[(&str, RuleFn)] = &[
    ("application-name", check_application_name),
    ("listen-port", check_listen_port),
    ("connection-string", check_connection_string),
    ("named-settings", check_named_settings),
    ("notes", check_notes),
    ("numbered-settings", check_numbered_settings),
];

/// 对文档执行全部规则
pub fn validate_document(doc: &ConfigDocument, file: &Path) -> Diagnostics {
    let view = DocumentView::new(doc, file);
    let mut diag = Diagnostics::default();
    for (name, rule) in RULES {
        let (errors, warnings) = (diag.errors.len(), diag.warnings.len());
        rule(&view, &mut diag);
        trace!(
            rule = *name,
            path = %file.display(),
            errors = diag.errors.len() - errors,
            warnings = diag.warnings.len() - warnings,
            "rule applied"
        );
    }
    diag
}

/// 规则 1：`applicationName` 必须是字符串
pub fn check_application_name(view: &DocumentView<'_>, diag: &mut Diagnostics) {
    if view.application_name().is_none() {
        diag.error(view, "'applicationName' must be a string.".to_string());
    }
}

/// 规则 2：`listenPort` 必须是整数；不在 (1024, 65535) 内给出警告
pub fn check_listen_port(view: &DocumentView<'_>, diag: &mut Diagnostics) {
    let port = match view.get("listenPort") {
        Some(Value::Number(n)) if n.is_i64() || n.is_u64() => n,
        _ => {
            diag.error(view, "'listenPort' must be an integer.".to_string());
            return;
        }
    };
    // 超出 i64 的 u64 必然越界
    let in_range = port.as_i64().map(|p| PORT_LOWER < p && p < PORT_UPPER).unwrap_or(false);
    if !in_range {
        diag.warning(view, format!("'listenPort' {port} is outside the common range."));
    }
}

/// 规则 3：`database_connector` 需要合法的 `connectionString`
///
/// 四项检查依次进行，命中第一项即停止（长度 / 协议警告只在确有字符串时出现）。
pub fn check_connection_string(view: &DocumentView<'_>, diag: &mut Diagnostics) {
    let app = match view.application_name() {
        Some(app) if app == DB_CONNECTOR_APP => app,
        _ => return,
    };
    let value = view.get("connectionString");
    if !value.map(is_truthy).unwrap_or(false) {
        diag.error(view, format!("'connectionString' is required for {app}."));
        return;
    }
    let conn = match value.and_then(Value::as_str) {
        Some(s) => s,
        None => {
            diag.error(view, format!("'connectionString' must be a string for {app}."));
            return;
        }
    };
    if conn.trim().chars().count() < MIN_CONNECTION_STRING_LEN {
        diag.warning(view, format!("'connectionString' looks too short for {app}."));
        return;
    }
    let lowered = conn.to_lowercase();
    if !DB_PROTOCOLS.iter().any(|proto| lowered.contains(proto)) {
        diag.warning(view, format!("'connectionString' does not contain a recognized database protocol for {app}."));
    }
}

/// 规则 4：`settings.setting_0` .. `settings.setting_9` 缺失时警告
pub fn check_named_settings(view: &DocumentView<'_>, diag: &mut Diagnostics) {
    let settings = view.settings();
    for i in 0..NAMED_SETTINGS {
        let key = format!("setting_{i}");
        if !settings.map(|s| s.contains_key(&key)).unwrap_or(false) {
            diag.warning(view, format!("Missing 'settings.{key}'."));
        }
    }
}

/// 规则 5：`notes` 缺失或少于 10 个字符时警告（非字符串按空串处理）
pub fn check_notes(view: &DocumentView<'_>, diag: &mut Diagnostics) {
    let notes = view.get("notes").and_then(Value::as_str).unwrap_or("");
    if notes.chars().count() < MIN_NOTES_LEN {
        diag.warning(view, "'notes' is too short.".to_string());
    }
}

/// 规则 6：`settings.s1` .. `settings.s15` 缺失或为 null 时报错
pub fn check_numbered_settings(view: &DocumentView<'_>, diag: &mut Diagnostics) {
    let settings = view.settings();
    for i in 1..=NUMBERED_SETTINGS {
        let key = format!("s{i}");
        let present = settings.and_then(|s| s.get(&key)).map(|v| !v.is_null()).unwrap_or(false);
        if !present {
            diag.error(view, format!("Missing setting {key}"));
        }
    }
}

/// “必填”判定：null / false / 0 / 空串 / 空数组 / 空对象均视为缺失
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}
