//! 方言解析：带 `//` 行注释的 JSON
//!
//! 不支持块注释，也不容忍尾逗号；剥离注释后交给 serde_json 严格解析。
use serde_json::{Map, Value};
use std::path::Path;

use crate::comments::strip_comments;
use crate::errors::FileError;

/// 单个配置文件解析后的文档（键顺序与源文本一致）
pub type ConfigDocument = Map<String, Value>;

/// 剥离注释并解析为任意 JSON 值
pub fn parse_dialect(text: &str) -> Result<Value, serde_json::Error> {
    serde_json::from_str(&strip_comments(text))
}

/// 解析为配置文档；顶层必须是对象
pub fn parse_document(path: &Path, text: &str) -> Result<ConfigDocument, FileError> {
    match parse_dialect(text) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(FileError::NotAnObject { path: path.to_path_buf(), found: value_kind(&other) }),
        Err(source) => Err(FileError::Syntax { path: path.to_path_buf(), source }),
    }
}

/// JSON 值的类型名（用于错误信息）
pub(crate) fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_commented_document() {
        let text = r#"{
  // service identity
  "applicationName": "svc", // inline
  "endpoint": "http://example.com/api"
}"#;
        let doc = parse_document(Path::new("a/config.json"), text).unwrap();
        assert_eq!(doc["applicationName"], "svc");
        assert_eq!(doc["endpoint"], "http://example.com/api");
    }

    #[test]
    fn preserves_key_order() {
        let doc = parse_document(Path::new("c.json"), r#"{"z": 1, "a": 2, "m": 3}"#).unwrap();
        let keys: Vec<&str> = doc.keys().map(String::as_str).collect();
        assert_eq!(keys, ["z", "a", "m"]);
    }

    #[test]
    fn trailing_comma_is_syntax_error() {
        let err = parse_document(Path::new("bad/config.json"), "{\"a\": 1,\n}").unwrap_err();
        assert!(matches!(err, FileError::Syntax { .. }));
        assert!(err.to_string().starts_with("[bad/config.json] Failed to decode JSON"));
    }

    #[test]
    fn block_comments_are_not_supported() {
        assert!(parse_dialect("/* c */ {}").is_err());
    }

    #[test]
    fn comment_swallowing_closing_brace_is_syntax_error() {
        assert!(parse_dialect("{\"a\": 1} // }").is_ok());
        assert!(parse_dialect("{\"a\": 1 // }").is_err());
    }

    #[test]
    fn top_level_array_is_rejected() {
        let err = parse_document(Path::new("x.json"), "[1, 2]").unwrap_err();
        assert!(matches!(err, FileError::NotAnObject { found: "array", .. }));
    }
}
