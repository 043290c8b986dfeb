//! 敏感内容扫描
//!
//! 两类检查：
//! 1. 整文档：序列化后做大小写不敏感的子串匹配，命中则输出一条整文档发现；
//! 2. 逐字段：顶层字符串字段直接匹配，对象字段递归，路径以 `.` 连接。
//!
//! 数组不参与逐字段递归，数组里的内容只能被整文档检查发现。
use serde_json::{Map, Value};
use std::path::Path;

use crate::dialect::ConfigDocument;
use crate::findings::{KeyPath, MatchLocation, SecurityFinding};
use crate::serialize::to_spaced_ascii_json;

/// 扫描单个文档；`target` 为空或缺省时不扫描
pub fn scan_sensitive(doc: &ConfigDocument, file: &Path, target: Option<&str>) -> Vec<SecurityFinding> {
    let target = match target {
        Some(t) if !t.is_empty() => t,
        _ => return Vec::new(),
    };
    let needle = target.to_lowercase();
    let mut findings = Vec::new();

    // 文档来自解析结果，序列化不会失败；失败时仅跳过整文档检查
    if let Ok(serialized) = to_spaced_ascii_json(doc) {
        if serialized.to_lowercase().contains(&needle) {
            findings.push(SecurityFinding::new(file, target, MatchLocation::WholeDocument));
        }
    }

    for (key, value) in doc {
        match value {
            Value::String(s) if matches_needle(s, &needle) => {
                findings.push(SecurityFinding::new(file, target, MatchLocation::Field(KeyPath::root(key))));
            }
            Value::Object(nested) => {
                search_nested(nested, &KeyPath::root(key), &needle, file, target, &mut findings);
            }
            _ => {}
        }
    }
    findings
}

/// 递归匹配嵌套对象（树无环，深度不设上限）
fn search_nested(
    map: &Map<String, Value>,
    parent: &KeyPath,
    needle: &str,
    file: &Path,
    target: &str,
    out: &mut Vec<SecurityFinding>,
) {
    for (key, value) in map {
        let path = parent.child(key);
        match value {
            Value::String(s) if matches_needle(s, needle) => {
                out.push(SecurityFinding::new(file, target, MatchLocation::Field(path)));
            }
            Value::Object(nested) => search_nested(nested, &path, needle, file, target, out),
            _ => {}
        }
    }
}

fn matches_needle(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: Value) -> ConfigDocument {
        match value {
            Value::Object(map) => map,
            _ => panic!("fixture must be an object"),
        }
    }

    fn field_paths(findings: &[SecurityFinding]) -> Vec<String> {
        findings
            .iter()
            .filter_map(|f| match &f.location {
                MatchLocation::Field(p) => Some(p.to_string()),
                MatchLocation::WholeDocument => None,
            })
            .collect()
    }

    #[test]
    fn no_target_means_no_scan() {
        let d = doc(json!({"password": "secret"}));
        assert!(scan_sensitive(&d, Path::new("c.json"), None).is_empty());
        assert!(scan_sensitive(&d, Path::new("c.json"), Some("")).is_empty());
    }

    #[test]
    fn top_level_match_reports_whole_document_then_field() {
        let d = doc(json!({"name": "svc", "token": "ABC-Secret-123"}));
        let findings = scan_sensitive(&d, Path::new("c.json"), Some("secret"));
        assert_eq!(findings.len(), 2);
        assert_eq!(findings[0].location, MatchLocation::WholeDocument);
        assert_eq!(findings[1].location, MatchLocation::Field(KeyPath::root("token")));
    }

    #[test]
    fn deep_match_reports_full_key_path() {
        let d = doc(json!({
            "settings": {"db": {"credentials": {"user": "admin", "password": "my-secret-token"}}}
        }));
        let findings = scan_sensitive(&d, Path::new("c.json"), Some("secret"));
        assert_eq!(field_paths(&findings), ["settings.db.credentials.password"]);
        assert_eq!(
            findings[1].to_string(),
            "[CRITICAL SECURITY] [c.json] Sensitive content found in field 'settings.db.credentials.password': secret"
        );
    }

    #[test]
    fn arrays_are_only_seen_by_whole_document_check() {
        let d = doc(json!({"hosts": ["a", "the-secret-host"], "nested": {"list": [{"k": "secret"}]}}));
        let findings = scan_sensitive(&d, Path::new("c.json"), Some("secret"));
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].location, MatchLocation::WholeDocument);
    }

    #[test]
    fn whole_document_sees_spaced_separators() {
        let d = doc(json!({"user": "admin", "pw": "x"}));
        let findings = scan_sensitive(&d, Path::new("c.json"), Some(r#""user": "admin""#));
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].location, MatchLocation::WholeDocument);
        assert!(scan_sensitive(&d, Path::new("c.json"), Some(r#""user":"admin""#)).is_empty());
    }

    #[test]
    fn non_ascii_target_only_matches_fields() {
        let d = doc(json!({"name": "se\u{f1}or"}));
        let findings = scan_sensitive(&d, Path::new("c.json"), Some("\u{f1}"));
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].location, MatchLocation::Field(KeyPath::root("name")));
    }

    #[test]
    fn key_names_only_match_whole_document() {
        let d = doc(json!({"secret": 1}));
        let findings = scan_sensitive(&d, Path::new("c.json"), Some("SECRET"));
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].location, MatchLocation::WholeDocument);
        assert_eq!(findings[0].target, "SECRET");
    }

    #[test]
    fn non_string_scalars_are_not_field_matches() {
        let d = doc(json!({"port": 1234, "flag": true}));
        let findings = scan_sensitive(&d, Path::new("c.json"), Some("1234"));
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].location, MatchLocation::WholeDocument);
    }

    #[test]
    fn multiple_fields_follow_key_order() {
        let d = doc(json!({"b": "x-KEY", "a": {"z": "key", "y": {"w": "Key!"}}, "c": "nope"}));
        let findings = scan_sensitive(&d, Path::new("c.json"), Some("key"));
        assert_eq!(field_paths(&findings), ["b", "a.z", "a.y.w"]);
    }
}
