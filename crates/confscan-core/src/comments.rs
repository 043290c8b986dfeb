//! 行注释剥离（`//` 到行尾）
//!
//! 逐字符扫描，维护两个状态：
//! - `in_string`：遇到未转义的 `"` 即翻转；
//! - `escaped`：遇到 `\` 后仅对下一个字符生效，随即复位。
//!
//! 注意：转义状态在整行范围内生效（字符串外的 `\` 同样会吞掉下一个字符），
//! 这是既有行为，不要改成“仅字符串内转义”。

/// 剥离单行中的 `//` 注释；若 `//` 位于字符串字面量内则原样返回。
/// 截断后对保留部分做右侧去空白。未闭合的字符串不在此层报错。
pub fn strip_line_comment(line: &str) -> &str {
    let mut in_string = false;
    let mut escaped = false;
    let mut chars = line.char_indices().peekable();

    while let Some((pos, ch)) = chars.next() {
        if escaped {
            escaped = false;
            continue;
        }
        match ch {
            '\\' => escaped = true,
            '"' => in_string = !in_string,
            '/' if !in_string => {
                if let Some(&(_, '/')) = chars.peek() {
                    return line[..pos].trim_end();
                }
            }
            _ => {}
        }
    }
    line
}

/// 对整段文本逐行剥离注释，再以 `\n` 拼回
pub fn strip_comments(text: &str) -> String {
    text.split('\n').map(strip_line_comment).collect::<Vec<_>>().join("\n")
}
