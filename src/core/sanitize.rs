// src/core/sanitize.rs

/// Escape text content for HTML (`&`, `<`, `>`).
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Escape a double-quoted attribute value (text escapes plus both quotes).
pub fn escape_attr(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push_str(&escape_html(ch.encode_utf8(&mut [0; 4]))),
        }
    }
    out
}

/// File-system safe stem for a cache key: ASCII alphanumerics, `-` and `_`,
/// whitespace runs collapsed to one `_`. Falls back to `sheet`.
pub fn sanitize_file_stem(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    let mut last_us = false;
    for ch in key.chars() {
        if ch.is_ascii_alphanumeric() { out.push(ch); last_us = false; }
        else if ch.is_whitespace() { if !last_us { out.push('_'); last_us = true; } }
        else if ch=='-' || ch=='_' { if !(last_us && ch=='_') { out.push(ch); } last_us = ch=='_'; }
    }
    let out = out.trim_matches('_').to_string();
    if out.is_empty() { s!("sheet") } else { out }
}
