//! HTML fragment helpers

/// Escape text for use in HTML element content or a quoted attribute value.
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// `<div class="error">…</div>` with escaped text
pub fn error_fragment(message: &str) -> String {
    format!(r#"<div class="error">{}</div>"#, escape(message))
}

/// `<div class="success">…</div>` with escaped text
pub fn success_fragment(message: &str) -> String {
    format!(r#"<div class="success">{}</div>"#, escape(message))
}
