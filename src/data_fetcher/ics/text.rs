/// Resolves calendar text escapes in a single pass.
///
/// `\,` `\;` and `\\` yield the literal character, `\n` and `\N` a newline.
/// Any other backslash sequence is kept as written.
pub fn unescape_text(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some(',') => out.push(','),
            Some(';') => out.push(';'),
            Some('\\') => out.push('\\'),
            Some('n') | Some('N') => out.push('\n'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

/// Inverse of [`unescape_text`] producing the canonical escaped form.
pub fn escape_text(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            ',' => out.push_str("\\,"),
            ';' => out.push_str("\\;"),
            '\n' => out.push_str("\\n"),
            other => out.push(other),
        }
    }
    out
}

/// Unescapes a property value and flattens it to one line: newlines and
/// non-breaking spaces become plain spaces and the result is trimmed.
pub fn flatten_text(value: &str) -> String {
    unescape_text(value)
        .replace(['\n', '\u{a0}'], " ")
        .trim()
        .to_string()
}
