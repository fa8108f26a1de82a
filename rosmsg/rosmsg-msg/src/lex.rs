/// Whether `line` is a definition boundary. Anything starting with `==` counts.
pub fn is_separator_line(line: &str) -> bool {
    line.trim_start().starts_with("==")
}

/// Split a multi-definition text into blocks of meaningful lines.
///
/// Lines are trimmed; blank lines and full-line `#` comments are dropped.
/// Every separator line closes the current block, so `n` separators always
/// yield `n + 1` blocks.
pub fn split_blocks(text: &str) -> Vec<Vec<&str>> {
    let mut blocks = Vec::new();
    let mut current = Vec::new();

    for line in text.split('\n').map(str::trim) {
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if is_separator_line(line) {
            blocks.push(std::mem::take(&mut current));
            continue;
        }
        current.push(line);
    }
    blocks.push(current);
    blocks
}

/// The name declared by a `MSG: <name>` header, ignoring trailing comments.
pub fn header_name(line: &str) -> Option<Option<&str>> {
    let rest = line.strip_prefix("MSG:")?;
    let rest = rest.split('#').next().unwrap_or("");
    Some(rest.split_whitespace().next())
}

/// Identifier rule shared by classic field and constant names.
pub fn is_lenient_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
