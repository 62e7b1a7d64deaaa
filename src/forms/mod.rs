pub mod auth;
pub mod checkout;
pub mod products;

/// Collapses inner whitespace runs to single spaces, trims the ends and
/// strips control characters.
pub(crate) fn sanitize_inline_text(input: &str) -> String {
    let mut sanitized = String::with_capacity(input.len());
    let mut pending_space = false;

    for ch in input.trim().chars() {
        if ch.is_whitespace() {
            pending_space = !sanitized.is_empty();
        } else if !ch.is_control() {
            if pending_space {
                sanitized.push(' ');
                pending_space = false;
            }
            sanitized.push(ch);
        }
    }

    sanitized
}

/// Sanitizes each line, drops empty lines at both ends and collapses runs
/// of blank lines to a single one.
pub(crate) fn sanitize_multiline_text(input: &str) -> String {
    let lines: Vec<String> = input.lines().map(sanitize_inline_text).collect();

    let first = lines.iter().position(|line| !line.is_empty());
    let last = lines.iter().rposition(|line| !line.is_empty());

    let (Some(first), Some(last)) = (first, last) else {
        return String::new();
    };

    let mut kept: Vec<&str> = Vec::with_capacity(last - first + 1);
    let mut previous_blank = false;
    for line in &lines[first..=last] {
        if line.is_empty() {
            if !previous_blank {
                kept.push("");
            }
            previous_blank = true;
        } else {
            kept.push(line);
            previous_blank = false;
        }
    }

    kept.join("\n")
}
