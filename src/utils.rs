use once_cell::sync::Lazy;
use regex::Regex;

static ANSI_ESCAPE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\x1b\[[0-9;?]*[ -/]*[@-~]|\x1b[@-Z\\-_]").unwrap());

pub fn trim_line(line: &str) -> Option<String> {
    let trimmed_line = line.trim().to_string();
    if trimmed_line.is_empty() {
        return None;
    }
    Some(trimmed_line)
}

/// Removes ANSI escape sequences and control characters from pasted input.
pub fn strip_controls_and_escapes(input: &str) -> String {
    ANSI_ESCAPE_RE
        .replace_all(input, "")
        .chars()
        .filter(|c| !c.is_control())
        .collect()
}
