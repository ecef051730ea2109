//! Text normalization applied upstream of every analyzer.

use regex::Regex;
use std::sync::OnceLock;

fn whitespace_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").expect("whitespace pattern"))
}

fn disallowed_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^\w\s.,;:()\-]").expect("allow-list pattern"))
}

/// Collapse whitespace runs to single spaces, strip characters outside the
/// allow-listed set, and trim the ends. Run by the upstream extraction
/// collaborator; the analyzers accept any character sequence.
pub fn normalize(text: &str) -> String {
    let collapsed = whitespace_re().replace_all(text, " ");
    let cleaned = disallowed_re().replace_all(&collapsed, "");
    cleaned.trim().to_string()
}
