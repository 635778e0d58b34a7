//! Isolating the useful part of a model response.
//!
//! Answers to coding questions usually wrap one or more fenced code blocks
//! in prose. [`extract_payload`] keeps the part a consumer most likely wants
//! to paste somewhere, tagged with how it was found.

use regex::Regex;
use std::sync::LazyLock;

/// Marker line for a fenced block that was extracted.
pub const FENCED_MARKER: &str = "// code (extracted)";
/// Marker line for code-like lines found without fences.
pub const HEURISTIC_MARKER: &str = "// code (heuristic)";
/// Marker line for the single-line prose fallback.
pub const MINIMAL_MARKER: &str = "// response (minimal)";

/// Character cap on the prose fallback.
pub const MINIMAL_MAX_CHARS: usize = 1200;

static FENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```(?:\w+)?\n(.*?)```").expect("Valid fence regex"));

static CODE_LINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^\s*(?:#|//).*$|^\s*[\w.\-]+\s*=|^\s*(?:def|class|for|while|if|return|print)\b.*$",
    )
    .expect("Valid code line regex")
});

/// Reduce a model response to its most relevant payload.
///
/// In order, first match wins:
/// 1. the longest fenced code block (first on ties), prefixed with
///    [`FENCED_MARKER`]
/// 2. runs of code-like lines (comments, assignments, statement keywords),
///    each run followed by a blank line, when at least two non-blank lines
///    qualify, prefixed with [`HEURISTIC_MARKER`]
/// 3. the whole text on one line, capped at [`MINIMAL_MAX_CHARS`]
///    characters, prefixed with [`MINIMAL_MARKER`]
///
/// Empty input yields an empty string.
///
/// # Examples
///
/// ```
/// use paperclip_dispatch::extract_payload;
///
/// let response = "Here you go:\n```rust\nfn main() {}\n```\nEnjoy!";
/// assert_eq!(extract_payload(response), "// code (extracted)\nfn main() {}\n");
///
/// assert_eq!(
///     extract_payload("Sure.\nIt depends."),
///     "// response (minimal)\nSure. It depends."
/// );
/// ```
pub fn extract_payload(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    if let Some(block) = longest_fenced_block(text) {
        return format!("{}\n{}\n", FENCED_MARKER, block.trim_end());
    }

    if let Some(code) = code_like_runs(text) {
        return format!("{}\n{}\n", HEURISTIC_MARKER, code);
    }

    let compressed: String = text
        .trim()
        .lines()
        .collect::<Vec<_>>()
        .join(" ")
        .chars()
        .take(MINIMAL_MAX_CHARS)
        .collect();
    format!("{}\n{}", MINIMAL_MARKER, compressed)
}

fn longest_fenced_block(text: &str) -> Option<&str> {
    let mut best: Option<(&str, usize)> = None;
    for caps in FENCE_RE.captures_iter(text) {
        let Some(body) = caps.get(1) else { continue };
        let body = body.as_str();
        let len = body.chars().count();
        if best.is_none_or(|(_, best_len)| len > best_len) {
            best = Some((body, len));
        }
    }
    best.map(|(body, _)| body)
}

fn code_like_runs(text: &str) -> Option<String> {
    let mut kept: Vec<&str> = Vec::new();
    let mut run: Vec<&str> = Vec::new();
    for line in text.lines() {
        if CODE_LINE_RE.is_match(line.trim()) {
            run.push(line);
        } else if !run.is_empty() {
            kept.append(&mut run);
            kept.push("");
        }
    }
    kept.append(&mut run);

    let non_blank = kept.iter().filter(|l| !l.trim().is_empty()).count();
    (non_blank >= 2).then(|| kept.join("\n").trim().to_string())
}
