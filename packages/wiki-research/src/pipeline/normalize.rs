//! Text normalization for extracted paragraphs.

use regex::Regex;
use std::sync::OnceLock;

fn whitespace_run() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").unwrap())
}

fn space_before_punctuation() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+([.,!?;:])").unwrap())
}

fn sentence_boundary() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[.!?]\s+").unwrap())
}

/// Collapse whitespace runs to one space, trim, and drop spaces before `. , ! ? ; :`.
///
/// Idempotent: `clean(&clean(x)) == clean(x)`.
pub fn clean(text: &str) -> String {
    let collapsed = whitespace_run().replace_all(text, " ");
    space_before_punctuation()
        .replace_all(collapsed.trim(), "$1")
        .into_owned()
}

/// First `n` sentences of the cleaned text, joined with single spaces.
///
/// A sentence ends at `.`, `!` or `?` followed by whitespace. Fewer than `n`
/// sentences returns all of them.
pub fn summarize_first_sentences(text: &str, n: usize) -> String {
    if n == 0 {
        return String::new();
    }

    let cleaned = clean(text);
    let mut sentences = Vec::new();
    let mut start = 0;

    for boundary in sentence_boundary().find_iter(&cleaned) {
        // the terminator is a single ASCII byte
        sentences.push(&cleaned[start..boundary.start() + 1]);
        start = boundary.end();
        if sentences.len() == n {
            return sentences.join(" ");
        }
    }

    sentences.push(&cleaned[start..]);
    sentences.join(" ")
}
