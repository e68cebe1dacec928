//! Exporters for research results.
//!
//! Records are the main article followed by the related ones. Two forms:
//! `Key: Value` text blocks separated by blank lines, and a pretty JSON array.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::Result;
use crate::types::article::ArticleSummary;
use crate::types::research::PipelineResult;

/// Render records as `Key: Value` lines with a blank line after each record.
pub fn to_text(records: &[&ArticleSummary]) -> String {
    let mut out = String::new();
    for record in records {
        out.push_str(&format!("Title: {}\n", record.title));
        out.push_str(&format!("Url: {}\n", record.url));
        out.push_str(&format!("Excerpt: {}\n", record.excerpt));
        out.push_str(&format!("Categories: {}\n", record.categories.join(", ")));
        out.push('\n');
    }
    out
}

/// Render records as an indented JSON array; non-ASCII text is kept as is.
pub fn to_json(records: &[&ArticleSummary]) -> Result<String> {
    Ok(serde_json::to_string_pretty(records)?)
}

/// Write `{canonical title}.txt` into `dir`.
pub fn write_text_file(result: &PipelineResult, dir: &Path) -> Result<PathBuf> {
    let path = dir.join(format!("{}.txt", file_stem(result)));
    fs::write(&path, to_text(&result.records()))?;
    info!(path = %path.display(), records = result.records().len(), "Wrote text export");
    Ok(path)
}

/// Write `{canonical title}.json` into `dir`.
pub fn write_json_file(result: &PipelineResult, dir: &Path) -> Result<PathBuf> {
    let path = dir.join(format!("{}.json", file_stem(result)));
    fs::write(&path, to_json(&result.records())?)?;
    info!(path = %path.display(), records = result.records().len(), "Wrote JSON export");
    Ok(path)
}

/// Canonical title with path separators replaced.
fn file_stem(result: &PipelineResult) -> String {
    result.canonical_title().replace(['/', '\\'], "_")
}
