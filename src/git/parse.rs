//! Parsers for the plain-text output of the git queries.
//!
//! Everything here is pure string handling so it can be tested without a
//! repository on disk.

use crate::types::StatusCounts;

const LINE_FEED: char = '\n';
const CARRIAGE_RETURN: char = '\r';
const UNTRACKED_MARKER: &str = "??";

/// Split on `\r?\n`, dropping empty lines.
pub fn split_lines(output: &str) -> impl Iterator<Item = &str> {
    output
        .split(LINE_FEED)
        .map(|line| line.strip_suffix(CARRIAGE_RETURN).unwrap_or(line))
        .filter(|line| !line.is_empty())
}

/// Number of non-empty lines; 0 for empty output.
pub fn count_lines(output: &str) -> usize {
    split_lines(output).count()
}

/// Classify `git status --short` lines: `??` is untracked, any other
/// two-character marker is dirty.
pub fn parse_status(output: &str) -> StatusCounts {
    split_lines(output).fold(StatusCounts::default(), |mut counts, line| {
        if line.starts_with(UNTRACKED_MARKER) {
            counts.untracked += 1;
        } else {
            counts.dirty += 1;
        }
        counts
    })
}

/// Trimmed output, or `None` when nothing but whitespace was printed.
pub fn non_empty_trimmed(output: &str) -> Option<String> {
    let trimmed = output.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
