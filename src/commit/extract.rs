// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Commit message extraction.
//!
//! Turns the raw content of a commit message file into a [`Commit`]:
//! strips the appended diff of verbose commit templates, drops comment
//! lines, and splits the remainder into title and body.

use crate::error::{CommitError, Result};

use super::prepare::{PrepareCommit, PrepareOutcome};

/// Everything from this marker onward is the diff appended by
/// `git commit --verbose`, never part of the message itself.
const DIFF_MARKER: &str = "diff --git";

/// An extracted commit message. Immutable once constructed; one per run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Commit {
    /// The cleaned message: diff removed, comment lines dropped,
    /// trailing whitespace trimmed.
    pub raw: String,
    /// The commit title.
    pub title: String,
    /// The commit body.
    pub body: String,
}

/// Extract a [`Commit`] from raw file content.
///
/// With a `prepare` strategy the split is delegated to it, and a
/// rejection aborts extraction with the strategy's complaint. Without
/// one, the first line is the title and the remaining lines, re-joined
/// with newlines, are the body.
pub fn extract(content: &str, prepare: Option<&dyn PrepareCommit>) -> Result<Commit> {
    let relevant = match content.find(DIFF_MARKER) {
        Some(at) => &content[..at],
        None => content,
    };

    let cleaned = relevant
        .split('\n')
        .filter(|line| !line.starts_with('#'))
        .collect::<Vec<_>>()
        .join("\n");
    let raw = cleaned.trim_end().to_string();

    let (title, body) = match prepare {
        Some(strategy) => match strategy.prepare(&raw) {
            PrepareOutcome::Split { title, body } => (title, body),
            PrepareOutcome::Reject(message) => {
                return Err(CommitError::PrepareFailed { message }.into());
            }
        },
        None => split_default(&raw),
    };

    Ok(Commit { raw, title, body })
}

fn split_default(raw: &str) -> (String, String) {
    let mut lines = raw.split('\n');
    let title = lines.next().unwrap_or_default().to_string();
    let body = lines.collect::<Vec<_>>().join("\n");
    (title, body)
}
