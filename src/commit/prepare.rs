// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Custom title/body splitting strategy.

/// Outcome of a [`PrepareCommit`] strategy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrepareOutcome {
    /// The commit was split into title and body.
    Split { title: String, body: String },
    /// The commit is too malformed to split. The string is the complaint
    /// shown to the user; the run aborts with the prepare exit code.
    Reject(String),
}

/// Strategy for splitting a cleaned commit message into title and body.
///
/// Installed programmatically via
/// [`LintConfig::with_prepare`](crate::config::LintConfig::with_prepare);
/// when absent, the first line becomes the title and the remaining lines
/// the body.
pub trait PrepareCommit: std::fmt::Debug + Send + Sync {
    fn prepare(&self, raw: &str) -> PrepareOutcome;
}
