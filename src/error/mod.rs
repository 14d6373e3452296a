// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Error types for the cml application.
//!
//! Every terminal condition of a lint run is a variant here; the mapping
//! to process exit codes lives in [`crate::config::ExitCodes`].

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for cml operations.
#[derive(Error, Debug)]
pub enum LintError {
    // Configuration errors
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    // Commit message errors
    #[error("commit message error: {0}")]
    Commit(#[from] CommitError),

    // Rule errors
    #[error("rule error: {0}")]
    Rule(#[from] RuleError),

    // An already non-zero exit code entering the run, forwarded verbatim
    #[error("entered cml with exit code {code}, aborting!")]
    Forwarded { code: i32 },

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl LintError {
    /// Whether the run already printed its own report for this error.
    ///
    /// Rule failures are reported line by line before the error is
    /// returned, so the caller must not print them again.
    pub fn is_reported(&self) -> bool {
        matches!(self, LintError::Rule(RuleError::Failed { .. }))
    }
}

/// Configuration-related errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("no cml config found! aborting")]
    NotFound,

    #[error("config file not found: {path}")]
    NotFoundAt { path: PathBuf },

    #[error("failed to parse {path}: {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("unsupported config format: {path}")]
    UnsupportedFormat { path: PathBuf },
}

/// Commit-message-related errors.
#[derive(Error, Debug)]
pub enum CommitError {
    #[error("{path} doesn't exist!")]
    FileNotFound { path: PathBuf },

    #[error("failed to prepare commit!\n{message}")]
    PrepareFailed { message: String },
}

/// Rule-related errors.
#[derive(Error, Debug)]
pub enum RuleError {
    #[error("rule at {index} has no proper validation! (must be string, pattern or predicate, got {found})")]
    InvalidCheck { index: usize, found: &'static str },

    #[error("rule at {index} has an invalid pattern: {message}")]
    InvalidPattern { index: usize, message: String },

    #[error("predicate of rule '{name}' panicked")]
    PredicatePanicked { name: String },

    #[error("{count} rule(s) failed")]
    Failed { count: usize },
}

/// Result type alias for cml operations.
pub type Result<T> = std::result::Result<T, LintError>;
