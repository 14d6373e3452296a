// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! cml - Commit Message Linter
//!
//! A small CLI tool that validates commit messages against user-defined
//! rules.
//!
//! # Features
//!
//! - **Rule Engine**: literal, pattern, and predicate checks against the
//!   commit title, body, or whole message
//! - **Config Formats**: TOML, YAML, and JSON config files, discovered
//!   upward from the working directory
//! - **Programmatic Configs**: predicate rules and custom title/body
//!   splitting for embedders, including asynchronous checks
//! - **Hook Friendly**: every failure condition has its own exit code,
//!   each overridable through the environment
//!
//! # Example
//!
//! ```no_run
//! use cml::config::LintConfig;
//! use cml::rules::{Rule, RuleCheck, Target};
//!
//! let config = LintConfig::default()
//!     .with_rule(
//!         Rule::new("no-wip", RuleCheck::predicate_fn(|c| !c.title.contains("WIP")))
//!             .with_message("don't commit work in progress"),
//!     )
//!     .with_rule(
//!         Rule::new("short-title", RuleCheck::Literal(r"^.{1,72}$".to_string()))
//!             .with_kind(cml::rules::MatchKind::Regex)
//!             .with_target(Target::Title),
//!     );
//!
//! assert_eq!(config.rules.len(), 2);
//! ```

// Module declarations
pub mod cli;
pub mod commit;
pub mod config;
pub mod error;
pub mod rules;

// Re-exports for convenience
pub use config::LintConfig;
pub use error::{LintError, Result};

/// Version information embedded at compile time.
pub mod version {
    /// The current version of cml.
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");

    /// The git SHA at compile time (if available).
    pub const GIT_SHA: Option<&str> = option_env!("VERGEN_GIT_SHA");

    /// The git commit date at compile time (if available).
    pub const GIT_COMMIT_DATE: Option<&str> = option_env!("VERGEN_GIT_COMMIT_DATE");

    /// Get a formatted version string.
    pub fn version_string() -> String {
        match (GIT_SHA, GIT_COMMIT_DATE) {
            (Some(sha), Some(date)) => {
                format!("{} ({} {})", VERSION, &sha[..7.min(sha.len())], date)
            }
            (Some(sha), None) => {
                format!("{} ({})", VERSION, &sha[..7.min(sha.len())])
            }
            _ => VERSION.to_string(),
        }
    }
}
