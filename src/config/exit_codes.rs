// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Process exit codes.
//!
//! Every terminal condition maps to an exit code. Each code can be
//! overridden through an environment variable; the whole table is
//! resolved once at startup instead of reading the environment at each
//! failure site.

use crate::error::{CommitError, ConfigError, LintError, RuleError};

const ENV_CONFIG_NOT_FOUND: &str = "ERROR_CONFIG_NOT_FOUND";
const ENV_COMMIT_MSG_PATH: &str = "ERROR_COMMIT_MSG_PATH";
const ENV_PREPARE_COMMIT: &str = "ERROR_PREPARE_COMMIT";
const ENV_RULE_CONFIG: &str = "ERROR_RULE_CONFIG";
const ENV_RULE: &str = "ERROR_RULE";

/// The resolved exit-code table for one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCodes {
    /// No configuration source found.
    pub config_not_found: i32,
    /// The commit message file does not exist.
    pub commit_msg_path: i32,
    /// The prepare strategy rejected the commit.
    pub prepare_commit: i32,
    /// A rule carries an unusable validation (fatal config error).
    pub rule_config: i32,
    /// One or more rules failed.
    pub rule: i32,
}

impl Default for ExitCodes {
    fn default() -> Self {
        Self {
            config_not_found: 404,
            commit_msg_path: 400,
            prepare_commit: 123,
            rule_config: 666,
            rule: 1,
        }
    }
}

impl ExitCodes {
    /// Resolve the table from the process environment.
    pub fn from_env() -> Self {
        Self::resolve(|key| std::env::var(key).ok())
    }

    fn resolve(get: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let code = |key: &str, fallback: i32| -> i32 {
            get(key)
                .and_then(|value| value.trim().parse().ok())
                .unwrap_or(fallback)
        };

        Self {
            config_not_found: code(ENV_CONFIG_NOT_FOUND, defaults.config_not_found),
            commit_msg_path: code(ENV_COMMIT_MSG_PATH, defaults.commit_msg_path),
            prepare_commit: code(ENV_PREPARE_COMMIT, defaults.prepare_commit),
            rule_config: code(ENV_RULE_CONFIG, defaults.rule_config),
            rule: code(ENV_RULE, defaults.rule),
        }
    }

    /// Map a terminal error to its exit code.
    pub fn for_error(&self, err: &LintError) -> i32 {
        match err {
            LintError::Config(ConfigError::NotFound | ConfigError::NotFoundAt { .. }) => {
                self.config_not_found
            }
            LintError::Commit(CommitError::FileNotFound { .. }) => self.commit_msg_path,
            LintError::Commit(CommitError::PrepareFailed { .. }) => self.prepare_commit,
            LintError::Rule(RuleError::InvalidCheck { .. } | RuleError::InvalidPattern { .. }) => {
                self.rule_config
            }
            LintError::Rule(RuleError::Failed { .. }) => self.rule,
            LintError::Forwarded { code } => *code,
            _ => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_defaults() {
        let codes = ExitCodes::default();
        assert_eq!(codes.config_not_found, 404);
        assert_eq!(codes.commit_msg_path, 400);
        assert_eq!(codes.prepare_commit, 123);
        assert_eq!(codes.rule_config, 666);
        assert_eq!(codes.rule, 1);
    }

    #[test]
    fn test_resolve_overrides() {
        let codes = ExitCodes::resolve(|key| match key {
            "ERROR_RULE" => Some("42".to_string()),
            "ERROR_RULE_CONFIG" => Some(" 7 ".to_string()),
            _ => None,
        });
        assert_eq!(codes.rule, 42);
        assert_eq!(codes.rule_config, 7);
        assert_eq!(codes.config_not_found, 404);
    }

    #[test]
    fn test_resolve_garbage_falls_back() {
        let codes = ExitCodes::resolve(|key| match key {
            "ERROR_RULE" => Some("not a number".to_string()),
            _ => None,
        });
        assert_eq!(codes.rule, 1);
    }

    #[test]
    fn test_for_error_mapping() {
        let codes = ExitCodes::default();

        let err: LintError = ConfigError::NotFound.into();
        assert_eq!(codes.for_error(&err), 404);

        let err: LintError = CommitError::FileNotFound {
            path: PathBuf::from("x"),
        }
        .into();
        assert_eq!(codes.for_error(&err), 400);

        let err: LintError = CommitError::PrepareFailed {
            message: "bad".to_string(),
        }
        .into();
        assert_eq!(codes.for_error(&err), 123);

        let err: LintError = RuleError::InvalidCheck {
            index: 0,
            found: "integer",
        }
        .into();
        assert_eq!(codes.for_error(&err), 666);

        let err: LintError = RuleError::Failed { count: 1 }.into();
        assert_eq!(codes.for_error(&err), 1);

        assert_eq!(codes.for_error(&LintError::Forwarded { code: 9 }), 9);
    }

    #[test]
    fn test_for_error_fallback() {
        let codes = ExitCodes::default();
        let err: LintError = ConfigError::ParseError {
            path: PathBuf::from("cml.toml"),
            message: "broken".to_string(),
        }
        .into();
        assert_eq!(codes.for_error(&err), 1);
    }
}
