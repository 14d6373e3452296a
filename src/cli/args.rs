// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! CLI argument definitions using clap.

use clap::Parser;
use std::path::PathBuf;

/// Default commit message location inside a repository.
const DEFAULT_COMMIT_MSG: &str = ".git/COMMIT_EDITMSG";

/// cml - Commit Message Linter
///
/// Lints the commit message file against the rules of the nearest
/// cml config and exits with a status code reflecting the verdict.
#[derive(Parser, Debug)]
#[command(name = "cml")]
#[command(author = "Eshan Roy")]
#[command(version)]
#[command(about = "Configurable commit message linter", long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Path to the commit message file
    #[arg(short, long, env = "COMMIT_EDITMSG")]
    pub git: Option<PathBuf>,

    /// Opaque values handed to predicate rules
    #[arg(short, long)]
    pub params: Vec<String>,

    /// Exit code of a previous hook step, forwarded when the config asks for it
    #[arg(long, env = "INCOMING_EXIT_CODE")]
    pub exit_code: Option<i32>,

    /// Enable debug logging
    #[arg(short, long)]
    pub debug: bool,
}

impl Cli {
    /// The commit message file to lint.
    pub fn commit_msg_path(&self) -> PathBuf {
        self.git
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_COMMIT_MSG))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_debug() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_default_commit_msg_path() {
        let cli = Cli::parse_from(["cml"]);
        assert_eq!(cli.commit_msg_path(), PathBuf::from(".git/COMMIT_EDITMSG"));
    }

    #[test]
    fn test_explicit_paths() {
        let cli = Cli::parse_from(["cml", "--git", "msg.txt", "--config", "my.toml"]);
        assert_eq!(cli.commit_msg_path(), PathBuf::from("msg.txt"));
        assert_eq!(cli.config, Some(PathBuf::from("my.toml")));
    }

    #[test]
    fn test_params_collect() {
        let cli = Cli::parse_from(["cml", "-p", "team=core", "-p", "strict"]);
        assert_eq!(cli.params, ["team=core", "strict"]);
    }

    #[test]
    fn test_exit_code_flag() {
        let cli = Cli::parse_from(["cml", "--exit-code", "3"]);
        assert_eq!(cli.exit_code, Some(3));
    }
}
