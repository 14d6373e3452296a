// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! The lint pipeline.
//!
//! A strict linear run: load config, forward an incoming exit code if
//! asked to, read the commit message file, extract, evaluate, report.
//! Every stage short-circuits to a terminal error; there are no retries.

use crate::commit;
use crate::config::LintConfig;
use crate::error::{CommitError, LintError, Result, RuleError};
use crate::rules;

use super::args::Cli;

/// Run the linter.
pub async fn run(cli: &Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => LintConfig::load_from(path).await?,
        None => LintConfig::load().await?,
    };
    tracing::debug!("loaded {} rule(s)", config.rules.len());

    if config.forward_exit_code {
        if let Some(code) = cli.exit_code.filter(|code| *code > 0) {
            return Err(LintError::Forwarded { code });
        }
    }

    let path = cli.commit_msg_path();
    if !tokio::fs::try_exists(&path).await.unwrap_or(false) {
        return Err(CommitError::FileNotFound { path }.into());
    }
    let content = tokio::fs::read_to_string(&path).await?;

    let commit = commit::extract(&content, config.prepare.as_deref())?;
    tracing::debug!("extracted commit title: {:?}", commit.title);

    let results = rules::evaluate(&config.rules, &commit, &cli.params).await?;
    let verdict = rules::aggregate(&results);
    verdict.report();

    if verdict.has_failure {
        return Err(RuleError::Failed {
            count: verdict.failure_messages.len(),
        }
        .into());
    }

    Ok(())
}
