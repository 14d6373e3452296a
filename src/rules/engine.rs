// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Rule evaluation.
//!
//! Rules are independent of one another: string and pattern checks run
//! inline, predicates run as concurrent tasks. Outcomes are collected by
//! awaiting handles in declaration order, never arrival order, so the
//! final report is stable no matter which predicate finishes first.

use std::sync::Arc;

use regex::Regex;
use tokio::task::JoinHandle;

use crate::commit::Commit;
use crate::error::{Result, RuleError};

use super::rule::{MatchKind, Predicate, PredicateContext, Rule, RuleCheck, Target};
use super::verdict::RuleResult;

/// A rule check compiled and ready to execute.
enum Compiled {
    Contains(String),
    Matches(Regex),
    Predicate(Arc<dyn Predicate>),
}

enum Outcome {
    Ready(bool),
    Task(JoinHandle<bool>),
}

/// Evaluate all rules against the commit.
///
/// A rule with an unusable check aborts the whole evaluation before any
/// later rule runs; ordinary rule failures are collected, not
/// short-circuited.
pub async fn evaluate(
    rules: &[Rule],
    commit: &Commit,
    cli_params: &[String],
) -> Result<Vec<RuleResult>> {
    let ctx = Arc::new(PredicateContext {
        raw: commit.raw.clone(),
        title: commit.title.clone(),
        body: commit.body.clone(),
        cli: cli_params.to_vec(),
    });

    // Compile in declaration order so a broken rule fails the run before
    // anything executes.
    let mut compiled = Vec::with_capacity(rules.len());
    for (index, rule) in rules.iter().enumerate() {
        compiled.push(compile(index, rule)?);
    }

    let mut outcomes = Vec::with_capacity(rules.len());
    for (rule, check) in rules.iter().zip(compiled) {
        let outcome = match check {
            Compiled::Contains(needle) => {
                Outcome::Ready(target_text(rule, commit).contains(&needle))
            }
            Compiled::Matches(pattern) => {
                Outcome::Ready(pattern.is_match(target_text(rule, commit)))
            }
            Compiled::Predicate(predicate) => {
                let ctx = Arc::clone(&ctx);
                Outcome::Task(tokio::spawn(async move { predicate.check(&ctx).await }))
            }
        };
        outcomes.push(outcome);
    }

    let mut results = Vec::with_capacity(rules.len());
    for (rule, outcome) in rules.iter().zip(outcomes) {
        let valid = match outcome {
            Outcome::Ready(valid) => valid,
            Outcome::Task(handle) => handle.await.map_err(|_| RuleError::PredicatePanicked {
                name: rule.name.clone(),
            })?,
        };
        results.push(RuleResult {
            failed: !valid,
            message: rule.failure_message(),
        });
    }

    Ok(results)
}

fn target_text<'a>(rule: &Rule, commit: &'a Commit) -> &'a str {
    match rule.target {
        Some(Target::Title) => &commit.title,
        Some(Target::Body) => &commit.body,
        None => &commit.raw,
    }
}

fn compile(index: usize, rule: &Rule) -> Result<Compiled> {
    match &rule.valid {
        RuleCheck::Literal(text) => match rule.kind {
            Some(MatchKind::Regex) => Regex::new(text).map(Compiled::Matches).map_err(|e| {
                RuleError::InvalidPattern {
                    index,
                    message: e.to_string(),
                }
                .into()
            }),
            _ => Ok(Compiled::Contains(text.clone())),
        },
        // A pre-compiled pattern is used as-is; the rule's type does not
        // apply to it.
        RuleCheck::Pattern(pattern) => Ok(Compiled::Matches(pattern.clone())),
        RuleCheck::Predicate(predicate) => Ok(Compiled::Predicate(Arc::clone(predicate))),
        RuleCheck::Invalid(found) => Err(RuleError::InvalidCheck { index, found: *found }.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LintError;
    use crate::rules::PredicateFuture;
    use std::time::Duration;

    fn commit(raw: &str, title: &str, body: &str) -> Commit {
        Commit {
            raw: raw.to_string(),
            title: title.to_string(),
            body: body.to_string(),
        }
    }

    fn literal(name: &str, valid: &str) -> Rule {
        Rule::new(name, RuleCheck::Literal(valid.to_string()))
    }

    #[tokio::test]
    async fn test_literal_substring() {
        let c = commit("WIP: fix\n\nbody", "WIP: fix", "\nbody");
        let results = evaluate(&[literal("no-wip", "WIP")], &c, &[]).await.unwrap();
        // The literal was found, so the rule passes.
        assert!(!results[0].failed);

        let results = evaluate(&[literal("has-scope", "(core)")], &c, &[])
            .await
            .unwrap();
        assert!(results[0].failed);
        assert_eq!(results[0].message, "rule 'has-scope' failed!");
    }

    #[tokio::test]
    async fn test_literal_as_regex() {
        let c = commit("feat: add thing", "feat: add thing", "");
        let rule = literal("conventional", r"^(feat|fix): ").with_kind(MatchKind::Regex);
        let results = evaluate(&[rule], &c, &[]).await.unwrap();
        assert!(!results[0].failed);

        let rule = literal("starts-fix", "^fix").with_kind(MatchKind::Regex);
        let results = evaluate(&[rule], &c, &[]).await.unwrap();
        assert!(results[0].failed);
    }

    #[tokio::test]
    async fn test_target_title_only() {
        let c = commit("clean title\n\nWIP in body", "clean title", "\nWIP in body");
        let rule = literal("wip", "WIP").with_target(Target::Title);
        let results = evaluate(&[rule], &c, &[]).await.unwrap();
        // "WIP" only appears in the body, so a title-targeted rule fails.
        assert!(results[0].failed);

        let rule = literal("wip", "WIP").with_target(Target::Body);
        let results = evaluate(&[rule], &c, &[]).await.unwrap();
        assert!(!results[0].failed);
    }

    #[tokio::test]
    async fn test_pattern_ignores_kind() {
        let c = commit("feat: x", "feat: x", "");
        let rule = Rule::new("p", RuleCheck::Pattern(Regex::new("^feat").unwrap()))
            .with_kind(MatchKind::String);
        let results = evaluate(&[rule], &c, &[]).await.unwrap();
        assert!(!results[0].failed);
    }

    #[tokio::test]
    async fn test_predicate_receives_full_context() {
        let c = commit("feat: x\n\nbody", "feat: x", "\nbody");
        let rule = Rule::new(
            "ctx",
            RuleCheck::predicate_fn(|ctx| {
                ctx.raw.contains("body")
                    && ctx.title == "feat: x"
                    && ctx.cli == ["team=core".to_string()]
            }),
        )
        // The target is irrelevant for predicates.
        .with_target(Target::Title);
        let results = evaluate(&[rule], &c, &["team=core".to_string()])
            .await
            .unwrap();
        assert!(!results[0].failed);
    }

    #[derive(Debug)]
    struct Delayed {
        delay: Duration,
        valid: bool,
    }

    impl Predicate for Delayed {
        fn check<'a>(&'a self, _ctx: &'a PredicateContext) -> PredicateFuture<'a> {
            Box::pin(async move {
                tokio::time::sleep(self.delay).await;
                self.valid
            })
        }
    }

    #[tokio::test]
    async fn test_order_is_declaration_not_completion() {
        let c = commit("x", "x", "");
        let rules = vec![
            Rule::new(
                "slow",
                RuleCheck::predicate(Delayed {
                    delay: Duration::from_millis(40),
                    valid: false,
                }),
            ),
            literal("missing", "never-present"),
            Rule::new(
                "fast",
                RuleCheck::predicate(Delayed {
                    delay: Duration::from_millis(1),
                    valid: false,
                }),
            ),
        ];
        let results = evaluate(&rules, &c, &[]).await.unwrap();
        let messages: Vec<_> = results
            .iter()
            .filter(|r| r.failed)
            .map(|r| r.message.as_str())
            .collect();
        assert_eq!(
            messages,
            [
                "rule 'slow' failed!",
                "rule 'missing' failed!",
                "rule 'fast' failed!"
            ]
        );
    }

    #[tokio::test]
    async fn test_invalid_check_aborts_run() {
        let c = commit("x", "x", "");
        let rules = vec![
            literal("fine", "x"),
            Rule::new("broken", RuleCheck::Invalid("integer")),
            literal("never-reached", "x"),
        ];
        let err = evaluate(&rules, &c, &[]).await.unwrap_err();
        match err {
            LintError::Rule(RuleError::InvalidCheck { index, found }) => {
                assert_eq!(index, 1);
                assert_eq!(found, "integer");
            }
            other => panic!("expected invalid check error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_invalid_literal_pattern_aborts_run() {
        let c = commit("x", "x", "");
        let rule = literal("bad-re", "[").with_kind(MatchKind::Regex);
        let err = evaluate(&[rule], &c, &[]).await.unwrap_err();
        assert!(matches!(
            err,
            LintError::Rule(RuleError::InvalidPattern { index: 0, .. })
        ));
    }

    #[tokio::test]
    async fn test_custom_message() {
        let c = commit("x", "x", "");
        let rule = literal("missing", "y").with_message("say y!");
        let results = evaluate(&[rule], &c, &[]).await.unwrap();
        assert_eq!(results[0].message, "say y!");
    }

    #[tokio::test]
    async fn test_empty_rules() {
        let c = commit("x", "x", "");
        let results = evaluate(&[], &c, &[]).await.unwrap();
        assert!(results.is_empty());
    }
}
