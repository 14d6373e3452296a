// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Verdict aggregation and reporting.

use console::style;

/// Outcome of a single rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleResult {
    /// Whether the rule's check did not pass.
    pub failed: bool,
    /// The message reported if the rule failed.
    pub message: String,
}

/// Aggregate outcome of a lint run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Verdict {
    /// True iff any rule failed.
    pub has_failure: bool,
    /// Messages of failed rules, in rule declaration order.
    pub failure_messages: Vec<String>,
}

impl Verdict {
    /// Whether the commit passed every rule.
    pub fn is_pass(&self) -> bool {
        !self.has_failure
    }

    /// Print the human-readable report: one warning line per failed rule,
    /// or the success line.
    pub fn report(&self) {
        if self.has_failure {
            for message in &self.failure_messages {
                eprintln!("{}   {}", style("⚠").yellow().bold(), message);
            }
        } else {
            println!(
                "{}   no errors in your commit found   {}",
                style("⭐").green(),
                style("⭐").green()
            );
        }
    }
}

/// Reduce per-rule outcomes into the final verdict. Failure messages keep
/// the order of the results that produced them.
pub fn aggregate(results: &[RuleResult]) -> Verdict {
    let failure_messages: Vec<String> = results
        .iter()
        .filter(|result| result.failed)
        .map(|result| result.message.clone())
        .collect();

    Verdict {
        has_failure: !failure_messages.is_empty(),
        failure_messages,
    }
}
