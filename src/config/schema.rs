// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Configuration schema definitions.
//!
//! Defines the configuration structure loadable from cml.toml (or its
//! YAML/JSON siblings) and extendable from code.

use std::sync::Arc;

use serde::Deserialize;

use crate::commit::PrepareCommit;
use crate::rules::Rule;

/// The main configuration structure for cml.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LintConfig {
    /// Validation rules, evaluated in declaration order. An empty list
    /// makes the linter exit with success.
    pub rules: Vec<Rule>,

    /// Abort immediately when the process enters with a non-zero exit
    /// code, forwarding that code verbatim.
    pub forward_exit_code: bool,

    /// Custom title/body splitting strategy. Config files cannot carry
    /// code, so this is only settable programmatically.
    #[serde(skip)]
    pub prepare: Option<Arc<dyn PrepareCommit>>,
}

impl LintConfig {
    /// Load configuration from the default search locations.
    pub async fn load() -> crate::error::Result<Self> {
        super::loader::load_config().await
    }

    /// Load configuration from a specific path.
    pub async fn load_from(path: &std::path::Path) -> crate::error::Result<Self> {
        super::loader::load_config_from(path).await
    }

    /// Append a rule. This is the code-level counterpart of a `[[rules]]`
    /// entry and the only way to attach predicate rules.
    pub fn with_rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Install a custom title/body splitting strategy.
    pub fn with_prepare(mut self, prepare: impl PrepareCommit + 'static) -> Self {
        self.prepare = Some(Arc::new(prepare));
        self
    }

    /// Forward an already non-zero incoming exit code.
    pub fn with_forward_exit_code(mut self, forward: bool) -> Self {
        self.forward_exit_code = forward;
        self
    }
}
