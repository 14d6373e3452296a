// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Rule data model.
//!
//! A rule pairs a name with a validation check. Checks from config files
//! are literal strings or `{ pattern = "..." }` tables; checks from code
//! can also be predicates with full commit context. A config value of any
//! other shape is preserved as [`RuleCheck::Invalid`] so the evaluator
//! can fail the run against the offending rule instead of skipping it.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use regex::Regex;
use serde::de::{self, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::Deserialize;

/// Which part of the commit a string or pattern check runs against.
/// Absent means the whole cleaned text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Target {
    Title,
    Body,
}

/// How a literal `valid` string is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchKind {
    /// Substring containment (the default).
    String,
    /// Compile the literal as a regular expression.
    Regex,
}

/// Context handed to predicate rules. Predicates always see the whole
/// commit plus the CLI metadata, regardless of the rule's `target`.
#[derive(Debug, Clone, Default)]
pub struct PredicateContext {
    pub raw: String,
    pub title: String,
    pub body: String,
    /// Opaque values passed through `--params`.
    pub cli: Vec<String>,
}

/// Boxed future returned by predicate checks.
pub type PredicateFuture<'a> = Pin<Box<dyn Future<Output = bool> + Send + 'a>>;

/// A programmatic validation check, possibly asynchronous.
pub trait Predicate: fmt::Debug + Send + Sync {
    /// Return whether the commit is valid.
    fn check<'a>(&'a self, ctx: &'a PredicateContext) -> PredicateFuture<'a>;
}

/// Wraps a plain closure as a synchronous [`Predicate`].
pub struct FnPredicate<F>(F);

impl<F> FnPredicate<F>
where
    F: Fn(&PredicateContext) -> bool + Send + Sync,
{
    pub fn new(check: F) -> Self {
        Self(check)
    }
}

impl<F> fmt::Debug for FnPredicate<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FnPredicate")
    }
}

impl<F> Predicate for FnPredicate<F>
where
    F: Fn(&PredicateContext) -> bool + Send + Sync,
{
    fn check<'a>(&'a self, ctx: &'a PredicateContext) -> PredicateFuture<'a> {
        Box::pin(std::future::ready((self.0)(ctx)))
    }
}

/// The validation attached to a rule. Exactly one variant is active.
#[derive(Clone)]
pub enum RuleCheck {
    /// A literal string: substring containment, or a pattern when the
    /// rule's type is `regex`.
    Literal(String),
    /// A pre-compiled pattern, used as-is against the target text. The
    /// rule's type is ignored for this variant.
    Pattern(Regex),
    /// A programmatic check. Not expressible in config files.
    Predicate(Arc<dyn Predicate>),
    /// A config value of an unsupported shape, holding the name of the
    /// shape that was found.
    Invalid(&'static str),
}

impl RuleCheck {
    /// Wrap a [`Predicate`] implementation.
    pub fn predicate(predicate: impl Predicate + 'static) -> Self {
        Self::Predicate(Arc::new(predicate))
    }

    /// Wrap a plain closure as a synchronous predicate check.
    pub fn predicate_fn<F>(check: F) -> Self
    where
        F: Fn(&PredicateContext) -> bool + Send + Sync + 'static,
    {
        Self::Predicate(Arc::new(FnPredicate::new(check)))
    }
}

impl fmt::Debug for RuleCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(text) => f.debug_tuple("Literal").field(text).finish(),
            Self::Pattern(pattern) => f.debug_tuple("Pattern").field(&pattern.as_str()).finish(),
            Self::Predicate(_) => f.write_str("Predicate(..)"),
            Self::Invalid(found) => f.debug_tuple("Invalid").field(found).finish(),
        }
    }
}

impl<'de> Deserialize<'de> for RuleCheck {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(CheckVisitor)
    }
}

struct CheckVisitor;

impl<'de> Visitor<'de> for CheckVisitor {
    type Value = RuleCheck;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a string, or a table with a `pattern` key")
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
        Ok(RuleCheck::Literal(value.to_string()))
    }

    fn visit_string<E: de::Error>(self, value: String) -> Result<Self::Value, E> {
        Ok(RuleCheck::Literal(value))
    }

    fn visit_bool<E: de::Error>(self, _value: bool) -> Result<Self::Value, E> {
        Ok(RuleCheck::Invalid("boolean"))
    }

    fn visit_i64<E: de::Error>(self, _value: i64) -> Result<Self::Value, E> {
        Ok(RuleCheck::Invalid("integer"))
    }

    fn visit_u64<E: de::Error>(self, _value: u64) -> Result<Self::Value, E> {
        Ok(RuleCheck::Invalid("integer"))
    }

    fn visit_f64<E: de::Error>(self, _value: f64) -> Result<Self::Value, E> {
        Ok(RuleCheck::Invalid("float"))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(RuleCheck::Invalid("null"))
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(RuleCheck::Invalid("null"))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        while seq.next_element::<de::IgnoredAny>()?.is_some() {}
        Ok(RuleCheck::Invalid("array"))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut pattern: Option<String> = None;

        while let Some(key) = map.next_key::<String>()? {
            if key == "pattern" {
                pattern = Some(map.next_value()?);
            } else {
                map.next_value::<de::IgnoredAny>()?;
            }
        }

        match pattern {
            Some(source) => Regex::new(&source)
                .map(RuleCheck::Pattern)
                .map_err(de::Error::custom),
            None => Ok(RuleCheck::Invalid("table")),
        }
    }
}

/// A single validation rule.
#[derive(Debug, Clone, Deserialize)]
pub struct Rule {
    /// Rule name, used for generated failure messages.
    pub name: String,

    /// The validation check.
    pub valid: RuleCheck,

    /// Custom failure message. Absent means a generated one.
    #[serde(default)]
    pub message: Option<String>,

    /// Which part of the commit the check runs against.
    #[serde(default)]
    pub target: Option<Target>,

    /// How a literal string check is interpreted.
    #[serde(default, rename = "type")]
    pub kind: Option<MatchKind>,
}

impl Rule {
    /// Create a rule. This is the code-level counterpart of a config
    /// file's `[[rules]]` entry.
    pub fn new(name: impl Into<String>, valid: RuleCheck) -> Self {
        Self {
            name: name.into(),
            valid,
            message: None,
            target: None,
            kind: None,
        }
    }

    /// Set a custom failure message.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Restrict the check to the title or body.
    pub fn with_target(mut self, target: Target) -> Self {
        self.target = Some(target);
        self
    }

    /// Interpret a literal check as a string or a regex.
    pub fn with_kind(mut self, kind: MatchKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// The message reported when the check does not pass.
    pub(crate) fn failure_message(&self) -> String {
        self.message
            .clone()
            .unwrap_or_else(|| format!("rule '{}' failed!", self.name))
    }
}
