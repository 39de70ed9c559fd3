//! Predicate units used by rules.
//!
//! This module provides [`Operator`], an immutable named predicate with
//! construction attributes, and the built-in constructors in [`builtin`].

pub mod builtin;

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

/// The decision function carried by an operator.
///
/// The first argument is the resolved value (`None` when the addressed member
/// does not exist). The second is the resolved value of the immediately
/// preceding element at the same path depth during a wildcard scan, `None`
/// on the first element of any iteration. It exists solely to support
/// order-dependent predicates such as adjacent-duplicate detection.
pub type DecideFn = dyn Fn(Option<&Value>, Option<&Value>) -> bool + Send + Sync;

/// An immutable, named, pure predicate unit.
///
/// Operators are constructed once at rule-definition time and reused across
/// any number of `validate` calls. They never mutate their input. The name
/// and attribute list captured at construction are what error records and
/// message formatting report later.
///
/// # Example
///
/// ```rust
/// use dragnet::Operator;
/// use serde_json::json;
///
/// let op = Operator::new("isPositive", vec![], |value, _prev| {
///     value.and_then(|v| v.as_f64()).is_some_and(|n| n > 0.0)
/// });
///
/// assert!(op.decide(Some(&json!(3)), None));
/// assert!(!op.decide(Some(&json!(-1)), None));
/// assert!(!op.decide(None, None));
/// ```
#[derive(Clone)]
pub struct Operator {
    name: String,
    attributes: Vec<String>,
    decide: Arc<DecideFn>,
}

impl Operator {
    /// Creates an operator from a name, its construction attributes, and a
    /// decision function.
    pub fn new<F>(name: impl Into<String>, attributes: Vec<String>, decide: F) -> Self
    where
        F: Fn(Option<&Value>, Option<&Value>) -> bool + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            attributes,
            decide: Arc::new(decide),
        }
    }

    /// Returns the operator's registered name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the positional construction attributes.
    pub fn attributes(&self) -> &[String] {
        &self.attributes
    }

    /// Applies the decision function to a resolved value.
    pub fn decide(&self, value: Option<&Value>, previous: Option<&Value>) -> bool {
        (self.decide)(value, previous)
    }
}

impl fmt::Debug for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Operator")
            .field("name", &self.name)
            .field("attributes", &self.attributes)
            .finish_non_exhaustive()
    }
}

/// Errors raised while constructing an operator from string arguments.
#[derive(Debug, thiserror::Error)]
pub enum OperatorError {
    /// The operator was given the wrong number of arguments.
    #[error("operator '{operator}' expects {expected} argument(s), got {got}")]
    WrongArity {
        /// The operator name.
        operator: &'static str,
        /// A human-readable description of the expected argument count.
        expected: &'static str,
        /// The number of arguments actually supplied.
        got: usize,
    },

    /// An argument could not be parsed into the required type.
    #[error("operator '{operator}' argument '{argument}' is not a valid {expected}")]
    InvalidArgument {
        /// The operator name.
        operator: &'static str,
        /// The offending argument text.
        argument: String,
        /// What the argument should have parsed as.
        expected: &'static str,
    },

    /// A regex-based operator was given an invalid pattern.
    #[error("invalid regex pattern: {0}")]
    InvalidRegex(#[from] regex::Error),
}
