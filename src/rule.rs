//! Rules and the rule string compiler.
//!
//! A rule pairs a path expression with an ordered, non-empty list of
//! operators. Rules are either constructed directly or compiled from the
//! compact string grammar:
//!
//! ```text
//! <path>:<operatorName>[ <arg>]*[,<operatorName>[ <arg>]*]*
//! ```
//!
//! e.g. `"email:isEmail,maxLength 64"`. The path and method list split on
//! the first `:`; methods split on `,`; each method token splits on
//! whitespace into an operator name and positional string arguments.

use crate::operator::{Operator, OperatorError};
use crate::path::{PathError, RulePath};
use crate::registry::OperatorRegistry;

/// A named rule: a path expression and the operators it must satisfy.
///
/// Operators are ANDed in declared order with short-circuit on the first
/// failure. Rules are immutable once built and reusable across any number
/// of `validate` calls.
///
/// # Example
///
/// ```rust
/// use dragnet::operator::builtin;
/// use dragnet::Rule;
///
/// let rule = Rule::new(
///     "tags.*",
///     vec![builtin::is_string(), builtin::unique_adjacent()],
/// )
/// .unwrap();
///
/// assert_eq!(rule.name(), "tags.*");
/// assert_eq!(rule.matches().len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct Rule {
    name: String,
    path: RulePath,
    matches: Vec<Operator>,
}

impl Rule {
    /// Creates a rule from a path expression and an operator list.
    ///
    /// # Errors
    ///
    /// Returns a [`CompileError`] if the path does not parse or the operator
    /// list is empty.
    pub fn new(path: impl Into<String>, matches: Vec<Operator>) -> Result<Self, CompileError> {
        let name = path.into();
        if matches.is_empty() {
            return Err(CompileError::MissingOperators(name));
        }
        let path = RulePath::parse(&name)?;
        Ok(Self {
            name,
            path,
            matches,
        })
    }

    /// Returns the rule's name (the original path expression text).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the parsed path expression.
    pub fn path(&self) -> &RulePath {
        &self.path
    }

    /// Returns the ordered operator list.
    pub fn matches(&self) -> &[Operator] {
        &self.matches
    }
}

/// A rule as supplied to the engine: either the string form awaiting
/// compilation or an already-structured [`Rule`] that passes through
/// unchanged.
#[derive(Debug, Clone)]
pub enum RuleSpec {
    /// A rule in the string grammar, compiled on every validate call.
    Text(String),
    /// An already-structured rule.
    Compiled(Rule),
}

impl From<&str> for RuleSpec {
    fn from(text: &str) -> Self {
        RuleSpec::Text(text.to_string())
    }
}

impl From<String> for RuleSpec {
    fn from(text: String) -> Self {
        RuleSpec::Text(text)
    }
}

impl From<Rule> for RuleSpec {
    fn from(rule: Rule) -> Self {
        RuleSpec::Compiled(rule)
    }
}

/// Errors raised while compiling rules.
///
/// All compile errors are surfaced before any property of the input value
/// is touched.
#[derive(Debug, thiserror::Error)]
pub enum CompileError {
    /// A rule string has no `:` separating path from operator list.
    #[error("rule '{0}' is missing the ':' separator")]
    MissingSeparator(String),

    /// A rule has an empty operator list.
    #[error("rule '{0}' has no operators")]
    MissingOperators(String),

    /// A rule's operator list contains an empty entry (e.g. `a:isString,,`).
    #[error("rule '{0}' contains an empty operator entry")]
    EmptyOperator(String),

    /// A rule names an operator the registry does not know.
    #[error("rule '{rule}' uses unknown operator '{name}'")]
    UnknownOperator {
        /// The rule text the operator appeared in.
        rule: String,
        /// The unrecognized operator name.
        name: String,
    },

    /// A registered constructor rejected its arguments.
    #[error("rule '{rule}' has an invalid operator: {source}")]
    InvalidOperator {
        /// The rule text the operator appeared in.
        rule: String,
        /// The underlying construction failure.
        #[source]
        source: OperatorError,
    },

    /// A rule's path expression does not parse.
    #[error(transparent)]
    InvalidPath(#[from] PathError),
}

/// Compiles a mixed list of rule specs into structured rules.
///
/// String rules are parsed against the grammar and their operators are
/// constructed through the registry; structured rules pass through as-is.
/// Compilation is re-performed on every validate call with no caching,
/// which keeps behavior independent of call history.
///
/// # Errors
///
/// Returns the first [`CompileError`] encountered; no rules are evaluated
/// against any value when compilation fails.
pub fn compile(specs: &[RuleSpec], registry: &OperatorRegistry) -> Result<Vec<Rule>, CompileError> {
    specs
        .iter()
        .map(|spec| match spec {
            RuleSpec::Text(text) => compile_text(text, registry),
            RuleSpec::Compiled(rule) => Ok(rule.clone()),
        })
        .collect()
}

fn compile_text(text: &str, registry: &OperatorRegistry) -> Result<Rule, CompileError> {
    let (path, methods) = text
        .split_once(':')
        .ok_or_else(|| CompileError::MissingSeparator(text.to_string()))?;

    if methods.trim().is_empty() {
        return Err(CompileError::MissingOperators(text.to_string()));
    }

    let mut matches = Vec::new();
    for method in methods.split(',') {
        let mut tokens = method.split_whitespace();
        let name = tokens
            .next()
            .ok_or_else(|| CompileError::EmptyOperator(text.to_string()))?;
        let args: Vec<String> = tokens.map(str::to_string).collect();

        let constructor =
            registry
                .get(name)
                .ok_or_else(|| CompileError::UnknownOperator {
                    rule: text.to_string(),
                    name: name.to_string(),
                })?;
        let operator = constructor(&args).map_err(|source| CompileError::InvalidOperator {
            rule: text.to_string(),
            source,
        })?;
        matches.push(operator);
    }

    Rule::new(path, matches)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> OperatorRegistry {
        OperatorRegistry::with_builtins()
    }

    #[test]
    fn test_compile_single_operator() {
        let rules = compile(&["email:isEmail".into()], &registry()).unwrap();
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].name(), "email");
        assert_eq!(rules[0].matches()[0].name(), "isEmail");
    }

    #[test]
    fn test_compile_operator_with_args() {
        let rules = compile(&["name:minLength 2,maxLength 10".into()], &registry()).unwrap();
        let matches = rules[0].matches();
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].name(), "minLength");
        assert_eq!(matches[0].attributes(), &["2".to_string()]);
        assert_eq!(matches[1].name(), "maxLength");
    }

    #[test]
    fn test_missing_separator_is_compile_error() {
        let err = compile(&["email isEmail".into()], &registry()).unwrap_err();
        assert!(matches!(err, CompileError::MissingSeparator(_)));
    }

    #[test]
    fn test_missing_operator_list_is_compile_error() {
        let err = compile(&["email:".into()], &registry()).unwrap_err();
        assert!(matches!(err, CompileError::MissingOperators(_)));

        let err = compile(&["email:  ".into()], &registry()).unwrap_err();
        assert!(matches!(err, CompileError::MissingOperators(_)));
    }

    #[test]
    fn test_empty_operator_entry_is_compile_error() {
        let err = compile(&["email:isEmail,,isString".into()], &registry()).unwrap_err();
        assert!(matches!(err, CompileError::EmptyOperator(_)));
    }

    #[test]
    fn test_unknown_operator_is_compile_error() {
        let err = compile(&["email:doesNotExist".into()], &registry()).unwrap_err();
        match err {
            CompileError::UnknownOperator { name, .. } => assert_eq!(name, "doesNotExist"),
            other => panic!("expected unknown operator error, got {:?}", other),
        }
    }

    #[test]
    fn test_bad_arguments_are_compile_errors() {
        let err = compile(&["name:minLength abc".into()], &registry()).unwrap_err();
        assert!(matches!(err, CompileError::InvalidOperator { .. }));

        let err = compile(&["name:isEmail now".into()], &registry()).unwrap_err();
        assert!(matches!(err, CompileError::InvalidOperator { .. }));
    }

    #[test]
    fn test_structured_rules_pass_through() {
        let rule = Rule::new("email", vec![crate::operator::builtin::is_email()]).unwrap();
        let rules = compile(&[rule.clone().into()], &registry()).unwrap();
        assert_eq!(rules[0].name(), rule.name());
    }

    #[test]
    fn test_rule_requires_operators() {
        let err = Rule::new("email", vec![]).unwrap_err();
        assert!(matches!(err, CompileError::MissingOperators(_)));
    }

    #[test]
    fn test_bad_path_is_compile_error() {
        let err = compile(&["a..b:isString".into()], &registry()).unwrap_err();
        assert!(matches!(err, CompileError::InvalidPath(_)));
    }
}
