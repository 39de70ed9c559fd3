//! The validation engine.
//!
//! [`Validator`] ties the pieces together: it compiles rule specs through
//! its operator registry, resolves each rule's path against the input value,
//! and runs the recursive checker per operator, stopping at the first
//! failure and producing a single [`ValidationError`].

use std::future::{ready, Ready};

use serde_json::Value;

use crate::check::check;
use crate::error::ValidationError;
use crate::registry::OperatorRegistry;
use crate::resolve::{resolve, ResolveError};
use crate::rule::{compile, Rule, RuleSpec};

/// A fail-fast, single-error validation engine.
///
/// The engine holds only an operator registry; every validate call operates
/// on its own call-local resolved nodes and error record, reads but never
/// mutates the input value, and reads but never mutates the rule
/// definitions. No state accumulates across calls.
///
/// # Example
///
/// ```rust
/// use dragnet::Validator;
/// use serde_json::json;
///
/// let validator = Validator::new();
/// let value = json!({"email": "a@b.com", "tags": ["x", "y"]});
///
/// let result = validator.validate(
///     &value,
///     &["email:isEmail".into(), "tags.*:isString".into()],
/// );
/// assert!(result.is_ok());
///
/// let result = validator.validate(&value, &["email:maxLength 3".into()]);
/// let err = result.unwrap_err();
/// assert_eq!(err.rule(), Some("email"));
/// assert_eq!(err.operator(), Some("maxLength"));
/// ```
#[derive(Clone, Default)]
pub struct Validator {
    registry: OperatorRegistry,
}

impl Validator {
    /// Creates a validator backed by the built-in operator set.
    pub fn new() -> Self {
        Self {
            registry: OperatorRegistry::with_builtins(),
        }
    }

    /// Creates a validator backed by the given registry.
    pub fn with_registry(registry: OperatorRegistry) -> Self {
        Self { registry }
    }

    /// Returns the registry this validator compiles rules against.
    pub fn registry(&self) -> &OperatorRegistry {
        &self.registry
    }

    /// Validates a value against a list of rules.
    ///
    /// All rules are compiled first; a compile failure surfaces before any
    /// property of the value is touched. Rules are then evaluated in
    /// declared order, each operator in declared order, and the first
    /// failure terminates the call. Nothing is aggregated: either every
    /// operator of every rule passed, or exactly one error is returned.
    ///
    /// # Errors
    ///
    /// See [`ValidationError`] for the failure taxonomy.
    pub fn validate(&self, value: &Value, rules: &[RuleSpec]) -> Result<(), ValidationError> {
        let compiled = compile(rules, &self.registry)?;

        for rule in &compiled {
            self.apply_rule(value, rule)?;
        }

        Ok(())
    }

    /// Validates a value, delivering the result through an immediately
    /// ready future.
    ///
    /// This is a cosmetic wrapper for async call sites: the computation is
    /// the synchronous [`Validator::validate`], already complete by the
    /// time the future is returned. It introduces no concurrency and no
    /// cancellation.
    pub fn validate_deferred(
        &self,
        value: &Value,
        rules: &[RuleSpec],
    ) -> Ready<Result<(), ValidationError>> {
        ready(self.validate(value, rules))
    }

    fn apply_rule(&self, value: &Value, rule: &Rule) -> Result<(), ValidationError> {
        let node = resolve(value, rule.path())
            .map_err(|cause| resolution_failure(rule, 0, cause))?;

        for (index, operator) in rule.matches().iter().enumerate() {
            match check(operator, &node, None) {
                Ok(true) => {}
                Ok(false) => {
                    return Err(ValidationError::OperatorMismatch {
                        rule: rule.name().to_string(),
                        operator: operator.name().to_string(),
                        attributes: operator.attributes().to_vec(),
                        index,
                    });
                }
                Err(cause) => return Err(resolution_failure(rule, index, cause)),
            }
        }

        Ok(())
    }
}

fn resolution_failure(rule: &Rule, index: usize, cause: ResolveError) -> ValidationError {
    let operator = rule.matches().get(index);
    ValidationError::PropertyResolutionFailed {
        rule: rule.name().to_string(),
        operator: operator.map(|op| op.name().to_string()).unwrap_or_default(),
        attributes: operator.map(|op| op.attributes().to_vec()).unwrap_or_default(),
        index,
        cause,
    }
}
