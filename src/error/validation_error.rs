//! The validation error record.
//!
//! A failing validate call produces exactly one [`ValidationError`]. The
//! engine is fail-fast throughout: the first failing operator of the first
//! failing rule terminates the call, and no partial success is reported.

use crate::resolve::ResolveError;
use crate::rule::CompileError;

/// The single error record a failing validate call produces.
///
/// Each variant is terminal for the call that raised it: nothing is retried
/// or recovered internally. The record carries the rule name, operator name,
/// construction attributes, and operator index, which is enough for a
/// message catalog to reconstruct a human-readable description on demand.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    /// A rule failed to compile; no property of the input was touched.
    #[error("failed to compile rules: {0}")]
    RuleCompileFailed(#[from] CompileError),

    /// A path segment was applied to a value that cannot support that
    /// access while evaluating a rule.
    #[error("failed to resolve property '{rule}': {cause}")]
    PropertyResolutionFailed {
        /// The rule whose path could not be resolved.
        rule: String,
        /// The operator being evaluated when resolution faulted.
        operator: String,
        /// That operator's construction attributes.
        attributes: Vec<String>,
        /// The index of that operator within the rule.
        index: usize,
        /// The underlying access fault.
        #[source]
        cause: ResolveError,
    },

    /// An operator returned false for a resolved value.
    #[error("property '{rule}' did not satisfy operator '{operator}' at index {index}")]
    OperatorMismatch {
        /// The rule that failed.
        rule: String,
        /// The failing operator's name.
        operator: String,
        /// The failing operator's construction attributes.
        attributes: Vec<String>,
        /// The index of the failing operator within the rule.
        index: usize,
    },

    /// Anything else, caught at the outermost boundary and reported with
    /// minimal context rather than propagated raw.
    #[error("unexpected validation failure: {0}")]
    Unexpected(String),
}

impl ValidationError {
    /// Returns the name of the rule this error refers to, if any.
    pub fn rule(&self) -> Option<&str> {
        match self {
            ValidationError::PropertyResolutionFailed { rule, .. }
            | ValidationError::OperatorMismatch { rule, .. } => Some(rule),
            _ => None,
        }
    }

    /// Returns the name of the operator this error refers to, if any.
    pub fn operator(&self) -> Option<&str> {
        match self {
            ValidationError::PropertyResolutionFailed { operator, .. }
            | ValidationError::OperatorMismatch { operator, .. } => Some(operator),
            _ => None,
        }
    }

    /// Returns the failing operator's construction attributes.
    pub fn attributes(&self) -> &[String] {
        match self {
            ValidationError::PropertyResolutionFailed { attributes, .. }
            | ValidationError::OperatorMismatch { attributes, .. } => attributes,
            _ => &[],
        }
    }

    /// Returns the index of the operator within its rule, if any.
    pub fn operator_index(&self) -> Option<usize> {
        match self {
            ValidationError::PropertyResolutionFailed { index, .. }
            | ValidationError::OperatorMismatch { index, .. } => Some(*index),
            _ => None,
        }
    }

    /// Returns a machine-readable code naming the failure kind.
    ///
    /// For an operator mismatch this is the operator's name, so message
    /// catalogs can key templates directly on it.
    pub fn code(&self) -> &str {
        match self {
            ValidationError::RuleCompileFailed(_) => "rule_compile_failed",
            ValidationError::PropertyResolutionFailed { .. } => "property_resolution_failed",
            ValidationError::OperatorMismatch { operator, .. } => operator,
            ValidationError::Unexpected(_) => "unexpected",
        }
    }
}

// ValidationError crosses thread boundaries when callers validate from
// worker pools; keep it Send + Sync.
const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<ValidationError>();
    assert_sync::<ValidationError>();
};
