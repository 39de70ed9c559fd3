//! Recursive predicate application over resolved path nodes.
//!
//! This module provides [`check`], which applies a single [`Operator`] to a
//! [`Resolved`] node, recursing through wildcard-expanded array elements.
//! Iteration short-circuits on the first failing element, and each element's
//! resolved value is threaded into the next element's predicate invocation as
//! the previous value, enabling order-dependent checks such as
//! adjacent-duplicate detection.

use serde_json::Value;

use crate::operator::Operator;
use crate::path::PathSegment;
use crate::resolve::{resolve_segments, Resolved, ResolveError};

/// Applies an operator to a resolved node.
///
/// A merely-failing predicate returns `Ok(false)`, never an error. An `Err`
/// means a nested resolution step hit a value it could not descend into; the
/// engine reports that as a property-resolution failure.
///
/// Dispatch:
/// - a scalar node invokes the operator directly (base case);
/// - an array context headed by a literal or numeric segment descends one
///   step and recurses, without entering iteration;
/// - an array context headed by the wildcard iterates the array, resolving
///   each element against the leftover segments with the concrete index
///   substituted for the wildcard token.
///
/// # Example
///
/// ```rust
/// use dragnet::operator::builtin;
/// use dragnet::{check, resolve, RulePath};
/// use serde_json::json;
///
/// let value = json!({"tags": ["a", "b"]});
/// let path: RulePath = "tags.*".parse().unwrap();
/// let node = resolve(&value, &path).unwrap();
///
/// assert_eq!(check(&builtin::is_string(), &node, None), Ok(true));
/// assert_eq!(check(&builtin::is_number(), &node, None), Ok(false));
/// ```
pub fn check<'a>(
    operator: &Operator,
    node: &Resolved<'a>,
    previous: Option<&'a Value>,
) -> Result<bool, ResolveError> {
    let (value, remaining) = match node {
        Resolved::Scalar { value } => return Ok(operator.decide(*value, previous)),
        Resolved::ArrayContext { value, remaining } => (*value, remaining.as_slice()),
    };

    match remaining {
        [PathSegment::Wildcard, rest @ ..] => scan_array(operator, value, rest, previous),
        // Literal or numeric head: plain descent, no iteration. An empty
        // remainder re-resolves to the scalar base case.
        _ => {
            let next = resolve_segments(value, remaining)?;
            check(operator, &next, previous)
        }
    }
}

/// Iterates every element of an array under a wildcard segment.
///
/// Returns `Ok(false)` on the first failing element without evaluating the
/// rest. An empty array passes vacuously. After a full scan the array length
/// is re-checked against the index reached, so a scan that somehow observed
/// fewer elements than the array holds does not silently pass.
fn scan_array<'a>(
    operator: &Operator,
    value: Option<&'a Value>,
    rest: &[PathSegment],
    previous: Option<&'a Value>,
) -> Result<bool, ResolveError> {
    let items = match value {
        Some(Value::Array(items)) => items,
        other => return Err(ResolveError::not_indexable(&PathSegment::Wildcard, other)),
    };

    let mut prev = previous;
    let mut reached = 0;

    for index in 0..items.len() {
        let mut segments = Vec::with_capacity(rest.len() + 1);
        segments.push(PathSegment::Index(index));
        segments.extend_from_slice(rest);

        let element = resolve_segments(value, &segments)?;
        let passed = check(operator, &element, prev)?;
        prev = element.value();

        if !passed {
            return Ok(false);
        }
        reached = index + 1;
    }

    Ok(items.len() <= reached)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operator::builtin;
    use crate::resolve::resolve;
    use crate::RulePath;
    use serde_json::json;

    fn node<'a>(value: &'a Value, expr: &str) -> Resolved<'a> {
        let path: RulePath = expr.parse().unwrap();
        resolve(value, &path).unwrap()
    }

    #[test]
    fn test_scalar_base_case() {
        let value = json!({"name": "alice"});
        assert_eq!(
            check(&builtin::is_string(), &node(&value, "name"), None),
            Ok(true)
        );
        assert_eq!(
            check(&builtin::is_number(), &node(&value, "name"), None),
            Ok(false)
        );
    }

    #[test]
    fn test_missing_scalar_fails_predicate() {
        let value = json!({"name": "alice"});
        assert_eq!(
            check(&builtin::is_string(), &node(&value, "missing"), None),
            Ok(false)
        );
        // but existence operators see the absence
        assert_eq!(
            check(&builtin::not_exist(), &node(&value, "missing"), None),
            Ok(true)
        );
    }

    #[test]
    fn test_empty_remainder_decides_on_the_held_value() {
        // the resolver never builds this shape, but a hand-built node with
        // nothing left to interpret behaves like the scalar base case
        let value = json!("alice");
        let exhausted = Resolved::ArrayContext {
            value: Some(&value),
            remaining: vec![],
        };
        assert_eq!(check(&builtin::is_string(), &exhausted, None), Ok(true));
        assert_eq!(check(&builtin::is_number(), &exhausted, None), Ok(false));
    }

    #[test]
    fn test_wildcard_over_empty_array_is_vacuously_true() {
        let value = json!({"tags": []});
        assert_eq!(
            check(&builtin::is_number(), &node(&value, "tags.*"), None),
            Ok(true)
        );
    }

    #[test]
    fn test_wildcard_checks_every_element() {
        let value = json!({"tags": ["a", "b", "c"]});
        assert_eq!(
            check(&builtin::is_string(), &node(&value, "tags.*"), None),
            Ok(true)
        );

        let mixed = json!({"tags": ["a", 1, "c"]});
        assert_eq!(
            check(&builtin::is_string(), &node(&mixed, "tags.*"), None),
            Ok(false)
        );
    }

    #[test]
    fn test_wildcard_on_non_array_is_resolution_fault() {
        let value = json!({"tags": "oops"});
        let err = check(&builtin::is_string(), &node(&value, "tags.*"), None).unwrap_err();
        assert!(matches!(
            err,
            ResolveError::NotIndexable {
                segment: PathSegment::Wildcard,
                found: "string",
            }
        ));
    }

    #[test]
    fn test_wildcard_descends_into_elements() {
        let value = json!({"users": [{"id": 1}, {"id": 2}]});
        assert_eq!(
            check(&builtin::is_number(), &node(&value, "users.*.id"), None),
            Ok(true)
        );
    }

    #[test]
    fn test_numeric_index_selects_one_element() {
        let value = json!({"list": [{"id": 1}, {"id": "two"}]});
        assert_eq!(
            check(&builtin::is_number(), &node(&value, "list.0.id"), None),
            Ok(true)
        );
        assert_eq!(
            check(&builtin::is_number(), &node(&value, "list.1.id"), None),
            Ok(false)
        );
    }

    #[test]
    fn test_out_of_range_index_with_leftover_path_faults() {
        let value = json!({"list": [{"id": 1}]});
        let err = check(&builtin::is_number(), &node(&value, "list.5.id"), None).unwrap_err();
        assert!(matches!(
            err,
            ResolveError::NotIndexable {
                found: "missing",
                ..
            }
        ));
    }

    #[test]
    fn test_adjacent_duplicates_short_circuit() {
        // duplicate at index 1; index 2 would also fail but is never reached
        let value = json!({"tags": ["a", "a", "b"]});
        assert_eq!(
            check(&builtin::unique_adjacent(), &node(&value, "tags.*"), None),
            Ok(false)
        );

        let sorted = json!({"tags": ["a", "b", "c"]});
        assert_eq!(
            check(&builtin::unique_adjacent(), &node(&sorted, "tags.*"), None),
            Ok(true)
        );
    }

    #[test]
    fn test_previous_value_threads_per_scan() {
        let value = json!({"nested": [[1, 1], [2, 3]]});
        // the duplicate pair sits inside the first inner scan
        assert_eq!(
            check(
                &builtin::unique_adjacent(),
                &node(&value, "nested.*.*"),
                None
            ),
            Ok(false)
        );

        let distinct = json!({"nested": [[1, 2], [1, 2]]});
        assert_eq!(
            check(
                &builtin::unique_adjacent(),
                &node(&distinct, "nested.*.*"),
                None
            ),
            Ok(true)
        );
    }
}
