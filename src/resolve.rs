//! Lazy path resolution over nested values.
//!
//! This module provides [`resolve`], which interprets a [`RulePath`] against a
//! root value one segment at a time. Resolution is deliberately lazy: a
//! wildcard segment is never expanded here. Instead the resolver returns an
//! [`Resolved::ArrayContext`] carrying the leftover segments, and the
//! recursive checker interleaves element iteration with further resolution.
//! This keeps memory bounded by path depth rather than by the number of
//! matched elements and lets the checker short-circuit mid-expansion.

use serde_json::Value;

use crate::path::{PathSegment, RulePath};

/// A resolved path node, the intermediate value the checker consumes.
///
/// The variant reflects how the remaining path should be interpreted, not the
/// run-time type of the held value; the checker performs the authoritative
/// type dispatch when it opens an `ArrayContext`.
///
/// The held value is `None` when the addressed member or element exists
/// nowhere in the input (a missing key, an out-of-range index). A missing
/// value is still a valid node: existence operators inspect it, and every
/// other operator simply fails against it.
#[derive(Debug, Clone)]
pub enum Resolved<'a> {
    /// A fully resolved value with no path left to interpret.
    Scalar {
        /// The addressed value, or `None` if absent.
        value: Option<&'a Value>,
    },
    /// A value with leftover path segments still to interpret.
    ArrayContext {
        /// The value the remaining segments apply to, or `None` if absent.
        value: Option<&'a Value>,
        /// The segments left to interpret, starting with the one that
        /// decides scalar descent versus array iteration.
        remaining: Vec<PathSegment>,
    },
}

impl<'a> Resolved<'a> {
    /// Returns the value held by this node, regardless of variant.
    pub fn value(&self) -> Option<&'a Value> {
        match self {
            Resolved::Scalar { value } => *value,
            Resolved::ArrayContext { value, .. } => *value,
        }
    }
}

/// Errors raised when a path segment is applied to a value that cannot
/// support that access.
///
/// These are deterministic faults, never panics: indexing into a non-array,
/// member access on a scalar, or any descent into a missing value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    /// A segment was applied to a value that is not a container of the
    /// required shape.
    #[error("cannot apply segment '{segment}' to {found} value")]
    NotIndexable {
        /// The segment that could not be applied.
        segment: PathSegment,
        /// A short description of the value actually found.
        found: &'static str,
    },
}

impl ResolveError {
    pub(crate) fn not_indexable(segment: &PathSegment, target: Option<&Value>) -> Self {
        ResolveError::NotIndexable {
            segment: segment.clone(),
            found: describe(target),
        }
    }
}

/// Returns a short type description for error messages.
fn describe(value: Option<&Value>) -> &'static str {
    match value {
        None => "missing",
        Some(Value::Null) => "null",
        Some(Value::Bool(_)) => "boolean",
        Some(Value::Number(_)) => "number",
        Some(Value::String(_)) => "string",
        Some(Value::Array(_)) => "array",
        Some(Value::Object(_)) => "object",
    }
}

/// Resolves a path expression against a root value.
///
/// Pure and side-effect free. A missing member resolves to an absent node
/// rather than an error; an access that the target value cannot support
/// (see [`ResolveError`]) is a deterministic failure.
///
/// Wildcard segments are not expanded here: a path headed by `*` returns the
/// root itself as an [`Resolved::ArrayContext`], and the checker iterates the
/// array element by element, re-invoking resolution per element.
///
/// # Example
///
/// ```rust
/// use dragnet::{resolve, RulePath};
/// use serde_json::json;
///
/// let value = json!({"user": {"email": "a@b.com"}});
/// let path: RulePath = "user".parse().unwrap();
///
/// let node = resolve(&value, &path).unwrap();
/// assert_eq!(node.value(), Some(&json!({"email": "a@b.com"})));
/// ```
pub fn resolve<'a>(root: &'a Value, path: &RulePath) -> Result<Resolved<'a>, ResolveError> {
    resolve_segments(Some(root), path.segments())
}

/// One-segment-at-a-time resolution over a segment slice.
///
/// Mirrors the single-key base case: a lone key or index segment resolves
/// directly to a scalar node, and a lone wildcard keeps itself as the
/// remaining segment so the checker can open the iteration on the root.
pub(crate) fn resolve_segments<'a>(
    root: Option<&'a Value>,
    segments: &[PathSegment],
) -> Result<Resolved<'a>, ResolveError> {
    match segments {
        [] => Ok(Resolved::Scalar { value: root }),
        [segment @ (PathSegment::Key(_) | PathSegment::Index(_))] => Ok(Resolved::Scalar {
            value: step(root, segment)?,
        }),
        [PathSegment::Wildcard] => Ok(Resolved::ArrayContext {
            value: root,
            remaining: vec![PathSegment::Wildcard],
        }),
        [PathSegment::Wildcard, rest @ ..] => Ok(Resolved::ArrayContext {
            value: root,
            remaining: rest.to_vec(),
        }),
        [segment, rest @ ..] => Ok(Resolved::ArrayContext {
            value: step(root, segment)?,
            remaining: rest.to_vec(),
        }),
    }
}

/// Applies a single non-wildcard segment to a value.
///
/// Key-on-object and index-on-array accesses resolve to the member or `None`
/// when absent; every other combination is a [`ResolveError`].
fn step<'a>(
    root: Option<&'a Value>,
    segment: &PathSegment,
) -> Result<Option<&'a Value>, ResolveError> {
    match (segment, root) {
        (PathSegment::Key(name), Some(Value::Object(map))) => Ok(map.get(name)),
        (PathSegment::Index(idx), Some(Value::Array(items))) => Ok(items.get(*idx)),
        _ => Err(ResolveError::not_indexable(segment, root)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn path(expr: &str) -> RulePath {
        RulePath::parse(expr).unwrap()
    }

    #[test]
    fn test_single_key_matches_direct_access() {
        let value = json!({"name": "alice", "age": 30});

        let node = resolve(&value, &path("name")).unwrap();
        assert_eq!(node.value(), value.get("name"));

        let node = resolve(&value, &path("age")).unwrap();
        assert_eq!(node.value(), value.get("age"));
    }

    #[test]
    fn test_missing_key_is_absent_not_error() {
        let value = json!({"name": "alice"});
        let node = resolve(&value, &path("missing")).unwrap();
        assert!(matches!(node, Resolved::Scalar { value: None }));
    }

    #[test]
    fn test_two_segment_descends_one_level() {
        let value = json!({"user": {"email": "a@b.com"}});
        let node = resolve(&value, &path("user.email")).unwrap();

        match node {
            Resolved::ArrayContext { value, remaining } => {
                assert_eq!(value, Some(&json!({"email": "a@b.com"})));
                assert_eq!(remaining, vec![PathSegment::key("email")]);
            }
            other => panic!("expected array context, got {:?}", other),
        }
    }

    #[test]
    fn test_wildcard_head_does_not_descend() {
        let value = json!([1, 2, 3]);
        let node = resolve(&value, &path("*")).unwrap();

        match node {
            Resolved::ArrayContext { value, remaining } => {
                assert_eq!(value, Some(&json!([1, 2, 3])));
                assert_eq!(remaining, vec![PathSegment::Wildcard]);
            }
            other => panic!("expected array context, got {:?}", other),
        }
    }

    #[test]
    fn test_key_into_scalar_defers_the_fault() {
        // stepping onto the scalar succeeds; the leftover segment carries
        // the fault to the next resolution round
        let value = json!({"n": 5});
        let node = resolve(&value, &path("n.inner")).unwrap();
        match node {
            Resolved::ArrayContext { value, remaining } => {
                assert_eq!(value, Some(&json!(5)));
                assert_eq!(remaining, vec![PathSegment::key("inner")]);
            }
            other => panic!("expected array context, got {:?}", other),
        }

        let err = resolve_segments(Some(&json!(5)), &[PathSegment::key("inner")]).unwrap_err();
        assert!(matches!(
            err,
            ResolveError::NotIndexable {
                found: "number",
                ..
            }
        ));
    }

    #[test]
    fn test_key_into_null_fails_on_the_deferred_segment() {
        let err = resolve_segments(Some(&json!(null)), &[PathSegment::key("inner")]).unwrap_err();
        assert!(matches!(err, ResolveError::NotIndexable { found: "null", .. }));
    }

    #[test]
    fn test_index_into_object_fails() {
        let value = json!({"a": 1});
        let err = resolve_segments(Some(&value), &[PathSegment::index(0)]).unwrap_err();
        assert!(matches!(
            err,
            ResolveError::NotIndexable {
                found: "object",
                ..
            }
        ));
    }

    #[test]
    fn test_out_of_range_index_is_absent() {
        let value = json!([1, 2]);
        let node = resolve_segments(Some(&value), &[PathSegment::index(9)]).unwrap();
        assert!(matches!(node, Resolved::Scalar { value: None }));
    }

    #[test]
    fn test_descent_into_missing_fails() {
        let err =
            resolve_segments(None, &[PathSegment::key("a"), PathSegment::key("b")]).unwrap_err();
        assert!(matches!(
            err,
            ResolveError::NotIndexable {
                found: "missing",
                ..
            }
        ));
    }
}
