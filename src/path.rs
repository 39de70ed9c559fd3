//! Path expressions for addressing values in nested structures.
//!
//! This module provides [`RulePath`] and [`PathSegment`] for parsing and
//! representing dotted path expressions like `users.0.email` or `tags.*`.

use std::fmt::{self, Display};
use std::str::FromStr;

/// A segment of a rule path.
///
/// Paths are built from segments representing member access, array indexing,
/// or wildcard expansion over every element of an array.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// A literal member name (e.g., `user`, `email`)
    Key(String),
    /// An exact array position (e.g., `0`, `42`)
    Index(usize),
    /// The `*` token: every element of the array at this position
    Wildcard,
}

impl PathSegment {
    /// Creates a new key segment.
    pub fn key(name: impl Into<String>) -> Self {
        PathSegment::Key(name.into())
    }

    /// Creates a new index segment.
    pub fn index(idx: usize) -> Self {
        PathSegment::Index(idx)
    }
}

impl Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Key(name) => write!(f, "{}", name),
            PathSegment::Index(idx) => write!(f, "{}", idx),
            PathSegment::Wildcard => write!(f, "*"),
        }
    }
}

/// Errors produced while parsing a path expression.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    /// The path expression was empty.
    #[error("path expression is empty")]
    Empty,

    /// A segment between two separators was empty (e.g. `a..b`).
    #[error("path '{0}' contains an empty segment")]
    EmptySegment(String),
}

/// A parsed path expression addressing a value in a nested structure.
///
/// `RulePath` is the in-memory form of the dot-separated rule address,
/// e.g. `"items.*.id"` becomes `[Key("items"), Wildcard, Key("id")]`.
///
/// A path with no separator is always a single literal key, even when it
/// looks numeric; segments of a multi-segment path that parse as unsigned
/// integers become [`PathSegment::Index`].
///
/// # Example
///
/// ```rust
/// use dragnet::{PathSegment, RulePath};
///
/// let path: RulePath = "users.0.email".parse().unwrap();
///
/// assert_eq!(path.segments()[0], PathSegment::key("users"));
/// assert_eq!(path.segments()[1], PathSegment::index(0));
/// assert_eq!(path.segments()[2], PathSegment::key("email"));
/// assert_eq!(path.to_string(), "users.0.email");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RulePath {
    segments: Vec<PathSegment>,
}

impl RulePath {
    /// Parses a dot-separated path expression.
    ///
    /// # Errors
    ///
    /// Returns a [`PathError`] if the expression is empty or contains an
    /// empty segment (leading, trailing, or doubled separator).
    pub fn parse(expr: &str) -> Result<Self, PathError> {
        if expr.is_empty() {
            return Err(PathError::Empty);
        }

        // Single-token expressions stay literal keys; only "*" is special.
        if !expr.contains('.') {
            let segment = if expr == "*" {
                PathSegment::Wildcard
            } else {
                PathSegment::Key(expr.to_string())
            };
            return Ok(Self {
                segments: vec![segment],
            });
        }

        let mut segments = Vec::new();
        for token in expr.split('.') {
            if token.is_empty() {
                return Err(PathError::EmptySegment(expr.to_string()));
            }
            let segment = match token {
                "*" => PathSegment::Wildcard,
                _ => match token.parse::<usize>() {
                    Ok(idx) => PathSegment::Index(idx),
                    Err(_) => PathSegment::Key(token.to_string()),
                },
            };
            segments.push(segment);
        }

        Ok(Self { segments })
    }

    /// Creates a path directly from segments.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::Empty`] if no segments are given.
    pub fn from_segments(segments: Vec<PathSegment>) -> Result<Self, PathError> {
        if segments.is_empty() {
            return Err(PathError::Empty);
        }
        Ok(Self { segments })
    }

    /// Returns the ordered segment list.
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Returns the number of segments in this path.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns true if this path has no segments.
    ///
    /// This method exists for API consistency but always returns false,
    /// since both constructors reject empty segment lists.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns true if any segment is the wildcard token.
    pub fn has_wildcard(&self) -> bool {
        self.segments.contains(&PathSegment::Wildcard)
    }
}

impl FromStr for RulePath {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RulePath::parse(s)
    }
}

impl Display for RulePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                write!(f, ".")?;
            }
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_key() {
        let path = RulePath::parse("email").unwrap();
        assert_eq!(path.segments(), &[PathSegment::key("email")]);
        assert_eq!(path.to_string(), "email");
    }

    #[test]
    fn test_single_numeric_token_stays_literal() {
        let path = RulePath::parse("5").unwrap();
        assert_eq!(path.segments(), &[PathSegment::key("5")]);
    }

    #[test]
    fn test_lone_wildcard() {
        let path = RulePath::parse("*").unwrap();
        assert_eq!(path.segments(), &[PathSegment::Wildcard]);
        assert!(path.has_wildcard());
    }

    #[test]
    fn test_mixed_segments() {
        let path = RulePath::parse("a.b.2.*.c").unwrap();
        assert_eq!(
            path.segments(),
            &[
                PathSegment::key("a"),
                PathSegment::key("b"),
                PathSegment::index(2),
                PathSegment::Wildcard,
                PathSegment::key("c"),
            ]
        );
        assert_eq!(path.to_string(), "a.b.2.*.c");
    }

    #[test]
    fn test_numeric_segment_in_multi_segment_path() {
        let path = RulePath::parse("list.0").unwrap();
        assert_eq!(
            path.segments(),
            &[PathSegment::key("list"), PathSegment::index(0)]
        );
    }

    #[test]
    fn test_empty_expression_rejected() {
        assert_eq!(RulePath::parse(""), Err(PathError::Empty));
    }

    #[test]
    fn test_empty_segments_rejected() {
        assert!(matches!(
            RulePath::parse("a..b"),
            Err(PathError::EmptySegment(_))
        ));
        assert!(matches!(
            RulePath::parse(".a"),
            Err(PathError::EmptySegment(_))
        ));
        assert!(matches!(
            RulePath::parse("a."),
            Err(PathError::EmptySegment(_))
        ));
    }

    #[test]
    fn test_from_str() {
        let path: RulePath = "tags.*".parse().unwrap();
        assert_eq!(
            path.segments(),
            &[PathSegment::key("tags"), PathSegment::Wildcard]
        );
    }

    #[test]
    fn test_from_segments_rejects_empty() {
        assert_eq!(RulePath::from_segments(vec![]), Err(PathError::Empty));
    }

    #[test]
    fn test_display_round_trip() {
        for expr in ["a", "a.b", "items.*.id", "list.3", "*"] {
            let path = RulePath::parse(expr).unwrap();
            assert_eq!(path.to_string(), expr);
            assert_eq!(RulePath::parse(&path.to_string()).unwrap(), path);
        }
    }
}
