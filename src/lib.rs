//! # Dragnet
//!
//! A fail-fast validation library for nested values: rules address
//! properties with dotted paths (literal keys, numeric indices, and a `*`
//! wildcard that expands to every element of an array) and pair them with
//! ordered predicate lists. The first failing predicate of the first
//! failing rule terminates the call with a single structured error record.
//!
//! ## Overview
//!
//! Unlike schema validators that describe the whole shape of a document,
//! dragnet checks exactly the properties its rules name. Wildcard expansion
//! is interleaved with checking rather than materialized up front, so
//! traversal short-circuits mid-array and memory stays bounded by path
//! depth. During a wildcard scan each element's resolved value is threaded
//! into the next element's predicate, which is what makes order-dependent
//! checks like adjacent-duplicate detection possible.
//!
//! ## Core Types
//!
//! - [`RulePath`]: a parsed dotted path expression (`users.0.email`, `tags.*`)
//! - [`Operator`]: an immutable, named, pure predicate with construction attributes
//! - [`Rule`] / [`RuleSpec`]: a path paired with ordered operators, in
//!   structured or compact-string form
//! - [`Validator`]: the engine; compiles rules, resolves paths, checks predicates
//! - [`ValidationError`]: the single error record a failing call produces
//! - [`MessageCatalog`]: on-demand localized rendering of error records
//!
//! ## Example
//!
//! ```rust
//! use dragnet::Validator;
//! use serde_json::json;
//!
//! let validator = Validator::new();
//! let value = json!({
//!     "email": "a@b.com",
//!     "tags": ["alpha", "beta"],
//! });
//!
//! // Rules in the compact string grammar: <path>:<op>[ arg]*[,<op>...]
//! let result = validator.validate(&value, &[
//!     "email:isEmail,maxLength 64".into(),
//!     "tags.*:isString,uniqueAdjacent".into(),
//! ]);
//! assert!(result.is_ok());
//!
//! // The first failure wins; nothing later is evaluated
//! let err = validator
//!     .validate(&value, &["email:maxLength 3".into()])
//!     .unwrap_err();
//! assert_eq!(err.operator(), Some("maxLength"));
//! assert_eq!(err.operator_index(), Some(0));
//! ```

pub mod check;
pub mod engine;
pub mod error;
pub mod message;
pub mod operator;
pub mod path;
pub mod registry;
pub mod resolve;
pub mod rule;
pub mod validatable;

pub use check::check;
pub use engine::Validator;
pub use error::ValidationError;
pub use message::{LocaleBundle, MessageCatalog};
pub use operator::{Operator, OperatorError};
pub use path::{PathError, PathSegment, RulePath};
pub use registry::{OperatorRegistry, RegistryError};
pub use resolve::{resolve, Resolved, ResolveError};
pub use rule::{compile, CompileError, Rule, RuleSpec};
pub use validatable::Validatable;
