//! Self-validating types.
//!
//! [`Validatable`] is a thin convenience wrapper at the API boundary: a type
//! declares its own rule list once and gains a `validate` method that runs a
//! built-in-registry engine against its serialized form.

use serde::Serialize;

use crate::engine::Validator;
use crate::error::ValidationError;
use crate::rule::RuleSpec;

/// Types that can validate themselves against their own declared rules.
///
/// The provided `validate` serializes `self` to a JSON value and runs the
/// rule list from [`Validatable::rules`] through a [`Validator`] with the
/// built-in operator set. Serialization failures surface as
/// [`ValidationError::Unexpected`].
///
/// # Example
///
/// ```rust
/// use dragnet::{RuleSpec, Validatable};
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Signup {
///     email: String,
///     tags: Vec<String>,
/// }
///
/// impl Validatable for Signup {
///     fn rules() -> Vec<RuleSpec> {
///         vec!["email:isEmail".into(), "tags.*:isString,notEmpty".into()]
///     }
/// }
///
/// let signup = Signup {
///     email: "a@b.com".into(),
///     tags: vec!["rust".into()],
/// };
/// assert!(signup.validate().is_ok());
/// ```
pub trait Validatable: Serialize {
    /// The rules this type must satisfy.
    fn rules() -> Vec<RuleSpec>;

    /// Validates this value against its declared rules.
    ///
    /// # Errors
    ///
    /// Returns the engine's single error record, or
    /// [`ValidationError::Unexpected`] if `self` cannot be serialized.
    fn validate(&self) -> Result<(), ValidationError> {
        let value = serde_json::to_value(self)
            .map_err(|err| ValidationError::Unexpected(err.to_string()))?;
        Validator::new().validate(&value, &Self::rules())
    }
}
