//! Operator registry for name-to-constructor dispatch.
//!
//! This module provides [`OperatorRegistry`], the table the rule compiler
//! consults to turn DSL operator names into [`Operator`] instances. The
//! built-in table is statically assembled at construction; unknown names
//! surface as compile errors, never as check-time faults.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

use crate::operator::{builtin, Operator, OperatorError};

/// A constructor stored in the registry: positional string arguments in,
/// a ready operator (or a construction error) out.
pub type ConstructorFn = dyn Fn(&[String]) -> Result<Operator, OperatorError> + Send + Sync;

/// Type alias for the constructor storage map.
type ConstructorMap = Arc<RwLock<HashMap<String, Arc<ConstructorFn>>>>;

/// A thread-safe registry mapping operator names to constructors.
///
/// The registry backs the rule DSL: each `<operatorName> [arg]*` token in a
/// rule string is looked up here and invoked with its arguments. Cloning a
/// registry shares the underlying table.
///
/// # Thread Safety
///
/// The registry uses `Arc<RwLock<...>>`:
/// - Rule compilation reads concurrently (read access)
/// - Registration operations are serialized (write access)
///
/// # Example
///
/// ```rust
/// use dragnet::{Operator, OperatorRegistry};
///
/// let registry = OperatorRegistry::with_builtins();
///
/// // Built-in operators are ready to use
/// assert!(registry.get("isEmail").is_some());
///
/// // Custom operators can be added alongside them
/// registry.register("isPositive", |_args| {
///     Ok(Operator::new("isPositive", vec![], |value, _| {
///         value.and_then(|v| v.as_f64()).is_some_and(|n| n > 0.0)
///     }))
/// }).unwrap();
/// ```
pub struct OperatorRegistry {
    constructors: ConstructorMap,
}

impl OperatorRegistry {
    /// Creates an empty registry with no operators.
    pub fn new() -> Self {
        Self {
            constructors: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Creates a registry pre-populated with the built-in operator set.
    pub fn with_builtins() -> Self {
        let registry = Self::new();
        registry.install_builtins();
        registry
    }

    /// Registers an operator constructor under the given name.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateName`] if the name is already taken.
    ///
    /// # Example
    ///
    /// ```rust
    /// use dragnet::{Operator, OperatorRegistry};
    ///
    /// let registry = OperatorRegistry::new();
    /// registry.register("alwaysTrue", |_| {
    ///     Ok(Operator::new("alwaysTrue", vec![], |_, _| true))
    /// }).unwrap();
    ///
    /// // Duplicate registration fails
    /// assert!(registry.register("alwaysTrue", |_| {
    ///     Ok(Operator::new("alwaysTrue", vec![], |_, _| true))
    /// }).is_err());
    /// ```
    pub fn register<F>(&self, name: impl Into<String>, constructor: F) -> Result<(), RegistryError>
    where
        F: Fn(&[String]) -> Result<Operator, OperatorError> + Send + Sync + 'static,
    {
        let name = name.into();
        let mut constructors = self.constructors.write();

        if constructors.contains_key(&name) {
            return Err(RegistryError::DuplicateName(name));
        }

        constructors.insert(name, Arc::new(constructor));
        Ok(())
    }

    /// Retrieves a constructor by name.
    ///
    /// Returns `None` if no operator with the given name is registered.
    pub fn get(&self, name: &str) -> Option<Arc<ConstructorFn>> {
        self.constructors.read().get(name).cloned()
    }

    /// Looks up a constructor and invokes it with the given arguments.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::OperatorNotFound`] for an unknown name, or
    /// wraps the [`OperatorError`] the constructor produced.
    pub fn construct(&self, name: &str, args: &[String]) -> Result<Operator, RegistryError> {
        let constructor = self
            .get(name)
            .ok_or_else(|| RegistryError::OperatorNotFound(name.to_string()))?;
        constructor(args).map_err(RegistryError::Construction)
    }

    /// Returns every registered operator name, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.constructors.read().keys().cloned().collect();
        names.sort();
        names
    }

    fn install_builtins(&self) {
        let mut constructors = self.constructors.write();

        // Registration cannot collide here: the table starts empty and
        // builtin names are unique.
        let mut add = |name: &str, f: Arc<ConstructorFn>| {
            constructors.insert(name.to_string(), f);
        };

        add("isNumber", nullary("isNumber", builtin::is_number));
        add("isString", nullary("isString", builtin::is_string));
        add("isBoolean", nullary("isBoolean", builtin::is_boolean));
        add("isArray", nullary("isArray", builtin::is_array));
        add("empty", nullary("empty", builtin::empty));
        add("notEmpty", nullary("notEmpty", builtin::not_empty));
        add("exist", nullary("exist", builtin::exist));
        add("notExist", nullary("notExist", builtin::not_exist));
        add("isDate", nullary("isDate", builtin::is_date));
        add("isToday", nullary("isToday", builtin::is_today));
        add("isEmail", nullary("isEmail", builtin::is_email));
        add("isJson", nullary("isJson", builtin::is_json));
        add("uniqueAdjacent", nullary("uniqueAdjacent", builtin::unique_adjacent));

        add(
            "regex",
            Arc::new(|args: &[String]| {
                let [pattern] = expect_args::<1>("regex", args)?;
                builtin::regex(pattern)
            }),
        );
        add(
            "hasIn",
            Arc::new(|args: &[String]| {
                expect_non_empty("hasIn", args)?;
                Ok(builtin::has_in(args.iter().cloned()))
            }),
        );
        add(
            "hasNotIn",
            Arc::new(|args: &[String]| {
                expect_non_empty("hasNotIn", args)?;
                Ok(builtin::has_not_in(args.iter().cloned()))
            }),
        );
        add(
            "rangeDate",
            Arc::new(|args: &[String]| {
                let [start, end] = expect_args::<2>("rangeDate", args)?;
                builtin::range_date(start, end)
            }),
        );
        add(
            "minLength",
            Arc::new(|args: &[String]| {
                let [len] = expect_args::<1>("minLength", args)?;
                Ok(builtin::min_length(parse_arg(
                    "minLength", len, "length",
                )?))
            }),
        );
        add(
            "maxLength",
            Arc::new(|args: &[String]| {
                let [len] = expect_args::<1>("maxLength", args)?;
                Ok(builtin::max_length(parse_arg(
                    "maxLength", len, "length",
                )?))
            }),
        );
        add(
            "rangeNum",
            Arc::new(|args: &[String]| {
                let [start, end] = expect_args::<2>("rangeNum", args)?;
                Ok(builtin::range_num(
                    parse_arg("rangeNum", start, "number")?,
                    parse_arg("rangeNum", end, "number")?,
                ))
            }),
        );
    }
}

impl Default for OperatorRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl Clone for OperatorRegistry {
    fn clone(&self) -> Self {
        Self {
            constructors: Arc::clone(&self.constructors),
        }
    }
}

/// Wraps a zero-argument builtin constructor with strict arity checking.
fn nullary(name: &'static str, f: fn() -> Operator) -> Arc<ConstructorFn> {
    Arc::new(move |args: &[String]| {
        if !args.is_empty() {
            return Err(OperatorError::WrongArity {
                operator: name,
                expected: "no",
                got: args.len(),
            });
        }
        Ok(f())
    })
}

fn expect_args<'a, const N: usize>(
    operator: &'static str,
    args: &'a [String],
) -> Result<[&'a str; N], OperatorError> {
    let slice: Vec<&str> = args.iter().map(String::as_str).collect();
    slice
        .try_into()
        .map_err(|_| OperatorError::WrongArity {
            operator,
            expected: if N == 1 { "1" } else { "2" },
            got: args.len(),
        })
}

fn expect_non_empty(operator: &'static str, args: &[String]) -> Result<(), OperatorError> {
    if args.is_empty() {
        return Err(OperatorError::WrongArity {
            operator,
            expected: "at least 1",
            got: 0,
        });
    }
    Ok(())
}

fn parse_arg<T: std::str::FromStr>(
    operator: &'static str,
    arg: &str,
    expected: &'static str,
) -> Result<T, OperatorError> {
    arg.parse().map_err(|_| OperatorError::InvalidArgument {
        operator,
        argument: arg.to_string(),
        expected,
    })
}

/// Errors that can occur during registry operations.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// Attempted to register an operator name that already exists.
    #[error("operator '{0}' already registered")]
    DuplicateName(String),

    /// Looked up an operator name that doesn't exist.
    #[error("operator '{0}' not found")]
    OperatorNotFound(String),

    /// A constructor rejected its arguments.
    #[error(transparent)]
    Construction(#[from] OperatorError),
}
