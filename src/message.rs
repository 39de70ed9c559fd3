//! Localized message formatting for validation errors.
//!
//! This is a thin string-substitution layer over the error record. The
//! engine never calls it on the check path; callers render messages on
//! demand after a validate call fails.
//!
//! Templates are plain strings with `:` placeholders: `:attribute` expands
//! to the localized display name of the failing property (or its raw path),
//! and `:arg1`, `:arg2`, ... expand to the failing operator's construction
//! attributes by position.

use std::sync::OnceLock;

use indexmap::IndexMap;
use regex::{Captures, Regex};

use crate::error::ValidationError;

const DEFAULT_LOCALE: &str = "en";
const GENERIC_TEMPLATE: &str = ":attribute is invalid";

/// A per-locale bundle of message templates and attribute display names.
///
/// `validations` maps operator names (and the generic reason codes) to
/// templates; `attributes` maps property paths to display names used for
/// the `:attribute` placeholder.
#[derive(Debug, Clone, Default)]
pub struct LocaleBundle {
    validations: IndexMap<String, String>,
    attributes: IndexMap<String, String>,
}

impl LocaleBundle {
    /// Creates an empty bundle.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a message template for an operator or reason code.
    pub fn validation(mut self, code: impl Into<String>, template: impl Into<String>) -> Self {
        self.validations.insert(code.into(), template.into());
        self
    }

    /// Adds a display name for a property path.
    pub fn attribute(mut self, path: impl Into<String>, display: impl Into<String>) -> Self {
        self.attributes.insert(path.into(), display.into());
        self
    }

    fn merge_from(&mut self, other: LocaleBundle) {
        self.validations.extend(other.validations);
        self.attributes.extend(other.attributes);
    }
}

/// A catalog of localized validation messages.
///
/// The catalog resolves a template for a [`ValidationError`] by looking in
/// the active locale's bundle, then the `en` bundle, then a locale-neutral
/// generic template, so an unrecognized operator name or a missing locale
/// never leaves the caller without a message.
///
/// # Example
///
/// ```rust
/// use dragnet::{LocaleBundle, MessageCatalog, Validator};
/// use serde_json::json;
///
/// let catalog = MessageCatalog::new("en")
///     .with_messages("en", LocaleBundle::new().attribute("email", "E-mail address"));
///
/// let err = Validator::new()
///     .validate(&json!({"email": "nope"}), &["email:isEmail".into()])
///     .unwrap_err();
///
/// assert_eq!(catalog.render(&err), "E-mail address must be a valid email address");
/// ```
#[derive(Debug, Clone)]
pub struct MessageCatalog {
    locale: String,
    bundles: IndexMap<String, LocaleBundle>,
}

impl MessageCatalog {
    /// Creates a catalog targeting the given locale, seeded with the
    /// built-in `en` bundle.
    pub fn new(locale: impl Into<String>) -> Self {
        let mut bundles = IndexMap::new();
        bundles.insert(DEFAULT_LOCALE.to_string(), builtin_en());
        Self {
            locale: locale.into(),
            bundles,
        }
    }

    /// Merges a bundle into the given locale, creating it if absent.
    ///
    /// Later entries overwrite earlier ones key by key; untouched keys are
    /// preserved, so partial overrides of the built-in templates work.
    pub fn with_messages(mut self, locale: impl Into<String>, bundle: LocaleBundle) -> Self {
        self.bundles
            .entry(locale.into())
            .or_default()
            .merge_from(bundle);
        self
    }

    /// Returns the locale this catalog targets.
    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Renders a localized message for a validation error.
    pub fn render(&self, error: &ValidationError) -> String {
        let template = self
            .lookup(&self.locale, error.code())
            .or_else(|| self.lookup(DEFAULT_LOCALE, error.code()))
            .unwrap_or(GENERIC_TEMPLATE);

        let property = error.rule().unwrap_or("value");
        self.substitute(template, property, error.attributes())
    }

    fn lookup(&self, locale: &str, code: &str) -> Option<&str> {
        self.bundles
            .get(locale)?
            .validations
            .get(code)
            .map(String::as_str)
    }

    fn attribute_display(&self, property: &str) -> String {
        for locale in [self.locale.as_str(), DEFAULT_LOCALE] {
            if let Some(display) = self
                .bundles
                .get(locale)
                .and_then(|bundle| bundle.attributes.get(property))
            {
                return display.clone();
            }
        }
        property.to_string()
    }

    fn substitute(&self, template: &str, property: &str, attributes: &[String]) -> String {
        static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
        let placeholder = PLACEHOLDER
            .get_or_init(|| Regex::new(r":([a-zA-Z_][a-zA-Z0-9_]*)").expect("valid placeholder regex"));

        placeholder
            .replace_all(template, |caps: &Captures<'_>| {
                let key = &caps[1];
                if key == "attribute" {
                    return self.attribute_display(property);
                }
                if let Some(position) = key
                    .strip_prefix("arg")
                    .and_then(|n| n.parse::<usize>().ok())
                {
                    if let Some(arg) = position.checked_sub(1).and_then(|i| attributes.get(i)) {
                        return arg.clone();
                    }
                }
                // unknown placeholders stay as written
                caps[0].to_string()
            })
            .into_owned()
    }
}

impl Default for MessageCatalog {
    fn default() -> Self {
        Self::new(DEFAULT_LOCALE)
    }
}

fn builtin_en() -> LocaleBundle {
    let templates = [
        ("isNumber", ":attribute must be a number"),
        ("isString", ":attribute must be a string"),
        ("isBoolean", ":attribute must be a boolean"),
        ("isArray", ":attribute must be an array"),
        ("empty", ":attribute must be empty"),
        ("notEmpty", ":attribute may not be empty"),
        ("exist", ":attribute must be present"),
        ("notExist", ":attribute must not be present"),
        ("regex", ":attribute format is invalid"),
        ("hasIn", ":attribute must be one of the allowed values"),
        ("hasNotIn", ":attribute contains a forbidden value"),
        ("isDate", ":attribute must be a valid date"),
        ("rangeDate", ":attribute must fall between :arg1 and :arg2"),
        ("isToday", ":attribute must be today's date"),
        ("isEmail", ":attribute must be a valid email address"),
        ("isJson", ":attribute must be valid JSON"),
        ("minLength", ":attribute must be at least :arg1 characters long"),
        ("maxLength", ":attribute may not be longer than :arg1 characters"),
        ("rangeNum", ":attribute must be between :arg1 and :arg2"),
        ("uniqueAdjacent", ":attribute contains adjacent duplicate values"),
        ("property_resolution_failed", ":attribute could not be resolved"),
        ("rule_compile_failed", "the rule set could not be compiled"),
        ("unexpected", "validation failed unexpectedly"),
    ];

    let mut bundle = LocaleBundle::new();
    for (code, template) in templates {
        bundle = bundle.validation(code, template);
    }
    bundle
}
