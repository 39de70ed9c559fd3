//! Built-in operator constructors.
//!
//! Each constructor is a small stateless function producing an immutable
//! [`Operator`]. Constructors that take configuration validate it eagerly so
//! that bad rule definitions fail at compile time, not at check time.

use std::sync::OnceLock;

use chrono::{DateTime, Local, NaiveDate};
use regex::Regex;
use serde_json::Value;

use super::{Operator, OperatorError};

/// Checks the value is a number.
pub fn is_number() -> Operator {
    Operator::new("isNumber", vec![], |value, _| {
        matches!(value, Some(Value::Number(_)))
    })
}

/// Checks the value is a string.
pub fn is_string() -> Operator {
    Operator::new("isString", vec![], |value, _| {
        matches!(value, Some(Value::String(_)))
    })
}

/// Checks the value is a boolean.
pub fn is_boolean() -> Operator {
    Operator::new("isBoolean", vec![], |value, _| {
        matches!(value, Some(Value::Bool(_)))
    })
}

/// Checks the value is an array.
pub fn is_array() -> Operator {
    Operator::new("isArray", vec![], |value, _| {
        matches!(value, Some(Value::Array(_)))
    })
}

/// Checks the value is an empty string or array.
pub fn empty() -> Operator {
    Operator::new("empty", vec![], |value, _| match value {
        Some(Value::String(s)) => s.is_empty(),
        Some(Value::Array(items)) => items.is_empty(),
        _ => false,
    })
}

/// Checks the value is a non-empty string or array.
pub fn not_empty() -> Operator {
    Operator::new("notEmpty", vec![], |value, _| match value {
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(items)) => !items.is_empty(),
        _ => false,
    })
}

/// Checks the value is present and non-null.
pub fn exist() -> Operator {
    Operator::new("exist", vec![], |value, _| {
        !matches!(value, None | Some(Value::Null))
    })
}

/// Checks the value is absent or null.
pub fn not_exist() -> Operator {
    Operator::new("notExist", vec![], |value, _| {
        matches!(value, None | Some(Value::Null))
    })
}

/// Checks a string value against a regex pattern.
///
/// # Errors
///
/// Returns [`OperatorError::InvalidRegex`] if the pattern does not compile.
pub fn regex(pattern: &str) -> Result<Operator, OperatorError> {
    let re = Regex::new(pattern)?;
    Ok(Operator::new(
        "regex",
        vec![pattern.to_string()],
        move |value, _| match value {
            Some(Value::String(s)) => re.is_match(s),
            _ => false,
        },
    ))
}

/// Checks a string or number is one of the given values, or that an array
/// contains at least one of them.
///
/// Numbers are compared by their decimal rendering, since rule arguments
/// arrive as strings.
pub fn has_in<I, S>(values: I) -> Operator
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let values: Vec<String> = values.into_iter().map(Into::into).collect();
    Operator::new("hasIn", values.clone(), move |value, _| {
        contains_any(&values, value)
    })
}

/// Checks a string or number is none of the given values, or that an array
/// contains none of them.
pub fn has_not_in<I, S>(values: I) -> Operator
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let values: Vec<String> = values.into_iter().map(Into::into).collect();
    Operator::new("hasNotIn", values.clone(), move |value, _| match value {
        Some(Value::String(_) | Value::Number(_) | Value::Array(_)) => {
            !contains_any(&values, value)
        }
        _ => false,
    })
}

fn contains_any(values: &[String], value: Option<&Value>) -> bool {
    match value {
        Some(Value::String(s)) => values.iter().any(|v| v == s),
        Some(Value::Number(n)) => {
            let rendered = n.to_string();
            values.iter().any(|v| *v == rendered)
        }
        Some(Value::Array(items)) => items
            .iter()
            .any(|item| contains_any(values, Some(item))),
        _ => false,
    }
}

/// Checks the value parses as a date.
///
/// Accepts epoch milliseconds (as a number or numeric string), RFC 3339
/// timestamps, and `YYYY-MM-DD` strings.
pub fn is_date() -> Operator {
    Operator::new("isDate", vec![], |value, _| {
        value.and_then(parse_date).is_some()
    })
}

/// Checks a date value falls within an inclusive date range.
///
/// # Errors
///
/// Returns [`OperatorError::InvalidArgument`] if either bound is not a
/// parseable date.
pub fn range_date(start: &str, end: &str) -> Result<Operator, OperatorError> {
    let start_date = parse_date_arg("rangeDate", start)?;
    let end_date = parse_date_arg("rangeDate", end)?;
    Ok(Operator::new(
        "rangeDate",
        vec![start.to_string(), end.to_string()],
        move |value, _| match value.and_then(parse_date) {
            Some(date) => date >= start_date && date <= end_date,
            None => false,
        },
    ))
}

/// Checks the value is a date falling on the current local day.
pub fn is_today() -> Operator {
    Operator::new("isToday", vec![], |value, _| {
        match value.and_then(parse_date) {
            Some(date) => date == Local::now().date_naive(),
            None => false,
        }
    })
}

/// Checks the value is a well-formed email address.
pub fn is_email() -> Operator {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    Operator::new("isEmail", vec![], |value, _| {
        let re = EMAIL.get_or_init(|| {
            Regex::new(r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9-]+(?:\.[a-zA-Z0-9-]+)*$")
                .expect("email pattern is a valid regex")
        });
        match value {
            Some(Value::String(s)) => re.is_match(s),
            _ => false,
        }
    })
}

/// Checks a string value parses as JSON.
pub fn is_json() -> Operator {
    Operator::new("isJson", vec![], |value, _| match value {
        Some(Value::String(s)) => serde_json::from_str::<Value>(s).is_ok(),
        _ => false,
    })
}

/// Checks a minimum length for strings and arrays.
///
/// Numbers are measured by the length of their decimal rendering.
pub fn min_length(length: usize) -> Operator {
    Operator::new(
        "minLength",
        vec![length.to_string()],
        move |value, _| match measure(value) {
            Some(len) => len >= length,
            None => false,
        },
    )
}

/// Checks a maximum length for strings and arrays.
///
/// Numbers are measured by the length of their decimal rendering.
pub fn max_length(length: usize) -> Operator {
    Operator::new(
        "maxLength",
        vec![length.to_string()],
        move |value, _| match measure(value) {
            Some(len) => len <= length,
            None => false,
        },
    )
}

fn measure(value: Option<&Value>) -> Option<usize> {
    match value {
        Some(Value::String(s)) => Some(s.chars().count()),
        Some(Value::Array(items)) => Some(items.len()),
        Some(Value::Number(n)) => Some(n.to_string().chars().count()),
        _ => None,
    }
}

/// Checks a number falls within an inclusive range.
pub fn range_num(start: f64, end: f64) -> Operator {
    Operator::new(
        "rangeNum",
        vec![start.to_string(), end.to_string()],
        move |value, _| match value.and_then(Value::as_f64) {
            Some(n) => n >= start && n <= end,
            None => false,
        },
    )
}

/// Checks the value differs from its immediate predecessor in a wildcard
/// scan.
///
/// This compares adjacent elements only, so it detects duplicates in an
/// already-sorted sequence rather than enforcing set uniqueness. The first
/// element of any iteration passes trivially.
pub fn unique_adjacent() -> Operator {
    Operator::new("uniqueAdjacent", vec![], |value, previous| {
        match previous {
            None => true,
            Some(prev) => value != Some(prev),
        }
    })
}

/// Parses a date from a JSON value.
fn parse_date(value: &Value) -> Option<NaiveDate> {
    match value {
        Value::Number(n) => date_from_millis(n.as_i64()?),
        Value::String(s) => parse_date_str(s),
        _ => None,
    }
}

fn parse_date_str(s: &str) -> Option<NaiveDate> {
    if let Ok(millis) = s.parse::<i64>() {
        return date_from_millis(millis);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

fn date_from_millis(millis: i64) -> Option<NaiveDate> {
    DateTime::from_timestamp_millis(millis).map(|dt| dt.date_naive())
}

fn parse_date_arg(operator: &'static str, arg: &str) -> Result<NaiveDate, OperatorError> {
    parse_date_str(arg).ok_or_else(|| OperatorError::InvalidArgument {
        operator,
        argument: arg.to_string(),
        expected: "date",
    })
}
