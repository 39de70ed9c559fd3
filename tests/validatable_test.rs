//! Tests for the self-validating type wrapper.

use dragnet::{RuleSpec, Validatable, ValidationError};
use serde::Serialize;

#[derive(Serialize)]
struct Signup {
    email: String,
    nickname: String,
    tags: Vec<String>,
}

impl Validatable for Signup {
    fn rules() -> Vec<RuleSpec> {
        vec![
            "email:isEmail,maxLength 64".into(),
            "nickname:isString,minLength 2".into(),
            "tags.*:isString,notEmpty,uniqueAdjacent".into(),
        ]
    }
}

fn valid_signup() -> Signup {
    Signup {
        email: "a@b.com".into(),
        nickname: "alice".into(),
        tags: vec!["rust".into(), "validation".into()],
    }
}

#[test]
fn test_valid_instance_passes() {
    assert!(valid_signup().validate().is_ok());
}

#[test]
fn test_failing_field_reports_its_rule() {
    let signup = Signup {
        email: "nope".into(),
        ..valid_signup()
    };

    let err = signup.validate().unwrap_err();
    assert_eq!(err.rule(), Some("email"));
    assert_eq!(err.operator(), Some("isEmail"));
    assert_eq!(err.operator_index(), Some(0));
}

#[test]
fn test_wildcard_rules_apply_to_collection_fields() {
    let signup = Signup {
        tags: vec!["rust".into(), "rust".into()],
        ..valid_signup()
    };

    let err = signup.validate().unwrap_err();
    assert_eq!(err.rule(), Some("tags.*"));
    assert_eq!(err.operator(), Some("uniqueAdjacent"));
    assert_eq!(err.operator_index(), Some(2));
}

#[test]
fn test_empty_tag_fails_before_uniqueness() {
    let signup = Signup {
        tags: vec!["".into(), "".into()],
        ..valid_signup()
    };

    let err = signup.validate().unwrap_err();
    match err {
        ValidationError::OperatorMismatch {
            operator, index, ..
        } => {
            assert_eq!(operator, "notEmpty");
            assert_eq!(index, 1);
        }
        other => panic!("expected operator mismatch, got {:?}", other),
    }
}
