//! 필드 검증
//!
//! 값 맵을 FieldSchema와 대조하고, 누락된 필드에 기본값을 채웁니다.
//!
//! # 규칙
//!
//! - 값이 없거나 `null`인 필드: 기본값이 있으면 채움, 없고 필수면 에러
//! - 값이 있는 필드: 스키마 타입과 실제 타입 비교
//! - 스키마에 없는 키는 건드리지 않음

use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::schema::{json_type_name, FieldSchema};

/// 검증 정책
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValidationPolicy {
    /// 첫 위반에서 중단 (기본값)
    #[default]
    FailFast,

    /// 모든 위반을 모아 `Error::Validation`으로 반환
    CollectAll,
}

/// 필드 검증기
pub struct FieldValidator<'a> {
    schema: &'a FieldSchema,
    policy: ValidationPolicy,
}

impl<'a> FieldValidator<'a> {
    pub fn new(schema: &'a FieldSchema) -> Self {
        Self {
            schema,
            policy: ValidationPolicy::default(),
        }
    }

    /// 검증 정책 지정
    pub fn policy(mut self, policy: ValidationPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// 검증 후 기본값이 채워진 맵 반환
    pub fn validate(&self, mut values: Map<String, Value>) -> Result<Map<String, Value>> {
        let mut violations = Vec::new();

        for (field, rule) in self.schema.iter() {
            let provided = values.get(field).filter(|v| !v.is_null());

            let violation = match provided {
                None => match &rule.default {
                    Some(default) => {
                        values.insert(field.to_string(), default.clone());
                        None
                    }
                    None if rule.required => Some(Error::MissingRequiredField {
                        field: field.to_string(),
                        expected: rule.field_type,
                    }),
                    None => None,
                },
                Some(value) if !rule.field_type.matches(value) => Some(Error::TypeMismatch {
                    field: field.to_string(),
                    expected: rule.field_type,
                    actual: json_type_name(value).to_string(),
                }),
                Some(_) => None,
            };

            if let Some(err) = violation {
                match self.policy {
                    ValidationPolicy::FailFast => return Err(err),
                    ValidationPolicy::CollectAll => violations.push(err),
                }
            }
        }

        if violations.is_empty() {
            Ok(values)
        } else {
            Err(Error::Validation(violations))
        }
    }
}

/// fail-fast 검증
pub fn validate(schema: &FieldSchema, values: Map<String, Value>) -> Result<Map<String, Value>> {
    FieldValidator::new(schema).validate(values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{FieldRule, FieldType};
    use serde_json::json;

    fn sample_schema() -> FieldSchema {
        FieldSchema::new()
            .field("active", FieldRule::new(FieldType::Boolean).with_default(true))
            .field("first_name", FieldRule::required(FieldType::String))
            .field("other_names", FieldType::String)
            .field("last_name", FieldRule::required(FieldType::String))
            .field("birthdate", FieldRule::required(FieldType::Date))
    }

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_fills_defaults() {
        let values = object(json!({
            "first_name": "Jose",
            "last_name": "Rivera",
            "birthdate": "1990-05-01"
        }));

        let validated = validate(&sample_schema(), values).unwrap();
        assert_eq!(validated.get("active"), Some(&json!(true)));
        assert!(!validated.contains_key("other_names"));
    }

    #[test]
    fn test_null_counts_as_absent() {
        let values = object(json!({
            "active": null,
            "first_name": "Jose",
            "last_name": "Rivera",
            "birthdate": "1990-05-01"
        }));

        let validated = validate(&sample_schema(), values).unwrap();
        assert_eq!(validated.get("active"), Some(&json!(true)));
    }

    #[test]
    fn test_missing_required_names_first_field() {
        let values = object(json!({ "birthdate": "1990-05-01" }));

        let err = validate(&sample_schema(), values).unwrap_err();
        match err {
            Error::MissingRequiredField { field, expected } => {
                assert_eq!(field, "first_name");
                assert_eq!(expected, FieldType::String);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_default_wins_over_required() {
        let schema = FieldSchema::new().field(
            "active",
            FieldRule::required(FieldType::Boolean).with_default(false),
        );

        let validated = validate(&schema, Map::new()).unwrap();
        assert_eq!(validated.get("active"), Some(&json!(false)));
    }

    #[test]
    fn test_type_mismatch() {
        let values = object(json!({
            "first_name": 42,
            "last_name": "Rivera",
            "birthdate": "1990-05-01"
        }));

        let err = validate(&sample_schema(), values).unwrap_err();
        match err {
            Error::TypeMismatch {
                field,
                expected,
                actual,
            } => {
                assert_eq!(field, "first_name");
                assert_eq!(expected, FieldType::String);
                assert_eq!(actual, "number");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_bare_tag_type_mismatch() {
        let values = object(json!({
            "first_name": "Jose",
            "other_names": true,
            "last_name": "Rivera",
            "birthdate": "1990-05-01"
        }));

        let err = validate(&sample_schema(), values).unwrap_err();
        assert!(matches!(err, Error::TypeMismatch { ref field, .. } if field == "other_names"));
    }

    #[test]
    fn test_collect_all_reports_every_violation() {
        let schema = sample_schema();
        let values = object(json!({ "other_names": 7, "birthdate": "not a date" }));

        let err = FieldValidator::new(&schema)
            .policy(ValidationPolicy::CollectAll)
            .validate(values)
            .unwrap_err();

        let Error::Validation(violations) = err else {
            panic!("expected collected violations");
        };
        let codes: Vec<_> = violations.iter().map(|e| e.code()).collect();
        assert_eq!(
            codes,
            vec![
                "MISSING_REQUIRED_FIELD",
                "TYPE_MISMATCH",
                "MISSING_REQUIRED_FIELD",
                "TYPE_MISMATCH"
            ]
        );
    }

    #[test]
    fn test_unknown_keys_are_kept() {
        let values = object(json!({
            "first_name": "Jose",
            "last_name": "Rivera",
            "birthdate": "1990-05-01",
            "nickname": "JR"
        }));

        let validated = validate(&sample_schema(), values).unwrap();
        assert_eq!(validated.get("nickname"), Some(&json!("JR")));
    }
}
