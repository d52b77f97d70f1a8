//! 스키마 YAML 파서
//!
//! `field: type` 또는 `field: { type, required, default }` 형태의 YAML을
//! 선언 순서를 보존하며 FieldSchema로 변환합니다.

use serde::Deserialize;
use serde_json::Value;

use super::field::{FieldRule, FieldSchema};
use super::types::FieldType;
use crate::error::{Error, Result};

/// 스키마 파서
pub struct SchemaParser;

impl SchemaParser {
    /// 단일 YAML 문자열 파싱
    pub fn parse_yaml(yaml: &str) -> Result<FieldSchema> {
        let mapping: serde_yaml::Mapping = serde_yaml::from_str(yaml)?;
        let mut schema = FieldSchema::new();

        for (key, raw) in mapping {
            let name = key
                .as_str()
                .map(str::to_string)
                .ok_or_else(|| Error::SchemaParse {
                    message: format!("field name must be a string, got {:?}", key),
                })?;

            let raw: RawFieldRule = serde_yaml::from_value(raw)?;
            let rule = Self::convert_raw_rule(raw)?;
            schema.insert(name, rule);
        }

        Ok(schema)
    }

    /// Raw 필드 규칙 변환
    fn convert_raw_rule(raw: RawFieldRule) -> Result<FieldRule> {
        match raw {
            RawFieldRule::Tag(type_name) => Ok(FieldRule::new(Self::parse_field_type(&type_name)?)),
            RawFieldRule::Record {
                field_type,
                required,
                default,
            } => {
                let field_type = Self::parse_field_type(&field_type)?;

                // 기본값 자체도 타입을 만족해야 함
                if let Some(ref value) = default {
                    if !field_type.matches(value) {
                        return Err(Error::SchemaParse {
                            message: format!(
                                "default {} does not match type {}",
                                value, field_type
                            ),
                        });
                    }
                }

                Ok(FieldRule {
                    field_type,
                    required: required.unwrap_or(false),
                    default,
                })
            }
        }
    }

    fn parse_field_type(type_name: &str) -> Result<FieldType> {
        FieldType::from_simple_str(type_name).ok_or_else(|| Error::InvalidFieldType {
            type_name: type_name.to_string(),
        })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Raw YAML 구조체 (serde 역직렬화용)
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawFieldRule {
    Tag(String),
    Record {
        #[serde(rename = "type")]
        field_type: String,
        required: Option<bool>,
        default: Option<Value>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_yaml_schema() {
        let yaml = r#"
active: { type: boolean, default: true }
first_name: { type: string, required: true }
other_names: string
birthdate:
  type: date
  required: true
"#;
        let schema = SchemaParser::parse_yaml(yaml).unwrap();
        let names: Vec<_> = schema.names().collect();
        assert_eq!(names, vec!["active", "first_name", "other_names", "birthdate"]);

        let active = schema.get("active").unwrap();
        assert_eq!(active.field_type, FieldType::Boolean);
        assert_eq!(active.default, Some(json!(true)));

        let other = schema.get("other_names").unwrap();
        assert!(!other.required);
        assert!(other.default.is_none());

        assert!(schema.get("birthdate").unwrap().required);
    }

    #[test]
    fn test_parse_unknown_type() {
        let err = SchemaParser::parse_yaml("first_name: varchar").unwrap_err();
        assert!(matches!(err, Error::InvalidFieldType { ref type_name } if type_name == "varchar"));
    }

    #[test]
    fn test_parse_default_type_mismatch() {
        let err = SchemaParser::parse_yaml("active: { type: boolean, default: yes_please }")
            .unwrap_err();
        assert!(matches!(err, Error::SchemaParse { .. }));
    }
}
