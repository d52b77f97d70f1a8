//! 논리적 필드 타입 정의
//!
//! 값은 `serde_json::Value`로 전달되며, 각 필드 타입은
//! 명시적인 판별 함수로 검사합니다.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// 논리적 필드 타입
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    /// 문자열
    String,

    /// 숫자 (정수/실수)
    Number,

    /// 불리언
    Boolean,

    /// 날짜 (JSON: `YYYY-MM-DD`, `YYYY-MM-DD HH:MM:SS`, RFC 3339 문자열)
    Date,

    /// 사용자 정의 판별 함수
    #[serde(skip)]
    Custom(CustomType),
}

/// 사용자 정의 타입
///
/// 이름은 에러 메시지에 사용되고, `check`가 값의 적합성을 판별합니다.
#[derive(Clone, Copy)]
pub struct CustomType {
    pub name: &'static str,
    pub check: fn(&Value) -> bool,
}

impl CustomType {
    pub const fn new(name: &'static str, check: fn(&Value) -> bool) -> Self {
        Self { name, check }
    }
}

impl fmt::Debug for CustomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomType").field("name", &self.name).finish()
    }
}

impl PartialEq for CustomType {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for CustomType {}

impl FieldType {
    /// 간단한 타입 문자열에서 파싱
    pub fn from_simple_str(s: &str) -> Option<Self> {
        match s {
            "string" | "str" | "text" => Some(FieldType::String),
            "number" | "int" | "float" => Some(FieldType::Number),
            "boolean" | "bool" => Some(FieldType::Boolean),
            "date" | "datetime" | "timestamp" => Some(FieldType::Date),
            _ => None,
        }
    }

    /// 에러 메시지용 타입 이름
    pub fn name(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Number => "number",
            FieldType::Boolean => "boolean",
            FieldType::Date => "date",
            FieldType::Custom(custom) => custom.name,
        }
    }

    /// 값이 이 타입에 맞는지
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            FieldType::String => value.is_string(),
            FieldType::Number => value.is_number(),
            FieldType::Boolean => value.is_boolean(),
            FieldType::Date => value.as_str().is_some_and(is_date_str),
            FieldType::Custom(custom) => (custom.check)(value),
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// JSON 값의 실제 타입 이름
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn is_date_str(s: &str) -> bool {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok()
        || NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").is_ok()
        || DateTime::parse_from_rfc3339(s).is_ok()
}
