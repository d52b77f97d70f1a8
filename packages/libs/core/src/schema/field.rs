//! 필드 정의
//!
//! 엔티티의 필드 규칙과 선언 순서를 보존하는 필드 스키마를 정의합니다.

use serde::Serialize;
use serde_json::Value;

use super::types::FieldType;

/// 필드 규칙
///
/// 기본값이 있으면 `required`보다 우선합니다.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldRule {
    /// 필드 타입
    #[serde(rename = "type")]
    pub field_type: FieldType,

    /// 필수 여부 (기본값이 없을 때만 적용)
    pub required: bool,

    /// 값이 없을 때 채울 기본값
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
}

impl FieldRule {
    /// 타입만 지정된 선택 필드
    pub fn new(field_type: FieldType) -> Self {
        Self {
            field_type,
            required: false,
            default: None,
        }
    }

    /// 필수 필드
    pub fn required(field_type: FieldType) -> Self {
        Self {
            required: true,
            ..Self::new(field_type)
        }
    }

    /// 기본값 지정
    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }
}

impl From<FieldType> for FieldRule {
    fn from(field_type: FieldType) -> Self {
        FieldRule::new(field_type)
    }
}

/// 필드 스키마
///
/// 필드 이름 -> 규칙. 선언 순서가 검증 순서이자 INSERT 컬럼 순서입니다.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FieldSchema {
    fields: Vec<(String, FieldRule)>,
}

impl FieldSchema {
    /// 빈 스키마
    pub fn new() -> Self {
        Self::default()
    }

    /// 필드 추가 (같은 이름이 있으면 규칙 교체)
    pub fn field(mut self, name: impl Into<String>, rule: impl Into<FieldRule>) -> Self {
        self.insert(name, rule);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, rule: impl Into<FieldRule>) {
        let name = name.into();
        let rule = rule.into();
        match self.fields.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = rule,
            None => self.fields.push((name, rule)),
        }
    }

    /// 필드 규칙 조회
    pub fn get(&self, name: &str) -> Option<&FieldRule> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, rule)| rule)
    }

    /// 필드 존재 여부
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// 선언 순서대로 필드 순회
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldRule)> {
        self.fields.iter().map(|(n, rule)| (n.as_str(), rule))
    }

    /// 모든 필드 이름
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(n, _)| n.as_str())
    }

    /// 기본값 없이 필수인 필드들
    pub fn required_fields(&self) -> impl Iterator<Item = &str> {
        self.iter()
            .filter(|(_, rule)| rule.required && rule.default.is_none())
            .map(|(n, _)| n)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
