//! HR 엔티티 정의
//!
//! 로스터 화면이 다루는 테이블과 그 필드 스키마입니다.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::schema::{FieldRule, FieldSchema, FieldType};

/// 엔티티 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    /// 상담원 (`agents`)
    Agent,

    /// 상담원별 추가 필드 (`extra_fields`)
    ExtraField,
}

impl EntityKind {
    /// 테이블 이름
    pub fn table_name(&self) -> &'static str {
        match self {
            EntityKind::Agent => "agents",
            EntityKind::ExtraField => "extra_fields",
        }
    }

    /// 필드 스키마
    pub fn schema(&self) -> FieldSchema {
        match self {
            EntityKind::Agent => agent_schema(),
            EntityKind::ExtraField => extra_field_schema(),
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table_name())
    }
}

/// `agents` 스키마
pub fn agent_schema() -> FieldSchema {
    use FieldType::*;

    FieldSchema::new()
        .field("active", FieldRule::new(Boolean).with_default(true))
        .field("first_name", FieldRule::required(String))
        .field("other_names", String)
        .field("last_name", FieldRule::required(String))
        .field("other_surnames", String)
        .field("birthdate", FieldRule::required(Date))
        .field("sex", FieldRule::required(Boolean))
        .field("part_time", FieldRule::new(Boolean).with_default(false))
        .field("temp", FieldRule::new(Boolean).with_default(false))
        .field("rehirable", Boolean)
        .field("emergency_contact", String)
        .field("emergency_phone", String)
        .field("email_address", FieldRule::required(String))
        .field("effective_hire_date", FieldRule::required(Date))
        .field("termination_date", Date)
        .field("termination_type", Boolean)
        .field("termination_comments", String)
}

/// `extra_fields` 스키마
pub fn extra_field_schema() -> FieldSchema {
    FieldSchema::new()
        .field("agent_id", FieldRule::required(FieldType::Number))
        .field("label", FieldRule::required(FieldType::String))
        .field("value", FieldRule::required(FieldType::String))
}
