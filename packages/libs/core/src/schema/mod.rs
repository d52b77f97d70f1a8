//! 엔티티 필드 스키마
//!
//! # 모듈 구조
//!
//! - `types`: 논리적 필드 타입 (string, number, boolean, date, custom)
//! - `field`: 필드 규칙과 선언 순서를 보존하는 스키마
//! - `parser`: YAML 파싱 로직

mod field;
mod parser;
mod types;

pub use field::{FieldRule, FieldSchema};
pub use parser::SchemaParser;
pub use types::{json_type_name, CustomType, FieldType};
