//! roster-core: Roster 공통 핵심 라이브러리
//!
//! 이 크레이트는 쿼리 빌더와 CLI가 공유하는 핵심 타입과 로직을 제공합니다.
//!
//! # 모듈 구조
//!
//! - `schema`: 엔티티 필드 스키마 및 YAML 파싱
//! - `validation`: 스키마 기반 값 검증과 기본값 채우기
//! - `entities`: HR 엔티티(`agents`, `extra_fields`) 정의
//! - `config`: DB 연결 설정
//! - `error`: 공통 에러 타입

pub mod config;
pub mod entities;
pub mod error;
pub mod schema;
pub mod validation;

pub use config::DbConfig;
pub use entities::EntityKind;
pub use error::{Error, Result};
pub use validation::{FieldValidator, ValidationPolicy};
