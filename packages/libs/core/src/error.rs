//! 공통 에러 타입
//!
//! 스키마 검증, 쿼리 빌더, 커넥터가 공유하는 에러 타입을 정의합니다.

use thiserror::Error;

use crate::schema::FieldType;

pub type Result<T> = std::result::Result<T, Error>;

/// 전송 계층(DB 드라이버) 에러
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Roster 공통 에러
#[derive(Debug, Error)]
pub enum Error {
    // ─────────────────────────────────────────────────────────────────────────────
    // Validation Errors
    // ─────────────────────────────────────────────────────────────────────────────
    #[error("{field} of type {expected} is required")]
    MissingRequiredField { field: String, expected: FieldType },

    #[error("{field} must be of type {expected} but {actual} was provided")]
    TypeMismatch {
        field: String,
        expected: FieldType,
        actual: String,
    },

    #[error("invalid column name: {column}. It does not exist in the entity schema")]
    UnknownColumn { column: String },

    #[error("invalid argument {param}: expected {expected} but {actual} was provided")]
    InvalidArgumentType {
        param: String,
        expected: String,
        actual: String,
    },

    #[error("insert requires a non-empty object of values")]
    NoInsertValues,

    #[error("query buffer is empty")]
    EmptyQuery,

    #[error("validation failed: {}", join_errors(.0))]
    Validation(Vec<Error>),

    // ─────────────────────────────────────────────────────────────────────────────
    // Schema Errors
    // ─────────────────────────────────────────────────────────────────────────────
    #[error("schema parse error: {message}")]
    SchemaParse { message: String },

    #[error("invalid field type: {type_name}")]
    InvalidFieldType { type_name: String },

    // ─────────────────────────────────────────────────────────────────────────────
    // Config Errors
    // ─────────────────────────────────────────────────────────────────────────────
    #[error("missing {missing_key} for database connection")]
    ConnectionConfig { missing_key: String },

    #[error("invalid value for {key}: {value}")]
    InvalidConfigValue { key: String, value: String },

    // ─────────────────────────────────────────────────────────────────────────────
    // Transport Errors
    // ─────────────────────────────────────────────────────────────────────────────
    #[error("transport error: {0}")]
    Transport(#[source] BoxError),

    // ─────────────────────────────────────────────────────────────────────────────
    // IO/Serialization Errors
    // ─────────────────────────────────────────────────────────────────────────────
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

fn join_errors(errors: &[Error]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

impl Error {
    /// 드라이버 에러를 전송 에러로 감싸기
    pub fn transport(err: impl Into<BoxError>) -> Self {
        Error::Transport(err.into())
    }

    /// 검증 단계에서 발생한 에러인지
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Error::MissingRequiredField { .. }
                | Error::TypeMismatch { .. }
                | Error::UnknownColumn { .. }
                | Error::InvalidArgumentType { .. }
                | Error::NoInsertValues
                | Error::Validation(_)
        )
    }

    /// HTTP 상태 코드로 변환
    pub fn status_code(&self) -> u16 {
        match self {
            // 400 Bad Request
            Error::MissingRequiredField { .. }
            | Error::TypeMismatch { .. }
            | Error::UnknownColumn { .. }
            | Error::InvalidArgumentType { .. }
            | Error::NoInsertValues
            | Error::EmptyQuery
            | Error::Validation(_)
            | Error::SchemaParse { .. }
            | Error::InvalidFieldType { .. }
            | Error::ConnectionConfig { .. }
            | Error::InvalidConfigValue { .. }
            | Error::Yaml(_)
            | Error::Json(_) => 400,

            // 500 Internal Server Error
            Error::Transport(_) | Error::Io(_) => 500,
        }
    }

    /// 에러 코드 (클라이언트용)
    pub fn code(&self) -> &'static str {
        match self {
            Error::MissingRequiredField { .. } => "MISSING_REQUIRED_FIELD",
            Error::TypeMismatch { .. } => "TYPE_MISMATCH",
            Error::UnknownColumn { .. } => "UNKNOWN_COLUMN",
            Error::InvalidArgumentType { .. } => "INVALID_ARGUMENT_TYPE",
            Error::NoInsertValues => "NO_INSERT_VALUES",
            Error::EmptyQuery => "EMPTY_QUERY",
            Error::Validation(_) => "VALIDATION_FAILED",
            Error::SchemaParse { .. } => "SCHEMA_PARSE_ERROR",
            Error::InvalidFieldType { .. } => "INVALID_FIELD_TYPE",
            Error::ConnectionConfig { .. } => "CONNECTION_CONFIG_ERROR",
            Error::InvalidConfigValue { .. } => "INVALID_CONFIG_VALUE",
            Error::Transport(_) => "TRANSPORT_ERROR",
            Error::Io(_) => "IO_ERROR",
            Error::Yaml(_) => "YAML_ERROR",
            Error::Json(_) => "JSON_ERROR",
        }
    }
}
