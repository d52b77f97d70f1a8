//! 쿼리 파라미터
//!
//! SELECT 컬럼 지정과 정렬 순서, 그리고 JSON 인자 파싱을 정의합니다.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use roster_core::schema::json_type_name;
use roster_core::{Error, Result};

/// SELECT 컬럼 지정
///
/// `name`, `fn(name)`, `fn(name) AS alias`, `name AS alias` 형태로 렌더링됩니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawSelectColumn")]
pub struct SelectColumn {
    /// 컬럼 이름
    pub name: String,

    /// 적용할 SQL 함수 (COUNT, SUM 등)
    #[serde(rename = "fn")]
    pub function: Option<String>,

    /// 별칭
    #[serde(rename = "as")]
    pub alias: Option<String>,
}

impl SelectColumn {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            function: None,
            alias: None,
        }
    }

    /// SQL 함수 지정
    pub fn func(mut self, function: impl Into<String>) -> Self {
        self.function = Some(function.into());
        self
    }

    /// 별칭 지정
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }
}

impl From<&str> for SelectColumn {
    fn from(name: &str) -> Self {
        SelectColumn::new(name)
    }
}

impl From<String> for SelectColumn {
    fn from(name: String) -> Self {
        SelectColumn::new(name)
    }
}

/// 문자열 또는 `{ name, fn, as }` 객체
#[derive(Deserialize)]
#[serde(untagged)]
enum RawSelectColumn {
    Name(String),
    Full {
        name: String,
        #[serde(rename = "fn")]
        function: Option<String>,
        #[serde(rename = "as")]
        alias: Option<String>,
    },
}

impl From<RawSelectColumn> for SelectColumn {
    fn from(raw: RawSelectColumn) -> Self {
        match raw {
            RawSelectColumn::Name(name) => SelectColumn::new(name),
            RawSelectColumn::Full {
                name,
                function,
                alias,
            } => SelectColumn {
                name,
                function,
                alias,
            },
        }
    }
}

/// 정렬 순서
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    /// `true` = 오름차순
    pub fn from_ascending(ascending: bool) -> Self {
        if ascending {
            SortOrder::Asc
        } else {
            SortOrder::Desc
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// JSON 인자 파싱 (HTTP/CLI 등 동적 호출자용)
// ─────────────────────────────────────────────────────────────────────────────

fn invalid_argument(param: &str, expected: &str, actual: &Value) -> Error {
    Error::InvalidArgumentType {
        param: param.to_string(),
        expected: expected.to_string(),
        actual: json_type_name(actual).to_string(),
    }
}

/// `null` | `[ "col" | { name, fn, as } ]`
pub(crate) fn parse_select_columns(value: &Value) -> Result<Vec<SelectColumn>> {
    match value {
        Value::Null => Ok(Vec::new()),
        Value::Array(items) => items
            .iter()
            .map(|item| {
                serde_json::from_value(item.clone())
                    .map_err(|_| invalid_argument("columns", "string or column object", item))
            })
            .collect(),
        other => Err(invalid_argument("columns", "array", other)),
    }
}

/// `{ field: "<comparison fragment>" }`
pub(crate) fn parse_conditions(value: &Value) -> Result<Vec<(String, String)>> {
    match value {
        Value::Null => Ok(Vec::new()),
        Value::Object(map) => map
            .iter()
            .map(|(field, condition)| match condition {
                Value::String(s) => Ok((field.clone(), s.clone())),
                other => Err(invalid_argument(field, "string", other)),
            })
            .collect(),
        other => Err(invalid_argument("conditions", "object", other)),
    }
}

/// `{ field: true(ASC) | false(DESC) }`
pub(crate) fn parse_order_by(value: &Value) -> Result<Vec<(String, SortOrder)>> {
    match value {
        Value::Null => Ok(Vec::new()),
        Value::Object(map) => map
            .iter()
            .map(|(field, ascending)| match ascending {
                Value::Bool(b) => Ok((field.clone(), SortOrder::from_ascending(*b))),
                other => Err(invalid_argument(field, "boolean", other)),
            })
            .collect(),
        other => Err(invalid_argument("columns", "object", other)),
    }
}

/// `"col"` | `[ "col", ... ]`
pub(crate) fn parse_group_by(value: &Value) -> Result<Vec<String>> {
    match value {
        Value::Null => Ok(Vec::new()),
        Value::String(s) => Ok(vec![s.clone()]),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::String(s) => Ok(s.clone()),
                other => Err(invalid_argument("columns", "string", other)),
            })
            .collect(),
        other => Err(invalid_argument("columns", "array", other)),
    }
}

/// 양의 정수만 허용, 나머지는 `None`
pub(crate) fn parse_limit(value: &Value) -> Option<u64> {
    value.as_u64().filter(|n| *n > 0)
}
