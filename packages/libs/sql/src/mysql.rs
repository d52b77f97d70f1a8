//! MySQL 커넥터
//!
//! 실행마다 새 연결을 열고, 실행이 끝나면 닫습니다.

use serde_json::{Map, Value};
use sqlx::mysql::{MySqlArguments, MySqlConnectOptions, MySqlRow};
use sqlx::query::Query;
use sqlx::{Column, Connection as _, MySql, MySqlConnection, Row, TypeInfo};

use roster_core::{DbConfig, Error, Result};

use crate::connector::{Connection, Connector, QueryResult};

/// sqlx 기반 MySQL 커넥터
#[derive(Debug, Clone)]
pub struct MySqlConnector {
    config: DbConfig,
}

impl MySqlConnector {
    pub fn new(config: DbConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DbConfig {
        &self.config
    }

    fn connect_options(&self) -> Result<MySqlConnectOptions> {
        self.config.validate()?;

        let missing = |key: &str| Error::ConnectionConfig {
            missing_key: key.to_string(),
        };

        Ok(MySqlConnectOptions::new()
            .host(self.config.host.as_deref().ok_or_else(|| missing("host"))?)
            .port(self.config.port.ok_or_else(|| missing("port"))?)
            .database(
                self.config
                    .database
                    .as_deref()
                    .ok_or_else(|| missing("database"))?,
            )
            .username(self.config.user.as_deref().ok_or_else(|| missing("user"))?)
            .password(
                self.config
                    .password
                    .as_deref()
                    .ok_or_else(|| missing("password"))?,
            ))
    }
}

impl Connector for MySqlConnector {
    type Connection = MySqlSession;

    fn check_config(&self) -> Result<()> {
        self.config.validate()
    }

    async fn connect(&self) -> Result<MySqlSession> {
        let options = self.connect_options()?;
        let timeout = self.config.connect_timeout();

        let conn = tokio::time::timeout(timeout, MySqlConnection::connect_with(&options))
            .await
            .map_err(|_| {
                Error::transport(format!(
                    "connection to {}:{} timed out after {}s",
                    options.get_host(),
                    options.get_port(),
                    timeout.as_secs()
                ))
            })?
            .map_err(Error::transport)?;

        tracing::debug!("Connected to MySQL {}:{}", options.get_host(), options.get_port());
        Ok(MySqlSession { conn })
    }
}

/// 열린 MySQL 연결
pub struct MySqlSession {
    conn: MySqlConnection,
}

impl Connection for MySqlSession {
    async fn query(&mut self, sql: &str, params: &[Value]) -> Result<QueryResult> {
        let query = bind_values(sqlx::query(sql), params);

        if returns_rows(sql) {
            let rows = query
                .fetch_all(&mut self.conn)
                .await
                .map_err(Error::transport)?;
            Ok(QueryResult::from_rows(rows.iter().map(row_to_json).collect()))
        } else {
            let done = query
                .execute(&mut self.conn)
                .await
                .map_err(Error::transport)?;
            Ok(QueryResult {
                rows: Vec::new(),
                rows_affected: done.rows_affected(),
                last_insert_id: Some(done.last_insert_id()).filter(|id| *id > 0),
            })
        }
    }

    async fn close(self) -> Result<()> {
        self.conn.close().await.map_err(Error::transport)
    }
}

/// 결과 행을 반환하는 문장인지
fn returns_rows(sql: &str) -> bool {
    let keyword = sql
        .trim_start()
        .split_whitespace()
        .next()
        .unwrap_or_default()
        .to_ascii_uppercase();

    matches!(
        keyword.as_str(),
        "SELECT" | "SHOW" | "DESCRIBE" | "DESC" | "EXPLAIN" | "WITH"
    )
}

fn bind_values<'q>(
    mut query: Query<'q, MySql, MySqlArguments>,
    values: &[Value],
) -> Query<'q, MySql, MySqlArguments> {
    for value in values {
        match value {
            Value::Null => {
                let v: Option<String> = None;
                query = query.bind(v);
            }
            Value::Bool(b) => query = query.bind(*b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    query = query.bind(i);
                } else if let Some(u) = n.as_u64() {
                    query = query.bind(u);
                } else if let Some(f) = n.as_f64() {
                    query = query.bind(f);
                } else {
                    query = query.bind(n.to_string());
                }
            }
            Value::String(s) => query = query.bind(s.clone()),
            Value::Array(_) | Value::Object(_) => {
                query = query.bind(sqlx::types::Json(value.clone()));
            }
        }
    }
    query
}

fn row_to_json(row: &MySqlRow) -> Map<String, Value> {
    let mut obj = Map::new();
    for column in row.columns() {
        let name = column.name();
        let type_name = column.type_info().name().to_ascii_uppercase();
        let value = match type_name.as_str() {
            "BOOLEAN" => row
                .try_get::<Option<bool>, _>(name)
                .ok()
                .flatten()
                .map(Value::Bool),
            "TINYINT" | "SMALLINT" | "MEDIUMINT" | "INT" | "BIGINT" | "YEAR" => row
                .try_get::<Option<i64>, _>(name)
                .ok()
                .flatten()
                .map(|v| Value::Number(v.into())),
            "TINYINT UNSIGNED" | "SMALLINT UNSIGNED" | "MEDIUMINT UNSIGNED" | "INT UNSIGNED"
            | "BIGINT UNSIGNED" => row
                .try_get::<Option<u64>, _>(name)
                .ok()
                .flatten()
                .map(|v| Value::Number(v.into())),
            "FLOAT" | "DOUBLE" => row
                .try_get::<Option<f64>, _>(name)
                .ok()
                .flatten()
                .and_then(serde_json::Number::from_f64)
                .map(Value::Number),
            "JSON" => row.try_get::<Option<Value>, _>(name).ok().flatten(),
            "DATE" => row
                .try_get::<Option<chrono::NaiveDate>, _>(name)
                .ok()
                .flatten()
                .map(|v| Value::String(v.format("%Y-%m-%d").to_string())),
            "DATETIME" => row
                .try_get::<Option<chrono::NaiveDateTime>, _>(name)
                .ok()
                .flatten()
                .map(|v| Value::String(v.format("%Y-%m-%d %H:%M:%S").to_string())),
            "TIMESTAMP" => row
                .try_get::<Option<chrono::DateTime<chrono::Utc>>, _>(name)
                .ok()
                .flatten()
                .map(|v| Value::String(v.to_rfc3339())),
            // DECIMAL 등은 문자열 그대로
            _ => row
                .try_get_unchecked::<Option<String>, _>(name)
                .ok()
                .flatten()
                .map(Value::String),
        }
        .unwrap_or(Value::Null);

        obj.insert(name.to_string(), value);
    }
    obj
}
