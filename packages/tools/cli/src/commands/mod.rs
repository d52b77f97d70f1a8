//! CLI 명령어 구현

pub mod add;
pub mod list;
pub mod schema;

use serde_json::{Map, Value};

use roster_core::{Error, Result};
use roster_sql::{Connection, Connector, QueryResult};

use crate::OutputFormat;

/// DB 없이 SQL만 만드는 커넥터 (`--dry-run`)
pub struct OfflineConnector;

pub struct NoConnection;

impl Connector for OfflineConnector {
    type Connection = NoConnection;

    async fn connect(&self) -> Result<NoConnection> {
        Err(Error::transport("dry run: no database connection"))
    }
}

impl Connection for NoConnection {
    async fn query(&mut self, _sql: &str, _params: &[Value]) -> Result<QueryResult> {
        Err(Error::transport("dry run: no database connection"))
    }

    async fn close(self) -> Result<()> {
        Ok(())
    }
}

/// JSON 인자 파싱
pub fn parse_json_arg(name: &str, raw: &str) -> anyhow::Result<Value> {
    serde_json::from_str(raw).map_err(|e| anyhow::anyhow!("Invalid JSON for --{}: {}", name, e))
}

/// SQL과 파라미터 출력
pub fn print_statement(sql: &str, params: &[Value], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            let out = serde_json::json!({ "sql": sql, "params": params });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        OutputFormat::Text => {
            println!("{}", sql);
            for line in param_lines(params) {
                println!("{}", line);
            }
        }
    }
    Ok(())
}

/// 실행 결과 출력
pub fn print_result(result: &QueryResult, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(result)?),
        OutputFormat::Text => {
            if result.rows.is_empty() {
                match result.last_insert_id {
                    Some(id) => println!("{} row(s) affected (id: {})", result.rows_affected, id),
                    None => println!("{} row(s) affected", result.rows_affected),
                }
            } else {
                for row in &result.rows {
                    println!("{}", format_row(row));
                }
                println!("({} rows)", result.rows.len());
            }
        }
    }
    Ok(())
}

/// `?` 자리표시자 순서대로 번호 매긴 파라미터
fn param_lines(params: &[Value]) -> Vec<String> {
    params
        .iter()
        .enumerate()
        .map(|(i, param)| format!("  ?{} = {}", i + 1, param))
        .collect()
}

fn format_row(row: &Map<String, Value>) -> String {
    row.iter()
        .map(|(k, v)| match v {
            Value::String(s) => format!("{}={}", k, s),
            other => format!("{}={}", k, other),
        })
        .collect::<Vec<_>>()
        .join("  ")
}
