//! DB 커넥터 추상화
//!
//! 빌더는 SQL을 직접 실행하지 않고 이 capability를 통해서만 실행합니다.
//! `Connection::close`는 연결을 소비하므로 한 번만 호출될 수 있습니다.

use std::future::Future;
use std::sync::Arc;

use serde::Serialize;
use serde_json::{Map, Value};

use roster_core::Result;

/// 쿼리 실행 결과
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct QueryResult {
    /// SELECT 결과 행
    pub rows: Vec<Map<String, Value>>,

    /// 영향받은 행 수 (INSERT 등)
    pub rows_affected: u64,

    /// AUTO_INCREMENT로 생성된 ID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_insert_id: Option<u64>,
}

impl QueryResult {
    /// 행 결과
    pub fn from_rows(rows: Vec<Map<String, Value>>) -> Self {
        Self {
            rows,
            ..Default::default()
        }
    }
}

/// DB 커넥터
pub trait Connector: Send + Sync {
    type Connection: Connection;

    /// 연결 설정 확인 (빌더 생성 시 호출)
    fn check_config(&self) -> Result<()> {
        Ok(())
    }

    /// 새 연결 열기
    fn connect(&self) -> impl Future<Output = Result<Self::Connection>> + Send;
}

/// 열린 연결
pub trait Connection: Send {
    /// SQL 실행 (`?` 자리표시자에 params를 순서대로 바인딩)
    fn query(
        &mut self,
        sql: &str,
        params: &[Value],
    ) -> impl Future<Output = Result<QueryResult>> + Send;

    /// 연결 해제
    fn close(self) -> impl Future<Output = Result<()>> + Send;
}

impl<C: Connector> Connector for Arc<C> {
    type Connection = C::Connection;

    fn check_config(&self) -> Result<()> {
        (**self).check_config()
    }

    fn connect(&self) -> impl Future<Output = Result<Self::Connection>> + Send {
        (**self).connect()
    }
}
