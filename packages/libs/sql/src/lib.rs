//! roster-sql: 엔티티 쿼리 빌더
//!
//! 엔티티 스키마에 묶인 fluent 빌더로 SELECT/INSERT를 구성하고,
//! 커넥터를 통해 실행합니다. SQL 렌더링은 SeaQuery(MySQL 방언)를 사용합니다.
//!
//! # 모듈 구조
//!
//! - `builder`: `EntityQueryBuilder`
//! - `plan`: 구조화된 쿼리 버퍼와 렌더링
//! - `params`: 컬럼/정렬 지정과 JSON 인자 파싱
//! - `connector`: 커넥터 추상화
//! - `mysql`: sqlx 기반 MySQL 커넥터

pub mod builder;
pub mod connector;
pub mod mysql;
pub mod params;
pub mod plan;

pub use builder::EntityQueryBuilder;
pub use connector::{Connection, Connector, QueryResult};
pub use mysql::MySqlConnector;
pub use params::{SelectColumn, SortOrder};
pub use plan::{InsertPlan, SelectPlan, Statement};

/// 엔티티 핸들러 (MySQL 커넥터에 묶인 빌더)
pub type DbEntityHandler = EntityQueryBuilder<MySqlConnector>;
