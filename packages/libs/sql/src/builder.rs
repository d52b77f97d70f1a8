//! 엔티티 쿼리 빌더
//!
//! 테이블 하나와 그 FieldSchema에 묶인 fluent 빌더입니다.
//! 체인 호출은 동기적으로 쿼리 버퍼를 갱신하고, `execute`만 커넥터를
//! 통해 비동기로 실행합니다.
//!
//! # 버퍼 상태
//!
//! `EMPTY → SHAPED → [WHERE/GROUP/ORDER/LIMIT] → EXECUTING → EMPTY`
//!
//! 같은 종류의 절을 다시 지정하면 이전 절을 교체합니다.

use serde_json::{Map, Value};

use roster_core::schema::FieldSchema;
use roster_core::validation::FieldValidator;
use roster_core::{EntityKind, Error, Result};

use crate::connector::{Connection, Connector, QueryResult};
use crate::params::{self, SelectColumn, SortOrder};
use crate::plan::{InsertPlan, SelectPlan, Statement};

/// 엔티티 쿼리 빌더
///
/// 인스턴스당 동시에 하나의 쿼리만 실행합니다.
pub struct EntityQueryBuilder<C> {
    table: String,
    schema: FieldSchema,
    connector: C,
    query: Option<Statement>,
}

impl<C: Connector> EntityQueryBuilder<C> {
    /// 새 빌더 생성
    ///
    /// 커넥터 설정에 필수 키가 없으면 `ConnectionConfig` 에러를 반환합니다.
    pub fn new(schema: FieldSchema, table: impl Into<String>, connector: C) -> Result<Self> {
        connector.check_config()?;

        Ok(Self {
            table: table.into(),
            schema,
            connector,
            query: None,
        })
    }

    /// 정의된 엔티티용 빌더
    pub fn for_entity(kind: EntityKind, connector: C) -> Result<Self> {
        Self::new(kind.schema(), kind.table_name(), connector)
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn schema(&self) -> &FieldSchema {
        &self.schema
    }

    /// 현재 버퍼
    pub fn statement(&self) -> Option<&Statement> {
        self.query.as_ref()
    }

    /// 현재 버퍼를 렌더링한 SQL
    pub fn sql(&self) -> Option<String> {
        self.query.as_ref().map(|statement| statement.render().0)
    }

    /// 버퍼가 비었는지
    pub fn is_empty(&self) -> bool {
        self.query.is_none()
    }

    /// 현재 SELECT 계획 (없으면 `SELECT *`로 시작)
    fn select_plan(&mut self) -> &mut SelectPlan {
        if !matches!(self.query, Some(Statement::Select(_))) {
            self.query = Some(Statement::Select(SelectPlan::new(self.table.clone())));
        }
        match self.query {
            Some(Statement::Select(ref mut plan)) => plan,
            _ => unreachable!("select plan initialized above"),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Read path
    // ─────────────────────────────────────────────────────────────────────────

    /// `SELECT * FROM <table>`
    pub fn select_all(&mut self) -> &mut Self {
        self.select(Vec::<SelectColumn>::new())
    }

    /// `SELECT <exprs> FROM <table>` (빈 목록이면 `*`)
    ///
    /// 프로젝션만 교체하며 다른 절은 유지됩니다.
    pub fn select<I, T>(&mut self, columns: I) -> &mut Self
    where
        I: IntoIterator<Item = T>,
        T: Into<SelectColumn>,
    {
        let plan = self.select_plan();
        plan.distinct = false;
        plan.columns = columns.into_iter().map(Into::into).collect();
        self
    }

    /// `SELECT DISTINCT <exprs> FROM <table>`
    pub fn select_distinct<I, T>(&mut self, columns: I) -> &mut Self
    where
        I: IntoIterator<Item = T>,
        T: Into<SelectColumn>,
    {
        self.select(columns);
        self.select_plan().distinct = true;
        self
    }

    /// WHERE 절 지정 (AND 결합, 기존 WHERE 교체)
    ///
    /// 스키마에 없는 필드가 있으면 버퍼를 건드리지 않고 `UnknownColumn`을 반환합니다.
    pub fn r#where<I, K, V>(&mut self, conditions: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let conditions: Vec<(String, String)> = conditions
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();

        if conditions.is_empty() {
            return Ok(self);
        }

        if let Some((field, _)) = conditions.iter().find(|(f, _)| !self.schema.contains(f)) {
            return Err(Error::UnknownColumn {
                column: field.clone(),
            });
        }

        self.select_plan().predicate = conditions;
        Ok(self)
    }

    /// ORDER BY 절 지정 (`true` = ASC, 기존 ORDER BY 교체)
    pub fn order_by<I, K>(&mut self, columns: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, bool)>,
        K: Into<String>,
    {
        let columns: Vec<(String, SortOrder)> = columns
            .into_iter()
            .map(|(k, asc)| (k.into(), SortOrder::from_ascending(asc)))
            .collect();

        if !columns.is_empty() {
            self.select_plan().order_by = columns;
        }
        self
    }

    /// GROUP BY 절 지정 (기존 GROUP BY 교체)
    pub fn group_by<I, S>(&mut self, columns: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let columns: Vec<String> = columns.into_iter().map(Into::into).collect();

        if !columns.is_empty() {
            self.select_plan().group_by = columns;
        }
        self
    }

    /// LIMIT 절 지정 (양수가 아니면 무시)
    pub fn limit(&mut self, n: i64) -> &mut Self {
        if n > 0 {
            self.select_plan().limit = Some(n as u64);
        }
        self
    }

    // ─────────────────────────────────────────────────────────────────────────
    // JSON 인자 버전 (동적 호출자용)
    // ─────────────────────────────────────────────────────────────────────────

    /// `null` 또는 컬럼 배열
    pub fn select_json(&mut self, columns: &Value) -> Result<&mut Self> {
        let columns = params::parse_select_columns(columns)?;
        Ok(self.select(columns))
    }

    /// `select_json` + DISTINCT
    pub fn select_distinct_json(&mut self, columns: &Value) -> Result<&mut Self> {
        let columns = params::parse_select_columns(columns)?;
        Ok(self.select_distinct(columns))
    }

    /// `{ field: "<comparison>" }`
    pub fn where_json(&mut self, conditions: &Value) -> Result<&mut Self> {
        let conditions = params::parse_conditions(conditions)?;
        self.r#where(conditions)
    }

    /// `{ field: bool }`
    pub fn order_by_json(&mut self, columns: &Value) -> Result<&mut Self> {
        let columns = params::parse_order_by(columns)?;
        if !columns.is_empty() {
            self.select_plan().order_by = columns;
        }
        Ok(self)
    }

    /// `"col"` 또는 `["col", ...]`
    pub fn group_by_json(&mut self, columns: &Value) -> Result<&mut Self> {
        let columns = params::parse_group_by(columns)?;
        Ok(self.group_by(columns))
    }

    /// 양의 정수가 아니면 무시
    pub fn limit_json(&mut self, n: &Value) -> &mut Self {
        if let Some(n) = params::parse_limit(n) {
            self.select_plan().limit = Some(n);
        }
        self
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Write path
    // ─────────────────────────────────────────────────────────────────────────

    /// 바인딩된 테이블에 INSERT
    pub async fn insert(&mut self, values: Value) -> Result<QueryResult> {
        let table = self.table.clone();
        self.insert_into(&table, values).await
    }

    /// 스키마 검증 후 파라미터 바인딩 INSERT 실행
    pub async fn insert_into(&mut self, table: &str, values: Value) -> Result<QueryResult> {
        let plan = self.build_insert(table, values)?;
        self.query = Some(Statement::Insert(plan));
        self.execute().await
    }

    /// 검증된 INSERT 계획 생성 (실행하지 않음)
    ///
    /// 컬럼 순서는 스키마 선언 순서를 따릅니다.
    pub fn build_insert(&self, table: &str, values: Value) -> Result<InsertPlan> {
        let values: Map<String, Value> = match values {
            Value::Object(map) => map,
            _ => return Err(Error::NoInsertValues),
        };

        if let Some(field) = values.keys().find(|k| !self.schema.contains(k)) {
            return Err(Error::UnknownColumn {
                column: field.clone(),
            });
        }

        let mut validated = FieldValidator::new(&self.schema).validate(values)?;

        let mut columns = Vec::new();
        let mut bound = Vec::new();
        for name in self.schema.names() {
            match validated.remove(name) {
                Some(Value::Null) | None => {}
                Some(value) => {
                    columns.push(name.to_string());
                    bound.push(value);
                }
            }
        }

        if columns.is_empty() {
            return Err(Error::NoInsertValues);
        }

        Ok(InsertPlan {
            table: table.to_string(),
            columns,
            values: bound,
        })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Execution
    // ─────────────────────────────────────────────────────────────────────────

    /// 현재 버퍼 실행
    ///
    /// 결과와 무관하게 버퍼는 비워지고, 연결은 항상 한 번 해제됩니다.
    pub async fn execute(&mut self) -> Result<QueryResult> {
        let statement = self.query.take().ok_or(Error::EmptyQuery)?;
        let (sql, params) = statement.render();
        self.run(&sql, &params).await
    }

    /// 주어진 SQL 실행 (버퍼는 비워짐)
    pub async fn execute_sql(&mut self, sql: &str, params: &[Value]) -> Result<QueryResult> {
        self.query = None;
        self.run(sql, params).await
    }

    async fn run(&self, sql: &str, params: &[Value]) -> Result<QueryResult> {
        tracing::debug!("Executing on {}: {} ({} params)", self.table, sql, params.len());

        let mut conn = self.connector.connect().await?;
        let result = conn.query(sql, params).await;

        match conn.close().await {
            Ok(()) => result,
            Err(close_err) => {
                tracing::warn!("Failed to release connection for {}: {}", self.table, close_err);
                // 쿼리 에러가 있으면 그것을 우선
                result.and(Err(close_err))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use roster_core::DbConfig;
    use serde_json::json;

    /// 호출 횟수를 기록하는 가짜 커넥터
    #[derive(Default)]
    struct FakeState {
        connects: AtomicUsize,
        closes: AtomicUsize,
        executed: Mutex<Vec<(String, Vec<Value>)>>,
    }

    struct FakeConnector {
        state: Arc<FakeState>,
        config: DbConfig,
        fail_connect: bool,
        fail_query: bool,
        fail_close: bool,
    }

    struct FakeConnection {
        state: Arc<FakeState>,
        fail_query: bool,
        fail_close: bool,
    }

    impl FakeConnector {
        fn new(state: Arc<FakeState>) -> Self {
            Self {
                state,
                config: DbConfig {
                    host: Some("localhost".to_string()),
                    port: Some(3306),
                    database: Some("hr".to_string()),
                    user: Some("root".to_string()),
                    password: Some("secret".to_string()),
                    connect_timeout_secs: None,
                },
                fail_connect: false,
                fail_query: false,
                fail_close: false,
            }
        }
    }

    impl Connector for FakeConnector {
        type Connection = FakeConnection;

        fn check_config(&self) -> Result<()> {
            self.config.validate()
        }

        async fn connect(&self) -> Result<FakeConnection> {
            if self.fail_connect {
                return Err(Error::transport("connection refused"));
            }
            self.state.connects.fetch_add(1, Ordering::SeqCst);
            Ok(FakeConnection {
                state: self.state.clone(),
                fail_query: self.fail_query,
                fail_close: self.fail_close,
            })
        }
    }

    impl Connection for FakeConnection {
        async fn query(&mut self, sql: &str, params: &[Value]) -> Result<QueryResult> {
            self.state
                .executed
                .lock()
                .unwrap()
                .push((sql.to_string(), params.to_vec()));

            if self.fail_query {
                return Err(Error::transport("You have an error in your SQL syntax"));
            }

            if sql.starts_with("INSERT") {
                Ok(QueryResult {
                    rows: Vec::new(),
                    rows_affected: 1,
                    last_insert_id: Some(42),
                })
            } else {
                let row = json!({ "first_name": "Jose" });
                Ok(QueryResult::from_rows(vec![row.as_object().unwrap().clone()]))
            }
        }

        async fn close(self) -> Result<()> {
            self.state.closes.fetch_add(1, Ordering::SeqCst);
            if self.fail_close {
                return Err(Error::transport("connection reset by peer"));
            }
            Ok(())
        }
    }

    fn agents() -> EntityQueryBuilder<FakeConnector> {
        let state = Arc::new(FakeState::default());
        EntityQueryBuilder::for_entity(EntityKind::Agent, FakeConnector::new(state)).unwrap()
    }

    fn agent_values() -> Value {
        json!({
            "first_name": "Jose",
            "last_name": "Rivera",
            "birthdate": "1990-05-01",
            "sex": true,
            "email_address": "jose@example.com",
            "effective_hire_date": "2019-01-15"
        })
    }

    #[test]
    fn test_select_without_columns() {
        let mut builder = agents();
        builder.select_all();
        assert_eq!(builder.sql().unwrap(), "SELECT * FROM agents");

        builder.select(Vec::<&str>::new());
        assert_eq!(builder.sql().unwrap(), "SELECT * FROM agents");
    }

    #[test]
    fn test_select_columns() {
        let mut builder = agents();
        builder.select(["first_name", "last_name"]);
        assert_eq!(
            builder.sql().unwrap(),
            "SELECT first_name, last_name FROM agents"
        );
    }

    #[test]
    fn test_select_distinct() {
        let mut builder = agents();
        builder.select_distinct(["sex"]);
        assert_eq!(builder.sql().unwrap(), "SELECT DISTINCT sex FROM agents");
    }

    #[test]
    fn test_where_replaces_previous_clause() {
        let mut builder = agents();
        builder
            .select_all()
            .r#where([("first_name", "= 'Jose'")])
            .unwrap()
            .r#where([("last_name", "= 'Rivera'")])
            .unwrap();

        let sql = builder.sql().unwrap();
        assert_eq!(sql.matches("WHERE").count(), 1);
        assert!(sql.contains("last_name = 'Rivera'"));
        assert!(!sql.contains("Jose"));
    }

    #[test]
    fn test_where_joins_with_and() {
        let mut builder = agents();
        builder
            .select_all()
            .r#where([("first_name", "= 'Jose'"), ("active", "= 1")])
            .unwrap();

        assert!(builder
            .sql()
            .unwrap()
            .contains("first_name = 'Jose' AND active = 1"));
    }

    #[test]
    fn test_where_unknown_column_leaves_buffer() {
        let mut builder = agents();
        builder.select(["first_name"]);
        let before = builder.sql();

        let err = builder
            .r#where([("nonexistent_col", "= 1")])
            .map(|_| ())
            .unwrap_err();
        assert!(matches!(err, Error::UnknownColumn { ref column } if column == "nonexistent_col"));
        assert_eq!(builder.sql(), before);
    }

    #[test]
    fn test_limit_ignores_non_positive() {
        let mut builder = agents();
        builder.select_all().limit(5).limit(-1).limit(0);
        assert_eq!(builder.sql().unwrap(), "SELECT * FROM agents LIMIT 5");

        builder.limit_json(&json!("10")).limit_json(&json!(2.5));
        assert!(builder.sql().unwrap().ends_with("LIMIT 5"));
    }

    #[test]
    fn test_clauses_render_in_sql_order_regardless_of_calls() {
        let mut builder = agents();
        builder
            .limit(3)
            .order_by([("last_name", true), ("first_name", false)])
            .group_by(["sex"])
            .select(["sex"])
            .r#where([("active", "= 1")])
            .unwrap();

        let sql = builder.sql().unwrap();
        assert!(sql.starts_with("SELECT sex FROM agents WHERE"));
        let group_at = sql.find("GROUP BY sex").unwrap();
        let order_at = sql.find("ORDER BY last_name ASC, first_name DESC").unwrap();
        let limit_at = sql.find("LIMIT 3").unwrap();
        assert!(group_at < order_at && order_at < limit_at);
    }

    #[test]
    fn test_order_by_and_group_by_replace() {
        let mut builder = agents();
        builder
            .select_all()
            .order_by([("last_name", true)])
            .order_by([("birthdate", false)])
            .group_by(["sex"])
            .group_by(["active", "sex"]);

        let sql = builder.sql().unwrap();
        assert!(!sql.contains("last_name"));
        assert!(sql.contains("ORDER BY birthdate DESC"));
        assert!(sql.contains("GROUP BY active, sex"));
        assert_eq!(sql.matches("GROUP BY").count(), 1);
    }

    #[test]
    fn test_order_by_json_keeps_key_order() {
        let mut builder = agents();
        builder
            .select_all()
            .order_by_json(&json!({ "last_name": true, "first_name": false }))
            .unwrap();

        assert_eq!(
            builder.sql().unwrap(),
            "SELECT * FROM agents ORDER BY last_name ASC, first_name DESC"
        );
    }

    #[test]
    fn test_order_by_json_rejects_non_mapping() {
        let mut builder = agents();
        builder.select_all();

        let err = builder
            .order_by_json(&json!("last_name"))
            .map(|_| ())
            .unwrap_err();
        assert!(matches!(err, Error::InvalidArgumentType { .. }));

        // 빈 객체는 무시
        builder.order_by_json(&json!({})).unwrap();
        assert_eq!(builder.sql().unwrap(), "SELECT * FROM agents");
    }

    #[test]
    fn test_json_arguments() {
        let mut builder = agents();
        builder
            .select_json(&json!([{ "name": "id", "fn": "COUNT", "as": "total" }, "sex"]))
            .unwrap()
            .where_json(&json!({ "active": "= 1" }))
            .unwrap()
            .group_by_json(&json!("sex"))
            .unwrap()
            .limit_json(&json!(20));

        assert_eq!(
            builder.sql().unwrap(),
            "SELECT COUNT(id) AS total, sex FROM agents WHERE active = 1 GROUP BY sex LIMIT 20"
        );
    }

    #[test]
    fn test_build_insert_fills_defaults_in_schema_order() {
        let builder = agents();
        let plan = builder.build_insert("agents", agent_values()).unwrap();

        assert_eq!(
            plan.columns,
            vec![
                "active",
                "first_name",
                "last_name",
                "birthdate",
                "sex",
                "part_time",
                "temp",
                "email_address",
                "effective_hire_date"
            ]
        );
        assert_eq!(plan.values[0], json!(true));
        assert_eq!(plan.values[5], json!(false));

        let (sql, params) = plan.render();
        assert!(sql.starts_with("INSERT INTO agents"));
        assert_eq!(sql.matches('?').count(), plan.columns.len());
        assert_eq!(params.len(), plan.columns.len());
        assert!(!sql.contains("Rivera"));
    }

    #[test]
    fn test_build_insert_errors() {
        let builder = agents();

        let err = builder.build_insert("agents", json!("Jose")).unwrap_err();
        assert!(matches!(err, Error::NoInsertValues));

        let err = builder
            .build_insert("agents", json!({ "first_name": "Jose" }))
            .unwrap_err();
        assert!(matches!(err, Error::MissingRequiredField { ref field, .. } if field == "last_name"));

        let mut values = agent_values();
        values["sex"] = json!("male");
        let err = builder.build_insert("agents", values).unwrap_err();
        assert!(matches!(err, Error::TypeMismatch { ref field, ref actual, .. }
            if field == "sex" && actual == "string"));

        let mut values = agent_values();
        values["nickname"] = json!("JR");
        let err = builder.build_insert("agents", values).unwrap_err();
        assert!(matches!(err, Error::UnknownColumn { ref column } if column == "nickname"));
    }

    #[test]
    fn test_new_fails_on_missing_config() {
        let mut connector = FakeConnector::new(Arc::new(FakeState::default()));
        connector.config.host = None;

        let err = EntityQueryBuilder::for_entity(EntityKind::Agent, connector)
            .map(|_| ())
            .unwrap_err();
        assert!(matches!(err, Error::ConnectionConfig { ref missing_key } if missing_key == "host"));
    }

    #[tokio::test]
    async fn test_execute_resets_buffer_and_releases_connection() {
        let state = Arc::new(FakeState::default());
        let mut builder =
            EntityQueryBuilder::for_entity(EntityKind::Agent, FakeConnector::new(state.clone()))
                .unwrap();

        builder.select(["first_name"]).limit(1);
        let result = builder.execute().await.unwrap();

        assert_eq!(result.rows.len(), 1);
        assert!(builder.is_empty());
        assert_eq!(state.connects.load(Ordering::SeqCst), 1);
        assert_eq!(state.closes.load(Ordering::SeqCst), 1);

        let executed = state.executed.lock().unwrap();
        assert_eq!(executed[0].0, "SELECT first_name FROM agents LIMIT 1");
    }

    #[tokio::test]
    async fn test_execute_releases_connection_on_failure() {
        let state = Arc::new(FakeState::default());
        let mut connector = FakeConnector::new(state.clone());
        connector.fail_query = true;
        let mut builder = EntityQueryBuilder::for_entity(EntityKind::Agent, connector).unwrap();

        builder.select_all();
        let err = builder.execute().await.unwrap_err();

        assert!(matches!(err, Error::Transport(_)));
        assert!(builder.is_empty());
        assert_eq!(state.connects.load(Ordering::SeqCst), 1);
        assert_eq!(state.closes.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_execute_close_failure_after_success() {
        let state = Arc::new(FakeState::default());
        let mut connector = FakeConnector::new(state.clone());
        connector.fail_close = true;
        let mut builder = EntityQueryBuilder::for_entity(EntityKind::Agent, connector).unwrap();

        builder.select_all();
        let err = builder.execute().await.unwrap_err();

        assert!(err.to_string().contains("connection reset by peer"));
        assert!(builder.is_empty());
        assert_eq!(state.closes.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_execute_close_failure_keeps_query_error() {
        let state = Arc::new(FakeState::default());
        let mut connector = FakeConnector::new(state.clone());
        connector.fail_query = true;
        connector.fail_close = true;
        let mut builder = EntityQueryBuilder::for_entity(EntityKind::Agent, connector).unwrap();

        builder.select_all();
        let err = builder.execute().await.unwrap_err();

        assert!(err.to_string().contains("SQL syntax"));
        assert!(builder.is_empty());
        assert_eq!(state.connects.load(Ordering::SeqCst), 1);
        assert_eq!(state.closes.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_execute_connect_failure() {
        let state = Arc::new(FakeState::default());
        let mut connector = FakeConnector::new(state.clone());
        connector.fail_connect = true;
        let mut builder = EntityQueryBuilder::for_entity(EntityKind::Agent, connector).unwrap();

        builder.select_all();
        let err = builder.execute().await.unwrap_err();

        assert_eq!(err.status_code(), 500);
        assert!(builder.is_empty());
        assert_eq!(state.closes.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_execute_empty_buffer() {
        let mut builder = agents();
        let err = builder.execute().await.unwrap_err();
        assert!(matches!(err, Error::EmptyQuery));
    }

    #[tokio::test]
    async fn test_insert_binds_params_and_returns_id() {
        let state = Arc::new(FakeState::default());
        let mut builder =
            EntityQueryBuilder::for_entity(EntityKind::Agent, FakeConnector::new(state.clone()))
                .unwrap();

        let result = builder.insert(agent_values()).await.unwrap();
        assert_eq!(result.last_insert_id, Some(42));
        assert!(builder.is_empty());

        let executed = state.executed.lock().unwrap();
        let (sql, params) = &executed[0];
        assert!(sql.starts_with("INSERT INTO agents"));
        assert_eq!(params.len(), 9);
        assert_eq!(params[1], json!("Jose"));
        assert_eq!(state.closes.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_insert_validation_failure_does_not_connect() {
        let state = Arc::new(FakeState::default());
        let mut builder = EntityQueryBuilder::for_entity(
            EntityKind::ExtraField,
            FakeConnector::new(state.clone()),
        )
        .unwrap();

        let err = builder
            .insert(json!({ "agent_id": "7", "label": "Shift", "value": "Night" }))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::TypeMismatch { .. }));
        assert_eq!(state.connects.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_builder_reusable_after_execute() {
        let state = Arc::new(FakeState::default());
        let mut builder =
            EntityQueryBuilder::for_entity(EntityKind::Agent, Arc::new(FakeConnector::new(state.clone())))
                .unwrap();

        builder.select_all().limit(5);
        builder.execute().await.unwrap();

        builder.select(["last_name"]);
        assert_eq!(builder.sql().unwrap(), "SELECT last_name FROM agents");
        builder.execute().await.unwrap();

        assert_eq!(state.connects.load(Ordering::SeqCst), 2);
        assert_eq!(state.closes.load(Ordering::SeqCst), 2);
    }
}
