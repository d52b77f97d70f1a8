//! 구조화된 쿼리 버퍼
//!
//! 빌더는 SQL 문자열 대신 절(clause)별 필드를 가진 계획을 누적하고,
//! 실행 시점에 SeaQuery로 렌더링합니다. 절 교체는 필드 대입입니다.

use sea_query::{Asterisk, Expr, Iden, MysqlQueryBuilder, Order, Query, Quote, SimpleExpr};
use serde_json::Value;

use crate::params::{SelectColumn, SortOrder};

/// 동적 테이블/컬럼 식별자 (따옴표 없이 렌더링)
#[derive(Debug, Clone)]
struct DynIden(String);

impl Iden for DynIden {
    fn prepare(&self, s: &mut dyn std::fmt::Write, _q: Quote) {
        self.unquoted(s);
    }

    fn unquoted(&self, s: &mut dyn std::fmt::Write) {
        let _ = write!(s, "{}", self.0);
    }
}

/// 빌더가 보관하는 문장
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Select(SelectPlan),
    Insert(InsertPlan),
}

impl Statement {
    /// SQL 문자열과 바인딩할 값들
    pub fn render(&self) -> (String, Vec<Value>) {
        match self {
            Statement::Select(plan) => (plan.render(), Vec::new()),
            Statement::Insert(plan) => plan.render(),
        }
    }
}

/// SELECT 계획
///
/// 렌더링 순서는 호출 순서와 무관하게
/// SELECT → WHERE → GROUP BY → ORDER BY → LIMIT 입니다.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectPlan {
    pub table: String,
    pub distinct: bool,
    /// 비어 있으면 `*`
    pub columns: Vec<SelectColumn>,
    /// (필드, 비교 조각) - AND로 결합
    pub predicate: Vec<(String, String)>,
    pub group_by: Vec<String>,
    pub order_by: Vec<(String, SortOrder)>,
    pub limit: Option<u64>,
}

impl SelectPlan {
    /// `SELECT * FROM <table>`
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            distinct: false,
            columns: Vec::new(),
            predicate: Vec::new(),
            group_by: Vec::new(),
            order_by: Vec::new(),
            limit: None,
        }
    }

    pub fn render(&self) -> String {
        let mut query = Query::select();
        query.from(DynIden(self.table.clone()));

        if self.distinct {
            query.distinct();
        }

        // SELECT columns
        if self.columns.is_empty() {
            query.column(Asterisk);
        }
        for col in &self.columns {
            match (&col.function, &col.alias) {
                (None, None) => {
                    query.column(DynIden(col.name.clone()));
                }
                (Some(f), alias) => {
                    let expr = Expr::cust(format!("{}({})", f, col.name));
                    match alias {
                        Some(alias) => query.expr_as(expr, DynIden(alias.clone())),
                        None => query.expr(expr),
                    };
                }
                (None, Some(alias)) => {
                    query.expr_as(Expr::col(DynIden(col.name.clone())), DynIden(alias.clone()));
                }
            }
        }

        // WHERE
        if !self.predicate.is_empty() {
            let filters = self
                .predicate
                .iter()
                .map(|(field, condition)| format!("{} {}", field, condition))
                .collect::<Vec<_>>()
                .join(" AND ");
            query.and_where(Expr::cust(filters).into());
        }

        // GROUP BY
        if !self.group_by.is_empty() {
            query.group_by_columns(self.group_by.iter().map(|c| DynIden(c.clone())));
        }

        // ORDER BY
        for (column, order) in &self.order_by {
            let order = match order {
                SortOrder::Asc => Order::Asc,
                SortOrder::Desc => Order::Desc,
            };
            query.order_by(DynIden(column.clone()), order);
        }

        // LIMIT
        if let Some(limit) = self.limit {
            query.limit(limit);
        }

        query.to_string(MysqlQueryBuilder)
    }
}

/// INSERT 계획
///
/// 값은 문자열에 보간하지 않고 `?` 자리표시자로 바인딩합니다.
#[derive(Debug, Clone, PartialEq)]
pub struct InsertPlan {
    pub table: String,
    pub columns: Vec<String>,
    pub values: Vec<Value>,
}

impl InsertPlan {
    pub fn render(&self) -> (String, Vec<Value>) {
        let mut query = Query::insert();
        query.into_table(DynIden(self.table.clone()));
        query.columns(self.columns.iter().map(|c| DynIden(c.clone())));
        query.values_panic(self.values.iter().map(value_to_expr));

        let (sql, _) = query.build(MysqlQueryBuilder);
        (sql, self.values.clone())
    }
}

/// serde_json::Value를 SeaQuery Expr로 변환
fn value_to_expr(value: &Value) -> SimpleExpr {
    match value {
        Value::Null => Expr::val(Option::<String>::None).into(),
        Value::Bool(b) => Expr::val(*b).into(),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Expr::val(i).into()
            } else if let Some(f) = n.as_f64() {
                Expr::val(f).into()
            } else {
                Expr::val(n.to_string()).into()
            }
        }
        Value::String(s) => Expr::val(s.as_str()).into(),
        Value::Array(_) | Value::Object(_) => {
            // JSON 타입으로 직렬화
            Expr::val(value.to_string()).into()
        }
    }
}
