//! 레코드 조회 명령어

use roster_core::{DbConfig, EntityKind};
use roster_sql::{Connector, DbEntityHandler, EntityQueryBuilder, MySqlConnector};

use crate::commands::{parse_json_arg, print_result, print_statement, OfflineConnector};
use crate::OutputFormat;

/// `roster list` 옵션
#[derive(Debug, Default)]
pub struct ListArgs {
    pub columns: Vec<String>,
    pub distinct: bool,
    pub conditions: Option<String>,
    pub group_by: Vec<String>,
    pub order_by: Option<String>,
    pub limit: Option<i64>,
}

/// 옵션을 빌더 호출로 변환
fn shape<C: Connector>(builder: &mut EntityQueryBuilder<C>, args: &ListArgs) -> anyhow::Result<()> {
    if args.distinct {
        builder.select_distinct(args.columns.iter().map(String::as_str));
    } else {
        builder.select(args.columns.iter().map(String::as_str));
    }

    if let Some(raw) = &args.conditions {
        builder.where_json(&parse_json_arg("where", raw)?)?;
    }

    builder.group_by(args.group_by.iter().map(String::as_str));

    if let Some(raw) = &args.order_by {
        builder.order_by_json(&parse_json_arg("order-by", raw)?)?;
    }

    if let Some(n) = args.limit {
        builder.limit(n);
    }

    Ok(())
}

pub fn dry_run(entity: EntityKind, args: &ListArgs, format: OutputFormat) -> anyhow::Result<()> {
    let mut builder = EntityQueryBuilder::for_entity(entity, OfflineConnector)?;
    shape(&mut builder, args)?;

    let sql = builder.sql().unwrap_or_default();
    print_statement(&sql, &[], format)
}

pub async fn run(
    entity: EntityKind,
    args: &ListArgs,
    config: DbConfig,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let mut builder = DbEntityHandler::for_entity(entity, MySqlConnector::new(config))?;
    shape(&mut builder, args)?;

    let result = builder.execute().await?;
    tracing::info!("Fetched {} rows from {}", result.rows.len(), entity);

    print_result(&result, format)
}
