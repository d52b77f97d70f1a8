//! 레코드 추가 명령어

use std::path::Path;

use serde_json::Value;

use roster_core::{DbConfig, EntityKind};
use roster_sql::{DbEntityHandler, EntityQueryBuilder, MySqlConnector};

use crate::commands::{parse_json_arg, print_result, print_statement, OfflineConnector};
use crate::OutputFormat;

/// `--data` 또는 `--file`에서 값 읽기
pub fn read_values(data: Option<&str>, file: Option<&Path>) -> anyhow::Result<Value> {
    match (data, file) {
        (Some(raw), _) => parse_json_arg("data", raw),
        (None, Some(path)) => {
            let content = std::fs::read_to_string(path)
                .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))?;
            parse_json_arg("file", &content)
        }
        (None, None) => anyhow::bail!("Either --data or --file is required"),
    }
}

pub fn dry_run(entity: EntityKind, values: Value, format: OutputFormat) -> anyhow::Result<()> {
    let builder = EntityQueryBuilder::for_entity(entity, OfflineConnector)?;
    let plan = builder.build_insert(entity.table_name(), values)?;

    let (sql, params) = plan.render();
    print_statement(&sql, &params, format)
}

pub async fn run(
    entity: EntityKind,
    values: Value,
    config: DbConfig,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let mut builder = DbEntityHandler::for_entity(entity, MySqlConnector::new(config))?;

    let result = builder.insert(values).await.inspect_err(|err| {
        if err.is_validation() {
            tracing::warn!("Values rejected by {} schema", entity);
        }
    })?;
    match result.last_insert_id {
        Some(id) => tracing::info!("Inserted into {} (id: {})", entity, id),
        None => tracing::info!("Inserted into {}", entity),
    }

    print_result(&result, format)
}
