//! Roster CLI (`roster`)
//!
//! HR 레코드(`agents`, `extra_fields`)를 조회하고 추가하는 운영 도구입니다.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;

use roster_core::EntityKind;

#[derive(Parser)]
#[command(name = "roster")]
#[command(author, version, about = "Roster CLI - HR record tool", long_about = None)]
struct Cli {
    /// DB config file (DBConfig.json format, overrides environment)
    #[arg(long, global = true, env = "ROSTER_CONFIG")]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, default_value = "text")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// List records of an entity
    List {
        /// Entity (agents, extra_fields)
        #[arg(value_parser = parse_entity)]
        entity: EntityKind,

        /// Columns to select (comma-separated, default: all)
        #[arg(long, value_delimiter = ',')]
        columns: Vec<String>,

        /// SELECT DISTINCT
        #[arg(long)]
        distinct: bool,

        /// Conditions as JSON object, e.g. '{"active": "= 1"}'
        #[arg(long = "where")]
        where_: Option<String>,

        /// Group by columns (comma-separated)
        #[arg(long, value_delimiter = ',')]
        group_by: Vec<String>,

        /// Sort as JSON object, e.g. '{"last_name": true}'
        #[arg(long)]
        order_by: Option<String>,

        /// Maximum rows (non-positive values are ignored)
        #[arg(long, allow_negative_numbers = true)]
        limit: Option<i64>,

        /// Print the SQL only
        #[arg(long)]
        dry_run: bool,
    },

    /// Add a record to an entity
    Add {
        /// Entity (agents, extra_fields)
        #[arg(value_parser = parse_entity)]
        entity: EntityKind,

        /// Values as JSON object
        #[arg(long, conflicts_with = "file", required_unless_present = "file")]
        data: Option<String>,

        /// JSON file with values
        #[arg(long)]
        file: Option<PathBuf>,

        /// Validate and print the statement only
        #[arg(long)]
        dry_run: bool,
    },

    /// Show the field schema of an entity
    Schema {
        /// Entity (agents, extra_fields)
        #[arg(value_parser = parse_entity)]
        entity: EntityKind,
    },
}

fn parse_entity(s: &str) -> Result<EntityKind, String> {
    match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
        "agent" | "agents" => Ok(EntityKind::Agent),
        "extra_field" | "extra_fields" => Ok(EntityKind::ExtraField),
        other => Err(format!(
            "unknown entity '{}' (expected agents or extra_fields)",
            other
        )),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // 로깅 초기화 (stdout은 결과 출력용)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "roster_cli=info,roster_sql=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::List {
            entity,
            columns,
            distinct,
            where_,
            group_by,
            order_by,
            limit,
            dry_run,
        } => {
            let args = commands::list::ListArgs {
                columns,
                distinct,
                conditions: where_,
                group_by,
                order_by,
                limit,
            };
            if dry_run {
                commands::list::dry_run(entity, &args, cli.format)
            } else {
                let db = config::load_db_config(cli.config.as_deref())?;
                commands::list::run(entity, &args, db, cli.format).await
            }
        }
        Commands::Add {
            entity,
            data,
            file,
            dry_run,
        } => {
            let values = commands::add::read_values(data.as_deref(), file.as_deref())?;
            if dry_run {
                commands::add::dry_run(entity, values, cli.format)
            } else {
                let db = config::load_db_config(cli.config.as_deref())?;
                commands::add::run(entity, values, db, cli.format).await
            }
        }
        Commands::Schema { entity } => commands::schema::show(entity, cli.format),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_entity() {
        assert_eq!(parse_entity("agents").unwrap(), EntityKind::Agent);
        assert_eq!(parse_entity("Agent").unwrap(), EntityKind::Agent);
        assert_eq!(parse_entity("extra-fields").unwrap(), EntityKind::ExtraField);
        assert!(parse_entity("payroll").is_err());
    }

    #[test]
    fn test_cli_parses_list() {
        let cli = Cli::try_parse_from([
            "roster",
            "list",
            "agents",
            "--columns",
            "first_name,last_name",
            "--where",
            r#"{"active": "= 1"}"#,
            "--limit",
            "-1",
            "--dry-run",
        ])
        .unwrap();

        match cli.command {
            Commands::List {
                entity,
                columns,
                where_,
                limit,
                dry_run,
                ..
            } => {
                assert_eq!(entity, EntityKind::Agent);
                assert_eq!(columns, vec!["first_name", "last_name"]);
                assert!(where_.is_some());
                assert_eq!(limit, Some(-1));
                assert!(dry_run);
            }
            _ => panic!("expected list command"),
        }
    }

    #[test]
    fn test_cli_add_requires_values() {
        assert!(Cli::try_parse_from(["roster", "add", "agents"]).is_err());
        assert!(Cli::try_parse_from(["roster", "add", "agents", "--data", "{}"]).is_ok());
    }
}
