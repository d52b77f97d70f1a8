//! 스키마 조회 명령어

use serde_json::json;

use roster_core::EntityKind;

use crate::OutputFormat;

pub fn show(entity: EntityKind, format: OutputFormat) -> anyhow::Result<()> {
    let schema = entity.schema();

    match format {
        OutputFormat::Json => {
            let fields: Vec<_> = schema
                .iter()
                .map(|(name, rule)| {
                    json!({
                        "name": name,
                        "type": rule.field_type.name(),
                        "required": rule.required,
                        "default": rule.default,
                    })
                })
                .collect();
            let out = json!({ "entity": entity.table_name(), "fields": fields });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        OutputFormat::Text => {
            println!("{} ({} fields)", entity.table_name(), schema.len());
            for (name, rule) in schema.iter() {
                let mut line = format!("  {:<24} {}", name, rule.field_type);
                if rule.required {
                    line.push_str("  required");
                }
                if let Some(default) = &rule.default {
                    line.push_str(&format!("  default={}", default));
                }
                println!("{}", line);
            }
        }
    }

    Ok(())
}
