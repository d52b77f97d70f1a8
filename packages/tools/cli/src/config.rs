//! CLI 설정

use std::path::{Path, PathBuf};

use roster_core::DbConfig;

/// 기본 설정 파일 경로 (`~/.roster/db.json`)
fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".roster").join("db.json"))
}

/// DB 설정 결정 (설정 파일 > 환경변수)
///
/// `--config`로 지정한 파일은 반드시 있어야 하고, 기본 경로 파일은 있을 때만 읽습니다.
pub fn load_db_config(explicit: Option<&Path>) -> anyhow::Result<DbConfig> {
    let env = DbConfig::from_env()?;

    let file = match explicit {
        Some(path) => Some(read_file(path)?),
        None => match default_config_path() {
            Some(path) if path.exists() => Some(read_file(&path)?),
            _ => None,
        },
    };

    let config = match file {
        Some(file) => env.merge(file),
        None => env,
    };

    tracing::debug!("Using DB config: {:?}", config);
    Ok(config)
}

fn read_file(path: &Path) -> anyhow::Result<DbConfig> {
    DbConfig::from_json_file(path)
        .map_err(|e| anyhow::anyhow!("Failed to read config file {}: {}", path.display(), e))
}
