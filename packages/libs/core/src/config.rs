//! DB 연결 설정
//!
//! 환경변수(`ROSTER_DB_*`) 또는 JSON 파일(`DBConfig.json` 형식)에서 로드합니다.

use std::env;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// 기본 연결 타임아웃 (초)
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// DB 연결 설정
///
/// 로드 시점에는 모든 값이 선택이며, `validate`에서 필수 키를 확인합니다.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct DbConfig {
    /// DB 호스트
    #[serde(default)]
    pub host: Option<String>,

    /// DB 포트
    #[serde(default)]
    pub port: Option<u16>,

    /// 데이터베이스 이름
    #[serde(default)]
    pub database: Option<String>,

    /// 사용자
    #[serde(default)]
    pub user: Option<String>,

    /// 비밀번호
    #[serde(default)]
    pub password: Option<String>,

    /// 연결 타임아웃 (초)
    #[serde(default)]
    pub connect_timeout_secs: Option<u64>,
}

impl DbConfig {
    /// 환경변수에서 설정 로드
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            host: env::var("ROSTER_DB_HOST").ok(),
            port: parse_env("ROSTER_DB_PORT")?,
            database: env::var("ROSTER_DB_DATABASE").ok(),
            user: env::var("ROSTER_DB_USER").ok(),
            password: env::var("ROSTER_DB_PASSWORD").ok(),
            connect_timeout_secs: parse_env("ROSTER_DB_CONNECT_TIMEOUT")?,
        })
    }

    /// JSON 파일에서 설정 로드
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// 다른 설정의 값으로 덮어쓰기 (지정된 값만)
    pub fn merge(mut self, other: DbConfig) -> Self {
        self.host = other.host.or(self.host);
        self.port = other.port.or(self.port);
        self.database = other.database.or(self.database);
        self.user = other.user.or(self.user);
        self.password = other.password.or(self.password);
        self.connect_timeout_secs = other.connect_timeout_secs.or(self.connect_timeout_secs);
        self
    }

    /// 필수 키 확인 (host, port, database, user, password 순)
    pub fn validate(&self) -> Result<()> {
        let present = [
            ("host", non_empty(&self.host)),
            ("port", self.port.is_some_and(|p| p != 0)),
            ("database", non_empty(&self.database)),
            ("user", non_empty(&self.user)),
            ("password", non_empty(&self.password)),
        ];

        match present.iter().find(|(_, ok)| !ok) {
            Some((key, _)) => Err(Error::ConnectionConfig {
                missing_key: key.to_string(),
            }),
            None => Ok(()),
        }
    }

    /// 연결 타임아웃
    pub fn connect_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(
            self.connect_timeout_secs
                .unwrap_or(DEFAULT_CONNECT_TIMEOUT_SECS),
        )
    }
}

// 비밀번호 노출 방지
impl std::fmt::Debug for DbConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DbConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .finish()
    }
}

fn non_empty(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.trim().is_empty())
}

fn parse_env<T: std::str::FromStr>(key: &str) -> Result<Option<T>> {
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| Error::InvalidConfigValue {
                key: key.to_string(),
                value: raw,
            }),
        Err(_) => Ok(None),
    }
}
