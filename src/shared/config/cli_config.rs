// =====================================================
// CliConfig - Solana CLI 설정 파일
// =====================================================
// ~/.config/solana/cli/config.yml 에서 RPC URL 과 키페어 경로를 읽음
// 파일이 없거나 읽을 수 없으면 기본값 사용 (경고 출력)
//
// 예시:
//   json_rpc_url: "http://127.0.0.1:8899"
//   keypair_path: /home/user/.config/solana/id.json
// =====================================================

use crate::shared::errors::CounterError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;
use url::Url;

/// 로컬 테스트 밸리데이터 주소
pub const DEFAULT_RPC_URL: &str = "http://127.0.0.1:8899";

/// 설정 파일 경로 (~/.config/solana/cli/config.yml)
/// Default Solana CLI config file location
pub fn default_config_path() -> PathBuf {
    solana_config_dir().join("cli").join("config.yml")
}

/// 기본 키페어 경로 (~/.config/solana/id.json)
/// Default payer keypair location
pub fn default_keypair_path() -> String {
    solana_config_dir()
        .join("id.json")
        .to_string_lossy()
        .into_owned()
}

fn solana_config_dir() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".config").join("solana")
}

fn default_rpc_url() -> String {
    DEFAULT_RPC_URL.to_string()
}

/// Solana CLI 설정
/// Typed view of the Solana CLI config file
///
/// 다른 키 (websocket_url, commitment 등)는 무시
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CliConfig {
    #[serde(default = "default_rpc_url")]
    pub json_rpc_url: String,
    #[serde(default = "default_keypair_path")]
    pub keypair_path: String,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            json_rpc_url: default_rpc_url(),
            keypair_path: default_keypair_path(),
        }
    }
}

impl CliConfig {
    /// YAML 문자열 파싱 + 검증
    /// Parse and validate a YAML document
    pub fn from_yaml(yaml: &str) -> Result<Self, CounterError> {
        let config: CliConfig = serde_yaml::from_str(yaml).map_err(|e| CounterError::Config {
            message: "Failed to parse CLI config".to_string(),
            source: e.into(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// 설정 파일 읽기
    /// Load the config file at `path`
    pub fn load(path: &Path) -> Result<Self, CounterError> {
        let yaml = fs::read_to_string(path).map_err(|e| CounterError::Config {
            message: format!("Failed to read CLI config file {}", path.display()),
            source: e.into(),
        })?;

        Self::from_yaml(&yaml)
    }

    /// 설정 파일 읽기 (실패 시 기본값)
    /// Load the config file, falling back to defaults with a warning
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    path = %path.display(),
                    error = %e,
                    rpc_url = DEFAULT_RPC_URL,
                    "Failed to read CLI config file, falling back to defaults"
                );
                Self::default()
            }
        }
    }

    /// 필드 검증
    /// Validate fields once, at load time
    pub fn validate(&self) -> Result<(), CounterError> {
        let url = Url::parse(&self.json_rpc_url).map_err(|e| CounterError::Config {
            message: format!("Invalid json_rpc_url: {}", self.json_rpc_url),
            source: e.into(),
        })?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(CounterError::Config {
                message: format!("Unsupported json_rpc_url scheme: {}", url.scheme()),
                source: anyhow::anyhow!("expected http or https"),
            });
        }

        if self.keypair_path.trim().is_empty() {
            return Err(CounterError::Config {
                message: "keypair_path is empty".to_string(),
                source: anyhow::anyhow!("missing keypair path"),
            });
        }

        Ok(())
    }
}
