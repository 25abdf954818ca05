use crate::shared::config::CliConfig;
use crate::shared::errors::CounterError;
use solana_sdk::signature::{Keypair, Signer};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// 서명 키 공급자
/// Source of signing identities
pub trait KeySource {
    /// 수수료 지불자 키페어 (실패 시 새 키페어 생성)
    /// Resolve the payer, falling back to a freshly generated keypair
    fn resolve_payer(&self) -> Keypair;

    /// 파일에서 키페어 읽기
    /// Load a keypair from a JSON file of 64 secret key bytes
    fn load_keypair_from_file(&self, path: &Path) -> Result<Keypair, CounterError>;
}

/// Solana CLI 설정 기반 키 공급자
/// Key source backed by the Solana CLI config
#[derive(Debug, Clone)]
pub struct CliKeySource {
    keypair_path: PathBuf,
}

impl CliKeySource {
    pub fn new(config: &CliConfig) -> Self {
        Self {
            keypair_path: PathBuf::from(&config.keypair_path),
        }
    }
}

impl KeySource for CliKeySource {
    fn resolve_payer(&self) -> Keypair {
        match self.load_keypair_from_file(&self.keypair_path) {
            Ok(keypair) => {
                info!(payer = %keypair.pubkey(), path = %self.keypair_path.display(), "Payer keypair loaded");
                keypair
            }
            Err(e) => {
                let keypair = Keypair::new();
                warn!(
                    error = %e,
                    payer = %keypair.pubkey(),
                    "Failed to create keypair from CLI config file, using a random keypair"
                );
                keypair
            }
        }
    }

    fn load_keypair_from_file(&self, path: &Path) -> Result<Keypair, CounterError> {
        read_keypair_json(path)
    }
}

/// JSON 배열 형식 키페어 파일 읽기 (`solana-keygen` 출력 형식)
/// Read a keypair file in `solana-keygen` JSON array format
pub fn read_keypair_json(path: &Path) -> Result<Keypair, CounterError> {
    let json = fs::read_to_string(path).map_err(|e| CounterError::Config {
        message: format!("Failed to read keypair file {}", path.display()),
        source: e.into(),
    })?;

    let secret_key: Vec<u8> = serde_json::from_str(&json).map_err(|e| CounterError::Config {
        message: format!("Keypair file {} is not a JSON byte array", path.display()),
        source: e.into(),
    })?;

    Keypair::from_bytes(&secret_key).map_err(|e| CounterError::Config {
        message: format!("Keypair file {} holds an invalid secret key", path.display()),
        source: anyhow::anyhow!(e.to_string()),
    })
}
