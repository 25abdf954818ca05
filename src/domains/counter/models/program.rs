use crate::shared::clients::KeySource;
use crate::shared::errors::CounterError;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::Signer;
use std::path::PathBuf;

/// 배포된 카운터 프로그램
/// Deployed counter program identity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramIdentity {
    /// 프로그램 ID (빌드 시 생성된 키페어의 공개 키)
    /// Program id, the public half of the build-time keypair
    pub id: Pubkey,
    /// 컴파일된 `.so` 경로
    /// Compiled program binary location
    pub binary_path: PathBuf,
}

/// 빌드 산출물 위치
/// Build artifacts of the counter program
///
/// `cargo build-sbf` 가 만든 `.so` 와 프로그램 키페어가 같은 디렉터리에 있음
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramArtifacts {
    program_dir: PathBuf,
}

impl ProgramArtifacts {
    pub const DEFAULT_DIR: &'static str = "dist/program";
    pub const BINARY_NAME: &'static str = "rust_counter.so";
    pub const KEYPAIR_NAME: &'static str = "rust_counter-keypair.json";

    pub fn new(program_dir: impl Into<PathBuf>) -> Self {
        Self {
            program_dir: program_dir.into(),
        }
    }

    pub fn binary_path(&self) -> PathBuf {
        self.program_dir.join(Self::BINARY_NAME)
    }

    pub fn keypair_path(&self) -> PathBuf {
        self.program_dir.join(Self::KEYPAIR_NAME)
    }

    /// 프로그램 키페어를 읽어 프로그램 ID 확인
    /// Load the program id from the build-time keypair
    pub fn load(&self, keys: &dyn KeySource) -> Result<ProgramIdentity, CounterError> {
        let keypair_path = self.keypair_path();
        let keypair = keys
            .load_keypair_from_file(&keypair_path)
            .map_err(|e| CounterError::Config {
                message: format!(
                    "Failed to read program keypair at {}, program may need to be deployed with `solana program deploy {}`",
                    keypair_path.display(),
                    self.binary_path().display()
                ),
                source: e.into(),
            })?;

        Ok(ProgramIdentity {
            id: keypair.pubkey(),
            binary_path: self.binary_path(),
        })
    }
}

impl Default for ProgramArtifacts {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DIR)
    }
}
