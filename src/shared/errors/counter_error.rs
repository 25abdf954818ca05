use solana_sdk::pubkey::Pubkey;
use std::path::PathBuf;
use thiserror::Error;

/// 계정 데이터 디코딩 에러
/// Account payload decoding errors
#[derive(Error, Debug)]
pub enum DecodeError {
    /// 데이터 길이가 레코드 크기와 다름
    /// Payload length differs from the record size
    #[error("Wrong payload size: expected={expected} bytes, actual={actual} bytes")]
    WrongSize { expected: usize, actual: usize },

    /// borsh 디코딩 실패
    /// Payload rejected by the borsh schema
    #[error("Malformed payload: {0}")]
    Malformed(#[from] std::io::Error),
}

/// 에러 분류
/// Error kind, one per failure class
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Config,
    Connection,
    Deploy,
    Funding,
    Provisioning,
    Mutation,
    Decode,
    NotFound,
    InvalidSeed,
    Ledger,
    Session,
}

/// 카운터 클라이언트 에러
/// Counter client errors
#[derive(Error, Debug)]
pub enum CounterError {
    /// 설정 파일 / 키페어 파일을 읽을 수 없음
    /// Payer or program artifacts unreadable or malformed
    #[error("Config error: {message}")]
    Config {
        message: String,
        #[source]
        source: anyhow::Error,
    },

    /// 클러스터 연결 실패
    /// Could not reach the cluster
    #[error("Failed to connect to cluster at {rpc_url}")]
    Connection {
        rpc_url: String,
        #[source]
        source: anyhow::Error,
    },

    /// 프로그램이 배포되지 않음
    /// Program account does not exist
    #[error(
        "Program {program_id} not found, it needs to be {} with `solana program deploy {}`",
        deploy_action(.built),
        .binary_path.display()
    )]
    ProgramNotFound {
        program_id: Pubkey,
        binary_path: PathBuf,
        built: bool,
    },

    /// 프로그램 계정이 실행 가능하지 않음
    /// Program account exists but is not executable
    #[error("Program {program_id} is not executable")]
    ProgramNotExecutable { program_id: Pubkey },

    /// 프로그램 계정 조회 실패
    /// Program lookup failed
    #[error("Failed to look up program {program_id}")]
    ProgramLookup {
        program_id: Pubkey,
        #[source]
        source: anyhow::Error,
    },

    /// 잔액 조회 / 에어드랍 실패
    /// Balance query or airdrop failed
    #[error("Failed to fund payer {payer}")]
    Funding {
        payer: Pubkey,
        #[source]
        source: anyhow::Error,
    },

    /// 에어드랍 후에도 잔액 부족
    /// Balance still below the requirement after the airdrop
    #[error("Insufficient funding: required={required}, available={available}")]
    InsufficientFunding { required: u64, available: u64 },

    /// 카운터 계정 생성 실패
    /// Counter account creation failed
    #[error("Failed to provision counter account {address}")]
    Provisioning {
        address: Pubkey,
        #[source]
        source: anyhow::Error,
    },

    /// 카운터 증가 트랜잭션 실패
    /// Increment transaction failed
    #[error("Failed to increment counter account {address}")]
    Mutation {
        address: Pubkey,
        #[source]
        source: anyhow::Error,
    },

    /// 계정 데이터 디코딩 실패
    /// Counter account payload could not be decoded
    #[error("Failed to decode counter account {address}")]
    Decode {
        address: Pubkey,
        #[source]
        source: DecodeError,
    },

    /// 카운터 계정이 없음
    /// Counter account does not exist
    #[error("Cannot find counter account {address}")]
    NotFound { address: Pubkey },

    /// 시드가 유효하지 않음
    /// Seed rejected by address derivation
    #[error("Invalid seed {seed:?}: {reason}")]
    InvalidSeed { seed: String, reason: String },

    /// 읽기 전용 조회 실패
    /// Read-only ledger query failed
    #[error("Ledger query failed: {context}")]
    Ledger {
        context: String,
        #[source]
        source: anyhow::Error,
    },

    /// 세션 단계 순서 위반
    /// Session step called out of order
    #[error("Invalid session transition: {from} -> {to}")]
    InvalidTransition { from: String, to: String },
}

fn deploy_action(built: &bool) -> &'static str {
    if *built { "deployed" } else { "built and deployed" }
}

impl CounterError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CounterError::Config { .. } => ErrorKind::Config,
            CounterError::Connection { .. } => ErrorKind::Connection,
            CounterError::ProgramNotFound { .. }
            | CounterError::ProgramNotExecutable { .. }
            | CounterError::ProgramLookup { .. } => ErrorKind::Deploy,
            CounterError::Funding { .. } | CounterError::InsufficientFunding { .. } => {
                ErrorKind::Funding
            }
            CounterError::Provisioning { .. } => ErrorKind::Provisioning,
            CounterError::Mutation { .. } => ErrorKind::Mutation,
            CounterError::Decode { .. } => ErrorKind::Decode,
            CounterError::NotFound { .. } => ErrorKind::NotFound,
            CounterError::InvalidSeed { .. } => ErrorKind::InvalidSeed,
            CounterError::Ledger { .. } => ErrorKind::Ledger,
            CounterError::InvalidTransition { .. } => ErrorKind::Session,
        }
    }
}
