// Config module: Solana CLI 설정 파일
pub mod cli_config;

pub use cli_config::*;
