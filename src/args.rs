use clap::Parser;
use counter_client::domains::counter::models::ProgramArtifacts;
use counter_client::domains::counter::services::{DEFAULT_RESERVED_SIGNATURES, DEFAULT_SEED, FundingPolicy};
use counter_client::shared::config::{CliConfig, default_config_path};
use counter_client::shared::errors::CounterError;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Increment and report an on-chain counter", long_about = None)]
pub struct Args {
    #[arg(long, env = "COUNTER_CLI_CONFIG", help = "Solana CLI config file (default ~/.config/solana/cli/config.yml)")]
    pub config: Option<PathBuf>,

    #[arg(long, env = "COUNTER_RPC_URL", help = "RPC URL, overrides json_rpc_url from the CLI config")]
    pub url: Option<String>,

    #[arg(long, env = "COUNTER_KEYPAIR", help = "Payer keypair file, overrides keypair_path from the CLI config")]
    pub keypair: Option<PathBuf>,

    #[arg(
        long,
        env = "COUNTER_PROGRAM_DIR",
        default_value = ProgramArtifacts::DEFAULT_DIR,
        help = "Directory holding rust_counter.so and rust_counter-keypair.json"
    )]
    pub program_dir: PathBuf,

    #[arg(long, env = "COUNTER_SEED", default_value = DEFAULT_SEED, help = "Seed of the counter account address")]
    pub seed: String,

    #[arg(
        long,
        env = "COUNTER_RESERVED_SIGNATURES",
        default_value_t = DEFAULT_RESERVED_SIGNATURES,
        help = "Number of future signatures the payer keeps fees for"
    )]
    pub reserved_signatures: u64,
}

impl Args {
    /// CLI 설정 파일 + 명령행 override
    /// Load the CLI config and apply command line overrides
    pub fn cli_config(&self) -> Result<CliConfig, CounterError> {
        let path = self.config.clone().unwrap_or_else(default_config_path);
        let mut config = CliConfig::load_or_default(&path);

        if let Some(url) = &self.url {
            config.json_rpc_url = url.clone();
        }
        if let Some(keypair) = &self.keypair {
            config.keypair_path = keypair.to_string_lossy().into_owned();
        }

        config.validate()?;
        Ok(config)
    }

    pub fn program_artifacts(&self) -> ProgramArtifacts {
        ProgramArtifacts::new(&self.program_dir)
    }

    pub fn funding_policy(&self) -> FundingPolicy {
        FundingPolicy {
            reserved_signatures: self.reserved_signatures,
        }
    }
}
