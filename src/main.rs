mod args;

use anyhow::Result;
use clap::Parser;
use counter_client::domains::counter::services::Session;
use counter_client::shared::clients::{CliKeySource, KeySource, LedgerClient, SolanaClient};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use crate::args::Args;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    // 설정 로드 (원장 쓰기 전에 실패하면 중단)
    let cli_config = args.cli_config()?;
    let keys = CliKeySource::new(&cli_config);
    let program = args.program_artifacts().load(&keys)?;
    let payer = keys.resolve_payer();

    let ledger: Arc<dyn LedgerClient> = Arc::new(SolanaClient::new(&cli_config.json_rpc_url));

    let mut session = Session::new(ledger, payer, program)
        .with_seed(&args.seed)
        .with_funding_policy(args.funding_policy());

    let report = session.run().await?;

    println!("Counter account: {}", report.counter_address);
    println!("Increment transaction: {}", report.increment_signature);
    println!("Counter: {}", report.counter);

    Ok(())
}
