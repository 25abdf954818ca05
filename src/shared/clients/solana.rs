use super::ledger::{FeeParameters, LedgerClient};
use anyhow::{Context, Result};
use async_trait::async_trait;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::{
    account::Account,
    commitment_config::CommitmentConfig,
    hash::Hash,
    message::Message,
    pubkey::Pubkey,
    signature::Signature,
    transaction::Transaction,
};
use std::sync::Arc;

/// Solana RPC 클라이언트
/// Solana RPC client backing `LedgerClient`
#[derive(Clone)]
pub struct SolanaClient {
    rpc_client: Arc<RpcClient>,
    rpc_url: String,
    commitment: CommitmentConfig,
}

impl SolanaClient {
    /// SolanaClient 생성 (confirmed commitment)
    /// Create SolanaClient with `confirmed` commitment
    pub fn new(rpc_url: &str) -> Self {
        Self::new_with_commitment(rpc_url, CommitmentConfig::confirmed())
    }

    pub fn new_with_commitment(rpc_url: &str, commitment: CommitmentConfig) -> Self {
        let rpc_client = Arc::new(RpcClient::new_with_commitment(
            rpc_url.to_string(),
            commitment,
        ));

        Self {
            rpc_client,
            rpc_url: rpc_url.to_string(),
            commitment,
        }
    }
}

#[async_trait]
impl LedgerClient for SolanaClient {
    fn rpc_url(&self) -> &str {
        &self.rpc_url
    }

    async fn get_version(&self) -> Result<String> {
        let version = self
            .rpc_client
            .get_version()
            .await
            .context(format!("Failed to get version from {}", self.rpc_url))?;

        Ok(version.solana_core)
    }

    async fn get_balance(&self, pubkey: &Pubkey) -> Result<u64> {
        self.rpc_client
            .get_balance(pubkey)
            .await
            .context(format!("Failed to get balance for {}", pubkey))
    }

    async fn get_recent_fee_parameters(&self) -> Result<FeeParameters> {
        // 서명 1개짜리 빈 메시지의 수수료 = 서명당 수수료
        // Fee of an empty single-signer message equals the per-signature fee
        let blockhash = self.get_latest_blockhash().await?;
        let message = Message::new_with_blockhash(&[], Some(&Pubkey::default()), &blockhash);
        let lamports_per_signature = self
            .rpc_client
            .get_fee_for_message(&message)
            .await
            .context("Failed to get fee for message")?;

        Ok(FeeParameters {
            lamports_per_signature,
        })
    }

    async fn get_minimum_balance_for_rent_exemption(&self, size_bytes: usize) -> Result<u64> {
        self.rpc_client
            .get_minimum_balance_for_rent_exemption(size_bytes)
            .await
            .context(format!(
                "Failed to get rent-exempt minimum for {} bytes",
                size_bytes
            ))
    }

    async fn get_account_info(&self, pubkey: &Pubkey) -> Result<Option<Account>> {
        // 계정이 없으면 value 가 None (에러 아님)
        let response = self
            .rpc_client
            .get_account_with_commitment(pubkey, self.commitment)
            .await
            .context(format!("Failed to get account {}", pubkey))?;

        Ok(response.value)
    }

    async fn request_airdrop(&self, pubkey: &Pubkey, lamports: u64) -> Result<Signature> {
        self.rpc_client
            .request_airdrop(pubkey, lamports)
            .await
            .context(format!("Failed to request airdrop of {} lamports to {}", lamports, pubkey))
    }

    async fn confirm_transaction(&self, signature: &Signature) -> Result<()> {
        self.rpc_client
            .poll_for_signature_with_commitment(signature, self.commitment)
            .await
            .context(format!("Failed to confirm transaction {}", signature))
    }

    async fn get_latest_blockhash(&self) -> Result<Hash> {
        self.rpc_client
            .get_latest_blockhash()
            .await
            .context("Failed to get latest blockhash")
    }

    async fn send_and_confirm_transaction(&self, transaction: &Transaction) -> Result<Signature> {
        self.rpc_client
            .send_and_confirm_transaction(transaction)
            .await
            .context("Failed to send and confirm transaction")
    }
}
