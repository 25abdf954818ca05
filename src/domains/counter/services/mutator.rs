use crate::shared::clients::LedgerClient;
use crate::shared::errors::CounterError;
use solana_sdk::{
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
    signature::{Keypair, Signature, Signer},
    transaction::Transaction,
};
use std::sync::Arc;
use tracing::info;

/// 카운터 증가 서비스
/// Submits the increment instruction
///
/// 재시도하지 않음: 중복 전송은 두 번 증가시킴
#[derive(Clone)]
pub struct CounterMutator {
    ledger: Arc<dyn LedgerClient>,
    program_id: Pubkey,
}

impl CounterMutator {
    pub fn new(ledger: Arc<dyn LedgerClient>, program_id: Pubkey) -> Self {
        Self { ledger, program_id }
    }

    /// 증가 instruction (데이터 없음, 카운터 계정만 writable)
    /// Increment instruction: empty payload, counter account writable and non-signing
    pub fn increment_instruction(program_id: &Pubkey, target: &Pubkey) -> Instruction {
        Instruction::new_with_bytes(*program_id, &[], vec![AccountMeta::new(*target, false)])
    }

    /// 카운터 1 증가 (확인까지 대기)
    /// Increment the counter by one and wait for confirmation
    pub async fn increment(&self, target: &Pubkey, payer: &Keypair) -> Result<Signature, CounterError> {
        let to_mutation_error = |e: anyhow::Error| CounterError::Mutation {
            address: *target,
            source: e,
        };

        let blockhash = self
            .ledger
            .get_latest_blockhash()
            .await
            .map_err(to_mutation_error)?;

        let transaction = Transaction::new_signed_with_payer(
            &[Self::increment_instruction(&self.program_id, target)],
            Some(&payer.pubkey()),
            &[payer],
            blockhash,
        );

        let signature = self
            .ledger
            .send_and_confirm_transaction(&transaction)
            .await
            .map_err(to_mutation_error)?;

        info!(address = %target, %signature, "Counter incremented");
        Ok(signature)
    }
}
