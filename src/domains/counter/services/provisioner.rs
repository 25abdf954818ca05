use super::address::derive_address;
use super::funding::FundingCalculator;
use crate::domains::counter::models::{DerivedAddress, record_size};
use crate::shared::clients::LedgerClient;
use crate::shared::errors::CounterError;
use solana_sdk::{
    pubkey::Pubkey,
    signature::{Keypair, Signer},
    system_instruction,
    transaction::Transaction,
};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// 카운터 계정 생성 서비스
/// Ensures the derived counter account exists on the ledger
///
/// 같은 (payer, seed, program) 에 대해 동시에 호출되면 계정 생성이 경쟁함.
/// 원장은 두 번째 생성을 거부하므로, 실패 후 계정이 존재하면 성공으로 처리
#[derive(Clone)]
pub struct AccountProvisioner {
    ledger: Arc<dyn LedgerClient>,
    funding: FundingCalculator,
}

impl AccountProvisioner {
    pub fn new(ledger: Arc<dyn LedgerClient>) -> Self {
        let funding = FundingCalculator::new(ledger.clone());
        Self { ledger, funding }
    }

    /// 계정이 없으면 생성
    /// Create the counter account unless it already exists
    ///
    /// # 처리 과정
    /// 1. 주소 파생
    /// 2. 계정 조회 (있으면 그대로 반환, 트랜잭션 없음)
    /// 3. 렌트 면제 금액 계산
    /// 4. `create_account_with_seed` 전송 및 확인
    /// 5. 실패 시 재조회 (다른 세션이 먼저 생성한 경우 성공)
    pub async fn ensure_provisioned(
        &self,
        payer: &Keypair,
        seed: &str,
        program: &Pubkey,
    ) -> Result<DerivedAddress, CounterError> {
        let target = derive_address(&payer.pubkey(), seed, program)?;

        let existing = self
            .ledger
            .get_account_info(&target.address)
            .await
            .map_err(|e| CounterError::Provisioning {
                address: target.address,
                source: e,
            })?;
        if existing.is_some() {
            debug!(address = %target, "Counter account already provisioned");
            return Ok(target);
        }

        match self.create_account(payer, &target).await {
            Ok(()) => {
                info!(address = %target, seed = %target.seed, "Created counter account");
                Ok(target)
            }
            Err(create_err) => {
                // 생성 경쟁: 다른 쪽이 먼저 만들었으면 성공
                match self.ledger.get_account_info(&target.address).await {
                    Ok(Some(_)) => {
                        warn!(
                            address = %target,
                            error = %create_err,
                            "Counter account creation lost a race, account already exists"
                        );
                        Ok(target)
                    }
                    _ => Err(CounterError::Provisioning {
                        address: target.address,
                        source: create_err,
                    }),
                }
            }
        }
    }

    async fn create_account(&self, payer: &Keypair, target: &DerivedAddress) -> anyhow::Result<()> {
        let size = record_size();
        let lamports = self.funding.rent_exempt_minimum(size).await?;

        let instruction = system_instruction::create_account_with_seed(
            &payer.pubkey(),
            &target.address,
            &target.base,
            &target.seed,
            lamports,
            size as u64,
            &target.owner,
        );

        let blockhash = self.ledger.get_latest_blockhash().await?;
        let transaction = Transaction::new_signed_with_payer(
            &[instruction],
            Some(&payer.pubkey()),
            &[payer],
            blockhash,
        );

        let signature = self.ledger.send_and_confirm_transaction(&transaction).await?;
        debug!(%signature, lamports, size, "Account creation confirmed");
        Ok(())
    }
}
