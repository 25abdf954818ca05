use crate::domains::counter::models::CounterRecord;
use crate::shared::clients::LedgerClient;
use crate::shared::errors::CounterError;
use solana_sdk::pubkey::Pubkey;
use std::sync::Arc;

/// 카운터 상태 조회 서비스
/// Fetches and decodes the counter account
#[derive(Clone)]
pub struct CounterReader {
    ledger: Arc<dyn LedgerClient>,
}

impl CounterReader {
    pub fn new(ledger: Arc<dyn LedgerClient>) -> Self {
        Self { ledger }
    }

    /// 카운터 조회
    /// Read the current counter value
    ///
    /// 계정이 없으면 `NotFound`, 데이터 크기가 다르면 `Decode` (0으로 대체하지 않음)
    pub async fn read(&self, target: &Pubkey) -> Result<CounterRecord, CounterError> {
        let account = self
            .ledger
            .get_account_info(target)
            .await
            .map_err(|e| CounterError::Ledger {
                context: format!("Failed to fetch counter account {}", target),
                source: e,
            })?
            .ok_or(CounterError::NotFound { address: *target })?;

        CounterRecord::decode(&account.data).map_err(|e| CounterError::Decode {
            address: *target,
            source: e,
        })
    }
}
