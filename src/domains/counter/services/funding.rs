use crate::domains::counter::models::record_size;
use crate::shared::clients::LedgerClient;
use anyhow::Result;
use std::sync::Arc;

/// 수수료 예비 서명 수 기본값
/// Default number of prospective signatures the payer keeps fees for
pub const DEFAULT_RESERVED_SIGNATURES: u64 = 100;

/// 자금 정책
/// Funding policy
///
/// 세션이 앞으로 보낼 트랜잭션 수에 따라 `reserved_signatures` 를 조정
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FundingPolicy {
    pub reserved_signatures: u64,
}

impl Default for FundingPolicy {
    fn default() -> Self {
        Self {
            reserved_signatures: DEFAULT_RESERVED_SIGNATURES,
        }
    }
}

/// 필요 자금 내역
/// Breakdown of the lamports a payer needs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FundingRequirement {
    pub rent_exempt: u64,
    pub fee_reserve: u64,
    pub total: u64,
}

/// 수수료 / 렌트 계산기
/// Lamport cost calculator
#[derive(Clone)]
pub struct FundingCalculator {
    ledger: Arc<dyn LedgerClient>,
}

impl FundingCalculator {
    pub fn new(ledger: Arc<dyn LedgerClient>) -> Self {
        Self { ledger }
    }

    /// 렌트 면제 최소 잔액 (클러스터에 위임)
    /// Rent-exempt minimum for `size_bytes`, delegated to the ledger
    pub async fn rent_exempt_minimum(&self, size_bytes: usize) -> Result<u64> {
        self.ledger
            .get_minimum_balance_for_rent_exemption(size_bytes)
            .await
    }

    /// 트랜잭션 수수료 추정
    /// `signature_count * lamports_per_signature`
    pub fn estimate_transaction_fee(signature_count: u64, lamports_per_signature: u64) -> u64 {
        signature_count.saturating_mul(lamports_per_signature)
    }

    /// 총 필요 금액
    pub fn total_required(rent_exempt: u64, fee_estimate: u64) -> u64 {
        rent_exempt.saturating_add(fee_estimate)
    }

    /// 카운터 계정 생성 + 예비 수수료에 필요한 금액
    /// Lamports needed to create the counter account and cover the fee reserve
    pub async fn required_funding(&self, policy: &FundingPolicy) -> Result<FundingRequirement> {
        let rent_exempt = self.rent_exempt_minimum(record_size()).await?;
        let fees = self.ledger.get_recent_fee_parameters().await?;
        let fee_reserve =
            Self::estimate_transaction_fee(policy.reserved_signatures, fees.lamports_per_signature);

        Ok(FundingRequirement {
            rent_exempt,
            fee_reserve,
            total: Self::total_required(rent_exempt, fee_reserve),
        })
    }
}
