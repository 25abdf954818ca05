// =====================================================
// LedgerClient trait (원장 클라이언트 인터페이스)
// =====================================================
// 카운터 서비스는 이 trait만 사용하여 클러스터와 통신합니다.
// - SolanaClient: 실제 RPC 구현
// - 테스트: 메모리 기반 Mock 구현
// =====================================================

use anyhow::Result;
use async_trait::async_trait;
use solana_sdk::{
    account::Account, hash::Hash, pubkey::Pubkey, signature::Signature,
    transaction::Transaction,
};

/// 수수료 파라미터
/// Recent fee parameters reported by the cluster
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeeParameters {
    pub lamports_per_signature: u64,
}

/// 원장 클라이언트 인터페이스
/// Ledger client interface
///
/// 모든 호출은 클러스터가 응답할 때까지 대기합니다.
/// 확인(confirmation) 대기 정책은 구현체가 가진 commitment 설정을 따릅니다.
#[async_trait]
pub trait LedgerClient: Send + Sync {
    /// 클러스터 주소 (로그 / 에러 메시지용)
    /// Cluster endpoint, used in logs and error messages
    fn rpc_url(&self) -> &str;

    /// 노드 버전 조회 (연결 확인용)
    /// Get node version, used as the connection check
    async fn get_version(&self) -> Result<String>;

    /// 잔액 조회 (lamports)
    /// Get balance in lamports
    async fn get_balance(&self, pubkey: &Pubkey) -> Result<u64>;

    /// 서명당 수수료 조회
    /// Get current per-signature fee
    async fn get_recent_fee_parameters(&self) -> Result<FeeParameters>;

    /// 렌트 면제 최소 잔액 조회
    /// Get the rent-exempt minimum balance for an account of `size_bytes`
    async fn get_minimum_balance_for_rent_exemption(&self, size_bytes: usize) -> Result<u64>;

    /// 계정 정보 조회 (없으면 None)
    /// Get account information, `None` when the account does not exist
    async fn get_account_info(&self, pubkey: &Pubkey) -> Result<Option<Account>>;

    /// 에어드랍 요청
    /// Request an airdrop, returns the airdrop transaction signature
    async fn request_airdrop(&self, pubkey: &Pubkey, lamports: u64) -> Result<Signature>;

    /// 트랜잭션 확인 대기
    /// Wait until the transaction is confirmed
    async fn confirm_transaction(&self, signature: &Signature) -> Result<()>;

    /// 최신 블록해시 조회 (트랜잭션 서명에 필요)
    /// Get latest blockhash (required for transaction signing)
    async fn get_latest_blockhash(&self) -> Result<Hash>;

    /// 트랜잭션 전송 및 확인 대기
    /// Send transaction and wait for confirmation
    async fn send_and_confirm_transaction(&self, transaction: &Transaction) -> Result<Signature>;
}
