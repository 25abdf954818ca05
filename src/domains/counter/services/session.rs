// =====================================================
// Session - 카운터 세션 오케스트레이터
// =====================================================
// 상태 전이 (역방향 없음):
//   Disconnected → Connected → Funded → ProgramVerified
//   → AccountProvisioned → Mutated → Read → Terminal
//
// 어느 단계든 실패하면 에러를 그대로 반환하고 세션은 중단됨 (이어서 진행 불가).
// 새 세션은 Disconnected 부터 다시 시작 (자금 확인, 계정 생성은 반복해도 안전)
// =====================================================

use super::funding::{FundingCalculator, FundingPolicy, FundingRequirement};
use super::mutator::CounterMutator;
use super::provisioner::AccountProvisioner;
use super::reader::CounterReader;
use crate::domains::counter::models::{CounterRecord, DerivedAddress, ProgramIdentity};
use crate::shared::clients::LedgerClient;
use crate::shared::errors::CounterError;
use solana_sdk::{
    native_token::lamports_to_sol,
    pubkey::Pubkey,
    signature::{Keypair, Signature, Signer},
};
use std::fmt;
use std::sync::Arc;
use tracing::{info, warn};

/// 카운터 계정 시드 기본값
pub const DEFAULT_SEED: &str = "counter";

/// 세션 상태
/// Session state, strictly increasing
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SessionState {
    Disconnected,
    Connected,
    Funded,
    ProgramVerified,
    AccountProvisioned,
    Mutated,
    Read,
    Terminal,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// 자금 확인 결과
/// Outcome of the funding step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FundingReport {
    /// 최종 잔액 (에어드랍 후)
    pub balance: u64,
    pub required: FundingRequirement,
    /// 에어드랍 요청 금액 (필요 없었으면 0)
    pub airdropped: u64,
}

/// 세션 결과
/// Result of a complete session run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionReport {
    pub counter_address: Pubkey,
    pub counter: u32,
    pub funding: FundingReport,
    pub increment_signature: Signature,
}

/// 카운터 세션
/// One run of the counter lifecycle against a cluster
///
/// 한 단계라도 실패하면 세션은 중단 상태가 되고 이후 모든 호출은
/// `InvalidTransition` 으로 거부됨. 다시 시도하려면 새 세션을 만들 것
pub struct Session {
    ledger: Arc<dyn LedgerClient>,
    payer: Keypair,
    program: ProgramIdentity,
    seed: String,
    policy: FundingPolicy,
    state: SessionState,
    halted: bool,
    counter_address: Option<DerivedAddress>,
}

impl Session {
    pub fn new(ledger: Arc<dyn LedgerClient>, payer: Keypair, program: ProgramIdentity) -> Self {
        Self {
            ledger,
            payer,
            program,
            seed: DEFAULT_SEED.to_string(),
            policy: FundingPolicy::default(),
            state: SessionState::Disconnected,
            halted: false,
            counter_address: None,
        }
    }

    pub fn with_seed(mut self, seed: impl Into<String>) -> Self {
        self.seed = seed.into();
        self
    }

    pub fn with_funding_policy(mut self, policy: FundingPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// 마지막으로 성공한 단계
    /// Last state reached successfully
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// 실패로 중단되었는지 여부
    pub fn is_halted(&self) -> bool {
        self.halted
    }

    pub fn counter_address(&self) -> Option<&DerivedAddress> {
        self.counter_address.as_ref()
    }

    /// 전체 실행
    /// Run every step in order and finish in `Terminal`
    pub async fn run(&mut self) -> Result<SessionReport, CounterError> {
        self.connect().await?;
        let funding = self.ensure_funded().await?;
        self.verify_program().await?;
        let counter_address = self.ensure_account().await?;
        let increment_signature = self.increment().await?;
        let record = self.read().await?;
        let finished = self.transition(SessionState::Read, SessionState::Terminal);
        self.halt_on_error(finished)?;

        Ok(SessionReport {
            counter_address: counter_address.address,
            counter: record.counter,
            funding,
            increment_signature,
        })
    }

    /// 1. 클러스터 연결 확인
    /// Establish the connection
    pub async fn connect(&mut self) -> Result<String, CounterError> {
        let result = self.try_connect().await;
        self.halt_on_error(result)
    }

    /// 2. 수수료 지불자 잔액 확보 (부족하면 에어드랍)
    /// Ensure the payer holds enough lamports, airdropping the shortfall
    pub async fn ensure_funded(&mut self) -> Result<FundingReport, CounterError> {
        let result = self.try_ensure_funded().await;
        self.halt_on_error(result)
    }

    /// 3. 프로그램 배포 확인
    /// Verify the program is deployed and executable
    pub async fn verify_program(&mut self) -> Result<(), CounterError> {
        let result = self.try_verify_program().await;
        self.halt_on_error(result)
    }

    /// 4. 카운터 계정 확보
    /// Ensure the counter account is provisioned
    pub async fn ensure_account(&mut self) -> Result<DerivedAddress, CounterError> {
        let result = self.try_ensure_account().await;
        self.halt_on_error(result)
    }

    /// 5. 카운터 증가
    /// Increment the counter
    pub async fn increment(&mut self) -> Result<Signature, CounterError> {
        let result = self.try_increment().await;
        self.halt_on_error(result)
    }

    /// 6. 카운터 조회
    /// Read back the counter
    pub async fn read(&mut self) -> Result<CounterRecord, CounterError> {
        let result = self.try_read().await;
        self.halt_on_error(result)
    }

    async fn try_connect(&mut self) -> Result<String, CounterError> {
        self.expect_state(SessionState::Disconnected, SessionState::Connected)?;

        let rpc_url = self.ledger.rpc_url().to_string();
        let version = self
            .ledger
            .get_version()
            .await
            .map_err(|e| CounterError::Connection {
                rpc_url: rpc_url.clone(),
                source: e,
            })?;

        info!(%rpc_url, %version, "Connection to cluster established");
        self.state = SessionState::Connected;
        Ok(version)
    }

    async fn try_ensure_funded(&mut self) -> Result<FundingReport, CounterError> {
        self.expect_state(SessionState::Connected, SessionState::Funded)?;

        let payer = self.payer.pubkey();
        let to_funding_error = |e: anyhow::Error| CounterError::Funding { payer, source: e };

        let required = FundingCalculator::new(self.ledger.clone())
            .required_funding(&self.policy)
            .await
            .map_err(to_funding_error)?;

        let mut balance = self.ledger.get_balance(&payer).await.map_err(to_funding_error)?;
        let mut airdropped = 0;

        if balance < required.total {
            let amount = required.total - balance;
            info!(%payer, lamports = amount, "Requesting airdrop");

            let signature = self
                .ledger
                .request_airdrop(&payer, amount)
                .await
                .map_err(to_funding_error)?;
            self.ledger
                .confirm_transaction(&signature)
                .await
                .map_err(to_funding_error)?;
            airdropped = amount;

            balance = self.ledger.get_balance(&payer).await.map_err(to_funding_error)?;
            if balance < required.total {
                return Err(CounterError::InsufficientFunding {
                    required: required.total,
                    available: balance,
                });
            }
        }

        info!(
            %payer,
            sol = lamports_to_sol(balance),
            "Using payer account to pay for fees"
        );

        let report = FundingReport {
            balance,
            required,
            airdropped,
        };
        self.state = SessionState::Funded;
        Ok(report)
    }

    async fn try_verify_program(&mut self) -> Result<(), CounterError> {
        self.expect_state(SessionState::Funded, SessionState::ProgramVerified)?;

        let program_id = self.program.id;
        let account = self
            .ledger
            .get_account_info(&program_id)
            .await
            .map_err(|e| CounterError::ProgramLookup {
                program_id,
                source: e,
            })?;

        match account {
            None => {
                return Err(CounterError::ProgramNotFound {
                    program_id,
                    binary_path: self.program.binary_path.clone(),
                    built: self.program.binary_path.exists(),
                });
            }
            Some(account) if !account.executable => {
                return Err(CounterError::ProgramNotExecutable { program_id });
            }
            Some(_) => {}
        }

        info!(%program_id, "Using program");
        self.state = SessionState::ProgramVerified;
        Ok(())
    }

    async fn try_ensure_account(&mut self) -> Result<DerivedAddress, CounterError> {
        self.expect_state(SessionState::ProgramVerified, SessionState::AccountProvisioned)?;

        let address = AccountProvisioner::new(self.ledger.clone())
            .ensure_provisioned(&self.payer, &self.seed, &self.program.id)
            .await?;

        info!(address = %address, "Counter account ready");
        self.counter_address = Some(address.clone());
        self.state = SessionState::AccountProvisioned;
        Ok(address)
    }

    async fn try_increment(&mut self) -> Result<Signature, CounterError> {
        self.expect_state(SessionState::AccountProvisioned, SessionState::Mutated)?;
        let target = self.target(SessionState::Mutated)?;

        let signature = CounterMutator::new(self.ledger.clone(), self.program.id)
            .increment(&target, &self.payer)
            .await?;

        self.state = SessionState::Mutated;
        Ok(signature)
    }

    async fn try_read(&mut self) -> Result<CounterRecord, CounterError> {
        self.expect_state(SessionState::Mutated, SessionState::Read)?;
        let target = self.target(SessionState::Read)?;

        let record = CounterReader::new(self.ledger.clone()).read(&target).await?;

        info!(
            address = %target,
            counter = record.counter,
            "{} has been greeted {} time(s)",
            target,
            record.counter
        );
        self.state = SessionState::Read;
        Ok(record)
    }

    fn halt_on_error<T>(&mut self, result: Result<T, CounterError>) -> Result<T, CounterError> {
        if let Err(e) = &result {
            if !self.halted {
                warn!(state = %self.state, error = %e, "Session halted");
            }
            self.halted = true;
        }
        result
    }

    fn expect_state(&self, from: SessionState, to: SessionState) -> Result<(), CounterError> {
        if self.halted {
            return Err(CounterError::InvalidTransition {
                from: format!("{} (halted)", self.state),
                to: to.to_string(),
            });
        }
        if self.state != from {
            return Err(CounterError::InvalidTransition {
                from: self.state.to_string(),
                to: to.to_string(),
            });
        }
        Ok(())
    }

    fn transition(&mut self, from: SessionState, to: SessionState) -> Result<(), CounterError> {
        self.expect_state(from, to)?;
        self.state = to;
        Ok(())
    }

    fn target(&self, to: SessionState) -> Result<Pubkey, CounterError> {
        self.counter_address
            .as_ref()
            .map(|address| address.address)
            .ok_or_else(|| CounterError::InvalidTransition {
                from: self.state.to_string(),
                to: to.to_string(),
            })
    }
}
