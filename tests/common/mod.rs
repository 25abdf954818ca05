// =====================================================
// 통합 테스트 공통 헬퍼
// =====================================================
// 목적: 메모리 기반 MockLedger 와 테스트 픽스처 제공
//
// MockLedger 는 두 종류의 instruction 만 실행:
// - System Program CreateAccountWithSeed
// - 카운터 프로그램 (빈 데이터, 첫 계정의 u32 LE 값을 1 증가)
//
// 사용법:
// ```rust
// mod common;
// use common::*;
//
// #[tokio::test]
// async fn test_something() {
//     let program = test_program();
//     let ledger = Arc::new(MockLedger::new().with_program(&program.id));
//     // 테스트 코드...
// }
// ```
// =====================================================

#![allow(dead_code)]

use anyhow::{Result, anyhow, bail};
use async_trait::async_trait;
use counter_client::domains::counter::models::ProgramIdentity;
use counter_client::shared::clients::{FeeParameters, LedgerClient};
use parking_lot::Mutex;
use solana_sdk::{
    account::Account,
    bpf_loader_upgradeable,
    hash::Hash,
    pubkey::Pubkey,
    signature::{Keypair, Signature},
    system_instruction::SystemInstruction,
    system_program,
    transaction::Transaction,
};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::Barrier;

// 테스트용 상수
pub const LAMPORTS_PER_SIGNATURE: u64 = 5_000;
pub const RENT_EXEMPT_MINIMUM: u64 = 4_500_000;
// RENT_EXEMPT_MINIMUM + 100 * LAMPORTS_PER_SIGNATURE
pub const REQUIRED_FUNDING: u64 = 5_000_000;
pub const AMPLE_BALANCE: u64 = 1_000_000_000;
pub const MOCK_RPC_URL: &str = "http://127.0.0.1:8899";

struct LedgerState {
    accounts: HashMap<Pubkey, Account>,
    airdrops: Vec<(Pubkey, u64)>,
    mutating_transactions: usize,
}

/// 메모리 기반 원장 (테스트용)
/// In-memory ledger for tests
pub struct MockLedger {
    state: Mutex<LedgerState>,
    rpc_url: String,
    lamports_per_signature: u64,
    rent_exempt_minimum: u64,
    offline: bool,
    reject_transactions: bool,
    fail_balance_queries: bool,
    fail_airdrops: bool,
    failing_lookups: HashSet<Pubkey>,
    airdrop_cap: Option<u64>,
    lookup_barrier: Option<(Barrier, usize)>,
    lookups: AtomicUsize,
}

impl MockLedger {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(LedgerState {
                accounts: HashMap::new(),
                airdrops: Vec::new(),
                mutating_transactions: 0,
            }),
            rpc_url: MOCK_RPC_URL.to_string(),
            lamports_per_signature: LAMPORTS_PER_SIGNATURE,
            rent_exempt_minimum: RENT_EXEMPT_MINIMUM,
            offline: false,
            reject_transactions: false,
            fail_balance_queries: false,
            fail_airdrops: false,
            failing_lookups: HashSet::new(),
            airdrop_cap: None,
            lookup_barrier: None,
            lookups: AtomicUsize::new(0),
        }
    }

    /// 실행 가능한 프로그램 계정 추가
    pub fn with_program(self, program_id: &Pubkey) -> Self {
        self.insert_account(
            program_id,
            Account {
                lamports: 1_141_440,
                data: vec![0; 36],
                owner: bpf_loader_upgradeable::id(),
                executable: true,
                rent_epoch: 0,
            },
        );
        self
    }

    pub fn with_balance(self, pubkey: &Pubkey, lamports: u64) -> Self {
        self.insert_account(
            pubkey,
            Account {
                lamports,
                data: Vec::new(),
                owner: system_program::id(),
                executable: false,
                rent_epoch: 0,
            },
        );
        self
    }

    pub fn with_account(self, pubkey: &Pubkey, account: Account) -> Self {
        self.insert_account(pubkey, account);
        self
    }

    /// get_version 실패 (클러스터 연결 불가)
    pub fn offline(mut self) -> Self {
        self.offline = true;
        self
    }

    /// 모든 트랜잭션 거부
    pub fn rejecting_transactions(mut self) -> Self {
        self.reject_transactions = true;
        self
    }

    pub fn with_rpc_url(mut self, rpc_url: &str) -> Self {
        self.rpc_url = rpc_url.to_string();
        self
    }

    /// 잔액 조회 실패
    pub fn failing_balance_queries(mut self) -> Self {
        self.fail_balance_queries = true;
        self
    }

    /// 에어드랍 요청 실패
    pub fn failing_airdrops(mut self) -> Self {
        self.fail_airdrops = true;
        self
    }

    /// 특정 계정 조회 실패 (전송 오류)
    pub fn with_failing_lookup(mut self, pubkey: &Pubkey) -> Self {
        self.failing_lookups.insert(*pubkey);
        self
    }

    /// 에어드랍 최대 금액 제한
    pub fn with_airdrop_cap(mut self, lamports: u64) -> Self {
        self.airdrop_cap = Some(lamports);
        self
    }

    /// 처음 `parties` 번의 계정 조회가 서로를 기다림 (동시 생성 경쟁 재현용)
    pub fn with_lookup_barrier(mut self, parties: usize) -> Self {
        self.lookup_barrier = Some((Barrier::new(parties), parties));
        self
    }

    pub fn insert_account(&self, pubkey: &Pubkey, account: Account) {
        self.state.lock().accounts.insert(*pubkey, account);
    }

    pub fn account(&self, pubkey: &Pubkey) -> Option<Account> {
        self.state.lock().accounts.get(pubkey).cloned()
    }

    pub fn balance(&self, pubkey: &Pubkey) -> u64 {
        self.account(pubkey).map(|a| a.lamports).unwrap_or(0)
    }

    pub fn airdrops(&self) -> Vec<(Pubkey, u64)> {
        self.state.lock().airdrops.clone()
    }

    /// 성공적으로 실행된 트랜잭션 수 (에어드랍 제외)
    pub fn mutating_transactions(&self) -> usize {
        self.state.lock().mutating_transactions
    }

    fn execute(&self, transaction: &Transaction) -> Result<Signature> {
        transaction
            .verify()
            .map_err(|e| anyhow!("Transaction signature verification failed: {}", e))?;

        let message = &transaction.message;
        let keys = &message.account_keys;
        let fee_payer = *keys.first().ok_or_else(|| anyhow!("Transaction has no fee payer"))?;

        let mut state = self.state.lock();
        // 실패 시 상태가 바뀌지 않도록 복사본에서 실행
        let mut accounts = state.accounts.clone();

        let fee = self.lamports_per_signature * transaction.signatures.len() as u64;
        debit(&mut accounts, &fee_payer, fee)?;

        for instruction in &message.instructions {
            let program_id = keys[instruction.program_id_index as usize];
            let instruction_accounts: Vec<Pubkey> = instruction
                .accounts
                .iter()
                .map(|index| keys[*index as usize])
                .collect();

            if program_id == system_program::id() {
                create_account_with_seed(&mut accounts, &instruction_accounts, &instruction.data)?;
            } else {
                increment_counter(&mut accounts, &program_id, &instruction_accounts)?;
            }
        }

        state.accounts = accounts;
        state.mutating_transactions += 1;
        Ok(transaction.signatures[0])
    }
}

fn debit(accounts: &mut HashMap<Pubkey, Account>, pubkey: &Pubkey, lamports: u64) -> Result<()> {
    let account = accounts
        .get_mut(pubkey)
        .ok_or_else(|| anyhow!("Account {} not found", pubkey))?;
    if account.lamports < lamports {
        bail!(
            "Insufficient lamports in {}: need {}, have {}",
            pubkey,
            lamports,
            account.lamports
        );
    }
    account.lamports -= lamports;
    Ok(())
}

fn create_account_with_seed(
    accounts: &mut HashMap<Pubkey, Account>,
    instruction_accounts: &[Pubkey],
    data: &[u8],
) -> Result<()> {
    let instruction: SystemInstruction = bincode::deserialize(data)?;
    let (base, seed, lamports, space, owner) = match instruction {
        SystemInstruction::CreateAccountWithSeed {
            base,
            seed,
            lamports,
            space,
            owner,
        } => (base, seed, lamports, space, owner),
        other => bail!("Unsupported system instruction: {:?}", other),
    };

    let from = instruction_accounts[0];
    let to = instruction_accounts[1];
    if Pubkey::create_with_seed(&base, &seed, &owner)? != to {
        bail!("Create Account: address {} does not match addr with seed", to);
    }
    if accounts.contains_key(&to) {
        bail!("Create Account: account Address {{ address: {}, base: Some({}) }} already in use", to, base);
    }

    debit(accounts, &from, lamports)?;
    accounts.insert(
        to,
        Account {
            lamports,
            data: vec![0; space as usize],
            owner,
            executable: false,
            rent_epoch: 0,
        },
    );
    Ok(())
}

fn increment_counter(
    accounts: &mut HashMap<Pubkey, Account>,
    program_id: &Pubkey,
    instruction_accounts: &[Pubkey],
) -> Result<()> {
    let executable = accounts.get(program_id).map(|program| program.executable);
    if executable != Some(true) {
        bail!("Attempt to load a program that does not exist: {}", program_id);
    }

    let target = instruction_accounts
        .first()
        .ok_or_else(|| anyhow!("Counter instruction has no accounts"))?;
    let account = accounts
        .get_mut(target)
        .ok_or_else(|| anyhow!("Counter account {} not found", target))?;
    if account.owner != *program_id {
        bail!("Greeted account does not have the correct program id");
    }

    let bytes: [u8; 4] = account.data.as_slice().try_into()?;
    let counter = u32::from_le_bytes(bytes)
        .checked_add(1)
        .ok_or_else(|| anyhow!("Counter overflow"))?;
    account.data = counter.to_le_bytes().to_vec();
    Ok(())
}

#[async_trait]
impl LedgerClient for MockLedger {
    fn rpc_url(&self) -> &str {
        &self.rpc_url
    }

    async fn get_version(&self) -> Result<String> {
        if self.offline {
            bail!("error sending request for url (http://127.0.0.1:8899/): connection refused");
        }
        Ok("1.18.26".to_string())
    }

    async fn get_balance(&self, pubkey: &Pubkey) -> Result<u64> {
        if self.fail_balance_queries {
            bail!("RPC response error -32005: Node is behind by 153 slots");
        }
        Ok(self.balance(pubkey))
    }

    async fn get_recent_fee_parameters(&self) -> Result<FeeParameters> {
        Ok(FeeParameters {
            lamports_per_signature: self.lamports_per_signature,
        })
    }

    async fn get_minimum_balance_for_rent_exemption(&self, _size_bytes: usize) -> Result<u64> {
        Ok(self.rent_exempt_minimum)
    }

    async fn get_account_info(&self, pubkey: &Pubkey) -> Result<Option<Account>> {
        let call = self.lookups.fetch_add(1, Ordering::SeqCst);
        if let Some((barrier, parties)) = &self.lookup_barrier {
            if call < *parties {
                barrier.wait().await;
            }
        }
        if self.failing_lookups.contains(pubkey) {
            bail!("error sending request for url ({}): operation timed out", self.rpc_url);
        }
        Ok(self.account(pubkey))
    }

    async fn request_airdrop(&self, pubkey: &Pubkey, lamports: u64) -> Result<Signature> {
        if self.fail_airdrops {
            bail!("airdrop request failed. This can happen when the rate limit is reached.");
        }
        let credited = self.airdrop_cap.map_or(lamports, |cap| lamports.min(cap));

        let mut state = self.state.lock();
        state.airdrops.push((*pubkey, lamports));
        state
            .accounts
            .entry(*pubkey)
            .or_insert_with(|| Account {
                lamports: 0,
                data: Vec::new(),
                owner: system_program::id(),
                executable: false,
                rent_epoch: 0,
            })
            .lamports += credited;

        Ok(Signature::new_unique())
    }

    async fn confirm_transaction(&self, _signature: &Signature) -> Result<()> {
        Ok(())
    }

    async fn get_latest_blockhash(&self) -> Result<Hash> {
        Ok(Hash::new_unique())
    }

    async fn send_and_confirm_transaction(&self, transaction: &Transaction) -> Result<Signature> {
        if self.reject_transactions {
            bail!("Transaction simulation failed: Blockhash not found");
        }
        self.execute(transaction)
    }
}

/// 테스트용 프로그램 (배포되지 않은 .so 경로)
pub fn test_program() -> ProgramIdentity {
    let id = Pubkey::new_unique();
    ProgramIdentity {
        id,
        binary_path: std::env::temp_dir().join(format!("counter-client-{}", id)).join("rust_counter.so"),
    }
}

/// 같은 키를 가진 두 번째 Keypair
pub fn clone_keypair(keypair: &Keypair) -> Keypair {
    Keypair::from_bytes(&keypair.to_bytes()).expect("valid keypair bytes")
}

/// 카운터 계정 데이터 (u32 LE)
pub fn counter_account(program_id: &Pubkey, data: Vec<u8>) -> Account {
    Account {
        lamports: RENT_EXEMPT_MINIMUM,
        data,
        owner: *program_id,
        executable: false,
        rent_epoch: 0,
    }
}
