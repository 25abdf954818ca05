use solana_sdk::pubkey::Pubkey;
use std::fmt;

/// 시드로 파생된 카운터 계정 주소
/// Program-owned counter account address derived from `base + seed + owner`
///
/// 개인 키가 없는 주소이므로 서명에 쓸 수 없음.
/// 계정 생성 instruction 에 base / seed / owner 가 모두 필요해서 함께 보관
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedAddress {
    pub address: Pubkey,
    pub base: Pubkey,
    pub seed: String,
    pub owner: Pubkey,
}

impl fmt::Display for DerivedAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.address)
    }
}
