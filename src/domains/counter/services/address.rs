use crate::domains::counter::models::DerivedAddress;
use crate::shared::errors::CounterError;
use solana_sdk::pubkey::{MAX_SEED_LEN, Pubkey};

/// 카운터 계정 주소 파생
/// Derive the counter account address from `payer + seed + program`
///
/// `Pubkey::create_with_seed` 와 동일 (네트워크 호출 없음)
pub fn derive_address(payer: &Pubkey, seed: &str, program: &Pubkey) -> Result<DerivedAddress, CounterError> {
    if seed.len() > MAX_SEED_LEN {
        return Err(CounterError::InvalidSeed {
            seed: seed.to_string(),
            reason: format!("{} bytes exceeds the {} byte limit", seed.len(), MAX_SEED_LEN),
        });
    }

    let address = Pubkey::create_with_seed(payer, seed, program).map_err(|e| {
        CounterError::InvalidSeed {
            seed: seed.to_string(),
            reason: e.to_string(),
        }
    })?;

    Ok(DerivedAddress {
        address,
        base: *payer,
        seed: seed.to_string(),
        owner: *program,
    })
}
