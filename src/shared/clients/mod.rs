// Shared clients
pub mod keys;
pub mod ledger;
pub mod solana;

pub use keys::*;
pub use ledger::*;
pub use solana::*;
