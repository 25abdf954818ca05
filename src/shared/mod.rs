// Shared module
pub mod clients;
pub mod config;
pub mod errors;

pub use clients::*;
pub use config::*;
pub use errors::*;
