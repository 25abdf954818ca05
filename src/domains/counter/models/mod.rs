// Counter domain models
pub mod counter_record;
pub mod derived_address;
pub mod program;

pub use counter_record::*;
pub use derived_address::*;
pub use program::*;
