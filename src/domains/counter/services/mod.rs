// Counter domain services
pub mod address;
pub mod funding;
pub mod mutator;
pub mod provisioner;
pub mod reader;
pub mod session;

pub use address::*;
pub use funding::*;
pub use mutator::*;
pub use provisioner::*;
pub use reader::*;
pub use session::*;
