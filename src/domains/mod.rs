// Domains
pub mod counter;
