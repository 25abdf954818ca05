// Errors module: 커스텀 에러 타입
// Errors module: custom error types for compile-time safety

pub mod counter_error;

pub use counter_error::*;
