// Counter domain
// 카운터 계정 수명 주기와 트랜잭션 프로토콜
pub mod models;
pub mod services;
