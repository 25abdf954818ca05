// Counter client library
// 카운터 프로그램 클라이언트: 계정 주소 파생, 계정 생성, 카운터 증가, 상태 조회
pub mod domains;
pub mod shared;
