use crate::shared::errors::DecodeError;
use borsh::{BorshDeserialize, BorshSerialize};
use std::sync::LazyLock;

/// 카운터 계정에 저장되는 데이터
/// Payload stored in the counter account
///
/// 레이아웃: `counter` u32 little-endian (borsh)
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CounterRecord {
    pub counter: u32,
}

/// 인코딩된 레코드 크기 (기본값 레코드를 인코딩해서 한 번만 계산)
/// Encoded record size, computed once from the schema
pub static RECORD_SIZE: LazyLock<usize> = LazyLock::new(|| CounterRecord::default().encode().len());

/// 계정 생성 시 사용하는 레코드 크기
/// Record size used for account allocation and decoding
pub fn record_size() -> usize {
    *RECORD_SIZE
}

impl CounterRecord {
    pub fn new(counter: u32) -> Self {
        Self { counter }
    }

    /// 레코드 인코딩
    /// Encode the record into exactly `RECORD_SIZE` bytes
    pub fn encode(&self) -> Vec<u8> {
        // Vec 에 쓰기는 실패하지 않음
        let mut buf = Vec::with_capacity(std::mem::size_of::<Self>());
        self.serialize(&mut buf)
            .expect("writing a fixed-width record into a Vec cannot fail");
        buf
    }

    /// 레코드 디코딩
    /// Decode a record, rejecting any buffer that is not exactly `RECORD_SIZE` bytes
    pub fn decode(bytes: &[u8]) -> Result<Self, DecodeError> {
        let expected = record_size();
        if bytes.len() != expected {
            return Err(DecodeError::WrongSize {
                expected,
                actual: bytes.len(),
            });
        }

        Ok(Self::try_from_slice(bytes)?)
    }
}
