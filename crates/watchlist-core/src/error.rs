//! 핵심 에러 타입.

use thiserror::Error;

/// 도메인 타입 생성 및 설정 검증 에러.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// 잘못된 소스 식별자
    #[error("잘못된 소스 식별자: {0:?}")]
    InvalidSourceId(String),

    /// 잘못된 설정
    #[error("설정 에러: {0}")]
    Config(String),
}

/// 핵심 작업을 위한 Result 타입.
pub type CoreResult<T> = Result<T, CoreError>;
