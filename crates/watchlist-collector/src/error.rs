//! 에러 타입 정의.

use thiserror::Error;

/// Collector 에러 타입.
///
/// 소스별 수집 실패는 진단 메시지로 기록되며 이 타입으로 전파되지 않습니다.
/// 설정 로드 실패와 산출물 기록 실패만 실행을 중단시킵니다.
#[derive(Debug, Error)]
pub enum CollectorError {
    /// 설정 에러
    #[error("Configuration error: {0}")]
    Config(String),

    /// 파일 기록 에러
    #[error("I/O error at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// 메타데이터 직렬화 에러
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// 거래소 클라이언트 초기화 에러
    #[error("Exchange error: {0}")]
    Exchange(#[from] watchlist_exchange::ExchangeError),
}

impl CollectorError {
    pub(crate) fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.display().to_string(),
            source,
        }
    }
}

impl From<watchlist_core::CoreError> for CollectorError {
    fn from(err: watchlist_core::CoreError) -> Self {
        Self::Config(err.to_string())
    }
}

/// Result 타입 별칭
pub type Result<T> = std::result::Result<T, CollectorError>;
