//! 거래소 에러 타입.

use thiserror::Error;

/// 상장 정보 조회 에러.
#[derive(Debug, Error)]
pub enum ExchangeError {
    /// 네트워크/연결 에러
    #[error("Network error: {0}")]
    NetworkError(String),

    /// 타임아웃
    #[error("Request timeout: {0}")]
    Timeout(String),

    /// HTTP 비정상 응답 또는 거래소 에러 코드
    #[error("API error {code}: {message}")]
    ApiError { code: i32, message: String },

    /// 파싱/역직렬화 에러
    #[error("Parse error: {0}")]
    ParseError(String),

    /// 지원되지 않는 소스
    #[error("Not supported: {0}")]
    NotSupported(String),
}

impl ExchangeError {
    /// 로그 필드용 에러 분류.
    pub fn category(&self) -> &'static str {
        match self {
            ExchangeError::NetworkError(_) | ExchangeError::Timeout(_) => "transport",
            ExchangeError::ApiError { .. } => "api",
            ExchangeError::ParseError(_) => "decode",
            ExchangeError::NotSupported(_) => "config",
        }
    }
}

impl From<reqwest::Error> for ExchangeError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ExchangeError::Timeout(err.to_string())
        } else if err.is_decode() {
            ExchangeError::ParseError(err.to_string())
        } else {
            ExchangeError::NetworkError(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ExchangeError {
    fn from(err: serde_json::Error) -> Self {
        ExchangeError::ParseError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category() {
        assert_eq!(ExchangeError::Timeout("30s".into()).category(), "transport");
        assert_eq!(
            ExchangeError::ApiError {
                code: 451,
                message: "restricted location".into()
            }
            .category(),
            "api"
        );
        assert_eq!(ExchangeError::NotSupported("ftx".into()).category(), "config");
    }

    #[test]
    fn test_from_serde_error() {
        let err: ExchangeError = serde_json::from_str::<Vec<u8>>("{").unwrap_err().into();
        assert!(matches!(err, ExchangeError::ParseError(_)));
        assert_eq!(err.category(), "decode");
    }
}
