//! # Watchlist Core
//!
//! 정산 자산(예: BTC) 기준 현물 페어 watchlist 생성기의 핵심 타입을 제공합니다.
//!
//! 이 크레이트는 다음을 제공합니다:
//! - 거래소 상장 정보(`Instrument`) 및 정규화 심볼(`Symbol`) 타입
//! - 심볼 정규화기 (`normalize`, `normalize_all`)
//! - 소스별 수집 결과 및 실행 메타데이터
//! - 로깅 인프라

pub mod domain;
pub mod error;
pub mod logging;
pub mod normalizer;
pub mod types;

pub use domain::*;
pub use error::*;
pub use logging::*;
pub use normalizer::{normalize, normalize_all};
pub use types::*;
