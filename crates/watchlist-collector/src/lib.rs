//! Spot 페어 watchlist 수집기.
//!
//! 이 crate는 여러 거래소에서 정산 자산 기준 현물 페어를 수집해
//! 소스별 목록, 통합 목록, 실행 메타데이터를 생성합니다:
//! - 일반 소스 수집 (`modules::fetcher`)
//! - 불안정한 소스의 엔드포인트 failover (`modules::failover`)
//! - 소스별 장애 격리 및 통합 (`modules::aggregator`)
//! - 산출물 기록 (`modules::writer`)

pub mod config;
pub mod error;
pub mod modules;
pub mod stats;

pub use config::{CollectorConfig, SourceConfig, SourceKind};
pub use error::{CollectorError, Result};
pub use stats::RunStats;
