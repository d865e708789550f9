//! 수집 결과 도메인 모델.
//!
//! - `SourceResult` - 소스 하나의 수집 결과
//! - `EndpointAttempt` - failover 엔드포인트 시도 기록
//! - `RunMetadata` - 실행 단위 메타데이터

pub mod metadata;
pub mod source_result;

pub use metadata::*;
pub use source_result::*;
