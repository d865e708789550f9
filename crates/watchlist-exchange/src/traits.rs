//! 상장 정보 조회 trait 정의.

use async_trait::async_trait;
use watchlist_core::{Instrument, SourceId};

use crate::ExchangeError;

/// 조회 작업을 위한 Result 타입.
pub type ExchangeResult<T> = Result<T, ExchangeError>;

/// 시장 데이터 소스의 상장 목록 조회 인터페이스.
///
/// 구현체는 페이지네이션 없이 한 번의 호출로 전체 목록을 반환합니다.
#[async_trait]
pub trait InstrumentCatalog: Send + Sync {
    /// 소스의 전체 상장 목록 조회.
    ///
    /// `endpoint`가 주어지면 기본 호스트 대신 해당 엔드포인트로 요청합니다.
    async fn list_instruments(
        &self,
        source: &SourceId,
        endpoint: Option<&str>,
    ) -> ExchangeResult<Vec<Instrument>>;
}
