//! 일반 소스 수집.

use std::time::Duration;
use tracing::{error, info};
use watchlist_core::{normalize_all, SourceId, SourceResult, Symbol};
use watchlist_exchange::{ExchangeError, ExchangeResult, InstrumentCatalog};

/// 소스 수집 공통 옵션.
#[derive(Debug, Clone)]
pub struct FetchOptions {
    /// 정산 자산 (예: BTC)
    pub quote: String,
    /// 백엔드 호출당 타임아웃
    pub call_timeout: Duration,
}

impl FetchOptions {
    pub fn new(quote: impl Into<String>, call_timeout: Duration) -> Self {
        Self {
            quote: quote.into(),
            call_timeout,
        }
    }
}

/// 상장 목록을 한 번 조회해 정규화된 심볼 목록으로 변환.
///
/// 호출은 `call_timeout` 안에 끝나야 하며, 초과하면 `ExchangeError::Timeout`입니다.
pub(crate) async fn fetch_symbols(
    catalog: &dyn InstrumentCatalog,
    source: &SourceId,
    endpoint: Option<&str>,
    options: &FetchOptions,
) -> ExchangeResult<Vec<Symbol>> {
    let instruments = tokio::time::timeout(
        options.call_timeout,
        catalog.list_instruments(source, endpoint),
    )
    .await
    .map_err(|_| {
        ExchangeError::Timeout(format!("no response within {:?}", options.call_timeout))
    })??;

    Ok(normalize_all(&instruments, source, &options.quote))
}

/// 일반 소스 수집.
///
/// 실패해도 에러를 전파하지 않고, 심볼 없이 진단 메시지 하나를 가진 결과를 반환합니다.
/// 심볼이 0개인 성공 응답은 정상 결과로 취급합니다.
pub async fn fetch_ordinary(
    catalog: &dyn InstrumentCatalog,
    source: &SourceId,
    options: &FetchOptions,
) -> SourceResult {
    match fetch_symbols(catalog, source, None, options).await {
        Ok(symbols) => {
            info!(source = %source, count = symbols.len(), "심볼 수집 완료");
            SourceResult::success(source.clone(), symbols)
        }
        Err(e) => {
            error!(source = %source, category = e.category(), error = %e, "심볼 수집 실패");
            SourceResult::failed(source.clone(), vec![e.to_string()])
        }
    }
}
