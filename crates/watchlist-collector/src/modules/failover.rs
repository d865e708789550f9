//! 엔드포인트 failover 수집.
//!
//! 일부 엔드포인트가 차단되거나 지역 제한으로 빈 목록을 돌려주는 소스를 위해
//! 엔드포인트를 순서대로 하나씩 시도합니다. 재시도 래퍼가 아니라 명시적인
//! 상태 기계이며, 각 엔드포인트는 실행당 정확히 한 번만 시도합니다.
//!
//! 시도 결과는 세 가지로 구분됩니다:
//! - 1개 이상의 심볼: 성공, 이후 엔드포인트는 시도하지 않음
//! - 0개의 심볼: soft block 의심, 다음 엔드포인트로 진행
//! - 에러: 메시지를 기록하고 다음 엔드포인트로 진행

use super::fetcher::{fetch_symbols, FetchOptions};
use tracing::{error, info, warn};
use watchlist_core::{AttemptOutcome, EndpointAttempt, SourceId, SourceResult, Symbol};
use watchlist_exchange::InstrumentCatalog;

/// failover 진행 상태.
#[derive(Debug)]
enum FailoverState {
    /// `cursor` 위치의 엔드포인트를 시도할 차례
    Trying { cursor: usize },
    /// 엔드포인트 하나가 심볼을 반환함
    Succeeded { symbols: Vec<Symbol> },
    /// 모든 엔드포인트 소진
    Exhausted,
}

/// 엔드포인트를 순서대로 시도해 첫 번째 비어 있지 않은 결과를 반환합니다.
///
/// 모두 실패하면 심볼 없이, 시도 기록 전체를 진단 메시지로 가진 결과를 반환합니다.
/// 성공 시 진단 메시지는 비어 있고 시도 기록은 `SourceResult::attempts`에만 남습니다.
pub async fn fetch_with_failover(
    catalog: &dyn InstrumentCatalog,
    source: &SourceId,
    endpoints: &[String],
    options: &FetchOptions,
) -> SourceResult {
    if endpoints.is_empty() {
        let message = format!(
            "Configuration error: no failover endpoints configured for {}",
            source
        );
        error!(source = %source, "{}", message);
        return SourceResult::failed(source.clone(), vec![message]);
    }

    let mut attempts: Vec<EndpointAttempt> = Vec::with_capacity(endpoints.len());
    let mut state = FailoverState::Trying { cursor: 0 };

    let symbols = loop {
        state = match state {
            FailoverState::Trying { cursor } if cursor >= endpoints.len() => {
                FailoverState::Exhausted
            }
            FailoverState::Trying { cursor } => {
                let endpoint = &endpoints[cursor];
                match fetch_symbols(catalog, source, Some(endpoint), options).await {
                    Ok(symbols) if !symbols.is_empty() => {
                        info!(
                            source = %source,
                            endpoint = %endpoint,
                            count = symbols.len(),
                            "엔드포인트 사용"
                        );
                        attempts.push(EndpointAttempt::new(
                            endpoint.as_str(),
                            AttemptOutcome::Success {
                                count: symbols.len(),
                            },
                        ));
                        FailoverState::Succeeded { symbols }
                    }
                    Ok(_) => {
                        warn!(
                            source = %source,
                            endpoint = %endpoint,
                            "0개 반환, 다음 엔드포인트 시도"
                        );
                        attempts.push(EndpointAttempt::new(
                            endpoint.as_str(),
                            AttemptOutcome::Empty,
                        ));
                        FailoverState::Trying { cursor: cursor + 1 }
                    }
                    Err(e) => {
                        warn!(
                            source = %source,
                            endpoint = %endpoint,
                            category = e.category(),
                            error = %e,
                            "엔드포인트 실패, 다음 엔드포인트 시도"
                        );
                        attempts.push(EndpointAttempt::new(
                            endpoint.as_str(),
                            AttemptOutcome::Error {
                                message: e.to_string(),
                            },
                        ));
                        FailoverState::Trying { cursor: cursor + 1 }
                    }
                }
            }
            FailoverState::Succeeded { symbols } => break Some(symbols),
            FailoverState::Exhausted => break None,
        };
    };

    match symbols {
        Some(symbols) => SourceResult::success(source.clone(), symbols).with_attempts(attempts),
        None => {
            let diagnostics: Vec<String> = attempts.iter().map(|a| a.to_string()).collect();
            error!(
                source = %source,
                "모든 엔드포인트 실패:\n{}",
                diagnostics
                    .iter()
                    .map(|d| format!("- {}", d))
                    .collect::<Vec<_>>()
                    .join("\n")
            );
            SourceResult::failed(source.clone(), diagnostics).with_attempts(attempts)
        }
    }
}
