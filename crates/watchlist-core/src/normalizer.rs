//! 심볼 정규화기.
//!
//! 원시 상장 정보를 `SOURCE:BASEQUOTE` 심볼로 변환하거나 거부합니다.
//! 부수 효과가 없는 순수 함수입니다.

use crate::types::{Instrument, InstrumentKind, SourceId, Symbol};

/// 상장 상품 하나를 정규화합니다.
///
/// 다음 조건을 모두 만족할 때만 심볼을 반환합니다:
/// - 현물 상품
/// - 호가 자산이 `quote`와 정확히 일치
/// - 거래 불가로 명시되지 않음 (상태 불명은 허용)
///
/// 거래소별 `active` 플래그는 신뢰도가 낮아 불명 상태를 거부하지 않습니다.
pub fn normalize(instrument: &Instrument, source: &SourceId, quote: &str) -> Option<Symbol> {
    if instrument.kind != InstrumentKind::Spot {
        return None;
    }
    if instrument.quote != quote {
        return None;
    }
    if instrument.active == Some(false) {
        return None;
    }
    Some(Symbol::from_parts(source, &instrument.base, quote))
}

/// 상품 목록 전체를 정규화하고 중복 제거 후 정렬합니다.
///
/// 정렬은 바이트 순서 오름차순이며, 같은 입력에 대해 항상 같은 결과를 냅니다.
pub fn normalize_all<'a, I>(instruments: I, source: &SourceId, quote: &str) -> Vec<Symbol>
where
    I: IntoIterator<Item = &'a Instrument>,
{
    let mut symbols: Vec<Symbol> = instruments
        .into_iter()
        .filter_map(|inst| normalize(inst, source, quote))
        .collect();
    symbols.sort_unstable();
    symbols.dedup();
    symbols
}
