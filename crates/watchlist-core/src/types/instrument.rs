//! 거래소 상장 상품 정의.
//!
//! 백엔드가 반환하는 원시 상장 정보입니다. 거래소별 응답 형식은
//! `watchlist-exchange`의 커넥터가 이 타입으로 변환합니다.

use serde::{Deserialize, Serialize};
use std::fmt;

/// 상품 유형.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstrumentKind {
    /// 현물
    Spot,
    /// 선물, 마진, 옵션 등 현물 이외의 상품
    Other,
}

impl fmt::Display for InstrumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InstrumentKind::Spot => write!(f, "spot"),
            InstrumentKind::Other => write!(f, "other"),
        }
    }
}

/// 거래소가 보고한 상장 상품 하나.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instrument {
    /// 기준 자산 (예: ETH)
    pub base: String,
    /// 호가 자산 (예: BTC)
    pub quote: String,
    /// 상품 유형
    pub kind: InstrumentKind,
    /// 거래 가능 여부 (`None`: 거래소가 상태를 알려주지 않음)
    pub active: Option<bool>,
}

impl Instrument {
    /// 새 상품 생성.
    pub fn new(
        base: impl Into<String>,
        quote: impl Into<String>,
        kind: InstrumentKind,
        active: Option<bool>,
    ) -> Self {
        Self {
            base: base.into(),
            quote: quote.into(),
            kind,
            active,
        }
    }

    /// 거래 가능한 현물 상품 생성.
    pub fn spot(base: impl Into<String>, quote: impl Into<String>) -> Self {
        Self::new(base, quote, InstrumentKind::Spot, Some(true))
    }

    /// 거래 가능 여부 설정.
    pub fn with_active(mut self, active: Option<bool>) -> Self {
        self.active = active;
        self
    }

    /// 상품 유형 설정.
    pub fn with_kind(mut self, kind: InstrumentKind) -> Self {
        self.kind = kind;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instrument_builders() {
        let inst = Instrument::spot("ETH", "BTC");
        assert_eq!(inst.kind, InstrumentKind::Spot);
        assert_eq!(inst.active, Some(true));

        let inst = inst.with_active(None).with_kind(InstrumentKind::Other);
        assert_eq!(inst.active, None);
        assert_eq!(inst.kind, InstrumentKind::Other);
        assert_eq!(inst.kind.to_string(), "other");
    }
}
