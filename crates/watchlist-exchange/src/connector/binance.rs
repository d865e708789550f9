//! Binance Spot `exchangeInfo` 매핑.

use crate::traits::ExchangeResult;
use serde::Deserialize;
use watchlist_core::{Instrument, InstrumentKind};

pub(crate) const DEFAULT_HOST: &str = "api.binance.com";
pub(crate) const PATH: &str = "/api/v3/exchangeInfo";

#[derive(Debug, Deserialize)]
struct ExchangeInfo {
    symbols: Vec<BinanceSymbol>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BinanceSymbol {
    base_asset: String,
    quote_asset: String,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    is_spot_trading_allowed: Option<bool>,
}

/// `exchangeInfo` 응답을 상장 목록으로 변환.
///
/// `isSpotTradingAllowed`가 없으면 현물로 간주합니다.
pub(crate) fn parse_instruments(body: &str) -> ExchangeResult<Vec<Instrument>> {
    let info: ExchangeInfo = serde_json::from_str(body)?;

    Ok(info
        .symbols
        .into_iter()
        .map(|s| {
            let kind = if s.is_spot_trading_allowed.unwrap_or(true) {
                InstrumentKind::Spot
            } else {
                InstrumentKind::Other
            };
            let active = s.status.as_deref().map(|status| status == "TRADING");
            Instrument::new(s.base_asset, s.quote_asset, kind, active)
        })
        .collect())
}
