//! MEXC Spot V3 `exchangeInfo` 매핑.
//!
//! Binance와 같은 응답 구조지만 `status` 값이 숫자 코드입니다
//! (`"1"` 거래 중, `"2"` 일시 중지, `"3"` 상장 폐지).

use crate::traits::ExchangeResult;
use serde::Deserialize;
use serde_json::Value;
use watchlist_core::{Instrument, InstrumentKind};

pub(crate) const DEFAULT_HOST: &str = "api.mexc.com";
pub(crate) const PATH: &str = "/api/v3/exchangeInfo";

#[derive(Debug, Deserialize)]
struct ExchangeInfo {
    symbols: Vec<MexcSymbol>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MexcSymbol {
    base_asset: String,
    quote_asset: String,
    #[serde(default)]
    status: Option<Value>,
    #[serde(default)]
    is_spot_trading_allowed: Option<bool>,
}

fn parse_status(status: &Value) -> Option<bool> {
    let code = match status {
        Value::String(s) => s.to_uppercase(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    match code.as_str() {
        "1" | "ENABLED" | "TRADING" => Some(true),
        "2" | "3" | "PAUSE" | "OFFLINE" | "BREAK" => Some(false),
        _ => None,
    }
}

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
            let active = s.status.as_ref().and_then(parse_status);
            Instrument::new(s.base_asset, s.quote_asset, kind, active)
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_status_codes() {
        let body = r#"{
            "symbols": [
                {"symbol": "ETHBTC", "status": "1", "baseAsset": "ETH", "quoteAsset": "BTC", "isSpotTradingAllowed": true},
                {"symbol": "OLDBTC", "status": "3", "baseAsset": "OLD", "quoteAsset": "BTC", "isSpotTradingAllowed": true},
                {"symbol": "NUMBTC", "status": 1, "baseAsset": "NUM", "quoteAsset": "BTC"},
                {"symbol": "ODDBTC", "status": "NEW_LISTING", "baseAsset": "ODD", "quoteAsset": "BTC"}
            ]
        }"#;

        let instruments = parse_instruments(body).unwrap();
        assert_eq!(instruments[0].active, Some(true));
        assert_eq!(instruments[1].active, Some(false));
        assert_eq!(instruments[2].active, Some(true));
        assert_eq!(instruments[3].active, None);
    }
}
