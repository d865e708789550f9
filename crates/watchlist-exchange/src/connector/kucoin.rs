//! KuCoin `api/v2/symbols` 매핑.

use crate::error::ExchangeError;
use crate::traits::ExchangeResult;
use serde::Deserialize;
use watchlist_core::{Instrument, InstrumentKind};

pub(crate) const DEFAULT_HOST: &str = "api.kucoin.com";
pub(crate) const PATH: &str = "/api/v2/symbols";

const SUCCESS_CODE: &str = "200000";

#[derive(Debug, Deserialize)]
struct KucoinResponse {
    code: String,
    #[serde(default)]
    msg: Option<String>,
    #[serde(default)]
    data: Vec<KucoinSymbol>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct KucoinSymbol {
    base_currency: String,
    quote_currency: String,
    #[serde(default)]
    enable_trading: Option<bool>,
}

pub(crate) fn parse_instruments(body: &str) -> ExchangeResult<Vec<Instrument>> {
    let resp: KucoinResponse = serde_json::from_str(body)?;

    if resp.code != SUCCESS_CODE {
        return Err(ExchangeError::ApiError {
            code: resp.code.parse().unwrap_or(-1),
            message: resp.msg.unwrap_or_default(),
        });
    }

    Ok(resp
        .data
        .into_iter()
        .map(|s| {
            Instrument::new(
                s.base_currency,
                s.quote_currency,
                InstrumentKind::Spot,
                s.enable_trading,
            )
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_symbols() {
        let body = r#"{
            "code": "200000",
            "data": [
                {"symbol": "ETH-BTC", "baseCurrency": "ETH", "quoteCurrency": "BTC", "enableTrading": true},
                {"symbol": "OLD-BTC", "baseCurrency": "OLD", "quoteCurrency": "BTC", "enableTrading": false}
            ]
        }"#;

        let instruments = parse_instruments(body).unwrap();
        assert_eq!(instruments, vec![
            Instrument::spot("ETH", "BTC"),
            Instrument::spot("OLD", "BTC").with_active(Some(false)),
        ]);
    }

    #[test]
    fn test_error_code() {
        let body = r#"{"code": "400100", "msg": "Unsupported region"}"#;
        assert!(matches!(
            parse_instruments(body),
            Err(ExchangeError::ApiError { code: 400100, .. })
        ));
    }
}
