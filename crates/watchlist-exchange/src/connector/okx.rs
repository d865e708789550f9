//! OKX V5 `public/instruments` 매핑.

use crate::error::ExchangeError;
use crate::traits::ExchangeResult;
use serde::Deserialize;
use watchlist_core::{Instrument, InstrumentKind};

pub(crate) const DEFAULT_HOST: &str = "www.okx.com";
pub(crate) const PATH: &str = "/api/v5/public/instruments?instType=SPOT";

#[derive(Debug, Deserialize)]
struct OkxResponse {
    code: String,
    #[serde(default)]
    msg: String,
    #[serde(default)]
    data: Vec<OkxInstrument>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OkxInstrument {
    inst_type: String,
    base_ccy: String,
    quote_ccy: String,
    #[serde(default)]
    state: Option<String>,
}

pub(crate) fn parse_instruments(body: &str) -> ExchangeResult<Vec<Instrument>> {
    let resp: OkxResponse = serde_json::from_str(body)?;

    if resp.code != "0" {
        return Err(ExchangeError::ApiError {
            code: resp.code.parse().unwrap_or(-1),
            message: resp.msg,
        });
    }

    Ok(resp
        .data
        .into_iter()
        .map(|i| {
            let kind = if i.inst_type == "SPOT" {
                InstrumentKind::Spot
            } else {
                InstrumentKind::Other
            };
            let active = i.state.as_deref().map(|state| state == "live");
            Instrument::new(i.base_ccy, i.quote_ccy, kind, active)
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_instruments() {
        let body = r#"{
            "code": "0",
            "msg": "",
            "data": [
                {"instId": "ETH-BTC", "instType": "SPOT", "baseCcy": "ETH", "quoteCcy": "BTC", "state": "live"},
                {"instId": "OKB-BTC", "instType": "SPOT", "baseCcy": "OKB", "quoteCcy": "BTC", "state": "suspend"},
                {"instId": "BTC-USD-SWAP", "instType": "SWAP", "baseCcy": "", "quoteCcy": "", "state": "live"}
            ]
        }"#;

        let instruments = parse_instruments(body).unwrap();
        assert_eq!(instruments[0], Instrument::spot("ETH", "BTC"));
        assert_eq!(instruments[1].active, Some(false));
        assert_eq!(instruments[2].kind, InstrumentKind::Other);
    }

    #[test]
    fn test_api_error_code() {
        let body = r#"{"code": "50011", "msg": "Too Many Requests", "data": []}"#;
        match parse_instruments(body) {
            Err(ExchangeError::ApiError { code, message }) => {
                assert_eq!(code, 50011);
                assert_eq!(message, "Too Many Requests");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
