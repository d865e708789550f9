//! Coinbase Exchange `products` 매핑.
//!
//! Coinbase Exchange는 현물만 제공하므로 모든 상품을 현물로 간주합니다.

use crate::traits::ExchangeResult;
use serde::Deserialize;
use watchlist_core::{Instrument, InstrumentKind};

pub(crate) const DEFAULT_HOST: &str = "api.exchange.coinbase.com";
pub(crate) const PATH: &str = "/products";

#[derive(Debug, Deserialize)]
struct CoinbaseProduct {
    base_currency: String,
    quote_currency: String,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    trading_disabled: Option<bool>,
}

pub(crate) fn parse_instruments(body: &str) -> ExchangeResult<Vec<Instrument>> {
    let products: Vec<CoinbaseProduct> = serde_json::from_str(body)?;

    Ok(products
        .into_iter()
        .map(|p| {
            let active = match (p.trading_disabled, p.status.as_deref()) {
                (Some(true), _) => Some(false),
                (_, Some(status)) => Some(status == "online"),
                (_, None) => None,
            };
            Instrument::new(p.base_currency, p.quote_currency, InstrumentKind::Spot, active)
        })
        .collect())
}
