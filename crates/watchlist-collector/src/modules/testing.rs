//! 테스트용 스크립트 백엔드.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;
use watchlist_core::{Instrument, SourceId};
use watchlist_exchange::{ExchangeError, ExchangeResult, InstrumentCatalog};

#[derive(Debug, Clone)]
pub(crate) enum Reply {
    Instruments(Vec<Instrument>),
    Fail(String),
    Hang,
}

/// (소스, 엔드포인트)별로 미리 정한 응답을 돌려주는 백엔드.
#[derive(Default)]
pub(crate) struct ScriptedCatalog {
    replies: HashMap<(String, Option<String>), Reply>,
    calls: Mutex<Vec<(String, Option<String>)>>,
}

impl ScriptedCatalog {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with(mut self, source: &str, endpoint: Option<&str>, reply: Reply) -> Self {
        self.replies
            .insert((source.to_string(), endpoint.map(str::to_string)), reply);
        self
    }

    pub(crate) fn calls(&self) -> Vec<(String, Option<String>)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl InstrumentCatalog for ScriptedCatalog {
    async fn list_instruments(
        &self,
        source: &SourceId,
        endpoint: Option<&str>,
    ) -> ExchangeResult<Vec<Instrument>> {
        let key = (source.as_str().to_string(), endpoint.map(str::to_string));
        self.calls.lock().unwrap().push(key.clone());

        match self.replies.get(&key).cloned() {
            Some(Reply::Instruments(instruments)) => Ok(instruments),
            Some(Reply::Fail(message)) => Err(ExchangeError::NetworkError(message)),
            Some(Reply::Hang) => {
                tokio::time::sleep(Duration::from_secs(24 * 3600)).await;
                Ok(Vec::new())
            }
            None => Err(ExchangeError::NotSupported(format!(
                "unknown source: {}",
                source
            ))),
        }
    }
}

pub(crate) fn btc_pairs(bases: &[&str]) -> Vec<Instrument> {
    bases.iter().map(|b| Instrument::spot(*b, "BTC")).collect()
}
