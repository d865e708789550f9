//! 거래소 REST 커넥터.
//!
//! 공개 API만 사용하며 인증이 필요 없습니다.
//! 거래소별 응답 형식은 하위 모듈에서 `Instrument`로 변환합니다.

mod binance;
mod coinbase;
mod kucoin;
mod mexc;
mod okx;

use crate::traits::{ExchangeResult, InstrumentCatalog};
use crate::ExchangeError;
use async_trait::async_trait;
use reqwest::Client;
use std::fmt;
use std::time::Duration;
use tracing::debug;
use watchlist_core::{Instrument, SourceId};

/// 에러 메시지에 포함할 응답 본문 최대 길이.
const MAX_ERROR_BODY: usize = 200;

/// 지원하는 거래소.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExchangeKind {
    Binance,
    Okx,
    Mexc,
    Coinbase,
    Kucoin,
}

impl ExchangeKind {
    /// 지원하는 모든 거래소.
    pub const ALL: [ExchangeKind; 5] = [
        ExchangeKind::Binance,
        ExchangeKind::Okx,
        ExchangeKind::Mexc,
        ExchangeKind::Coinbase,
        ExchangeKind::Kucoin,
    ];

    /// 소스 식별자에 해당하는 거래소.
    pub fn from_source(source: &SourceId) -> Option<Self> {
        match source.as_str() {
            "binance" => Some(ExchangeKind::Binance),
            "okx" => Some(ExchangeKind::Okx),
            "mexc" => Some(ExchangeKind::Mexc),
            "coinbase" => Some(ExchangeKind::Coinbase),
            "kucoin" => Some(ExchangeKind::Kucoin),
            _ => None,
        }
    }

    pub fn id(&self) -> &'static str {
        match self {
            ExchangeKind::Binance => "binance",
            ExchangeKind::Okx => "okx",
            ExchangeKind::Mexc => "mexc",
            ExchangeKind::Coinbase => "coinbase",
            ExchangeKind::Kucoin => "kucoin",
        }
    }

    /// 엔드포인트 미지정 시 사용하는 호스트.
    pub fn default_host(&self) -> &'static str {
        match self {
            ExchangeKind::Binance => binance::DEFAULT_HOST,
            ExchangeKind::Okx => okx::DEFAULT_HOST,
            ExchangeKind::Mexc => mexc::DEFAULT_HOST,
            ExchangeKind::Coinbase => coinbase::DEFAULT_HOST,
            ExchangeKind::Kucoin => kucoin::DEFAULT_HOST,
        }
    }

    /// 상장 목록 API 경로 (쿼리 포함).
    pub fn listing_path(&self) -> &'static str {
        match self {
            ExchangeKind::Binance => binance::PATH,
            ExchangeKind::Okx => okx::PATH,
            ExchangeKind::Mexc => mexc::PATH,
            ExchangeKind::Coinbase => coinbase::PATH,
            ExchangeKind::Kucoin => kucoin::PATH,
        }
    }

    fn parse(&self, body: &str) -> ExchangeResult<Vec<Instrument>> {
        match self {
            ExchangeKind::Binance => binance::parse_instruments(body),
            ExchangeKind::Okx => okx::parse_instruments(body),
            ExchangeKind::Mexc => mexc::parse_instruments(body),
            ExchangeKind::Coinbase => coinbase::parse_instruments(body),
            ExchangeKind::Kucoin => kucoin::parse_instruments(body),
        }
    }
}

impl fmt::Display for ExchangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// REST 커넥터 설정.
#[derive(Debug, Clone)]
pub struct RestConfig {
    /// 요청 타임아웃 (초)
    pub timeout_secs: u64,
    /// User-Agent 헤더 (Coinbase는 필수)
    pub user_agent: String,
}

impl Default for RestConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            user_agent: concat!("watchlist/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl RestConfig {
    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }
}

/// 공개 REST API 기반 `InstrumentCatalog` 구현.
pub struct RestCatalog {
    client: Client,
}

impl RestCatalog {
    /// 새 커넥터 생성.
    ///
    /// # Errors
    /// HTTP 클라이언트 생성에 실패하면 `ExchangeError::NetworkError`를 반환합니다.
    pub fn new(config: RestConfig) -> ExchangeResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent)
            .build()
            .map_err(|e| ExchangeError::NetworkError(format!("HTTP 클라이언트 생성 실패: {}", e)))?;

        Ok(Self { client })
    }

    /// 엔드포인트를 base URL로 변환.
    ///
    /// 호스트명(`api1.binance.com`)은 `https://`를 붙이고,
    /// 스킴이 있는 URL(`http://127.0.0.1:8080`)은 그대로 사용합니다.
    pub fn base_url(kind: ExchangeKind, endpoint: Option<&str>) -> String {
        let endpoint = endpoint
            .map(|e| e.trim().trim_end_matches('/'))
            .filter(|e| !e.is_empty())
            .unwrap_or_else(|| kind.default_host());

        if endpoint.contains("://") {
            endpoint.to_string()
        } else {
            format!("https://{}", endpoint)
        }
    }

    /// GET 요청 후 응답 본문 반환.
    async fn get_body(&self, url: &str) -> ExchangeResult<String> {
        debug!("GET {}", url);

        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if status.is_success() {
            Ok(body)
        } else {
            let message: String = body.chars().take(MAX_ERROR_BODY).collect();
            Err(ExchangeError::ApiError {
                code: status.as_u16() as i32,
                message,
            })
        }
    }
}

#[async_trait]
impl InstrumentCatalog for RestCatalog {
    async fn list_instruments(
        &self,
        source: &SourceId,
        endpoint: Option<&str>,
    ) -> ExchangeResult<Vec<Instrument>> {
        let kind = ExchangeKind::from_source(source)
            .ok_or_else(|| ExchangeError::NotSupported(format!("unknown source: {}", source)))?;

        let url = format!("{}{}", Self::base_url(kind, endpoint), kind.listing_path());
        let body = self.get_body(&url).await?;
        let instruments = kind.parse(&body)?;

        debug!(source = %source, count = instruments.len(), "상장 목록 조회 완료");
        Ok(instruments)
    }
}
