//! 소스별 수집 및 통합.
//!
//! 소스마다 독립적으로 수집하므로 한 소스의 실패가 다른 소스에 영향을 주지 않습니다.
//! 통합 목록은 완료 순서가 아니라 설정 순서대로 이어 붙입니다.

use super::failover::fetch_with_failover;
use super::fetcher::{fetch_ordinary, FetchOptions};
use super::writer::OutputLayout;
use crate::config::{CollectorConfig, SourceConfig, SourceKind};
use crate::Result;
use crate::stats::RunStats;
use chrono::Utc;
use futures::stream::{self, StreamExt};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, info_span, warn, Instrument};
use watchlist_core::{FailoverTrail, RunMetadata, SourceResult, Symbol};
use watchlist_exchange::{InstrumentCatalog, RestCatalog, RestConfig};

/// 한 번의 실행 결과.
#[derive(Debug, Clone)]
pub struct RunReport {
    /// 소스별 결과 (설정 순서, 빈 결과 포함)
    pub results: Vec<SourceResult>,
    /// 설정 순서로 이어 붙인 통합 목록
    pub combined: Vec<Symbol>,
    /// 실행 메타데이터
    pub metadata: RunMetadata,
    /// 실행 통계
    pub stats: RunStats,
}

impl RunReport {
    /// 소스 식별자로 결과 조회.
    pub fn result(&self, source: &str) -> Option<&SourceResult> {
        let source = source.trim().to_lowercase();
        self.results.iter().find(|r| r.source().as_str() == source)
    }

    /// 통합 산출물 생성 여부.
    pub fn has_combined(&self) -> bool {
        !self.combined.is_empty()
    }
}

/// 설정된 모든 소스를 수집하고 결과를 통합합니다.
pub struct Aggregator {
    catalog: Arc<dyn InstrumentCatalog>,
    options: FetchOptions,
    layout: OutputLayout,
    max_concurrency: usize,
}

impl Aggregator {
    pub fn new(
        catalog: Arc<dyn InstrumentCatalog>,
        options: FetchOptions,
        layout: OutputLayout,
    ) -> Self {
        Self {
            catalog,
            options,
            layout,
            max_concurrency: 1,
        }
    }

    /// 설정에서 REST 백엔드를 사용하는 수집기 생성.
    ///
    /// # Errors
    /// HTTP 클라이언트 생성 실패 시 `CollectorError::Exchange`를 반환합니다.
    pub fn from_config(config: &CollectorConfig) -> Result<Self> {
        let catalog =
            RestCatalog::new(RestConfig::default().with_timeout_secs(config.fetch.call_timeout_secs))?;

        Ok(Self::new(
            Arc::new(catalog),
            FetchOptions::new(config.quote.clone(), config.fetch.call_timeout()),
            OutputLayout::new(
                config.output.out_dir.clone(),
                config.output.meta_path.clone(),
                &config.quote,
            ),
        )
        .with_max_concurrency(config.fetch.max_concurrency))
    }

    /// 동시에 수집할 소스 수 설정 (1이면 순차 실행).
    pub fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.max_concurrency = max_concurrency.max(1);
        self
    }

    pub fn layout(&self) -> &OutputLayout {
        &self.layout
    }

    /// 전체 소스 수집.
    ///
    /// 소스별 실패는 해당 결과의 진단 메시지로만 남으며, 이 함수는 항상 완료됩니다.
    /// 같은 소스가 여러 번 설정되면 처음 것만 수집합니다.
    pub async fn run(&self, sources: &[SourceConfig]) -> RunReport {
        let start = Instant::now();

        let mut seen = HashSet::new();
        let sources: Vec<&SourceConfig> = sources
            .iter()
            .filter(|config| {
                let first = seen.insert(config.id.clone());
                if !first {
                    warn!(source = %config.id, "중복 설정된 소스, 건너뜀");
                }
                first
            })
            .collect();

        info!(
            sources = sources.len(),
            failover = sources.iter().filter(|c| c.is_failover()).count(),
            concurrency = self.max_concurrency,
            "수집 시작"
        );

        // buffered는 입력 순서대로 결과를 내보냄
        let results: Vec<SourceResult> = stream::iter(sources.iter().map(|c| self.fetch_source(c)))
            .buffered(self.max_concurrency)
            .collect()
            .await;

        let combined: Vec<Symbol> = results
            .iter()
            .flat_map(|r| r.symbols().iter().cloned())
            .collect();

        let files = self
            .layout
            .artifacts(&results, &combined)
            .into_iter()
            .map(|a| a.path.display().to_string())
            .collect();

        let failover = sources
            .iter()
            .zip(&results)
            .find_map(|(config, result)| match &config.kind {
                SourceKind::Failover { endpoints } => Some(FailoverTrail {
                    source: config.id.upper(),
                    endpoints: endpoints.clone(),
                    selected_endpoint: result.selected_endpoint().map(str::to_string),
                    attempts: result.attempts().to_vec(),
                }),
                SourceKind::Ordinary => None,
            });

        // 중복 제거 후의 목록 (실제로 수집한 소스만 기록)
        let metadata = RunMetadata::new(
            Utc::now(),
            self.options.quote.clone(),
            sources.iter().map(|c| c.id.upper()).collect(),
            files,
            failover,
        );

        if combined.is_empty() {
            warn!("모든 소스에서 심볼을 얻지 못해 통합 목록을 생성하지 않습니다");
        }

        let stats = RunStats::from_results(&results, start.elapsed());

        RunReport {
            results,
            combined,
            metadata,
            stats,
        }
    }

    async fn fetch_source(&self, config: &SourceConfig) -> SourceResult {
        let span = info_span!("fetch_source", source = %config.id);
        async {
            match &config.kind {
                SourceKind::Ordinary => {
                    fetch_ordinary(self.catalog.as_ref(), &config.id, &self.options).await
                }
                SourceKind::Failover { endpoints } => {
                    fetch_with_failover(self.catalog.as_ref(), &config.id, endpoints, &self.options)
                        .await
                }
            }
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::testing::{btc_pairs, Reply, ScriptedCatalog};
    use std::time::Duration;
    use watchlist_core::SourceId;

    fn aggregator(catalog: ScriptedCatalog) -> Aggregator {
        Aggregator::new(
            Arc::new(catalog),
            FetchOptions::new("BTC", Duration::from_secs(30)),
            OutputLayout::new("lists", "META.json", "BTC"),
        )
    }

    fn ordinary(id: &str) -> SourceConfig {
        SourceConfig::ordinary(SourceId::new(id).unwrap())
    }

    fn strings(symbols: &[Symbol]) -> Vec<String> {
        symbols.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_failing_source_is_isolated() {
        let catalog = ScriptedCatalog::new()
            .with("x", None, Reply::Instruments(btc_pairs(&["ETH", "ADA"])))
            .with("y", None, Reply::Fail("boom".to_string()))
            .with("z", None, Reply::Instruments(btc_pairs(&["XRP"])));

        let report = aggregator(catalog)
            .run(&[ordinary("x"), ordinary("y"), ordinary("z")])
            .await;

        assert_eq!(report.results.len(), 3);
        assert_eq!(report.result("x").unwrap().len(), 2);
        assert!(report.result("y").unwrap().is_empty());
        assert_eq!(report.result("y").unwrap().diagnostics().len(), 1);
        assert_eq!(report.result("Z").unwrap().len(), 1);

        assert_eq!(
            strings(&report.combined),
            vec!["X:ADABTC", "X:ETHBTC", "Z:XRPBTC"]
        );
        assert_eq!(
            report.metadata.files(),
            [
                "lists/ALL_BTC_PAIRS.txt".to_string(),
                "lists/X_BTC_PAIRS.txt".to_string(),
                "lists/Z_BTC_PAIRS.txt".to_string(),
            ]
        );
        assert_eq!(report.metadata.sources(), ["X", "Y", "Z"]);
        assert_eq!(report.metadata.quote(), "BTC");
        assert!(report.metadata.failover().is_none());
        assert_eq!(report.stats.errors, 1);
        assert_eq!(report.stats.success, 2);
    }

    #[tokio::test]
    async fn test_all_empty_produces_no_combined_artifact() {
        let catalog = ScriptedCatalog::new()
            .with("x", None, Reply::Instruments(Vec::new()))
            .with("y", None, Reply::Fail("down".to_string()));

        let report = aggregator(catalog).run(&[ordinary("x"), ordinary("y")]).await;

        assert!(!report.has_combined());
        assert!(report.metadata.files().is_empty());
        assert_eq!(report.results.len(), 2);
        assert!(report.results.iter().all(|r| r.is_empty()));
    }

    #[tokio::test]
    async fn test_failover_trail_in_metadata() {
        let catalog = ScriptedCatalog::new()
            .with("binance", Some("api1"), Reply::Instruments(Vec::new()))
            .with("binance", Some("api2"), Reply::Instruments(btc_pairs(&["ETH"])))
            .with("okx", None, Reply::Instruments(btc_pairs(&["SOL"])));

        let sources = vec![
            SourceConfig::failover(
                SourceId::new("binance").unwrap(),
                vec!["api1".to_string(), "api2".to_string()],
            ),
            ordinary("okx"),
        ];
        let report = aggregator(catalog).run(&sources).await;

        assert_eq!(strings(&report.combined), vec!["BINANCE:ETHBTC", "OKX:SOLBTC"]);
        let trail = report.metadata.failover().unwrap();
        assert_eq!(trail.source, "BINANCE");
        assert_eq!(trail.endpoints, vec!["api1", "api2"]);
        assert_eq!(trail.selected_endpoint.as_deref(), Some("api2"));
        assert_eq!(trail.attempts.len(), 2);
        // 성공 시 진단 메시지 없음
        assert!(report.result("binance").unwrap().diagnostics().is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_sources_fetched_once() {
        let catalog =
            ScriptedCatalog::new().with("okx", None, Reply::Instruments(btc_pairs(&["ETH"])));
        let catalog = Arc::new(catalog);
        let aggregator = Aggregator::new(
            catalog.clone(),
            FetchOptions::new("BTC", Duration::from_secs(30)),
            OutputLayout::new("lists", "META.json", "BTC"),
        );

        let report = aggregator.run(&[ordinary("okx"), ordinary("OKX")]).await;

        assert_eq!(report.results.len(), 1);
        assert_eq!(report.combined.len(), 1);
        assert_eq!(report.metadata.sources(), ["OKX"]);
        assert_eq!(catalog.calls().len(), 1);
    }

    #[test]
    fn test_from_config_uses_configured_layout() {
        let mut config = CollectorConfig::default();
        config.quote = "ETH".to_string();
        config.output.out_dir = "out".into();
        config.fetch.max_concurrency = 3;

        let aggregator = Aggregator::from_config(&config).unwrap();

        assert_eq!(aggregator.layout(), &OutputLayout::new("out", "META.json", "ETH"));
        assert_eq!(aggregator.options.quote, "ETH");
        assert_eq!(aggregator.options.call_timeout, Duration::from_secs(30));
        assert_eq!(aggregator.max_concurrency, 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_run_keeps_configured_order() {
        // 첫 소스가 타임아웃까지 걸려도 결과 순서는 설정 순서
        let catalog = ScriptedCatalog::new()
            .with("slow", None, Reply::Hang)
            .with("a", None, Reply::Instruments(btc_pairs(&["ETH"])))
            .with("b", None, Reply::Instruments(btc_pairs(&["XRP"])));

        let report = Aggregator::new(
            Arc::new(catalog),
            FetchOptions::new("BTC", Duration::from_secs(5)),
            OutputLayout::new("lists", "META.json", "BTC"),
        )
        .with_max_concurrency(3)
        .run(&[ordinary("slow"), ordinary("a"), ordinary("b")])
        .await;

        let order: Vec<&str> = report.results.iter().map(|r| r.source().as_str()).collect();
        assert_eq!(order, vec!["slow", "a", "b"]);
        assert_eq!(strings(&report.combined), vec!["A:ETHBTC", "B:XRPBTC"]);
        assert!(report.result("slow").unwrap().diagnostics()[0].starts_with("Request timeout"));
    }
}
