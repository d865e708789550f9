//! 환경변수 기반 설정 모듈.

use crate::error::CollectorError;
use crate::Result;
use std::path::PathBuf;
use std::time::Duration;
use watchlist_core::SourceId;

/// 기본 소스 목록 (통합 목록의 순서이기도 함)
pub const DEFAULT_SOURCES: &[&str] = &["binance", "okx", "mexc", "coinbase", "kucoin"];

/// 기본 정산 자산
pub const DEFAULT_QUOTE: &str = "BTC";

/// 기본 failover 소스
pub const DEFAULT_FAILOVER_SOURCE: &str = "binance";

/// failover 소스의 기본 엔드포인트 (시도 순서)
pub const DEFAULT_FAILOVER_ENDPOINTS: &[&str] = &[
    "api1.binance.com",
    "api-gcp.binance.com",
    "api4.binance.com",
    "api.binance.com",
];

/// Collector 전체 설정
#[derive(Debug, Clone)]
pub struct CollectorConfig {
    /// 수집 대상 소스 (설정 순서 유지)
    pub sources: Vec<String>,
    /// 정산 자산 (대문자)
    pub quote: String,
    /// 산출물 설정
    pub output: OutputConfig,
    /// failover 설정
    pub failover: FailoverConfig,
    /// 수집 동작 설정
    pub fetch: FetchConfig,
    /// 데몬 모드 설정
    pub daemon: DaemonConfig,
}

/// 산출물 경로 설정
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// 텍스트 목록 디렉토리
    pub out_dir: PathBuf,
    /// 메타데이터 파일 경로
    pub meta_path: PathBuf,
}

/// failover 설정
#[derive(Debug, Clone)]
pub struct FailoverConfig {
    /// failover 대상 소스 (`None`이면 비활성)
    pub source: Option<String>,
    /// 후보 엔드포인트 (시도 순서)
    pub endpoints: Vec<String>,
    /// 외부에서 지정한 우선 엔드포인트 (맨 앞에 추가)
    pub preferred: Option<String>,
}

/// 수집 동작 설정
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// 백엔드 호출당 타임아웃 (초)
    pub call_timeout_secs: u64,
    /// 동시에 수집할 소스 수 (1이면 순차)
    pub max_concurrency: usize,
}

/// 데몬 모드 설정
#[derive(Debug, Clone)]
pub struct DaemonConfig {
    /// 실행 주기 (분 단위)
    pub interval_minutes: u64,
}

/// 소스 수집 방식.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceKind {
    /// 기본 엔드포인트로 한 번 조회
    Ordinary,
    /// 엔드포인트를 순서대로 시도
    Failover { endpoints: Vec<String> },
}

/// 소스 하나의 수집 설정.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceConfig {
    pub id: SourceId,
    pub kind: SourceKind,
}

impl SourceConfig {
    pub fn ordinary(id: SourceId) -> Self {
        Self {
            id,
            kind: SourceKind::Ordinary,
        }
    }

    pub fn failover(id: SourceId, endpoints: Vec<String>) -> Self {
        Self {
            id,
            kind: SourceKind::Failover { endpoints },
        }
    }

    pub fn is_failover(&self) -> bool {
        matches!(self.kind, SourceKind::Failover { .. })
    }
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            sources: DEFAULT_SOURCES.iter().map(|s| s.to_string()).collect(),
            quote: DEFAULT_QUOTE.to_string(),
            output: OutputConfig {
                out_dir: PathBuf::from("lists"),
                meta_path: PathBuf::from("META.json"),
            },
            failover: FailoverConfig {
                source: Some(DEFAULT_FAILOVER_SOURCE.to_string()),
                endpoints: DEFAULT_FAILOVER_ENDPOINTS
                    .iter()
                    .map(|s| s.to_string())
                    .collect(),
                preferred: None,
            },
            fetch: FetchConfig {
                call_timeout_secs: 30,
                max_concurrency: 1,
            },
            daemon: DaemonConfig {
                interval_minutes: 60,
            },
        }
    }
}

impl CollectorConfig {
    /// 환경변수에서 설정 로드 (`.env` 파일이 있으면 먼저 읽음)
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 키 조회 함수로 설정 로드.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let sources = lookup("WATCHLIST_SOURCES")
            .map(|v| split_list(&v))
            .unwrap_or(defaults.sources);

        let quote = lookup("WATCHLIST_QUOTE")
            .map(|v| v.trim().to_uppercase())
            .unwrap_or(defaults.quote);

        let failover_source = match lookup("FAILOVER_SOURCE") {
            Some(v) if v.trim().is_empty() => None,
            Some(v) => Some(v.trim().to_string()),
            None => defaults.failover.source,
        };

        let preferred = lookup("FAILOVER_PREFERRED_ENDPOINT")
            .or_else(|| lookup("BINANCE_HOST"))
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());

        let config = Self {
            sources,
            quote,
            output: OutputConfig {
                out_dir: lookup("WATCHLIST_OUT_DIR")
                    .map(PathBuf::from)
                    .unwrap_or(defaults.output.out_dir),
                meta_path: lookup("WATCHLIST_META_PATH")
                    .map(PathBuf::from)
                    .unwrap_or(defaults.output.meta_path),
            },
            failover: FailoverConfig {
                source: failover_source,
                endpoints: lookup("FAILOVER_ENDPOINTS")
                    .map(|v| split_list(&v))
                    .unwrap_or(defaults.failover.endpoints),
                preferred,
            },
            fetch: FetchConfig {
                call_timeout_secs: parse_or(&lookup, "COLLECTOR_CALL_TIMEOUT_SECS", 30),
                max_concurrency: parse_or(&lookup, "COLLECTOR_MAX_CONCURRENCY", 1usize).max(1),
            },
            daemon: DaemonConfig {
                interval_minutes: parse_or(&lookup, "DAEMON_INTERVAL_MINUTES", 60),
            },
        };

        config.validate()?;
        Ok(config)
    }

    /// 실행 전 설정 검증.
    pub fn validate(&self) -> Result<()> {
        if self.sources.is_empty() {
            return Err(CollectorError::Config(
                "수집 대상 소스가 없습니다 (WATCHLIST_SOURCES)".to_string(),
            ));
        }
        if self.quote.is_empty() {
            return Err(CollectorError::Config(
                "정산 자산이 비어 있습니다 (WATCHLIST_QUOTE)".to_string(),
            ));
        }
        if !self.quote.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()) {
            return Err(CollectorError::Config(format!(
                "정산 자산은 영문 대문자와 숫자만 허용됩니다: {} (WATCHLIST_QUOTE)",
                self.quote
            )));
        }
        for id in &self.sources {
            SourceId::new(id)?;
        }
        if let Some(failover) = &self.failover.source {
            SourceId::new(failover)?;
        }
        if self.fetch.call_timeout_secs == 0 {
            return Err(CollectorError::Config(
                "호출 타임아웃은 0보다 커야 합니다 (COLLECTOR_CALL_TIMEOUT_SECS)".to_string(),
            ));
        }
        if self.daemon.interval_minutes == 0 {
            return Err(CollectorError::Config(
                "데몬 실행 주기는 0보다 커야 합니다 (DAEMON_INTERVAL_MINUTES)".to_string(),
            ));
        }
        Ok(())
    }

    /// 우선 엔드포인트를 앞에 붙인 failover 엔드포인트 목록.
    ///
    /// 중복은 처음 나온 것만 남깁니다.
    pub fn failover_endpoints(&self) -> Vec<String> {
        let mut endpoints: Vec<String> = Vec::new();
        let candidates = self
            .failover
            .preferred
            .iter()
            .chain(self.failover.endpoints.iter());

        for endpoint in candidates {
            let endpoint = endpoint.trim();
            if !endpoint.is_empty() && !endpoints.iter().any(|e| e == endpoint) {
                endpoints.push(endpoint.to_string());
            }
        }
        endpoints
    }

    /// 설정 순서대로 소스별 수집 설정 생성.
    pub fn source_configs(&self) -> Result<Vec<SourceConfig>> {
        let failover_id = self
            .failover
            .source
            .as_deref()
            .map(SourceId::new)
            .transpose()?;

        if let Some(id) = &failover_id {
            let listed = self
                .sources
                .iter()
                .any(|s| SourceId::new(s).map(|s| &s == id).unwrap_or(false));
            if !listed {
                tracing::warn!(source = %id, "failover 소스가 수집 대상에 없어 무시합니다");
            }
        }

        self.sources
            .iter()
            .map(|raw| -> Result<SourceConfig> {
                let id = SourceId::new(raw)?;
                if failover_id.as_ref() == Some(&id) {
                    Ok(SourceConfig::failover(id, self.failover_endpoints()))
                } else {
                    Ok(SourceConfig::ordinary(id))
                }
            })
            .collect()
    }
}

impl FetchConfig {
    /// 호출당 타임아웃을 Duration으로 반환
    pub fn call_timeout(&self) -> Duration {
        Duration::from_secs(self.call_timeout_secs)
    }
}

impl DaemonConfig {
    /// 실행 주기를 Duration으로 반환
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_minutes.saturating_mul(60))
    }
}

/// 쉼표로 구분된 목록 파싱 (빈 항목 제거)
fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect()
}

/// 값을 파싱 (실패 시 기본값 사용)
fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    lookup(key)
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}
