//! 소스별 수집 결과.

use crate::types::{SourceId, Symbol};
use serde::Serialize;
use std::fmt;

/// 엔드포인트 한 번의 시도 결과.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum AttemptOutcome {
    /// 1개 이상의 심볼 수집
    Success {
        /// 정규화 후 심볼 수
        count: usize,
    },
    /// 호출은 성공했으나 심볼 없음 (soft block 의심)
    Empty,
    /// 전송/파싱 에러
    Error {
        /// 에러 메시지
        message: String,
    },
}

impl AttemptOutcome {
    /// 성공 여부.
    pub fn is_success(&self) -> bool {
        matches!(self, AttemptOutcome::Success { .. })
    }
}

impl fmt::Display for AttemptOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttemptOutcome::Success { count } => write!(f, "success ({} symbols)", count),
            AttemptOutcome::Empty => write!(f, "returned 0 symbols"),
            AttemptOutcome::Error { message } => write!(f, "error: {}", message),
        }
    }
}

/// failover 엔드포인트 시도 기록.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EndpointAttempt {
    /// 엔드포인트 (호스트명 또는 base URL)
    pub endpoint: String,
    /// 시도 결과
    #[serde(flatten)]
    pub outcome: AttemptOutcome,
}

impl EndpointAttempt {
    pub fn new(endpoint: impl Into<String>, outcome: AttemptOutcome) -> Self {
        Self {
            endpoint: endpoint.into(),
            outcome,
        }
    }
}

impl fmt::Display for EndpointAttempt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.endpoint, self.outcome)
    }
}

/// 소스 하나의 수집 결과.
///
/// 심볼은 중복 없이 바이트 순서로 정렬되어 있습니다.
/// 생성 후에는 변경할 수 없습니다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceResult {
    source: SourceId,
    symbols: Vec<Symbol>,
    diagnostics: Vec<String>,
    attempts: Vec<EndpointAttempt>,
}

impl SourceResult {
    /// 수집 성공 결과 생성.
    ///
    /// `symbols`는 `normalize_all`의 출력이어야 합니다.
    pub fn success(source: SourceId, symbols: Vec<Symbol>) -> Self {
        Self {
            source,
            symbols,
            diagnostics: Vec::new(),
            attempts: Vec::new(),
        }
    }

    /// 심볼 없이 진단 메시지만 가진 실패 결과 생성.
    pub fn failed(source: SourceId, diagnostics: Vec<String>) -> Self {
        Self {
            source,
            symbols: Vec::new(),
            diagnostics,
            attempts: Vec::new(),
        }
    }

    /// failover 시도 기록 첨부.
    pub fn with_attempts(mut self, attempts: Vec<EndpointAttempt>) -> Self {
        self.attempts = attempts;
        self
    }

    pub fn source(&self) -> &SourceId {
        &self.source
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    pub fn diagnostics(&self) -> &[String] {
        &self.diagnostics
    }

    /// failover 시도 기록 (일반 소스는 비어 있음).
    pub fn attempts(&self) -> &[EndpointAttempt] {
        &self.attempts
    }

    /// 성공한 엔드포인트 (failover 소스가 성공한 경우).
    pub fn selected_endpoint(&self) -> Option<&str> {
        self.attempts
            .iter()
            .find(|a| a.outcome.is_success())
            .map(|a| a.endpoint.as_str())
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}
