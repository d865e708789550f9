//! 실행 메타데이터.

use super::source_result::EndpointAttempt;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Serialize, Serializer};

/// failover 소스의 엔드포인트 시도 기록.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FailoverTrail {
    /// failover 소스 (대문자)
    pub source: String,
    /// 설정된 엔드포인트 순서
    pub endpoints: Vec<String>,
    /// 성공한 엔드포인트
    pub selected_endpoint: Option<String>,
    /// 실제 시도 기록
    pub attempts: Vec<EndpointAttempt>,
}

/// 실행 단위 메타데이터.
///
/// 실행마다 한 번 생성되어 한 번 기록되며, 이후 변경되지 않습니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunMetadata {
    #[serde(serialize_with = "serialize_timestamp")]
    generated_at: DateTime<Utc>,
    quote: String,
    sources: Vec<String>,
    files: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    failover: Option<FailoverTrail>,
}

impl RunMetadata {
    pub fn new(
        generated_at: DateTime<Utc>,
        quote: impl Into<String>,
        sources: Vec<String>,
        files: Vec<String>,
        failover: Option<FailoverTrail>,
    ) -> Self {
        Self {
            generated_at,
            quote: quote.into(),
            sources,
            files,
            failover,
        }
    }

    pub fn generated_at(&self) -> DateTime<Utc> {
        self.generated_at
    }

    pub fn quote(&self) -> &str {
        &self.quote
    }

    /// 설정 순서의 소스 목록 (대문자).
    pub fn sources(&self) -> &[String] {
        &self.sources
    }

    /// 기록 대상 산출물 경로.
    pub fn files(&self) -> &[String] {
        &self.files
    }

    pub fn failover(&self) -> Option<&FailoverTrail> {
        self.failover.as_ref()
    }

    /// 들여쓰기된 JSON 문자열로 변환.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

fn serialize_timestamp<S: Serializer>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&ts.to_rfc3339_opts(SecondsFormat::Millis, true))
}
