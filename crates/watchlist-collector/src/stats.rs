//! 실행 통계.

use std::time::Duration;
use watchlist_core::SourceResult;

/// 한 번의 실행에 대한 소스별 집계
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunStats {
    /// 설정된 소스 수
    pub total: usize,
    /// 1개 이상의 심볼을 수집한 소스 수
    pub success: usize,
    /// 에러로 실패한 소스 수 (진단 메시지 있음)
    pub errors: usize,
    /// 조회는 성공했으나 심볼이 없는 소스 수
    pub empty: usize,
    /// 통합 목록의 심볼 수
    pub total_symbols: usize,
    /// 소요 시간
    pub elapsed: Duration,
}

impl RunStats {
    /// 소스별 결과에서 통계 생성
    pub fn from_results(results: &[SourceResult], elapsed: Duration) -> Self {
        let mut stats = Self {
            total: results.len(),
            elapsed,
            ..Default::default()
        };

        for result in results {
            if !result.is_empty() {
                stats.success += 1;
                stats.total_symbols += result.len();
            } else if result.diagnostics().is_empty() {
                stats.empty += 1;
            } else {
                stats.errors += 1;
            }
        }
        stats
    }

    /// 성공률 계산 (%)
    pub fn success_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            (self.success as f64 / self.total as f64) * 100.0
        }
    }

    /// 통계 요약 로그 출력
    pub fn log_summary(&self, operation: &str) {
        tracing::info!(
            operation = operation,
            total = self.total,
            success = self.success,
            errors = self.errors,
            empty = self.empty,
            total_symbols = self.total_symbols,
            success_rate = format!("{:.1}%", self.success_rate()),
            elapsed = format!("{:.1}s", self.elapsed.as_secs_f64()),
            "수집 완료"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use watchlist_core::{normalize_all, Instrument, SourceId};

    #[test]
    fn test_from_results() {
        let okx = SourceId::new("okx").unwrap();
        let symbols = normalize_all(
            &[Instrument::spot("ETH", "BTC"), Instrument::spot("SOL", "BTC")],
            &okx,
            "BTC",
        );
        let results = vec![
            SourceResult::success(okx, symbols),
            SourceResult::success(SourceId::new("mexc").unwrap(), Vec::new()),
            SourceResult::failed(
                SourceId::new("kucoin").unwrap(),
                vec!["Network error: refused".to_string()],
            ),
        ];

        let stats = RunStats::from_results(&results, Duration::from_millis(1500));
        assert_eq!(stats.total, 3);
        assert_eq!(stats.success, 1);
        assert_eq!(stats.empty, 1);
        assert_eq!(stats.errors, 1);
        assert_eq!(stats.total_symbols, 2);
        assert!((stats.success_rate() - 33.3).abs() < 0.1);
    }

    #[test]
    fn test_success_rate_without_sources() {
        assert_eq!(RunStats::default().success_rate(), 0.0);
    }
}
