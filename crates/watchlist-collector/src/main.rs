//! Watchlist collector CLI.

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use watchlist_collector::modules::{persist, Aggregator, FsArtifactWriter};
use watchlist_collector::{CollectorConfig, SourceConfig};
use watchlist_core::{init_logging, LogConfig, LogFormat};

#[derive(Parser)]
#[command(name = "watchlist-collector")]
#[command(about = "Spot pair watchlist collector", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// 로그 레벨 (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    /// 로그 형식 (pretty, json, compact)
    #[arg(long, global = true, default_value = "compact")]
    log_format: LogFormat,

    /// 로그에 소스 파일 위치 포함
    #[arg(long, global = true)]
    log_source_location: bool,

    /// 텍스트 목록 디렉토리 (WATCHLIST_OUT_DIR 대신)
    #[arg(long, global = true)]
    out_dir: Option<PathBuf>,

    /// 메타데이터 파일 경로 (WATCHLIST_META_PATH 대신)
    #[arg(long, global = true)]
    meta_path: Option<PathBuf>,

    /// 정산 자산 (WATCHLIST_QUOTE 대신)
    #[arg(long, global = true)]
    quote: Option<String>,

    /// 수집 대상 소스 (쉼표로 구분, 예: "binance,okx")
    #[arg(long, global = true, value_delimiter = ',')]
    sources: Option<Vec<String>>,
}

#[derive(Subcommand, Clone, Copy)]
enum Commands {
    /// 한 번 실행 (기본값)
    Run,

    /// 데몬 모드: 주기적으로 실행
    Daemon,
}

impl Cli {
    /// CLI 인자로 환경변수 설정을 덮어씁니다.
    fn apply(&self, config: &mut CollectorConfig) -> anyhow::Result<()> {
        if let Some(out_dir) = &self.out_dir {
            config.output.out_dir = out_dir.clone();
        }
        if let Some(meta_path) = &self.meta_path {
            config.output.meta_path = meta_path.clone();
        }
        if let Some(quote) = &self.quote {
            config.quote = quote.trim().to_uppercase();
        }
        if let Some(sources) = &self.sources {
            config.sources = sources
                .iter()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }
        config.validate()?;
        Ok(())
    }
}

/// 한 번의 수집 실행: 수집 → 기록 → 통계 로그.
async fn run_once(aggregator: &Aggregator, sources: &[SourceConfig]) -> anyhow::Result<()> {
    let report = aggregator.run(sources).await;

    for result in report.results.iter().filter(|r| !r.diagnostics().is_empty()) {
        for diagnostic in result.diagnostics() {
            tracing::warn!(source = %result.source(), "{}", diagnostic);
        }
    }

    let written = persist(&report, aggregator.layout(), &FsArtifactWriter)?;
    tracing::info!(
        files = written.len(),
        quote = report.metadata.quote(),
        generated_at = %report.metadata.generated_at(),
        "산출물 기록 완료"
    );

    report.stats.log_summary("watchlist 수집");
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(
        LogConfig::for_workspace(&cli.log_level)
            .with_format(cli.log_format)
            .with_file(cli.log_source_location),
    )
    .map_err(|e| anyhow::anyhow!("로깅 초기화 실패: {}", e))?;

    tracing::info!("Watchlist Collector 시작");

    // 설정 로드
    let mut config = CollectorConfig::from_env().context("설정 로드 실패")?;
    cli.apply(&mut config).context("설정 검증 실패")?;
    tracing::debug!(
        sources = ?config.sources,
        quote = %config.quote,
        out_dir = %config.output.out_dir.display(),
        "설정 로드 완료"
    );

    // 설정 오류는 데몬 루프에 들어가기 전에 종료
    let sources = config.source_configs().context("소스 설정 생성 실패")?;
    let aggregator = Aggregator::from_config(&config)?;

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => {
            run_once(&aggregator, &sources).await?;
        }
        Commands::Daemon => {
            tracing::info!(
                "=== 데몬 모드 시작 (주기: {}분) ===",
                config.daemon.interval_minutes
            );

            let mut interval = tokio::time::interval(config.daemon.interval());
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {
                        tracing::info!("종료 신호 수신, 데몬 종료 중...");
                        break;
                    }
                    _ = interval.tick() => {
                        if let Err(e) = run_once(&aggregator, &sources).await {
                            tracing::error!("수집 실행 실패: {:#}", e);
                        }

                        tracing::info!(
                            "=== 실행 완료, 다음 실행: {}분 후 ===",
                            config.daemon.interval_minutes
                        );
                    }
                }
            }
        }
    }

    tracing::info!("Watchlist Collector 종료");
    Ok(())
}
