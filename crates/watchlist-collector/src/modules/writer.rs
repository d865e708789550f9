//! 산출물 기록.
//!
//! - 소스별 목록: `{out_dir}/{SOURCE}_{QUOTE}_PAIRS.txt` (심볼이 있을 때만)
//! - 통합 목록: `{out_dir}/ALL_{QUOTE}_PAIRS.txt` (통합 목록이 비어 있지 않을 때만)
//! - 메타데이터: `meta_path` (매 실행마다 덮어씀)
//!
//! 텍스트 목록은 한 줄에 심볼 하나, 마지막 줄도 개행으로 끝납니다.

use super::aggregator::RunReport;
use crate::error::CollectorError;
use crate::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;
use watchlist_core::{SourceId, SourceResult, Symbol};

/// 파일 기록 인터페이스.
pub trait ArtifactWriter: Send + Sync {
    /// `path`에 `contents`를 기록합니다 (기존 파일은 덮어씀).
    fn write(&self, path: &Path, contents: &str) -> Result<()>;
}

/// 로컬 파일시스템 기록기.
///
/// 상위 디렉토리가 없으면 생성합니다.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsArtifactWriter;

impl ArtifactWriter for FsArtifactWriter {
    fn write(&self, path: &Path, contents: &str) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| CollectorError::io(parent, e))?;
        }
        fs::write(path, contents).map_err(|e| CollectorError::io(path, e))
    }
}

/// 산출물 경로 규칙.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLayout {
    pub out_dir: PathBuf,
    pub meta_path: PathBuf,
    pub quote: String,
}

/// 기록할 텍스트 산출물 하나.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact<'a> {
    pub path: PathBuf,
    pub symbols: &'a [Symbol],
}

impl OutputLayout {
    pub fn new(out_dir: impl Into<PathBuf>, meta_path: impl Into<PathBuf>, quote: &str) -> Self {
        Self {
            out_dir: out_dir.into(),
            meta_path: meta_path.into(),
            quote: quote.to_string(),
        }
    }

    /// 통합 목록 경로.
    pub fn combined_path(&self) -> PathBuf {
        self.out_dir.join(format!("ALL_{}_PAIRS.txt", self.quote))
    }

    /// 소스별 목록 경로.
    pub fn source_path(&self, source: &SourceId) -> PathBuf {
        self.out_dir
            .join(format!("{}_{}_PAIRS.txt", source.upper(), self.quote))
    }

    /// 실제로 기록할 텍스트 산출물 목록.
    ///
    /// 통합 목록이 먼저, 이어서 설정 순서의 소스별 목록입니다.
    /// 심볼이 없는 목록은 포함하지 않습니다.
    pub fn artifacts<'a>(
        &self,
        results: &'a [SourceResult],
        combined: &'a [Symbol],
    ) -> Vec<Artifact<'a>> {
        let mut artifacts = Vec::with_capacity(results.len() + 1);
        if !combined.is_empty() {
            artifacts.push(Artifact {
                path: self.combined_path(),
                symbols: combined,
            });
        }
        artifacts.extend(results.iter().filter(|r| !r.is_empty()).map(|r| Artifact {
            path: self.source_path(r.source()),
            symbols: r.symbols(),
        }));
        artifacts
    }
}

/// 심볼 목록을 텍스트 파일 내용으로 변환 (한 줄에 하나, 마지막 개행 포함).
pub fn render_lines(symbols: &[Symbol]) -> String {
    let mut out = String::with_capacity(symbols.iter().map(|s| s.as_str().len() + 1).sum());
    for symbol in symbols {
        out.push_str(symbol.as_str());
        out.push('\n');
    }
    out
}

/// 실행 결과를 기록합니다.
///
/// 메타데이터에 나열된 텍스트 산출물을 먼저 쓰고, 마지막에 메타데이터를 씁니다.
/// 기록 실패는 실행 전체의 실패로 전파됩니다.
pub fn persist(
    report: &RunReport,
    layout: &OutputLayout,
    writer: &dyn ArtifactWriter,
) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();

    for artifact in layout.artifacts(&report.results, &report.combined) {
        writer.write(&artifact.path, &render_lines(artifact.symbols))?;
        info!(
            path = %artifact.path.display(),
            count = artifact.symbols.len(),
            "목록 기록"
        );
        written.push(artifact.path);
    }

    let mut meta = report.metadata.to_json_pretty()?;
    meta.push('\n');
    writer.write(&layout.meta_path, &meta)?;
    info!(path = %layout.meta_path.display(), "메타데이터 기록");
    written.push(layout.meta_path.clone());

    Ok(written)
}
