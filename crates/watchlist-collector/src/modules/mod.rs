//! 수집 파이프라인 모듈.

pub mod aggregator;
pub mod failover;
pub mod fetcher;
pub mod writer;

pub use aggregator::{Aggregator, RunReport};
pub use failover::fetch_with_failover;
pub use fetcher::{fetch_ordinary, FetchOptions};
pub use writer::{persist, ArtifactWriter, FsArtifactWriter, OutputLayout};

#[cfg(test)]
pub(crate) mod testing;
