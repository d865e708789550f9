//! 거래소 상장 정보 조회.
//!
//! 이 크레이트는 다음을 제공합니다:
//! - `InstrumentCatalog` trait: 소스별 상장 목록 조회 인터페이스
//! - REST 커넥터 (Binance, OKX, MEXC, Coinbase, KuCoin)
//! - 엔드포인트(호스트) 지정 조회 지원

pub mod connector;
pub mod error;
pub mod traits;

pub use connector::{ExchangeKind, RestCatalog, RestConfig};
pub use error::*;
pub use traits::*;
