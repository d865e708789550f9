//! 기본 타입 정의.

pub mod instrument;
pub mod symbol;

pub use instrument::*;
pub use symbol::*;
