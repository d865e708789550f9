//! 소스 식별자 및 정규화 심볼 정의.
//!
//! - `SourceId` - 시장 데이터 소스(거래소) 식별자
//! - `Symbol` - `SOURCE:BASEQUOTE` 형식의 정규화 심볼

use crate::error::{CoreError, CoreResult};
use serde::{Serialize, Serializer};
use std::fmt;

/// 시장 데이터 소스 식별자.
///
/// 항상 소문자로 정규화되며 비어 있지 않습니다 (예: `okx`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SourceId(String);

impl SourceId {
    /// 문자열에서 소스 식별자 생성.
    ///
    /// 앞뒤 공백을 제거하고 소문자로 변환합니다.
    /// 영숫자, `-`, `_` 이외의 문자가 있거나 비어 있으면 에러를 반환합니다.
    pub fn new(raw: &str) -> CoreResult<Self> {
        let id = raw.trim().to_lowercase();
        if id.is_empty()
            || !id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(CoreError::InvalidSourceId(raw.to_string()));
        }
        Ok(Self(id))
    }

    /// 소문자 식별자 반환.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 심볼 접두어 및 파일명에 쓰이는 대문자 식별자 반환.
    pub fn upper(&self) -> String {
        self.0.to_uppercase()
    }
}

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for SourceId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

/// `SOURCE:BASEQUOTE` 형식의 정규화 심볼 (예: `OKX:ETHBTC`).
///
/// 정규화기(`crate::normalizer`)를 통해서만 생성됩니다.
/// 정렬 순서는 문자열의 바이트 순서와 같습니다.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol(String);

impl Symbol {
    pub(crate) fn from_parts(source: &SourceId, base: &str, quote: &str) -> Self {
        Self(format!("{}:{}{}", source.upper(), base, quote))
    }

    /// 심볼 문자열 반환.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Symbol {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<&str> for Symbol {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl Serialize for Symbol {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}
