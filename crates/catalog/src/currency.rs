use chrono::{DateTime, Utc};
use core::str::FromStr;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use fxsync_core::{CurrencyId, DomainError, DomainResult};

/// ISO-style currency code: non-empty, at most 10 characters, stored uppercase.
///
/// Codes are normalized on construction (trimmed, uppercased), so two codes
/// that differ only in case compare equal after parsing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CurrencyCode(String);

impl CurrencyCode {
    pub const MAX_LEN: usize = 10;

    pub fn new(code: impl AsRef<str>) -> DomainResult<Self> {
        let code = code.as_ref().trim();
        if code.is_empty() {
            return Err(DomainError::validation("currency code cannot be empty"));
        }
        if code.len() > Self::MAX_LEN {
            return Err(DomainError::validation(format!(
                "currency code cannot exceed {} characters",
                Self::MAX_LEN
            )));
        }
        Ok(Self(code.to_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for CurrencyCode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for CurrencyCode {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CurrencyCode> for String {
    fn from(value: CurrencyCode) -> Self {
        value.0
    }
}

/// A stored currency: exchange rate relative to the store's base currency.
///
/// Read-only to the pricing engine; managed through the currency store, which
/// enforces code uniqueness and the single-default invariant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Currency {
    pub id: CurrencyId,
    pub code: CurrencyCode,
    pub name: String,
    pub exchange_rate: Decimal,
    pub is_default: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated input for creating or updating a currency.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrencySpec {
    pub code: CurrencyCode,
    pub name: String,
    pub exchange_rate: Decimal,
    pub is_default: bool,
}

impl CurrencySpec {
    pub fn new(
        code: CurrencyCode,
        name: impl Into<String>,
        exchange_rate: Decimal,
        is_default: bool,
    ) -> DomainResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("currency name cannot be empty"));
        }
        if exchange_rate <= Decimal::ZERO {
            return Err(DomainError::validation("exchange rate must be positive"));
        }
        Ok(Self {
            code,
            name,
            exchange_rate,
            is_default,
        })
    }
}
