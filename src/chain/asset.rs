//! Fixed-point asset amounts
//!
//! An `Asset` is an integer amount in atomic units tagged with a currency
//! symbol. Precision is fixed per symbol; arithmetic across differing
//! symbols is rejected. Two wire notations exist: the legacy string form
//! `"1.000 HIVE"` and the NAI object form
//! `{"amount":"1000","precision":3,"nai":"@@000000021"}`. Decoding accepts
//! both, encoding always emits the NAI form.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Errors from asset parsing and arithmetic
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum AssetError {
    #[error("Unknown asset symbol: {0}")]
    UnknownSymbol(String),

    #[error("Invalid amount '{0}'")]
    InvalidAmount(String),

    #[error("Too many decimal places for {symbol} (max {max}): {value}")]
    PrecisionOverflow {
        symbol: Symbol,
        max: u8,
        value: String,
    },

    #[error("Symbol mismatch: {0} vs {1}")]
    SymbolMismatch(Symbol, Symbol),

    #[error("Amount overflow")]
    Overflow,
}

/// Currency symbol with fixed precision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symbol {
    Hive,
    Hbd,
    Vests,
}

impl Symbol {
    /// Number of decimal places carried by amounts of this symbol
    pub fn precision(self) -> u8 {
        match self {
            Symbol::Hive | Symbol::Hbd => 3,
            Symbol::Vests => 6,
        }
    }

    /// Ticker as it appears in the legacy wire notation
    pub fn ticker(self) -> &'static str {
        match self {
            Symbol::Hive => "HIVE",
            Symbol::Hbd => "HBD",
            Symbol::Vests => "VESTS",
        }
    }

    /// Numeric asset identifier used by the modern wire notation
    pub fn nai(self) -> &'static str {
        match self {
            Symbol::Hive => "@@000000021",
            Symbol::Hbd => "@@000000013",
            Symbol::Vests => "@@000000037",
        }
    }

    fn from_ticker(s: &str) -> Result<Self, AssetError> {
        match s {
            "HIVE" | "TESTS" => Ok(Symbol::Hive),
            "HBD" | "TBD" => Ok(Symbol::Hbd),
            "VESTS" => Ok(Symbol::Vests),
            other => Err(AssetError::UnknownSymbol(other.to_string())),
        }
    }

    fn from_nai(s: &str) -> Result<Self, AssetError> {
        match s {
            "@@000000021" => Ok(Symbol::Hive),
            "@@000000013" => Ok(Symbol::Hbd),
            "@@000000037" => Ok(Symbol::Vests),
            other => Err(AssetError::UnknownSymbol(other.to_string())),
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.ticker())
    }
}

/// Fixed-point typed amount
///
/// The amount is stored in atomic units (thousandths for HIVE/HBD,
/// millionths for VESTS).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Asset {
    amount: i64,
    symbol: Symbol,
}

impl Asset {
    /// Create an asset from an atomic-unit amount
    pub fn from_atomic(amount: i64, symbol: Symbol) -> Self {
        Self { amount, symbol }
    }

    /// Create a HIVE asset from atomic units (thousandths)
    pub fn hive(amount: i64) -> Self {
        Self::from_atomic(amount, Symbol::Hive)
    }

    /// Create an HBD asset from atomic units (thousandths)
    pub fn hbd(amount: i64) -> Self {
        Self::from_atomic(amount, Symbol::Hbd)
    }

    /// Create a VESTS asset from atomic units (millionths)
    pub fn vests(amount: i64) -> Self {
        Self::from_atomic(amount, Symbol::Vests)
    }

    /// Amount in atomic units
    pub fn amount(&self) -> i64 {
        self.amount
    }

    pub fn symbol(&self) -> Symbol {
        self.symbol
    }

    pub fn precision(&self) -> u8 {
        self.symbol.precision()
    }

    pub fn is_positive(&self) -> bool {
        self.amount > 0
    }

    /// Add two amounts of the same symbol
    pub fn checked_add(&self, other: &Asset) -> Result<Asset, AssetError> {
        self.require_same_symbol(other)?;
        let amount = self
            .amount
            .checked_add(other.amount)
            .ok_or(AssetError::Overflow)?;
        Ok(Asset::from_atomic(amount, self.symbol))
    }

    /// Subtract an amount of the same symbol
    pub fn checked_sub(&self, other: &Asset) -> Result<Asset, AssetError> {
        self.require_same_symbol(other)?;
        let amount = self
            .amount
            .checked_sub(other.amount)
            .ok_or(AssetError::Overflow)?;
        Ok(Asset::from_atomic(amount, self.symbol))
    }

    fn require_same_symbol(&self, other: &Asset) -> Result<(), AssetError> {
        if self.symbol != other.symbol {
            return Err(AssetError::SymbolMismatch(self.symbol, other.symbol));
        }
        Ok(())
    }

    /// Parse the legacy string notation, e.g. `"1.000 HIVE"`
    pub fn from_legacy(s: &str) -> Result<Self, AssetError> {
        let mut parts = s.split_whitespace();
        let value = parts
            .next()
            .ok_or_else(|| AssetError::InvalidAmount(s.to_string()))?;
        let ticker = parts
            .next()
            .ok_or_else(|| AssetError::InvalidAmount(s.to_string()))?;
        if parts.next().is_some() {
            return Err(AssetError::InvalidAmount(s.to_string()));
        }

        let symbol = Symbol::from_ticker(ticker)?;
        let amount = parse_fixed_point(value, symbol)?;
        Ok(Asset::from_atomic(amount, symbol))
    }

    /// Format in the legacy string notation, e.g. `"1.000 HIVE"`
    pub fn to_legacy(&self) -> String {
        format!("{}", self)
    }
}

/// Parse a decimal string into atomic units at the symbol's precision
fn parse_fixed_point(value: &str, symbol: Symbol) -> Result<i64, AssetError> {
    let precision = symbol.precision() as usize;
    let negative = value.starts_with('-');
    let unsigned = value.trim_start_matches('-');

    let (integral, fractional) = match unsigned.split_once('.') {
        Some((i, f)) => (i, f),
        None => (unsigned, ""),
    };

    if integral.is_empty() && fractional.is_empty() {
        return Err(AssetError::InvalidAmount(value.to_string()));
    }
    if fractional.len() > precision {
        return Err(AssetError::PrecisionOverflow {
            symbol,
            max: symbol.precision(),
            value: value.to_string(),
        });
    }
    if !integral.chars().all(|c| c.is_ascii_digit())
        || !fractional.chars().all(|c| c.is_ascii_digit())
    {
        return Err(AssetError::InvalidAmount(value.to_string()));
    }

    let integral_part: i64 = if integral.is_empty() {
        0
    } else {
        integral
            .parse()
            .map_err(|_| AssetError::InvalidAmount(value.to_string()))?
    };

    let mut fractional_part: i64 = if fractional.is_empty() {
        0
    } else {
        fractional
            .parse()
            .map_err(|_| AssetError::InvalidAmount(value.to_string()))?
    };
    for _ in fractional.len()..precision {
        fractional_part *= 10;
    }

    let scale = 10i64.pow(precision as u32);
    let amount = integral_part
        .checked_mul(scale)
        .and_then(|v| v.checked_add(fractional_part))
        .ok_or(AssetError::Overflow)?;

    Ok(if negative { -amount } else { amount })
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let precision = self.precision() as usize;
        let scale = 10i64.pow(precision as u32);
        let sign = if self.amount < 0 { "-" } else { "" };
        let magnitude = self.amount.unsigned_abs();
        let integral = magnitude / scale as u64;
        let fractional = magnitude % scale as u64;
        write!(
            f,
            "{}{}.{:0width$} {}",
            sign,
            integral,
            fractional,
            self.symbol.ticker(),
            width = precision
        )
    }
}

impl FromStr for Asset {
    type Err = AssetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Asset::from_legacy(s)
    }
}

/// NAI object wire form
#[derive(Serialize, Deserialize)]
struct NaiAsset {
    amount: String,
    precision: u8,
    nai: String,
}

impl Serialize for Asset {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        NaiAsset {
            amount: self.amount.to_string(),
            precision: self.precision(),
            nai: self.symbol.nai().to_string(),
        }
        .serialize(serializer)
    }
}

/// Either of the two wire notations; protocol version decides which
/// one the node emits, so the decoder must accept both.
#[derive(Deserialize)]
#[serde(untagged)]
enum WireAsset {
    Nai(NaiAsset),
    Legacy(String),
}

impl<'de> Deserialize<'de> for Asset {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match WireAsset::deserialize(deserializer)? {
            WireAsset::Nai(nai) => {
                let symbol = Symbol::from_nai(&nai.nai).map_err(D::Error::custom)?;
                if nai.precision != symbol.precision() {
                    return Err(D::Error::custom(format!(
                        "precision {} does not match symbol {}",
                        nai.precision, symbol
                    )));
                }
                let amount: i64 = nai
                    .amount
                    .parse()
                    .map_err(|_| D::Error::custom(format!("invalid amount '{}'", nai.amount)))?;
                Ok(Asset::from_atomic(amount, symbol))
            }
            WireAsset::Legacy(s) => Asset::from_legacy(&s).map_err(D::Error::custom),
        }
    }
}
