//! Kubernetes resource quantity parsing and comparison.
//!
//! Quantities arrive as strings like `500m`, `128Mi` or `2` and have to be
//! compared against configured minimums. This module parses the canonical
//! quantity format once and normalizes the magnitude to integer nano-units
//! (1e-9 of the base unit), so every comparison is an exact integer
//! comparison with no floating point involved.
//!
//! The original spelling is kept alongside the parsed magnitude and is what
//! `Display` renders, so admission messages echo values exactly as the user
//! or the operator configuration wrote them.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Nano-units per base unit.
const NANOS_PER_UNIT: i128 = 1_000_000_000;

/// Errors that can occur when parsing a quantity string.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QuantityError {
    #[error("quantity string is empty")]
    Empty,

    #[error("invalid quantity {0:?}")]
    Invalid(String),

    #[error("quantity {0:?} is outside the supported range")]
    OutOfRange(String),
}

/// Scale suffixes of the canonical quantity format.
///
/// Decimal suffixes scale by powers of ten, binary suffixes by powers of
/// 1024. Scientific notation (`2e3`) is handled by the parser directly and
/// has no suffix here.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Suffix {
    /// 1e-9 base units (`n`).
    Nano,
    /// 1e-6 base units (`u`).
    Micro,
    /// 1e-3 base units (`m`).
    Milli,
    /// One base unit (no suffix).
    None,
    /// 1e3 base units (`k`).
    Kilo,
    /// 1e6 base units (`M`).
    Mega,
    /// 1e9 base units (`G`).
    Giga,
    /// 1e12 base units (`T`).
    Tera,
    /// 1e15 base units (`P`).
    Peta,
    /// 1e18 base units (`E`).
    Exa,
    /// 2^10 base units.
    Ki,
    /// 2^20 base units.
    Mi,
    /// 2^30 base units.
    Gi,
    /// 2^40 base units.
    Ti,
    /// 2^50 base units.
    Pi,
    /// 2^60 base units.
    Ei,
}

impl Suffix {
    fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "n" => Some(Suffix::Nano),
            "u" => Some(Suffix::Micro),
            "m" => Some(Suffix::Milli),
            "" => Some(Suffix::None),
            "k" => Some(Suffix::Kilo),
            "M" => Some(Suffix::Mega),
            "G" => Some(Suffix::Giga),
            "T" => Some(Suffix::Tera),
            "P" => Some(Suffix::Peta),
            "E" => Some(Suffix::Exa),
            "Ki" => Some(Suffix::Ki),
            "Mi" => Some(Suffix::Mi),
            "Gi" => Some(Suffix::Gi),
            "Ti" => Some(Suffix::Ti),
            "Pi" => Some(Suffix::Pi),
            "Ei" => Some(Suffix::Ei),
            _ => None,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Suffix::Nano => "n",
            Suffix::Micro => "u",
            Suffix::Milli => "m",
            Suffix::None => "",
            Suffix::Kilo => "k",
            Suffix::Mega => "M",
            Suffix::Giga => "G",
            Suffix::Tera => "T",
            Suffix::Peta => "P",
            Suffix::Exa => "E",
            Suffix::Ki => "Ki",
            Suffix::Mi => "Mi",
            Suffix::Gi => "Gi",
            Suffix::Ti => "Ti",
            Suffix::Pi => "Pi",
            Suffix::Ei => "Ei",
        }
    }

    fn nanos_per_unit(self) -> i128 {
        match self {
            Suffix::Nano => 1,
            Suffix::Micro => 1_000,
            Suffix::Milli => 1_000_000,
            Suffix::None => NANOS_PER_UNIT,
            Suffix::Kilo => NANOS_PER_UNIT * 1_000,
            Suffix::Mega => NANOS_PER_UNIT * 1_000_000,
            Suffix::Giga => NANOS_PER_UNIT * 1_000_000_000,
            Suffix::Tera => NANOS_PER_UNIT * 1_000_000_000_000,
            Suffix::Peta => NANOS_PER_UNIT * 1_000_000_000_000_000,
            Suffix::Exa => NANOS_PER_UNIT * 1_000_000_000_000_000_000,
            Suffix::Ki => NANOS_PER_UNIT << 10,
            Suffix::Mi => NANOS_PER_UNIT << 20,
            Suffix::Gi => NANOS_PER_UNIT << 30,
            Suffix::Ti => NANOS_PER_UNIT << 40,
            Suffix::Pi => NANOS_PER_UNIT << 50,
            Suffix::Ei => NANOS_PER_UNIT << 60,
        }
    }
}

/// A parsed Kubernetes resource quantity.
///
/// Equality and ordering compare the normalized magnitude, so `1` equals
/// `1000m` even though the two render differently. `Display` renders the
/// original spelling.
///
/// In resource specs the type deserializes from the plain string form and
/// rejects malformed values at decode time, which keeps the validators free
/// of per-field parse errors.
#[derive(Clone, Debug)]
pub struct Quantity {
    nanos: i128,
    text: String,
}

impl Quantity {
    /// Build a quantity from a whole number of suffix units, e.g.
    /// `Quantity::new(10, Suffix::Milli)` renders as `10m`.
    ///
    /// Magnitudes beyond the internal fixed-point range saturate; real CPU
    /// and memory sizes sit far below that bound.
    pub fn new(value: i64, suffix: Suffix) -> Self {
        let nanos = i128::from(value).saturating_mul(suffix.nanos_per_unit());
        Self {
            nanos,
            text: format!("{value}{}", suffix.as_str()),
        }
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self {
            nanos: 0,
            text: "0".to_string(),
        }
    }
}

impl PartialEq for Quantity {
    fn eq(&self, other: &Self) -> bool {
        self.nanos == other.nanos
    }
}

impl Eq for Quantity {}

impl PartialOrd for Quantity {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Quantity {
    fn cmp(&self, other: &Self) -> Ordering {
        self.nanos.cmp(&other.nanos)
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl FromStr for Quantity {
    type Err = QuantityError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        if text.is_empty() {
            return Err(QuantityError::Empty);
        }
        let invalid = || QuantityError::Invalid(text.to_string());
        let out_of_range = || QuantityError::OutOfRange(text.to_string());

        let bytes = text.as_bytes();
        let mut idx = 0;
        let negative = match bytes[0] {
            b'-' => {
                idx = 1;
                true
            }
            b'+' => {
                idx = 1;
                false
            }
            _ => false,
        };

        let int_start = idx;
        while idx < bytes.len() && bytes[idx].is_ascii_digit() {
            idx += 1;
        }
        let int_digits = idx - int_start;

        let mut mantissa: i128 = 0;
        for &digit in &bytes[int_start..idx] {
            mantissa = mantissa
                .checked_mul(10)
                .and_then(|m| m.checked_add(i128::from(digit - b'0')))
                .ok_or_else(out_of_range)?;
        }

        let mut fraction_digits: i32 = 0;
        if idx < bytes.len() && bytes[idx] == b'.' {
            idx += 1;
            let frac_start = idx;
            while idx < bytes.len() && bytes[idx].is_ascii_digit() {
                idx += 1;
            }
            for &digit in &bytes[frac_start..idx] {
                mantissa = mantissa
                    .checked_mul(10)
                    .and_then(|m| m.checked_add(i128::from(digit - b'0')))
                    .ok_or_else(out_of_range)?;
                fraction_digits += 1;
            }
        }

        // Either side of the dot may be empty (`5.` and `.5` are canonical),
        // but a bare sign or dot is not a number.
        if int_digits == 0 && fraction_digits == 0 {
            return Err(invalid());
        }

        // Remainder is a scale suffix or a scientific exponent. A lone `E`
        // is the exa suffix, `E3`/`e-2` are exponents.
        let rest = &text[idx..];
        let nanos = if let Some(suffix) = Suffix::from_symbol(rest) {
            let scaled = mantissa
                .checked_mul(suffix.nanos_per_unit())
                .ok_or_else(out_of_range)?;
            scale_decimal(scaled, -fraction_digits).ok_or_else(out_of_range)?
        } else if let Some(exponent) = rest.strip_prefix(['e', 'E']) {
            let exponent: i32 = exponent.parse().map_err(|_| invalid())?;
            let power = 9_i32
                .checked_add(exponent)
                .and_then(|p| p.checked_sub(fraction_digits))
                .ok_or_else(out_of_range)?;
            scale_decimal(mantissa, power).ok_or_else(out_of_range)?
        } else {
            return Err(invalid());
        };

        Ok(Self {
            nanos: if negative { -nanos } else { nanos },
            text: text.to_string(),
        })
    }
}

/// Scale `value` by `10^power`, truncating toward zero below nano
/// resolution.
fn scale_decimal(value: i128, power: i32) -> Option<i128> {
    if power >= 0 {
        let factor = 10_i128.checked_pow(power.unsigned_abs())?;
        value.checked_mul(factor)
    } else {
        match 10_i128.checked_pow(power.unsigned_abs()) {
            Some(factor) => Some(value / factor),
            // |value| < 10^39 <= factor, so the truncated result is zero.
            None => Some(0),
        }
    }
}

impl Serialize for Quantity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.text)
    }
}

impl<'de> Deserialize<'de> for Quantity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(D::Error::custom)
    }
}

impl JsonSchema for Quantity {
    fn schema_name() -> String {
        "Quantity".to_string()
    }

    fn json_schema(_: &mut schemars::r#gen::SchemaGenerator) -> schemars::schema::Schema {
        schemars::schema::SchemaObject {
            instance_type: Some(schemars::schema::InstanceType::String.into()),
            ..Default::default()
        }
        .into()
    }
}
