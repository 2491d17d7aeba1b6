//! Scalar coercion for `NumberProp` values

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, ValueError};
use crate::parse::numeral;

/// A prop value given either as a number or as a string
///
/// Strings may carry a trailing `%`, e.g. `"50%"`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumberProp {
    Number(f64),
    Text(String),
}

impl NumberProp {
    /// Normalize into a finite value plus percentage flag
    pub fn normalize(&self) -> Result<NormalizedScalar> {
        match self {
            NumberProp::Number(n) if n.is_finite() => Ok(NormalizedScalar::absolute(*n)),
            NumberProp::Number(n) => {
                debug!(input = %n, "Rejected non-finite scalar");
                Err(ValueError::scalar(n.to_string()))
            }
            NumberProp::Text(text) => parse_scalar(text),
        }
    }
}

impl From<f64> for NumberProp {
    fn from(n: f64) -> Self {
        NumberProp::Number(n)
    }
}

impl From<f32> for NumberProp {
    fn from(n: f32) -> Self {
        NumberProp::Number(n as f64)
    }
}

impl From<i32> for NumberProp {
    fn from(n: i32) -> Self {
        NumberProp::Number(n as f64)
    }
}

impl From<&str> for NumberProp {
    fn from(s: &str) -> Self {
        NumberProp::Text(s.to_string())
    }
}

impl From<String> for NumberProp {
    fn from(s: String) -> Self {
        NumberProp::Text(s)
    }
}

/// A finite number, optionally marked as a percentage
///
/// Percentages keep their literal numeral: `"50%"` is stored as `50.0`,
/// not `0.5`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedScalar {
    pub value: f64,
    pub is_percentage: bool,
}

impl NormalizedScalar {
    pub const ZERO: NormalizedScalar = NormalizedScalar::absolute(0.0);

    pub const fn absolute(value: f64) -> Self {
        Self {
            value,
            is_percentage: false,
        }
    }

    pub const fn percentage(value: f64) -> Self {
        Self {
            value,
            is_percentage: true,
        }
    }

    /// Resolve against a reference length
    ///
    /// Percentages become `value / 100 * reference`; absolute values are
    /// returned as they are.
    pub fn resolve(&self, reference: f64) -> f64 {
        if self.is_percentage {
            self.value / 100.0 * reference
        } else {
            self.value
        }
    }

    /// Interpret as a unit fraction (`"50%"` and `0.5` both give `0.5`)
    pub fn fraction(&self) -> f64 {
        self.resolve(1.0)
    }
}

impl Default for NormalizedScalar {
    fn default() -> Self {
        Self::ZERO
    }
}

/// Normalize a `NumberProp`
///
/// ```rust
/// use nsvg_core::{normalize_scalar, NormalizedScalar};
///
/// assert_eq!(normalize_scalar("50%").unwrap(), NormalizedScalar::percentage(50.0));
/// assert_eq!(normalize_scalar(12.5).unwrap(), NormalizedScalar::absolute(12.5));
/// ```
pub fn normalize_scalar(input: impl Into<NumberProp>) -> Result<NormalizedScalar> {
    input.into().normalize()
}

fn parse_scalar(raw: &str) -> Result<NormalizedScalar> {
    let trimmed = raw.trim();
    let (numeral_str, is_percentage) = match trimmed.strip_suffix('%') {
        Some(prefix) => (prefix.trim_end(), true),
        None => (trimmed, false),
    };

    match numeral(numeral_str) {
        Some(value) => Ok(NormalizedScalar {
            value,
            is_percentage,
        }),
        None => {
            debug!(input = raw, "Failed to parse scalar");
            Err(ValueError::scalar(raw))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_passes_through() {
        for n in [0.0, -3.25, 1e9, f64::MIN_POSITIVE] {
            assert_eq!(normalize_scalar(n).unwrap(), NormalizedScalar::absolute(n));
        }
    }

    #[test]
    fn test_percentage_keeps_numeral() {
        let s = normalize_scalar("50%").unwrap();
        assert_eq!(s.value, 50.0);
        assert!(s.is_percentage);
        assert_eq!(s.fraction(), 0.5);
    }

    #[test]
    fn test_string_is_trimmed() {
        assert_eq!(
            normalize_scalar("  12.5 ").unwrap(),
            NormalizedScalar::absolute(12.5)
        );
        assert_eq!(
            normalize_scalar(" 25 % ").unwrap(),
            NormalizedScalar::percentage(25.0)
        );
    }

    #[test]
    fn test_invalid_strings() {
        for bad in ["", "%", "abc", "10px", "1.2.3", "inf", "NaN", "50%%"] {
            let err = normalize_scalar(bad).unwrap_err();
            assert_eq!(err, ValueError::scalar(bad), "input {:?}", bad);
        }
    }

    #[test]
    fn test_non_finite_number_rejected() {
        assert!(normalize_scalar(f64::NAN).is_err());
        assert!(normalize_scalar(f64::INFINITY).is_err());
    }

    #[test]
    fn test_resolve_against_reference() {
        assert_eq!(NormalizedScalar::percentage(25.0).resolve(200.0), 50.0);
        assert_eq!(NormalizedScalar::absolute(25.0).resolve(200.0), 25.0);
    }

    #[test]
    fn test_deserialize_number_prop() {
        let n: NumberProp = serde_json::from_str("3").unwrap();
        assert_eq!(n, NumberProp::Number(3.0));
        let s: NumberProp = serde_json::from_str("\"3%\"").unwrap();
        assert_eq!(s, NumberProp::Text("3%".to_string()));
    }
}
