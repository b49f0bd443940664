//! Typed scalar values produced from SQL literals.

use alloc::format;
use alloc::string::String;
use core::fmt;

/// A scalar value read from a dump.
///
/// The variants mirror the literal kinds found in MySQL dumps: `NULL`, integers,
/// reals, and quoted strings. Anything that does not parse as a number and is
/// not quoted is kept verbatim as [`Value::Text`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum Value {
    /// SQL `NULL`.
    Null,
    /// Integer value.
    Integer(i64),
    /// Real/float value.
    Real(f64),
    /// Text value, already unescaped.
    Text(String),
}

impl Value {
    /// Whether this is [`Value::Null`].
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// The text payload, if this is a [`Value::Text`].
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// The integer payload, if this is a [`Value::Integer`].
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(v) => Some(*v),
            _ => None,
        }
    }

    /// The numeric payload as a float, for both integers and reals.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Integer(v) => Some(*v as f64),
            Value::Real(v) => Some(*v),
            _ => None,
        }
    }
}

/// Renders the value the way it is written into a CSV field.
///
/// `NULL` becomes the empty string and text is written verbatim. Reals use the
/// shortest digits that read back to the same `f64`. Decimal exponents from
/// -4 to 15 are written positionally and always keep a fractional part, so
/// `1.0` stays distinguishable from the integer `1`. Other reals use a signed
/// exponent of at least two digits (`1e+16`, `1.5e-05`). Non-finite reals are
/// `inf`, `-inf` and `nan`.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Integer(v) => write!(f, "{v}"),
            Value::Real(v) => write_real(f, *v),
            Value::Text(s) => f.write_str(s),
        }
    }
}

fn write_real(f: &mut fmt::Formatter<'_>, v: f64) -> fmt::Result {
    if v.is_nan() {
        return f.write_str("nan");
    }
    if v.is_infinite() {
        return f.write_str(if v > 0.0 { "inf" } else { "-inf" });
    }

    // `{:e}` yields the shortest round-trip digits, e.g. `-1.5e-5` or `0e0`.
    let scientific = format!("{v:e}");
    let (mantissa, exponent) = scientific.split_once('e').unwrap_or((scientific.as_str(), "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);
    let (sign, mantissa) = match mantissa.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", mantissa),
    };
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();

    f.write_str(sign)?;
    if (-4..16).contains(&exponent) {
        match usize::try_from(exponent) {
            Ok(exponent) => {
                let point = exponent + 1;
                if digits.len() <= point {
                    write!(f, "{digits}{}.0", "0".repeat(point - digits.len()))
                } else {
                    write!(f, "{}.{}", &digits[..point], &digits[point..])
                }
            }
            Err(_) => {
                let zeros = exponent.unsigned_abs() - 1;
                write!(f, "0.{}{digits}", "0".repeat(zeros as usize))
            }
        }
    } else {
        let (lead, rest) = digits.split_at(1);
        f.write_str(lead)?;
        if !rest.is_empty() {
            write!(f, ".{rest}")?;
        }
        let exponent_sign = if exponent < 0 { '-' } else { '+' };
        write!(f, "e{exponent_sign}{:02}", exponent.unsigned_abs())
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Real(v)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.into())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}
