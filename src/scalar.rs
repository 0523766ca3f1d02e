//! The numeric types the sweep can run on.
//!
//! The engine never hard-codes its coordinate type: every geometric
//! type is generic over a [`Scalar`]. [`BigRational`] gives exact
//! event comparisons; `f64` is faster but may round.

use std::{
    cmp::Ordering,
    fmt::{Debug, Display},
    str::FromStr,
};

use num::{
    traits::{Num, Signed, ToPrimitive, Zero},
    BigInt, BigRational,
};

/// A trait for abstracting over the properties we need from numerical types.
///
/// This is implemented for `f64` and [`BigRational`].
pub trait Scalar: Num + Signed + ToPrimitive + Clone + PartialOrd + Debug + Display {
    /// Parse a coordinate token.
    ///
    /// Accepts decimals with an optional sign, fraction and exponent
    /// (`-1.5e3`) and exact fractions (`3/4`).
    fn parse_token(token: &str) -> Option<Self>;

    /// Convert from a float; `None` if the value is not finite.
    fn from_f64(value: f64) -> Option<Self>;

    /// Whether the value can take part in a total order.
    fn is_finite(&self) -> bool;
}

impl Scalar for f64 {
    fn parse_token(token: &str) -> Option<Self> {
        let value = match token.split_once('/') {
            Some((numer, denom)) => {
                let denom: f64 = denom.parse().ok()?;
                if denom == 0. {
                    return None;
                }
                numer.parse::<f64>().ok()? / denom
            }
            None => token.parse().ok()?,
        };
        value.is_finite().then(|| value)
    }

    fn from_f64(value: f64) -> Option<Self> {
        value.is_finite().then(|| value)
    }

    #[inline]
    fn is_finite(&self) -> bool {
        f64::is_finite(*self)
    }
}

impl Scalar for BigRational {
    fn parse_token(token: &str) -> Option<Self> {
        match token.split_once('/') {
            Some((numer, denom)) => {
                let numer = BigInt::from_str(numer).ok()?;
                let denom = BigInt::from_str(denom).ok()?;
                (!denom.is_zero()).then(|| BigRational::new(numer, denom))
            }
            None => parse_decimal(token),
        }
    }

    fn from_f64(value: f64) -> Option<Self> {
        BigRational::from_float(value)
    }

    #[inline]
    fn is_finite(&self) -> bool {
        true
    }
}

/// Largest exponent accepted in decimal input.
const MAX_EXPONENT: i64 = 4096;

/// Parse a decimal literal exactly.
fn parse_decimal(token: &str) -> Option<BigRational> {
    let (mantissa, exponent) = match token.find(|c: char| c == 'e' || c == 'E') {
        Some(idx) => (&token[..idx], token[idx + 1..].parse::<i64>().ok()?),
        None => (token, 0),
    };
    let (negative, digits) = match mantissa.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, mantissa.strip_prefix('+').unwrap_or(mantissa)),
    };
    let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits, ""));
    if int_part.is_empty() && frac_part.is_empty() {
        return None;
    }
    if !int_part
        .chars()
        .chain(frac_part.chars())
        .all(|c| c.is_ascii_digit())
    {
        return None;
    }

    let scale = exponent.checked_sub(frac_part.len() as i64)?;
    if scale.abs() > MAX_EXPONENT {
        return None;
    }
    let numer = BigInt::from_str(&format!("{}{}", int_part, frac_part)).ok()?;
    let ten = BigInt::from(10u32);
    let value = if scale >= 0 {
        BigRational::from_integer(numer * num::pow(ten, scale as usize))
    } else {
        BigRational::new(numer, num::pow(ten, (-scale) as usize))
    };
    Some(if negative { -value } else { value })
}

/// Compare two scalars, which are required to be finite.
#[inline]
pub(crate) fn cmp_scalar<T: Scalar>(a: &T, b: &T) -> Ordering {
    a.partial_cmp(b).unwrap()
}

/// Selects the [`Scalar`] used to run a sweep from a front-end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericMode {
    /// Exact rational arithmetic ([`BigRational`]).
    Exact,
    /// Hardware floats (`f64`).
    Float,
}

impl Default for NumericMode {
    fn default() -> Self {
        NumericMode::Exact
    }
}

impl FromStr for NumericMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "exact" | "rational" => Ok(NumericMode::Exact),
            "float" | "f64" => Ok(NumericMode::Float),
            other => Err(format!("unknown numeric mode `{}` (use `exact` or `float`)", other)),
        }
    }
}

impl Display for NumericMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NumericMode::Exact => write!(f, "exact"),
            NumericMode::Float => write!(f, "float"),
        }
    }
}
