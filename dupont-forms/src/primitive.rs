//! Functions to construct the exact [`Rational`]s used as coefficients, and the [`Integer`]
//! combinatorics behind them.
//!
//! Every coefficient in this crate is an exact [`Rational`]. There is no floating-point
//! arithmetic anywhere in the pipeline.

use crate::error::{DivisionByZero, InvalidCoefficient};
use dupont_error::Error;
use rug::{Integer, Rational};

/// Creates a [`Rational`] with the given value.
///
/// Anything [`Rational`] can be built from is accepted, including integers and `(numerator,
/// denominator)` pairs. A pair with a zero denominator panics; use [`rational_from_str`] for input
/// that has not been validated.
pub fn rat<T>(n: T) -> Rational
where
    Rational: From<T>,
{
    Rational::from(n)
}

/// Parses a rational number written as `p` or `p/q`, where `p` and `q` are integers.
///
/// Surrounding whitespace is ignored. Returns [`DivisionByZero`] if `q` is zero, and
/// [`InvalidCoefficient`] if the text is not a rational number.
pub fn rational_from_str(s: &str) -> Result<Rational, Error> {
    let invalid = || Error::new(s, vec![0..s.len()], InvalidCoefficient { text: s.trim().to_string() });

    let (num, den) = match s.split_once('/') {
        Some((num, den)) => (num, Some(den)),
        None => (s, None),
    };

    let num = num.trim().parse::<Integer>().map_err(|_| invalid())?;
    let Some(den) = den else {
        return Ok(Rational::from(num));
    };

    let den_start = s.len() - den.len();
    let den = den.trim().parse::<Integer>().map_err(|_| invalid())?;
    if den == 0 {
        return Err(Error::new(s, vec![den_start..s.len()], DivisionByZero));
    }

    Ok(Rational::from((num, den)))
}

/// Computes `k!`.
pub fn factorial(k: u32) -> Integer {
    Integer::from(Integer::factorial(k))
}

/// Computes the binomial coefficient `n choose k`.
pub fn binomial(n: u32, k: u32) -> Integer {
    Integer::from(Integer::binomial_u(n, k))
}

/// Computes the beta integral `∫₀¹ (1 - s)^p s^q ds = p! q! / (p + q + 1)!`.
pub fn beta(p: u32, q: u32) -> Rational {
    Rational::from((factorial(p) * factorial(q), factorial(p + q + 1)))
}
