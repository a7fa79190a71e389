//! Sums, products and scalar multiples of Sullivan forms.

use crate::error::ensure_same_dim;
use dupont_error::Error;
use rug::Rational;
use std::ops::{Mul, Neg};
use super::{Polynomial, SullivanForm};

impl SullivanForm {
    /// Adds two forms on the same simplex.
    pub fn try_add(&self, other: &SullivanForm) -> Result<SullivanForm, Error> {
        ensure_same_dim("add", "Ω", "+", self.n, other.n)?;
        let mut result = self.clone();
        result.accumulate(other);
        Ok(result)
    }

    /// Subtracts `other` from `self`. Both forms must live on the same simplex.
    pub fn try_sub(&self, other: &SullivanForm) -> Result<SullivanForm, Error> {
        ensure_same_dim("subtract", "Ω", "-", self.n, other.n)?;
        let mut result = self.clone();
        result.accumulate(&-other);
        Ok(result)
    }

    /// Computes the wedge product `self ∧ other` of two forms on the same simplex.
    pub fn try_mul(&self, other: &SullivanForm) -> Result<SullivanForm, Error> {
        ensure_same_dim("multiply", "Ω", "∧", self.n, other.n)?;
        Ok(self.product(other))
    }

    /// Computes the wedge product, assuming both forms live on the same simplex.
    pub(crate) fn product(&self, other: &SullivanForm) -> SullivanForm {
        debug_assert_eq!(self.n, other.n);
        let mut result = SullivanForm::zero(self.n);
        for (w1, p1) in &self.terms {
            for (w2, p2) in &other.terms {
                let Some((wedge, odd)) = w1.wedge(w2) else {
                    continue;
                };
                let poly = p1 * p2;
                result.add_poly(wedge, if odd { -&poly } else { poly });
            }
        }
        result
    }

    /// Multiplies every term of this form by the polynomial `poly`.
    pub(crate) fn mul_poly(&self, poly: &Polynomial) -> SullivanForm {
        let mut result = SullivanForm::zero(self.n);
        for (wedge, p) in &self.terms {
            result.add_poly(wedge.clone(), p * poly);
        }
        result
    }

    /// Multiplies this form by the scalar `c`.
    pub fn scale(&self, c: &Rational) -> SullivanForm {
        let mut result = SullivanForm::zero(self.n);
        for (wedge, poly) in &self.terms {
            result.add_poly(wedge.clone(), poly.scale(c));
        }
        result
    }
}

impl Neg for &SullivanForm {
    type Output = SullivanForm;

    fn neg(self) -> SullivanForm {
        SullivanForm {
            n: self.n,
            terms: self.terms.iter()
                .map(|(wedge, poly)| (wedge.clone(), -poly))
                .collect(),
        }
    }
}

impl Neg for SullivanForm {
    type Output = SullivanForm;

    fn neg(self) -> SullivanForm {
        -&self
    }
}

impl Mul<&Rational> for &SullivanForm {
    type Output = SullivanForm;

    fn mul(self, rhs: &Rational) -> SullivanForm {
        self.scale(rhs)
    }
}

impl Mul<&Rational> for SullivanForm {
    type Output = SullivanForm;

    fn mul(self, rhs: &Rational) -> SullivanForm {
        self.scale(rhs)
    }
}
