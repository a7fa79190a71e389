//! Reduction of Sullivan forms to their canonical representation.
//!
//! The coordinates of the `n`-simplex satisfy `t_0 + ... + t_n = 1`, hence also
//! `dt_0 + ... + dt_n = 0`. Eliminating the vertex `e` rewrites every occurrence of
//!
//! ```text
//! t_e  ↦ 1 - Σ_{i ≠ e} t_i
//! dt_e ↦  -Σ_{i ≠ e} dt_i
//! ```
//!
//! after which the remaining coordinates and differentials are free of relations. Two forms are
//! therefore equal as forms on the simplex exactly when their reductions at the same vertex are
//! equal as representations.

use crate::error::{ensure_same_dim, EliminateOutOfRange};
use dupont_error::Error;
use log::trace;
use rug::Rational;
use super::{Monomial, Polynomial, SullivanForm};

impl SullivanForm {
    /// Eliminates `t_e` and `dt_e` from this form, returning its canonical representation.
    ///
    /// The result does not mention vertex `e`. Reducing twice at the same vertex changes nothing.
    pub fn reduce(&self, eliminate: usize) -> Result<SullivanForm, Error> {
        if eliminate > self.n {
            let source = format!("reduce(eliminate = {})", eliminate);
            let start = "reduce(eliminate = ".len();
            return Err(Error::new(
                source.clone(),
                vec![start..source.len() - 1],
                EliminateOutOfRange { index: eliminate, n: self.n },
            ));
        }

        Ok(self.reduce_unchecked(eliminate))
    }

    /// Reduces this form at `eliminate`, which must be a vertex of the simplex.
    pub(crate) fn reduce_unchecked(&self, eliminate: usize) -> SullivanForm {
        let n = self.n;
        let e = eliminate;

        // 1 - Σ_{i ≠ e} t_i, and its powers as they are needed
        let mut relation = Polynomial::monomial(Monomial::one(n), Rational::from(1));
        // -Σ_{i ≠ e} dt_i
        let mut differential = SullivanForm::zero(n);
        for i in (0..=n).filter(|&i| i != e) {
            relation.add_term(Monomial::variable(n, i), Rational::from(-1));
            differential.accumulate(&-SullivanForm::dt_unchecked(n, i));
        }
        let mut powers = vec![Polynomial::monomial(Monomial::one(n), Rational::from(1))];

        let mut result = SullivanForm::zero(n);
        for (wedge, poly) in &self.terms {
            let mut wedge_part = SullivanForm::one(n);
            for &j in wedge.indices() {
                let factor = if j == e {
                    differential.clone()
                } else {
                    SullivanForm::dt_unchecked(n, j)
                };
                wedge_part = wedge_part.product(&factor);
            }
            if wedge_part.is_zero() {
                continue;
            }

            let mut function_part = Polynomial::zero();
            for (monomial, c) in poly.terms() {
                let k = monomial.exponent(e) as usize;
                while powers.len() <= k {
                    let next = &powers[powers.len() - 1] * &relation;
                    powers.push(next);
                }
                let rest = monomial.with_exponent(e, 0);
                function_part += &powers[k].shift(&rest).scale(c);
            }

            result.accumulate(&wedge_part.mul_poly(&function_part));
        }

        trace!("reduced {} terms at vertex {}", self.terms.len(), e);
        result
    }

    /// Returns true if both forms are equal on the simplex, that is, if their reductions at
    /// `eliminate` coincide.
    pub fn is_equivalent(&self, other: &SullivanForm, eliminate: usize) -> Result<bool, Error> {
        ensure_same_dim("compare", "Ω", "≡", self.n, other.n)?;
        Ok(self.reduce(eliminate)? == other.reduce(eliminate)?)
    }
}
