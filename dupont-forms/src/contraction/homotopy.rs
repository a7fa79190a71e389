//! The Dupont homotopy `h: Ω_n → Ω_n`.
//!
//! For each vertex `v`, the straight-line contraction of the simplex onto `v` induces a homotopy
//! `h_v` by integrating along the contraction parameter. On a term `t^a dt_J` with
//! `J = (j_0 < ... < j_{r-1})` and `r ≥ 1`, it is
//!
//! ```text
//! h_v(t^a dt_J) = Σ_{c=0}^{a_v} C(a_v, c) B(|a| - a_v + c + r - 1, a_v - c) t^{a[v := c]}
//!                   Σ_m (-1)^m (δ_{v, j_m} - t_{j_m}) dt_{J - j_m}
//! ```
//!
//! where `B(p, q) = p! q! / (p + q + 1)!`, and `h_v` vanishes on functions. It satisfies
//! `d h_v + h_v d = ε_v - id`, with `ε_v` the evaluation at `v`.
//!
//! The Dupont homotopy combines them with the Whitney forms `ω_I`:
//!
//! ```text
//! h = Σ_{k=0}^{n-1} Σ_{i_0 < ... < i_k} ω_{i_0...i_k} · (h_{i_k} ∘ ... ∘ h_{i_0})
//! ```
//!
//! The sum is computed depth-first over increasing prefixes `i_0 < ... < i_k`, and a prefix is
//! abandoned as soon as its composite homotopy vanishes.

use crate::{
    dupont::Simplex,
    error::ensure_vertex,
    primitive::{beta, binomial},
    sullivan::SullivanForm,
};
use dupont_error::Error;
use rug::Rational;
use super::inclusion::whitney;

impl SullivanForm {
    /// The Dupont homotopy, a map of degree `-1` satisfying `i ∘ p - id = d ∘ h + h ∘ d`.
    ///
    /// It also satisfies `h ∘ i = 0`, `p ∘ h = 0` and `h ∘ h = 0`.
    pub fn h(&self) -> SullivanForm {
        let mut result = SullivanForm::zero(self.dim());
        let mut prefix = Vec::new();
        self.accumulate_homotopy(&mut prefix, &mut result);
        result
    }

    /// Adds `ω_I · (h_{i_k} ∘ ... ∘ h_{i_0})(self)` to `result` for every increasing extension `I`
    /// of `prefix`, where `self` is the composite homotopy of `prefix` applied to the input.
    fn accumulate_homotopy(&self, prefix: &mut Vec<usize>, result: &mut SullivanForm) {
        let n = self.dim();
        let start = prefix.last().map_or(0, |&i| i + 1);

        for i in start..=n {
            let value = self.vertex_homotopy(i);
            if value.is_zero() {
                continue;
            }

            prefix.push(i);
            let simplex = Simplex::new_unchecked(prefix.clone());
            result.accumulate(&whitney(n, &simplex).product(&value));
            if prefix.len() < n {
                value.accumulate_homotopy(prefix, result);
            }
            prefix.pop();
        }
    }

    /// The homotopy `h_v` contracting the simplex onto vertex `v`.
    pub fn h_vertex(&self, v: usize) -> Result<SullivanForm, Error> {
        ensure_vertex("h_vertex", v, self.dim())?;
        Ok(self.vertex_homotopy(v))
    }

    pub(crate) fn vertex_homotopy(&self, v: usize) -> SullivanForm {
        let mut result = SullivanForm::zero(self.dim());

        for (wedge, poly) in self.terms() {
            let r = wedge.len() as u32;
            if r == 0 {
                continue;
            }

            for (monomial, c) in poly.terms() {
                let a_v = monomial.exponent(v);
                let others = monomial.degree() - a_v;

                for k in 0..=a_v {
                    let weight = Rational::from(binomial(a_v, k)) * beta(others + k + r - 1, a_v - k) * c;
                    let base = monomial.with_exponent(v, k);

                    for (m, &j) in wedge.indices().iter().enumerate() {
                        let rest = wedge.remove(m);
                        let signed = if m % 2 == 1 { Rational::from(-&weight) } else { weight.clone() };

                        if j == v {
                            result.add_term(rest.clone(), base.clone(), signed.clone());
                        }
                        let shifted = base.with_exponent(j, base.exponent(j) + 1);
                        result.add_term(rest, shifted, -signed);
                    }
                }
            }
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use crate::dupont::DupontForm;
    use crate::primitive::rat;
    use pretty_assertions::assert_eq;
    use super::*;

    fn form<const N: usize>(n: usize, terms: [(&str, &str, i64); N]) -> SullivanForm {
        SullivanForm::new(n, terms.map(|(wedge, mono, c)| (wedge, vec![(mono, c)]))).unwrap()
    }

    #[test]
    fn one_form_on_triangle() {
        // h(t0 dt1) = -1/2 t0 t1
        let x = form(2, [("1", "1|0|0", 1)]);
        let expected = SullivanForm::new(2, [("", vec![("1|1|0", rat((-1, 2)))])]).unwrap();
        assert_eq!(x.h().reduce(2).unwrap(), expected);
    }

    #[test]
    fn one_form_on_interval() {
        // h(t0 dt1) = 1/2 t0^2 - 1/2 t0
        let x = form(1, [("1", "1|0", 1)]);
        let expected = SullivanForm::new(1, [
            ("", vec![("2|0", rat((1, 2))), ("1|0", rat((-1, 2)))]),
        ]).unwrap();
        assert_eq!(x.h().reduce(1).unwrap(), expected);
    }

    #[test]
    fn vanishes_on_functions() {
        let x = form(2, [("", "2|1|3", 4)]);
        assert!(x.h().is_zero());
        let product = DupontForm::vertex(2, 0).unwrap().i()
            .try_mul(&DupontForm::vertex(2, 1).unwrap().i())
            .unwrap();
        assert!(product.h().is_zero());
    }

    #[test]
    fn vanishes_on_whitney_forms() {
        assert!(SullivanForm::dt(1, 1).unwrap().h().reduce(1).unwrap().is_zero());
        for w in DupontForm::basis(3) {
            assert!(w.i().h().reduce(3).unwrap().is_zero(), "{:?}", w);
        }
    }

    #[test]
    fn vertex_homotopy_contracts() {
        // d h_v + h_v d = ε_v - id
        let x = form(2, [("", "1|2|0", 3), ("0", "0|1|1", -2), ("1|2", "1|0|0", 5)]);
        for v in 0..=2 {
            let lhs = x.h_vertex(v).unwrap().d()
                .try_add(&x.d().h_vertex(v).unwrap())
                .unwrap();
            let rhs = SullivanForm::constant(2, x.evaluate_at_vertex(v).unwrap())
                .try_sub(&x)
                .unwrap();
            assert!(lhs.is_equivalent(&rhs, 2).unwrap());
        }
    }

    #[test]
    fn contraction_identity() {
        let x = form(2, [("", "2|1|0", 1), ("0", "0|1|1", 3), ("1", "1|0|2", -1), ("0|2", "1|1|0", 2)]);
        let lhs = x.p().i().try_sub(&x).unwrap();
        let rhs = x.h().d().try_add(&x.d().h()).unwrap();
        assert!(lhs.is_equivalent(&rhs, 2).unwrap());
    }

    #[test]
    fn side_conditions() {
        let x = form(2, [("0", "1|1|0", 2), ("1|2", "0|0|1", 1), ("1", "0|2|1", -3)]);
        let hx = x.h();
        assert!(hx.p().is_zero());
        assert!(hx.h().reduce(2).unwrap().is_zero());
    }

    #[test]
    fn vertex_out_of_range() {
        assert!(SullivanForm::one(1).h_vertex(2).is_err());
    }
}
