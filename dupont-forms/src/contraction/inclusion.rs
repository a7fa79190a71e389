use crate::{
    dupont::{DupontForm, Simplex},
    primitive::factorial,
    sullivan::{Monomial, SullivanForm, Wedge},
};
use rug::Rational;

/// The Whitney elementary form of the face `[i_0, ..., i_k]`:
///
/// ```text
/// k! Σ_j (-1)^j t_{i_j} dt_{i_0} ∧ ... ∧ dt_{i_j}^ ∧ ... ∧ dt_{i_k}
/// ```
///
/// where the hat marks the omitted differential.
pub(crate) fn whitney(n: usize, simplex: &Simplex) -> SullivanForm {
    let vertices = simplex.vertices();
    let all = Wedge::new_unchecked(vertices.to_vec());
    let scale = Rational::from(factorial(simplex.dim() as u32));

    let mut form = SullivanForm::zero(n);
    for (j, &v) in vertices.iter().enumerate() {
        let c = if j % 2 == 0 { scale.clone() } else { Rational::from(-&scale) };
        form.add_term(all.remove(j), Monomial::variable(n, v), c);
    }
    form
}

impl DupontForm {
    /// The inclusion `i: C_n → Ω_n`, which sends each elementary cochain to its Whitney form.
    ///
    /// ```
    /// use dupont_forms::{DupontForm, SullivanForm};
    ///
    /// // i(ω01) = t0 dt1 - t1 dt0
    /// let w = DupontForm::basis_element(2, "0|1").unwrap();
    /// let expected = SullivanForm::new(2, [
    ///     ("0", vec![("0|1|0", -1)]),
    ///     ("1", vec![("1|0|0", 1)]),
    /// ]).unwrap();
    /// assert_eq!(w.i(), expected);
    /// ```
    pub fn i(&self) -> SullivanForm {
        let mut result = SullivanForm::zero(self.dim());
        for (simplex, c) in self.terms() {
            result.accumulate(&whitney(self.dim(), simplex).scale(c));
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn w(n: usize, key: &str) -> DupontForm {
        DupontForm::basis_element(n, key).unwrap()
    }

    #[test]
    fn vertex_is_coordinate() {
        assert_eq!(w(2, "1").i(), SullivanForm::t(2, 1).unwrap());
    }

    #[test]
    fn unit_is_one() {
        let one = DupontForm::one(3).i();
        assert_eq!(one.reduce(3).unwrap(), SullivanForm::one(3));
    }

    #[test]
    fn top_face_of_triangle() {
        // i(ω012) = 2 (t0 dt1 dt2 - t1 dt0 dt2 + t2 dt0 dt1)
        let expected = SullivanForm::new(2, [
            ("1|2", vec![("1|0|0", 2)]),
            ("0|2", vec![("0|1|0", -2)]),
            ("0|1", vec![("0|0|1", 2)]),
        ]).unwrap();
        assert_eq!(w(2, "0|1|2").i(), expected);
    }

    #[test]
    fn product_with_coordinate() {
        // t0^2 t1 · i(ω1) reduced at 2 is t0^2 t1^2
        let x = SullivanForm::new(2, [("", vec![("2|1|0", 1)])]).unwrap();
        let y = x.try_mul(&w(2, "1").i()).unwrap().reduce(2).unwrap();
        let expected = SullivanForm::new(2, [("", vec![("2|2|0", 1)])]).unwrap();
        assert_eq!(y, expected);
    }

    #[test]
    fn commutes_with_differential() {
        for form in DupontForm::basis(2) {
            let lhs = form.d().i();
            let rhs = form.i().d();
            assert!(lhs.is_equivalent(&rhs, 2).unwrap(), "{:?}", form);
        }
    }
}
