use crate::{
    dupont::{DupontForm, Simplex},
    primitive::factorial,
    sullivan::SullivanForm,
};
use rug::{Integer, Rational};

impl SullivanForm {
    /// The projection `p: Ω_n → C_n`, which integrates a form over every face of the simplex:
    ///
    /// ```text
    /// p(x) = Σ_I (∫_{Δ_I} x) ω_I
    /// ```
    ///
    /// The integral of `t^a dt_J` over a face `I` is nonzero only if `I` is `J` plus one more
    /// vertex `v`, and `I` contains every variable of `t^a`. Then it is
    ///
    /// ```text
    /// (-1)^m Π_{i ∈ I} a_i! / (|a| + |J|)!
    /// ```
    ///
    /// where `m` is the position of `v` in `I`. The result does not depend on the representation
    /// of the form, so `p` needs no reduction.
    pub fn p(&self) -> DupontForm {
        let n = self.dim();
        let mut result = DupontForm::zero(n);

        for (wedge, poly) in self.terms() {
            for (monomial, c) in poly.terms() {
                let total = monomial.degree() + wedge.len() as u32;
                let denominator = factorial(total);

                for v in (0..=n).filter(|&v| !wedge.contains(v)) {
                    if !monomial.support_within(|i| i == v || wedge.contains(i)) {
                        continue;
                    }

                    let mut vertices = wedge.indices().to_vec();
                    let m = vertices.partition_point(|&j| j < v);
                    vertices.insert(m, v);

                    let numerator = vertices.iter()
                        .map(|&i| factorial(monomial.exponent(i)))
                        .fold(Integer::from(1), |acc, f| acc * f);
                    let mut coeff = Rational::from((numerator, denominator.clone())) * c;
                    if m % 2 == 1 {
                        coeff = -coeff;
                    }

                    result.add_term(Simplex::new_unchecked(vertices), coeff);
                }
            }
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use crate::primitive::rat;
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn function_on_interval() {
        // ∫ at the vertices of t0^2 gives ω0
        let x = SullivanForm::new(1, [("", vec![("2|0", 1)])]).unwrap();
        assert_eq!(x.p(), DupontForm::vertex(1, 0).unwrap());
    }

    #[test]
    fn one_form_on_interval() {
        // ∫_0^1 t0 t1 dt1 = 1/6
        let x = SullivanForm::new(1, [("1", vec![("1|1", 1)])]).unwrap();
        assert_eq!(x.p(), DupontForm::new(1, [("0|1", rat((1, 6)))]).unwrap());
    }

    #[test]
    fn volume_form() {
        // 6 dt1 dt2 integrates to 3 over the triangle
        let x = SullivanForm::new(2, [("1|2", vec![("0|0|0", 6)])]).unwrap();
        assert_eq!(x.p(), DupontForm::new(2, [("0|1|2", 3)]).unwrap());
    }

    #[test]
    fn left_inverse_of_inclusion() {
        for n in 0..=3 {
            for form in DupontForm::basis(n) {
                assert_eq!(form.i().p(), form);
            }
        }
    }

    #[test]
    fn independent_of_representation() {
        // t2 dt2 and its reduction at 2 are the same form
        let x = SullivanForm::new(2, [("2", vec![("0|0|1", 1)])]).unwrap();
        assert_eq!(x.p(), x.reduce(2).unwrap().p());
        assert_eq!(x.p(), x.reduce(0).unwrap().p());
    }
}
