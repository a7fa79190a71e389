use rug::Rational;
use super::SullivanForm;

impl SullivanForm {
    /// The exterior derivative, `d(f dt_J) = Σ_j ∂f/∂t_j dt_j ∧ dt_J`.
    ///
    /// This is a derivation of degree `+1` with `d ∘ d = 0`, and `d` of a constant is zero.
    pub fn d(&self) -> SullivanForm {
        let mut result = SullivanForm::zero(self.n);
        for (wedge, poly) in &self.terms {
            for (monomial, c) in poly.terms() {
                for (j, &k) in monomial.exponents().iter().enumerate() {
                    if k == 0 {
                        continue;
                    }
                    let Some((new_wedge, odd)) = wedge.prepend(j) else {
                        continue;
                    };

                    let mut coeff = Rational::from(c * k);
                    if odd {
                        coeff = -coeff;
                    }
                    result.add_term(new_wedge, monomial.with_exponent(j, k - 1), coeff);
                }
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn derivative_of_function() {
        // d(t0^2 t1) = 2 t0 t1 dt0 + t0^2 dt1
        let x = SullivanForm::new(2, [("", vec![("2|1|0", 1)])]).unwrap();
        let expected = SullivanForm::new(2, [
            ("0", vec![("1|1|0", 2)]),
            ("1", vec![("2|0|0", 1)]),
        ]).unwrap();
        assert_eq!(x.d(), expected);
    }

    #[test]
    fn derivative_of_one_form() {
        // d(t1 dt0) = dt1 ∧ dt0 = -dt0 ∧ dt1
        let x = SullivanForm::new(1, [("0", vec![("0|1", 1)])]).unwrap();
        let expected = SullivanForm::new(1, [("0|1", vec![("0|0", -1)])]).unwrap();
        assert_eq!(x.d(), expected);
    }

    #[test]
    fn constants_are_closed() {
        assert!(SullivanForm::one(3).d().is_zero());
        assert!(SullivanForm::dt(3, 2).unwrap().d().is_zero());
    }

    #[test]
    fn square_is_zero() {
        let x = SullivanForm::new(2, [
            ("", vec![("3|1|2", 5)]),
            ("1", vec![("1|2|1", -2)]),
        ]).unwrap();
        assert!(x.d().d().is_zero());
    }
}
