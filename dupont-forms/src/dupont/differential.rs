use super::DupontForm;

impl DupontForm {
    /// The coboundary, computed as `p ∘ d ∘ i`.
    pub fn d(&self) -> DupontForm {
        self.i().d().p()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn w(key: &str) -> DupontForm {
        DupontForm::basis_element(2, key).unwrap()
    }

    #[test]
    fn vertex() {
        // d(ω0) = -ω01 - ω02
        let expected = DupontForm::new(2, [("0|1", -1), ("0|2", -1)]).unwrap();
        assert_eq!(w("0").d(), expected);
    }

    #[test]
    fn edge() {
        assert_eq!(w("0|1").d(), w("0|1|2"));
        assert_eq!(w("0|2").d(), -w("0|1|2"));
        assert!(w("0|1|2").d().is_zero());
    }

    #[test]
    fn unit_is_closed() {
        assert!(DupontForm::one(3).d().is_zero());
    }

    #[test]
    fn square_is_zero() {
        for form in DupontForm::basis(3) {
            assert!(form.d().d().is_zero());
        }
    }
}
