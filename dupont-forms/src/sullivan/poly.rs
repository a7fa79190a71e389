use rug::Rational;
use std::{
    collections::{btree_map::Entry, BTreeMap},
    fmt::{Display, Formatter},
    ops::{AddAssign, Mul, Neg},
};

/// A monomial `t_0^{k_0} ⋯ t_n^{k_n}` in the barycentric coordinates of the `n`-simplex, stored as
/// its exponent vector.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Monomial(Vec<u32>);

impl Monomial {
    /// Creates a monomial from its exponent vector.
    pub fn new(exponents: Vec<u32>) -> Self {
        Self(exponents)
    }

    /// The constant monomial `1` on the `n`-simplex.
    pub fn one(n: usize) -> Self {
        Self(vec![0; n + 1])
    }

    /// The monomial `t_i` on the `n`-simplex.
    pub(crate) fn variable(n: usize, i: usize) -> Self {
        let mut exponents = vec![0; n + 1];
        exponents[i] = 1;
        Self(exponents)
    }

    pub fn exponents(&self) -> &[u32] {
        &self.0
    }

    /// The exponent of `t_i`.
    pub fn exponent(&self, i: usize) -> u32 {
        self.0[i]
    }

    /// The total degree of this monomial.
    pub fn degree(&self) -> u32 {
        self.0.iter().sum()
    }

    /// Returns a copy of this monomial with the exponent of `t_i` replaced.
    pub(crate) fn with_exponent(&self, i: usize, exponent: u32) -> Self {
        let mut exponents = self.0.clone();
        exponents[i] = exponent;
        Self(exponents)
    }

    /// Returns true if every variable with a nonzero exponent satisfies the predicate.
    pub(crate) fn support_within(&self, mut f: impl FnMut(usize) -> bool) -> bool {
        self.0.iter()
            .enumerate()
            .all(|(i, &k)| k == 0 || f(i))
    }
}

impl Mul for &Monomial {
    type Output = Monomial;

    fn mul(self, rhs: Self) -> Monomial {
        Monomial(self.0.iter().zip(&rhs.0).map(|(a, b)| a + b).collect())
    }
}

impl Display for Monomial {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (i, &k) in self.0.iter().enumerate() {
            if k == 0 {
                continue;
            }
            if !first {
                write!(f, " ")?;
            }
            first = false;
            match k {
                1 => write!(f, "t{}", i)?,
                _ => write!(f, "t{}^{}", i, k)?,
            }
        }
        if first {
            write!(f, "1")?;
        }
        Ok(())
    }
}

/// A polynomial in the barycentric coordinates with exact rational coefficients.
///
/// No zero coefficient is ever stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Polynomial {
    terms: BTreeMap<Monomial, Rational>,
}

impl Polynomial {
    /// The zero polynomial.
    pub fn zero() -> Self {
        Self::default()
    }

    /// The polynomial `c · monomial`.
    pub fn monomial(monomial: Monomial, c: Rational) -> Self {
        let mut poly = Self::zero();
        poly.add_term(monomial, c);
        poly
    }

    pub fn is_zero(&self) -> bool {
        self.terms.is_empty()
    }

    /// Iterates over the monomials of this polynomial and their coefficients.
    pub fn terms(&self) -> impl Iterator<Item = (&Monomial, &Rational)> {
        self.terms.iter()
    }

    /// The coefficient of the given monomial.
    pub fn coefficient(&self, monomial: &Monomial) -> Option<&Rational> {
        self.terms.get(monomial)
    }

    /// Adds `c · monomial` to this polynomial.
    pub(crate) fn add_term(&mut self, monomial: Monomial, c: Rational) {
        match self.terms.entry(monomial) {
            Entry::Vacant(entry) => {
                if c != 0 {
                    entry.insert(c);
                }
            },
            Entry::Occupied(mut entry) => {
                *entry.get_mut() += c;
                if *entry.get() == 0 {
                    entry.remove();
                }
            },
        }
    }

    /// Multiplies every coefficient by `c`.
    pub fn scale(&self, c: &Rational) -> Self {
        if *c == 0 {
            return Self::zero();
        }
        Self {
            terms: self.terms.iter()
                .map(|(m, coeff)| (m.clone(), Rational::from(coeff * c)))
                .collect(),
        }
    }

    /// Multiplies every monomial by `monomial`.
    pub(crate) fn shift(&self, monomial: &Monomial) -> Self {
        Self {
            terms: self.terms.iter()
                .map(|(m, coeff)| (m * monomial, coeff.clone()))
                .collect(),
        }
    }

    /// The partial derivative with respect to `t_i`.
    pub fn derivative(&self, i: usize) -> Self {
        let mut result = Self::zero();
        for (m, coeff) in &self.terms {
            let k = m.exponent(i);
            if k > 0 {
                result.add_term(m.with_exponent(i, k - 1), Rational::from(coeff * k));
            }
        }
        result
    }

    /// Evaluates this polynomial at vertex `v`, where `t_v = 1` and every other coordinate is `0`.
    pub fn evaluate_at_vertex(&self, v: usize) -> Rational {
        self.terms.iter()
            .filter(|(m, _)| m.support_within(|i| i == v))
            .fold(Rational::new(), |acc, (_, coeff)| acc + coeff)
    }
}

impl AddAssign<&Polynomial> for Polynomial {
    fn add_assign(&mut self, rhs: &Polynomial) {
        for (m, coeff) in &rhs.terms {
            self.add_term(m.clone(), coeff.clone());
        }
    }
}

impl Mul for &Polynomial {
    type Output = Polynomial;

    fn mul(self, rhs: Self) -> Polynomial {
        let mut result = Polynomial::zero();
        for (a, x) in &self.terms {
            for (b, y) in &rhs.terms {
                result.add_term(a * b, Rational::from(x * y));
            }
        }
        result
    }
}

impl Neg for &Polynomial {
    type Output = Polynomial;

    fn neg(self) -> Polynomial {
        Polynomial {
            terms: self.terms.iter()
                .map(|(m, coeff)| (m.clone(), Rational::from(-coeff)))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::primitive::rat;
    use pretty_assertions::assert_eq;
    use super::*;

    fn mono(exponents: &[u32]) -> Monomial {
        Monomial::new(exponents.to_vec())
    }

    #[test]
    fn cancellation_prunes() {
        let mut p = Polynomial::monomial(mono(&[1, 0]), rat(2));
        p.add_term(mono(&[1, 0]), rat(-2));
        assert!(p.is_zero());

        p.add_term(mono(&[0, 1]), rat(0));
        assert!(p.is_zero());
    }

    #[test]
    fn product() {
        // (t0 + t1)(t0 - t1) = t0^2 - t1^2
        let mut a = Polynomial::monomial(mono(&[1, 0]), rat(1));
        a.add_term(mono(&[0, 1]), rat(1));
        let mut b = Polynomial::monomial(mono(&[1, 0]), rat(1));
        b.add_term(mono(&[0, 1]), rat(-1));

        let mut expected = Polynomial::monomial(mono(&[2, 0]), rat(1));
        expected.add_term(mono(&[0, 2]), rat(-1));
        assert_eq!(&a * &b, expected);
    }

    #[test]
    fn derivative() {
        // d/dt0 (3 t0^2 t1) = 6 t0 t1
        let p = Polynomial::monomial(mono(&[2, 1]), rat(3));
        assert_eq!(p.derivative(0), Polynomial::monomial(mono(&[1, 1]), rat(6)));
        assert!(Polynomial::monomial(mono(&[0, 0]), rat(5)).derivative(1).is_zero());
    }

    #[test]
    fn vertex_values() {
        // 2 t0^3 + 5 t0 t1 - 1
        let mut p = Polynomial::monomial(mono(&[3, 0]), rat(2));
        p.add_term(mono(&[1, 1]), rat(5));
        p.add_term(mono(&[0, 0]), rat(-1));
        assert_eq!(p.evaluate_at_vertex(0), rat(1));
        assert_eq!(p.evaluate_at_vertex(1), rat(-1));
    }

    #[test]
    fn display_monomial() {
        assert_eq!(mono(&[2, 0, 1]).to_string(), "t0^2 t2");
        assert_eq!(mono(&[0, 0]).to_string(), "1");
    }
}
