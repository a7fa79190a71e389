//! Sullivan forms: polynomial differential forms on the standard `n`-simplex.
//!
//! # Representation
//!
//! A [`SullivanForm`] on the `n`-simplex `Δ^n` is a sum of terms `f · dt_{j_1} ∧ ... ∧ dt_{j_r}`,
//! where `f` is a [`Polynomial`] in the barycentric coordinates `t_0, ..., t_n` and the wedge of
//! differentials is a [`Wedge`]. Terms are grouped by their wedge, so a form is a map from wedges
//! to polynomials, and each polynomial is a map from exponent vectors to rational coefficients.
//!
//! At the dictionary boundary, this is the nested map
//!
//! ```text
//! { "j_1|...|j_r": { "k_0|...|k_n": coefficient } }
//! ```
//!
//! so that `{"": {"2|1|0": 1}}` on the 2-simplex is `t_0^2 t_1`, and `{"0|1": {"0|0|1": -3}}` is
//! `-3 t_2 dt_0 ∧ dt_1`. No zero coefficient is ever stored, at any level.
//!
//! # Equality
//!
//! The coordinates satisfy `t_0 + ... + t_n = 1` and `dt_0 + ... + dt_n = 0`, so the same form can
//! be written in many ways. The [`PartialEq`] implementation compares representations, and is
//! therefore only meaningful between forms that were [reduced](SullivanForm::reduce) at the same
//! vertex. Use [`SullivanForm::is_equivalent`] to compare forms up to these relations.

mod differential;
mod ops;
mod poly;
mod reduce;
mod wedge;

pub use poly::{Monomial, Polynomial};
pub use wedge::Wedge;

use crate::{error::ensure_vertex, index::{join_key, parse_exponents, parse_increasing, parse_indices, sort_with_sign}};
use dupont_error::Error;
use rug::Rational;
use std::collections::{btree_map::Entry, BTreeMap};

/// A polynomial differential form on the `n`-simplex, with exact rational coefficients.
///
/// `==` is structural, and forms on different simplices are simply unequal.
/// [`SullivanForm::is_equivalent`] is the comparison that checks dimensions and applies the
/// coordinate relations.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SullivanForm {
    n: usize,
    terms: BTreeMap<Wedge, Polynomial>,
}

impl SullivanForm {
    /// Creates a form on the `n`-simplex from a nested map of keys.
    ///
    /// Each outer key lists the strictly increasing indices of the differentials of a term, and
    /// each inner key lists the `n + 1` exponents of a monomial. Repeated keys are summed.
    ///
    /// ```
    /// use dupont_forms::SullivanForm;
    ///
    /// // t0 dt1 - t1 dt0
    /// let form = SullivanForm::new(1, [
    ///     ("0", vec![("0|1", -1)]),
    ///     ("1", vec![("1|0", 1)]),
    /// ]).unwrap();
    /// assert_eq!(form.degree(), Some(1));
    /// ```
    pub fn new<K, P, M, C>(n: usize, map: impl IntoIterator<Item = (K, P)>) -> Result<Self, Error>
    where
        K: AsRef<str>,
        P: IntoIterator<Item = (M, C)>,
        M: AsRef<str>,
        Rational: From<C>,
    {
        let mut form = Self::zero(n);
        for (key, poly) in map {
            let wedge = Wedge::new_unchecked(parse_increasing(key.as_ref(), n)?);
            form.add_poly(wedge, parse_poly(n, poly)?);
        }
        Ok(form)
    }

    /// Creates a form like [`SullivanForm::new`], but the differentials of each outer key may be
    /// listed in any order.
    ///
    /// Each outer key is sorted, and its terms are negated if the sorting permutation is odd. A key
    /// that lists the same differential twice denotes zero.
    pub fn from_unordered<K, P, M, C>(n: usize, map: impl IntoIterator<Item = (K, P)>) -> Result<Self, Error>
    where
        K: AsRef<str>,
        P: IntoIterator<Item = (M, C)>,
        M: AsRef<str>,
        Rational: From<C>,
    {
        let mut form = Self::zero(n);
        for (key, poly) in map {
            let mut indices = parse_indices(key.as_ref(), n)?;
            let poly = parse_poly(n, poly)?;
            match sort_with_sign(&mut indices) {
                Some(true) => form.add_poly(Wedge::new_unchecked(indices), -&poly),
                Some(false) => form.add_poly(Wedge::new_unchecked(indices), poly),
                None => {},
            }
        }
        Ok(form)
    }

    /// The zero form on the `n`-simplex.
    pub fn zero(n: usize) -> Self {
        Self { n, terms: BTreeMap::new() }
    }

    /// The constant form `1` on the `n`-simplex.
    pub fn one(n: usize) -> Self {
        Self::constant(n, Rational::from(1))
    }

    /// The constant form `c` on the `n`-simplex.
    pub fn constant(n: usize, c: Rational) -> Self {
        let mut form = Self::zero(n);
        form.add_term(Wedge::empty(), Monomial::one(n), c);
        form
    }

    /// The coordinate function `t_i` on the `n`-simplex.
    pub fn t(n: usize, i: usize) -> Result<Self, Error> {
        ensure_vertex("t", i, n)?;
        Ok(Self::t_unchecked(n, i))
    }

    /// The differential `dt_i` on the `n`-simplex.
    pub fn dt(n: usize, i: usize) -> Result<Self, Error> {
        ensure_vertex("dt", i, n)?;
        Ok(Self::dt_unchecked(n, i))
    }

    pub(crate) fn t_unchecked(n: usize, i: usize) -> Self {
        let mut form = Self::zero(n);
        form.add_term(Wedge::empty(), Monomial::variable(n, i), Rational::from(1));
        form
    }

    pub(crate) fn dt_unchecked(n: usize, i: usize) -> Self {
        let mut form = Self::zero(n);
        form.add_term(Wedge::new_unchecked(vec![i]), Monomial::one(n), Rational::from(1));
        form
    }

    /// The simplicial dimension `n` of the simplex this form lives on.
    pub fn dim(&self) -> usize {
        self.n
    }

    pub fn is_zero(&self) -> bool {
        self.terms.is_empty()
    }

    /// Iterates over the wedges of this form and their polynomial coefficients.
    pub fn terms(&self) -> impl Iterator<Item = (&Wedge, &Polynomial)> {
        self.terms.iter()
    }

    /// The coefficient of `t^exponents dt_wedge` in this representation of the form.
    pub fn coefficient(&self, wedge: &[usize], exponents: &[u32]) -> Rational {
        self.terms.iter()
            .find(|(w, _)| w.indices() == wedge)
            .and_then(|(_, poly)| poly.coefficient(&Monomial::new(exponents.to_vec())))
            .cloned()
            .unwrap_or_default()
    }

    /// Converts this form back into the nested map of keys accepted by [`SullivanForm::new`].
    pub fn to_map(&self) -> BTreeMap<String, BTreeMap<String, Rational>> {
        self.terms.iter()
            .map(|(wedge, poly)| {
                let inner = poly.terms()
                    .map(|(m, c)| (join_key(m.exponents()), c.clone()))
                    .collect();
                (join_key(wedge.indices()), inner)
            })
            .collect()
    }

    /// Returns the form degree of this form, if all its terms have the same form degree.
    ///
    /// Returns [`None`] for the zero form and for forms mixing several degrees.
    pub fn degree(&self) -> Option<usize> {
        let mut degrees = self.terms.keys().map(Wedge::len);
        let first = degrees.next()?;
        degrees.all(|d| d == first).then_some(first)
    }

    /// Returns the part of this form of form degree `k`.
    pub fn homogeneous(&self, k: usize) -> Self {
        Self {
            n: self.n,
            terms: self.terms.iter()
                .filter(|(wedge, _)| wedge.len() == k)
                .map(|(wedge, poly)| (wedge.clone(), poly.clone()))
                .collect(),
        }
    }

    /// The parity involution, which negates the terms of odd form degree.
    pub(crate) fn parity(&self) -> Self {
        Self {
            n: self.n,
            terms: self.terms.iter()
                .map(|(wedge, poly)| {
                    let poly = if wedge.len() % 2 == 1 { -poly } else { poly.clone() };
                    (wedge.clone(), poly)
                })
                .collect(),
        }
    }

    /// Evaluates the function part of this form at vertex `v`.
    pub fn evaluate_at_vertex(&self, v: usize) -> Result<Rational, Error> {
        ensure_vertex("evaluate_at_vertex", v, self.n)?;
        Ok(self.terms.get(&Wedge::empty())
            .map(|poly| poly.evaluate_at_vertex(v))
            .unwrap_or_default())
    }

    /// Adds `c · t^monomial dt_wedge` to this form.
    pub(crate) fn add_term(&mut self, wedge: Wedge, monomial: Monomial, c: Rational) {
        self.add_poly(wedge, Polynomial::monomial(monomial, c));
    }

    /// Adds `poly · dt_wedge` to this form.
    pub(crate) fn add_poly(&mut self, wedge: Wedge, poly: Polynomial) {
        if poly.is_zero() {
            return;
        }

        match self.terms.entry(wedge) {
            Entry::Vacant(entry) => {
                entry.insert(poly);
            },
            Entry::Occupied(mut entry) => {
                *entry.get_mut() += &poly;
                if entry.get().is_zero() {
                    entry.remove();
                }
            },
        }
    }

    /// Adds `other` to this form. Both forms must live on the same simplex.
    pub(crate) fn accumulate(&mut self, other: &SullivanForm) {
        debug_assert_eq!(self.n, other.n);
        for (wedge, poly) in &other.terms {
            self.add_poly(wedge.clone(), poly.clone());
        }
    }
}

/// Parses the inner map of a term into a polynomial on the `n`-simplex.
fn parse_poly<M, C>(n: usize, poly: impl IntoIterator<Item = (M, C)>) -> Result<Polynomial, Error>
where
    M: AsRef<str>,
    Rational: From<C>,
{
    let mut result = Polynomial::zero();
    for (key, c) in poly {
        let exponents = parse_exponents(key.as_ref(), n)?;
        result.add_term(Monomial::new(exponents), Rational::from(c));
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use crate::error::{ExponentLength, IndexOutOfRange, NotIncreasing};
    use crate::primitive::rat;
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn construct_and_convert_back() {
        let form = SullivanForm::new(2, [
            ("", vec![("2|1|0", rat(1)), ("0|0|0", rat((1, 2)))]),
            ("0|2", vec![("0|1|0", rat(-3))]),
        ]).unwrap();

        let map = form.to_map();
        assert_eq!(map.len(), 2);
        assert_eq!(map[""]["2|1|0"], rat(1));
        assert_eq!(map[""]["0|0|0"], rat((1, 2)));
        assert_eq!(map["0|2"]["0|1|0"], rat(-3));
        assert_eq!(SullivanForm::new(2, map).unwrap(), form);
    }

    #[test]
    fn zero_coefficients_are_pruned() {
        let form = SullivanForm::new(1, [
            ("0", vec![("1|0", 2), ("1|0", -2)]),
            ("1", vec![("0|0", 0)]),
        ]).unwrap();
        assert!(form.is_zero());
        assert_eq!(form, SullivanForm::zero(1));
        assert!(form.to_map().is_empty());
    }

    #[test]
    fn malformed_keys() {
        let err = SullivanForm::new(2, [("1|0", vec![("0|0|0", 1)])]).unwrap_err();
        assert!(err.is::<NotIncreasing>());
        assert_eq!(err.source, "1|0");

        let err = SullivanForm::new(2, [("3", vec![("0|0|0", 1)])]).unwrap_err();
        assert!(err.is::<IndexOutOfRange>());

        let err = SullivanForm::new(2, [("", vec![("0|0", 1)])]).unwrap_err();
        assert!(err.is::<ExponentLength>());
    }

    #[test]
    fn unordered_keys() {
        let form = SullivanForm::from_unordered(2, [("2|0", vec![("0|0|0", 1)])]).unwrap();
        let expected = SullivanForm::new(2, [("0|2", vec![("0|0|0", -1)])]).unwrap();
        assert_eq!(form, expected);

        let form = SullivanForm::from_unordered(2, [("1|1", vec![("0|0|0", 1)])]).unwrap();
        assert!(form.is_zero());
    }

    #[test]
    fn generators() {
        let t1 = SullivanForm::t(2, 1).unwrap();
        assert_eq!(t1.coefficient(&[], &[0, 1, 0]), rat(1));
        let dt2 = SullivanForm::dt(2, 2).unwrap();
        assert_eq!(dt2.coefficient(&[2], &[0, 0, 0]), rat(1));
        assert!(SullivanForm::t(2, 3).unwrap_err().is::<IndexOutOfRange>());
    }

    #[test]
    fn degrees() {
        let form = SullivanForm::new(2, [
            ("", vec![("1|0|0", 1)]),
            ("0|1", vec![("0|0|0", 1)]),
        ]).unwrap();
        assert_eq!(form.degree(), None);
        assert_eq!(form.homogeneous(2).degree(), Some(2));
        assert_eq!(form.homogeneous(0).degree(), Some(0));
        assert!(form.homogeneous(1).is_zero());
        assert_eq!(SullivanForm::zero(2).degree(), None);
    }

    #[test]
    fn parity_negates_odd_part() {
        let form = SullivanForm::new(1, [
            ("", vec![("1|0", 1)]),
            ("0", vec![("0|1", 1)]),
        ]).unwrap();
        let expected = SullivanForm::new(1, [
            ("", vec![("1|0", 1)]),
            ("0", vec![("0|1", -1)]),
        ]).unwrap();
        assert_eq!(form.parity(), expected);
    }

    #[test]
    fn vertex_values() {
        // 1 - t0 + t0 t1
        let form = SullivanForm::new(1, [("", vec![("0|0", 1), ("1|0", -1), ("1|1", 1)])]).unwrap();
        assert_eq!(form.evaluate_at_vertex(0).unwrap(), rat(0));
        assert_eq!(form.evaluate_at_vertex(1).unwrap(), rat(1));
    }
}
