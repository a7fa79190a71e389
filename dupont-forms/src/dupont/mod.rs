//! Dupont forms: the cellular cochains of the standard `n`-simplex.
//!
//! A [`DupontForm`] is a rational linear combination of the elementary cochains `ω_I`, one for
//! each face `I = [i_0 < ... < i_k]` of the simplex. Under the [inclusion](DupontForm::i), `ω_I`
//! becomes the Whitney elementary form, so Dupont forms are a finite-dimensional model of the
//! Sullivan forms with the same cohomology.
//!
//! At the dictionary boundary a Dupont form is a map from keys such as `0|1` to coefficients. The
//! empty key stands for the unit `1 = ω_0 + ... + ω_n` and is expanded on construction, so the
//! representation of a form is unique and [`PartialEq`] is equality of forms.

mod differential;
mod simplex;

pub use simplex::Simplex;

use crate::{
    error::{ensure_same_dim, ensure_vertex},
    index::{join_key, parse_increasing, parse_indices, sort_with_sign},
};
use dupont_error::Error;
use rug::Rational;
use std::{collections::{btree_map::Entry, BTreeMap}, ops::{Mul, Neg}};

/// A cellular cochain on the `n`-simplex, with exact rational coefficients.
///
/// `==` is structural: forms on different simplices are simply unequal. Use
/// [`DupontForm::try_eq`] to compare with a [`DimensionMismatch`] error in that case.
///
/// [`DimensionMismatch`]: crate::error::DimensionMismatch
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DupontForm {
    n: usize,
    terms: BTreeMap<Simplex, Rational>,
}

impl DupontForm {
    /// Creates a form on the `n`-simplex from a map of keys to coefficients.
    ///
    /// Each key lists the strictly increasing vertices of a face. The empty key denotes the unit
    /// and adds its coefficient to every vertex. Repeated keys are summed.
    ///
    /// ```
    /// use dupont_forms::DupontForm;
    ///
    /// let form = DupontForm::new(2, [("0|1", 1), ("", 2)]).unwrap();
    /// assert_eq!(form.to_map().len(), 4);
    /// ```
    pub fn new<K, C>(n: usize, map: impl IntoIterator<Item = (K, C)>) -> Result<Self, Error>
    where
        K: AsRef<str>,
        Rational: From<C>,
    {
        let mut form = Self::zero(n);
        for (key, c) in map {
            let vertices = parse_increasing(key.as_ref(), n)?;
            form.add_key(vertices, Rational::from(c));
        }
        Ok(form)
    }

    /// Creates a form like [`DupontForm::new`], but the vertices of each key may be listed in any
    /// order.
    ///
    /// The cochains are alternating: each key is sorted, and its coefficient negated if the
    /// sorting permutation is odd. A key listing the same vertex twice denotes zero.
    pub fn from_unordered<K, C>(n: usize, map: impl IntoIterator<Item = (K, C)>) -> Result<Self, Error>
    where
        K: AsRef<str>,
        Rational: From<C>,
    {
        let mut form = Self::zero(n);
        for (key, c) in map {
            let mut vertices = parse_indices(key.as_ref(), n)?;
            let c = Rational::from(c);
            match sort_with_sign(&mut vertices) {
                Some(true) => form.add_key(vertices, -c),
                Some(false) => form.add_key(vertices, c),
                None => {},
            }
        }
        Ok(form)
    }

    /// The zero form on the `n`-simplex.
    pub fn zero(n: usize) -> Self {
        Self { n, terms: BTreeMap::new() }
    }

    /// The unit `ω_0 + ... + ω_n` on the `n`-simplex, whose inclusion is the constant `1`.
    pub fn one(n: usize) -> Self {
        let mut form = Self::zero(n);
        form.add_key(Vec::new(), Rational::from(1));
        form
    }

    /// The vertex cochain `ω_v` on the `n`-simplex.
    pub fn vertex(n: usize, v: usize) -> Result<Self, Error> {
        ensure_vertex("vertex", v, n)?;
        Ok(Self::basis_unchecked(n, Simplex::new_unchecked(vec![v])))
    }

    /// The elementary cochain `ω_I` on the `n`-simplex, where `I` is a strictly increasing list of
    /// vertices given as a key.
    pub fn basis_element(n: usize, key: &str) -> Result<Self, Error> {
        let vertices = parse_increasing(key, n)?;
        if vertices.is_empty() {
            return Ok(Self::one(n));
        }
        Ok(Self::basis_unchecked(n, Simplex::new_unchecked(vertices)))
    }

    /// All `2^{n+1} - 1` elementary cochains of the `n`-simplex, in increasing order of degree.
    pub fn basis(n: usize) -> Vec<Self> {
        Simplex::all(n)
            .map(|simplex| Self::basis_unchecked(n, simplex))
            .collect()
    }

    pub(crate) fn basis_unchecked(n: usize, simplex: Simplex) -> Self {
        let mut form = Self::zero(n);
        form.add_term(simplex, Rational::from(1));
        form
    }

    /// The simplicial dimension `n` of the simplex this form lives on.
    pub fn dim(&self) -> usize {
        self.n
    }

    pub fn is_zero(&self) -> bool {
        self.terms.is_empty()
    }

    /// Iterates over the faces of this form and their coefficients.
    pub fn terms(&self) -> impl Iterator<Item = (&Simplex, &Rational)> {
        self.terms.iter()
    }

    /// The coefficient of `ω_I`, where `I` is given by its vertices.
    pub fn coefficient(&self, vertices: &[usize]) -> Rational {
        self.terms.iter()
            .find(|(simplex, _)| simplex.vertices() == vertices)
            .map(|(_, c)| c.clone())
            .unwrap_or_default()
    }

    /// Converts this form back into a map of keys accepted by [`DupontForm::new`].
    pub fn to_map(&self) -> BTreeMap<String, Rational> {
        self.terms.iter()
            .map(|(simplex, c)| (join_key(simplex.vertices()), c.clone()))
            .collect()
    }

    /// Returns the degree of this form, if all its terms have the same degree.
    ///
    /// Returns [`None`] for the zero form and for forms mixing several degrees.
    pub fn degree(&self) -> Option<usize> {
        let mut degrees = self.terms.keys().map(Simplex::dim);
        let first = degrees.next()?;
        degrees.all(|d| d == first).then_some(first)
    }

    /// Returns the part of this form of degree `k`.
    pub fn homogeneous(&self, k: usize) -> Self {
        Self {
            n: self.n,
            terms: self.terms.iter()
                .filter(|(simplex, _)| simplex.dim() == k)
                .map(|(simplex, c)| (simplex.clone(), c.clone()))
                .collect(),
        }
    }

    /// Adds two forms on the same simplex.
    pub fn try_add(&self, other: &DupontForm) -> Result<DupontForm, Error> {
        ensure_same_dim("add", "C", "+", self.n, other.n)?;
        let mut result = self.clone();
        result.accumulate(other);
        Ok(result)
    }

    /// Subtracts `other` from `self`. Both forms must live on the same simplex.
    pub fn try_sub(&self, other: &DupontForm) -> Result<DupontForm, Error> {
        ensure_same_dim("subtract", "C", "-", self.n, other.n)?;
        let mut result = self.clone();
        result.accumulate(&-other);
        Ok(result)
    }

    /// Compares two forms on the same simplex.
    pub fn try_eq(&self, other: &DupontForm) -> Result<bool, Error> {
        ensure_same_dim("compare", "C", "=", self.n, other.n)?;
        Ok(self.terms == other.terms)
    }

    /// Multiplies this form by the scalar `c`.
    pub fn scale(&self, c: &Rational) -> DupontForm {
        if *c == 0 {
            return Self::zero(self.n);
        }
        Self {
            n: self.n,
            terms: self.terms.iter()
                .map(|(simplex, coeff)| (simplex.clone(), Rational::from(coeff * c)))
                .collect(),
        }
    }

    /// Adds `c` times the cochain of the given vertices, or `c` times the unit if there are none.
    fn add_key(&mut self, vertices: Vec<usize>, c: Rational) {
        if vertices.is_empty() {
            for v in 0..=self.n {
                self.add_term(Simplex::new_unchecked(vec![v]), c.clone());
            }
        } else {
            self.add_term(Simplex::new_unchecked(vertices), c);
        }
    }

    /// Adds `c · ω_simplex` to this form.
    pub(crate) fn add_term(&mut self, simplex: Simplex, c: Rational) {
        match self.terms.entry(simplex) {
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

    /// Adds `other` to this form. Both forms must live on the same simplex.
    pub(crate) fn accumulate(&mut self, other: &DupontForm) {
        debug_assert_eq!(self.n, other.n);
        for (simplex, c) in &other.terms {
            self.add_term(simplex.clone(), c.clone());
        }
    }
}

impl Neg for &DupontForm {
    type Output = DupontForm;

    fn neg(self) -> DupontForm {
        DupontForm {
            n: self.n,
            terms: self.terms.iter()
                .map(|(simplex, c)| (simplex.clone(), Rational::from(-c)))
                .collect(),
        }
    }
}

impl Neg for DupontForm {
    type Output = DupontForm;

    fn neg(self) -> DupontForm {
        -&self
    }
}

impl Mul<&Rational> for &DupontForm {
    type Output = DupontForm;

    fn mul(self, rhs: &Rational) -> DupontForm {
        self.scale(rhs)
    }
}

impl Mul<&Rational> for DupontForm {
    type Output = DupontForm;

    fn mul(self, rhs: &Rational) -> DupontForm {
        self.scale(rhs)
    }
}

#[cfg(test)]
mod tests {
    use crate::error::{DimensionMismatch, IndexOutOfRange, InvalidIndex, NotIncreasing};
    use crate::primitive::rat;
    use pretty_assertions::assert_eq;
    use super::*;

    fn w(n: usize, key: &str) -> DupontForm {
        DupontForm::basis_element(n, key).unwrap()
    }

    #[test]
    fn construct_and_convert_back() {
        let form = DupontForm::new(2, [("0|1", rat((1, 2))), ("1|2", rat(-3)), ("0|1", rat((1, 2)))]).unwrap();
        let map = form.to_map();
        assert_eq!(map.len(), 2);
        assert_eq!(map["0|1"], rat(1));
        assert_eq!(map["1|2"], rat(-3));
        assert_eq!(DupontForm::new(2, map).unwrap(), form);
    }

    #[test]
    fn empty_key_is_the_unit() {
        let form = DupontForm::new(2, [("", 3)]).unwrap();
        let expected = DupontForm::new(2, [("0", 3), ("1", 3), ("2", 3)]).unwrap();
        assert_eq!(form, expected);
        assert_eq!(DupontForm::one(2).scale(&rat(3)), expected);
        assert_eq!(w(2, ""), DupontForm::one(2));
    }

    #[test]
    fn zero_coefficients_are_pruned() {
        let form = DupontForm::new(1, [("0|1", 1), ("0|1", -1), ("0", 0)]).unwrap();
        assert!(form.is_zero());
        assert_eq!(form, DupontForm::zero(1));
    }

    #[test]
    fn malformed_keys() {
        assert!(DupontForm::new(2, [("1|0", 1)]).unwrap_err().is::<NotIncreasing>());
        assert!(DupontForm::new(2, [("0|5", 1)]).unwrap_err().is::<IndexOutOfRange>());
        assert!(DupontForm::new(2, [("a", 1)]).unwrap_err().is::<InvalidIndex>());
        assert!(DupontForm::vertex(2, 3).unwrap_err().is::<IndexOutOfRange>());
    }

    #[test]
    fn unordered_keys_alternate() {
        let form = DupontForm::from_unordered(2, [("2|0|1", 1), ("1|0", 2)]).unwrap();
        let expected = DupontForm::new(2, [("0|1|2", 1), ("0|1", -2)]).unwrap();
        assert_eq!(form, expected);
        assert!(DupontForm::from_unordered(2, [("0|0", 1)]).unwrap().is_zero());
    }

    #[test]
    fn basis() {
        let basis = DupontForm::basis(2);
        assert_eq!(basis.len(), 7);
        assert_eq!(basis[0], DupontForm::vertex(2, 0).unwrap());
        assert_eq!(basis[6], w(2, "0|1|2"));
    }

    #[test]
    fn degrees() {
        let form = w(2, "0").try_add(&w(2, "1|2")).unwrap();
        assert_eq!(form.degree(), None);
        assert_eq!(form.homogeneous(1), w(2, "1|2"));
        assert_eq!(w(2, "0|1|2").degree(), Some(2));
        assert_eq!(DupontForm::zero(2).degree(), None);
    }

    #[test]
    fn arithmetic() {
        let a = w(2, "0|1");
        let b = w(2, "1|2");
        let sum = a.try_add(&b).unwrap();
        assert_eq!(sum.try_sub(&b).unwrap(), a);
        assert_eq!(sum.coefficient(&[1, 2]), rat(1));
        assert_eq!((&sum * &rat((2, 3))).coefficient(&[0, 1]), rat((2, 3)));
        assert!((-&a).try_add(&a).unwrap().is_zero());
    }

    #[test]
    fn dimension_mismatch() {
        let err = w(2, "0").try_add(&w(3, "0")).unwrap_err();
        assert_eq!(
            err.downcast_ref::<DimensionMismatch>(),
            Some(&DimensionMismatch { op: "add", lhs: 2, rhs: 3 }),
        );
        assert_eq!(err.source, "C(2) + C(3)");
    }

    #[test]
    fn compare_on_different_simplices() {
        let a = DupontForm::vertex(2, 0).unwrap();
        assert!(a.try_eq(&a.clone()).unwrap());
        assert!(!a.try_eq(&DupontForm::vertex(2, 1).unwrap()).unwrap());

        let err = a.try_eq(&DupontForm::vertex(3, 0).unwrap()).unwrap_err();
        assert_eq!(
            err.downcast_ref::<DimensionMismatch>(),
            Some(&DimensionMismatch { op: "compare", lhs: 2, rhs: 3 }),
        );
        assert_eq!(err.source, "C(2) = C(3)");
    }
}
